//! Demo window for the marquee widgets
//!
//! Shows both widget variants side by side: a looping layout-driven
//! marquee, an on-demand-measuring one, and a fixed-width counter that
//! exercises the "unchanged length skips remeasurement" path.

use std::time::Duration;

use iced::widget::{column, container, text};
use iced::{Element, Length, Subscription, Task, Theme};
use marquee_iced::{marquee, on_demand_marquee};

mod config;

use config::DemoConfig;

fn main() -> iced::Result {
    env_logger::init();

    iced::application("Marquee Demo", App::update, App::view)
        .subscription(App::subscription)
        .theme(App::theme)
        .window_size((560.0, 340.0))
        .run_with(App::new)
}

struct App {
    config: DemoConfig,
    ticks: u64,
    completed: u32,
}

#[derive(Debug, Clone)]
enum Message {
    Tick,
    MarqueeFinished,
}

impl App {
    fn new() -> (Self, Task<Message>) {
        let config = DemoConfig::load();
        if let Err(error) = config.save() {
            log::warn!("could not persist demo config: {error}");
        }

        (
            Self {
                config,
                ticks: 0,
                completed: 0,
            },
            Task::none(),
        )
    }

    fn update(&mut self, message: Message) {
        match message {
            Message::Tick => self.ticks += 1,
            Message::MarqueeFinished => {
                self.completed += 1;
                log::info!("marquee finished ({} so far)", self.completed);
            }
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        iced::time::every(Duration::from_secs(1)).map(|_| Message::Tick)
    }

    fn theme(&self) -> Theme {
        Theme::TokyoNight
    }

    fn view(&self) -> Element<'_, Message> {
        let duration = Duration::from_millis(self.config.duration_ms);

        let content = column![
            text("layout-driven:"),
            marquee(self.config.text.clone())
                .duration(duration)
                .repeat(self.config.repeat)
                .auto_start(true)
                .inline(self.config.inline)
                .on_complete(Message::MarqueeFinished),
            text("on-demand measurement:"),
            on_demand_marquee(self.config.text.clone())
                .duration(duration)
                .auto_start(true)
                .start_delay(Duration::from_millis(500))
                .on_complete(Message::MarqueeFinished),
            text("fixed-width counter (length never changes):"),
            marquee(format!("uptime {:06}s", self.ticks)).auto_start(true),
            text(format!("completed scrolls: {}", self.completed)),
        ]
        .spacing(12);

        container(content)
            .padding(16)
            .width(Length::Fill)
            .into()
    }
}

//! Layout-driven marquee widget
//!
//! Widths are captured on every layout pass: the container width from the
//! resolved limits and the text width from the laid-out paragraph. Either
//! width changing recomputes the overflow distance, so the timeline always
//! decides against current measurements. This is the variant to reach for;
//! [`crate::on_demand`] keeps the older imperative-measurement strategy.

use std::fmt;
use std::time::{Duration, Instant};

use iced::advanced::layout::{self, Layout};
use iced::advanced::renderer;
use iced::advanced::text::paragraph::Plain;
use iced::advanced::text::{self, Renderer as _, Text};
use iced::advanced::widget::{Tree, Widget, tree};
use iced::advanced::{Clipboard, Renderer as _, Shell};
use iced::event::{self, Event};
use iced::{
    Color, Element, Font, Length, Pixels, Point, Rectangle, Size, Theme,
    alignment, mouse, window,
};

use marquee_core::{Easing, MarqueeConfig, OverflowMetrics, Redraw, Timeline};

type ParagraphOf = <iced::Renderer as text::Renderer>::Paragraph;

/// Internal widget state: the laid-out paragraph, the last-known widths and
/// the animation timeline. Lives in the widget tree and dies with it, taking
/// every pending deadline along.
struct State {
    paragraph: Plain<ParagraphOf>,
    metrics: OverflowMetrics,
    timeline: Timeline,
    content_len: usize,
}

/// A single-line text label that scrolls horizontally when its content is
/// wider than the space it is given.
pub struct Marquee<Message> {
    content: String,
    config: MarqueeConfig,
    inline: bool,
    width: Length,
    height: Length,
    size: Option<Pixels>,
    font: Option<Font>,
    color: Option<Color>,
    shaping: text::Shaping,
    on_complete: Option<Message>,
}

impl<Message> fmt::Debug for Marquee<Message> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Marquee")
            .field("content", &self.content)
            .field("config", &self.config)
            .field("inline", &self.inline)
            .finish_non_exhaustive()
    }
}

/// Create a [`Marquee`] from its text content.
pub fn marquee<Message>(content: impl Into<String>) -> Marquee<Message> {
    Marquee {
        content: content.into(),
        config: MarqueeConfig::defaults(),
        inline: false,
        width: Length::Fill,
        height: Length::Shrink,
        size: None,
        font: None,
        color: None,
        shaping: text::Shaping::Basic,
        on_complete: None,
    }
}

impl<Message> Marquee<Message> {
    /// Duration of one full scroll. Defaults to three seconds.
    pub fn duration(mut self, duration: Duration) -> Self {
        self.config.duration = duration;
        self
    }

    /// Interpolation curve for the scroll.
    pub fn easing(mut self, easing: Easing) -> Self {
        self.config.easing = easing;
        self
    }

    /// Restart from the beginning after each natural completion.
    pub fn repeat(mut self, repeat: bool) -> Self {
        self.config.repeat = repeat;
        self
    }

    /// Start scrolling as soon as the widget appears.
    pub fn auto_start(mut self, auto_start: bool) -> Self {
        self.config.auto_start = auto_start;
        self
    }

    /// Delay before each run, including restarts after a loop.
    pub fn start_delay(mut self, delay: Duration) -> Self {
        self.config.start_delay = delay;
        self
    }

    /// Delay before snapping back to the start after a run. Values below
    /// 100ms are floored to 100ms.
    pub fn reset_delay(mut self, delay: Duration) -> Self {
        self.config.reset_delay = delay;
        self
    }

    /// Message published exactly once when a non-looping scroll finishes
    /// naturally.
    pub fn on_complete(mut self, message: Message) -> Self {
        self.on_complete = Some(message);
        self
    }

    /// Size the widget to its content instead of filling the available
    /// width. Overflow is still detected against the space the parent
    /// offers.
    pub fn inline(mut self, inline: bool) -> Self {
        self.inline = inline;
        self
    }

    /// Width hint. Ignored when `inline` is set.
    pub fn width(mut self, width: impl Into<Length>) -> Self {
        self.width = width.into();
        self
    }

    /// Height hint.
    pub fn height(mut self, height: impl Into<Length>) -> Self {
        self.height = height.into();
        self
    }

    /// Text size in logical pixels.
    pub fn size(mut self, size: impl Into<Pixels>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Font for the text.
    pub fn font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    /// Text color. Defaults to the ambient text color.
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Shaping strategy for the text.
    pub fn shaping(mut self, shaping: text::Shaping) -> Self {
        self.shaping = shaping;
        self
    }
}

impl<Message> Widget<Message, Theme, iced::Renderer> for Marquee<Message>
where
    Message: Clone,
{
    fn size(&self) -> Size<Length> {
        Size {
            width: if self.inline { Length::Shrink } else { self.width },
            height: self.height,
        }
    }

    fn tag(&self) -> tree::Tag {
        tree::Tag::of::<State>()
    }

    fn state(&self) -> tree::State {
        // Before the first layout pass nothing is measured; assume the
        // content fits so a short label never flickers into motion.
        let mut timeline = Timeline::new(self.config, true);
        if self.config.auto_start {
            timeline.start_animation(Instant::now());
        }

        tree::State::new(State {
            paragraph: Plain::default(),
            metrics: OverflowMetrics::new(),
            timeline,
            content_len: self.content.len(),
        })
    }

    fn diff(&self, tree: &mut Tree) {
        let state = tree.state.downcast_mut::<State>();
        state.timeline.set_config(self.config);

        // Strings of unchanged length (fixed-format counters) deliberately
        // skip invalidation to avoid layout jitter on every tick.
        if state.content_len != self.content.len() {
            state.content_len = self.content.len();
            state.metrics.invalidate();
            state.timeline.invalidate_content(Instant::now());
        }
    }

    fn layout(
        &self,
        tree: &mut Tree,
        renderer: &iced::Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        let state = tree.state.downcast_mut::<State>();

        let width = if self.inline { Length::Shrink } else { self.width };

        layout::sized(limits, width, self.height, |limits| {
            let available = limits.max().width;

            // Lay the paragraph out unconstrained and unwrapped; its
            // natural width is both the scrolling width and the width the
            // text would have if never wrapped.
            state.paragraph.update(Text {
                content: self.content.as_str(),
                bounds: Size::new(f32::INFINITY, limits.max().height),
                size: self.size.unwrap_or_else(|| renderer.default_size()),
                line_height: text::LineHeight::default(),
                font: self.font.unwrap_or_else(|| renderer.default_font()),
                horizontal_alignment: alignment::Horizontal::Left,
                vertical_alignment: alignment::Vertical::Top,
                shaping: self.shaping,
                wrapping: text::Wrapping::None,
            });
            let natural = state.paragraph.min_bounds();

            // Inside an unbounded parent there is nothing to overflow;
            // size to the content instead.
            let container = if self.inline || !available.is_finite() {
                natural.width.min(available)
            } else {
                available
            };

            let mut changed = state.metrics.set_text_width(natural.width);
            changed |= state.metrics.set_full_unwrapped_width(natural.width);
            changed |= state.metrics.set_container_width(container);

            if changed {
                state.timeline.update_distance(state.metrics.distance());
            }

            Size::new(container, natural.height)
        })
    }

    fn on_event(
        &mut self,
        tree: &mut Tree,
        event: Event,
        _layout: Layout<'_>,
        _cursor: mouse::Cursor,
        _renderer: &iced::Renderer,
        _clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Message>,
        _viewport: &Rectangle,
    ) -> event::Status {
        if let Event::Window(window::Event::RedrawRequested(now)) = event {
            let state = tree.state.downcast_mut::<State>();
            let tick = state.timeline.tick(now);

            if tick.completed {
                if let Some(message) = self.on_complete.clone() {
                    shell.publish(message);
                }
            }

            match tick.redraw {
                Some(Redraw::NextFrame) => {
                    shell.request_redraw(window::RedrawRequest::NextFrame);
                }
                Some(Redraw::At(at)) => {
                    shell.request_redraw(window::RedrawRequest::At(at));
                }
                None => {}
            }
        }

        event::Status::Ignored
    }

    fn draw(
        &self,
        tree: &Tree,
        renderer: &mut iced::Renderer,
        _theme: &Theme,
        style: &renderer::Style,
        layout: Layout<'_>,
        _cursor: mouse::Cursor,
        viewport: &Rectangle,
    ) {
        let state = tree.state.downcast_ref::<State>();
        let bounds = layout.bounds();
        let Some(clip) = bounds.intersection(viewport) else {
            return;
        };

        let color = self.color.unwrap_or(style.text_color);
        let position = Point::new(bounds.x + state.timeline.offset(), bounds.y);
        let text_bounds = Rectangle::new(position, state.paragraph.min_bounds());

        if state.metrics.content_fits(true) {
            renderer.fill_paragraph(state.paragraph.raw(), position, color, text_bounds);
        } else {
            // Overflowing text is clipped to the widget's bounds while it
            // scrolls past them.
            renderer.with_layer(clip, |renderer| {
                renderer.fill_paragraph(
                    state.paragraph.raw(),
                    position,
                    color,
                    text_bounds,
                );
            });
        }
    }
}

impl<'a, Message> From<Marquee<Message>> for Element<'a, Message>
where
    Message: Clone + 'a,
{
    fn from(widget: Marquee<Message>) -> Self {
        Element::new(widget)
    }
}

//! Marquee variant with on-demand measurement
//!
//! The original measurement strategy for the marquee: instead of tracking
//! widths on every layout pass, the widget measures imperatively right
//! before the overflow decision (when the timeline's settle deadline
//! fires). Measurement can fail — the widget may not have been laid out
//! yet, or its container may have collapsed to nothing — and failures are
//! absorbed: logged where they are surprising, skipped silently where they
//! are expected, and never allowed past the widget boundary. Prior metrics
//! are retained either way.
//!
//! Prefer [`crate::marquee`] for new code; this variant is kept for hosts
//! that want measurement to happen at a single well-defined point in the
//! cycle.

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

/// Why a measurement attempt produced no widths.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum MeasureError {
    /// The widget has not been laid out yet; there is nothing to measure.
    #[error("widget has not been laid out yet")]
    NotLaidOut,
    /// The container collapsed to a degenerate width.
    #[error("container has a degenerate width of {0}px")]
    DegenerateBounds(f32),
}

struct State {
    paragraph: Plain<ParagraphOf>,
    metrics: OverflowMetrics,
    timeline: Timeline,
    content_len: usize,
    last_bounds: Option<Rectangle>,
}

impl State {
    /// Capture the container and text widths from the last layout. Failures
    /// leave the previously measured metrics untouched.
    fn measure(&mut self) -> Result<(), MeasureError> {
        let bounds = self.last_bounds.ok_or(MeasureError::NotLaidOut)?;
        if bounds.width <= f32::EPSILON {
            return Err(MeasureError::DegenerateBounds(bounds.width));
        }

        let natural = self.paragraph.min_bounds();
        self.metrics.set_text_width(natural.width);
        self.metrics.set_full_unwrapped_width(natural.width);
        self.metrics.set_container_width(bounds.width);
        self.timeline.update_distance(self.metrics.distance());
        Ok(())
    }
}

/// A scrolling text label that measures its content imperatively, once per
/// animation cycle.
pub struct OnDemandMarquee<Message> {
    content: String,
    config: MarqueeConfig,
    width: Length,
    height: Length,
    size: Option<Pixels>,
    font: Option<Font>,
    color: Option<Color>,
    shaping: text::Shaping,
    on_complete: Option<Message>,
}

impl<Message> fmt::Debug for OnDemandMarquee<Message> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnDemandMarquee")
            .field("content", &self.content)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Create an [`OnDemandMarquee`] from its text content.
pub fn on_demand_marquee<Message>(content: impl Into<String>) -> OnDemandMarquee<Message> {
    OnDemandMarquee {
        content: content.into(),
        config: MarqueeConfig::defaults(),
        width: Length::Fill,
        height: Length::Shrink,
        size: None,
        font: None,
        color: None,
        shaping: text::Shaping::Basic,
        on_complete: None,
    }
}

impl<Message> OnDemandMarquee<Message> {
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

    /// Width hint.
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

impl<Message> Widget<Message, Theme, iced::Renderer> for OnDemandMarquee<Message>
where
    Message: Clone,
{
    fn size(&self) -> Size<Length> {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    fn tag(&self) -> tree::Tag {
        tree::Tag::of::<State>()
    }

    fn state(&self) -> tree::State {
        // Nothing has been measured yet; assume overflow so the first cycle
        // always measures before deciding.
        let mut timeline = Timeline::new(self.config, false);
        if self.config.auto_start {
            timeline.start_animation(Instant::now());
        }

        tree::State::new(State {
            paragraph: Plain::default(),
            metrics: OverflowMetrics::new(),
            timeline,
            content_len: self.content.len(),
            last_bounds: None,
        })
    }

    fn diff(&self, tree: &mut Tree) {
        let state = tree.state.downcast_mut::<State>();
        state.timeline.set_config(self.config);

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

        layout::sized(limits, self.width, self.height, |limits| {
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

            let available = limits.max().width;
            let width = if available.is_finite() {
                available
            } else {
                natural.width
            };

            Size::new(width, natural.height)
        })
    }

    fn on_event(
        &mut self,
        tree: &mut Tree,
        event: Event,
        layout: Layout<'_>,
        _cursor: mouse::Cursor,
        _renderer: &iced::Renderer,
        _clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Message>,
        _viewport: &Rectangle,
    ) -> event::Status {
        let state = tree.state.downcast_mut::<State>();
        state.last_bounds = Some(layout.bounds());

        if let Event::Window(window::Event::RedrawRequested(now)) = event {
            if state.timeline.needs_measurement(now) {
                match state.measure() {
                    Ok(()) => {}
                    // Not mounted yet: nothing to measure, try next cycle.
                    Err(MeasureError::NotLaidOut) => {}
                    Err(error) => {
                        log::warn!(
                            "marquee measurement failed: {error}; keeping previous metrics"
                        );
                    }
                }
            }

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

        if state.metrics.content_fits(false) {
            renderer.fill_paragraph(state.paragraph.raw(), position, color, text_bounds);
        } else {
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

impl<'a, Message> From<OnDemandMarquee<Message>> for Element<'a, Message>
where
    Message: Clone + 'a,
{
    fn from(widget: OnDemandMarquee<Message>) -> Self {
        Element::new(widget)
    }
}

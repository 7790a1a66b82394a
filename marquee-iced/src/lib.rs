//! Marquee text widgets for `iced`
//!
//! A marquee is a single-line label that checks whether its content is wider
//! than the space it was given and, if so, scrolls the text horizontally so
//! the whole string comes into view, optionally looping.
//!
//! Two variants of the same component are provided:
//!
//! - [`marquee`] — measurement is layout-driven: widths are captured on
//!   every layout pass and the overflow distance recomputed whenever either
//!   width changes. This is the one to use.
//! - [`on_demand_marquee`] — the older strategy: the widget measures
//!   imperatively right before each overflow decision, and measurement
//!   failures are absorbed without crossing the widget boundary.
//!
//! Both drive the toolkit-independent [`marquee_core::Timeline`]; hosts that
//! need imperative `start_animation` / `stop_animation` control own a
//! `Timeline` directly and feed it measurements from their own layout.

pub mod marquee;
pub mod on_demand;

pub use marquee::{Marquee, marquee};
pub use on_demand::{MeasureError, OnDemandMarquee, on_demand_marquee};

pub use marquee_core::{Easing, MarqueeConfig, OverflowMetrics, Timeline};

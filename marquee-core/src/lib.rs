//! Core state machine for marquee ("scrolling label") text widgets.
//!
//! This crate is toolkit-independent: the host feeds in measured widths
//! (container, text, and full unwrapped text) and the current time, and the
//! [`Timeline`] answers with the horizontal offset to draw at plus a hint for
//! when it next wants to be woken. The `marquee-iced` crate adapts this to
//! `iced`; any toolkit that can measure text and schedule redraws can drive
//! the same machine.
//!
//! Notes
//! - All temporal behavior is expressed through explicit [`std::time::Instant`]
//!   parameters, so every property is testable with synthetic instants.
//! - There is at most one outstanding deadline at any time; scheduling a new
//!   one always replaces the previous one.

pub mod config;
pub mod easing;
pub mod metrics;
pub mod timeline;

pub use config::MarqueeConfig;
pub use easing::Easing;
pub use metrics::OverflowMetrics;
pub use timeline::{MIN_RESET_DELAY, Redraw, SETTLE_DELAY, Tick, Timeline};

//! Static configuration for a marquee instance

use std::time::Duration;

use crate::easing::Easing;

/// Static configuration for a marquee instance. Widgets expose these as
/// builder methods; hosts driving a [`crate::Timeline`] directly pass a
/// config at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarqueeConfig {
    /// Duration of one full scroll from offset 0 to the negative overflow
    /// distance.
    pub duration: Duration,
    /// Interpolation curve for the scroll.
    pub easing: Easing,
    /// Restart from the beginning after a natural completion.
    pub repeat: bool,
    /// Start scrolling as soon as the widget appears.
    pub auto_start: bool,
    /// Delay applied before each run (including restarts after a reset).
    pub start_delay: Duration,
    /// Delay before snapping back to the start position after a run.
    /// Floored to [`crate::MIN_RESET_DELAY`] wherever it is used.
    pub reset_delay: Duration,
}

impl MarqueeConfig {
    /// Defaults matching a typical single-line scrolling label: a three
    /// second ease-in-out scroll, no loop, no auto start, no extra delays.
    pub const fn defaults() -> Self {
        Self {
            duration: Duration::from_millis(3000),
            easing: Easing::EaseInOutCubic,
            repeat: false,
            auto_start: false,
            start_delay: Duration::ZERO,
            reset_delay: Duration::ZERO,
        }
    }
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

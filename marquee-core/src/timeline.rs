//! One-shot scroll animation timeline
//!
//! A [`Timeline`] owns the marquee's animation state: whether it is
//! animating, the measured overflow distance it last saw, the current
//! horizontal offset, and the single pending deadline. The host advances it
//! by calling [`Timeline::tick`] with the current time whenever it redraws,
//! and schedules the next wakeup from the returned [`Redraw`] hint.

use std::time::{Duration, Instant};

use crate::config::MarqueeConfig;

/// Fixed pause between the start delay elapsing and the overflow decision,
/// letting layout stabilize before widths are read.
pub const SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Minimum delay before snapping back to the start position after a run.
/// A configured reset delay below this is floored to it.
pub const MIN_RESET_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    /// Not animating. Offset is 0.
    Idle,
    /// Waiting out the start delay.
    PendingStart { at: Instant },
    /// Waiting out the settle delay; the overflow decision happens when it
    /// fires.
    Settling { at: Instant },
    /// Animating, but the content fit (or was unmeasured) at decision time.
    /// Promotes itself to `Running` if a later measurement shows overflow.
    Armed,
    /// Scrolling from 0 to `-target`. The target is captured at start so a
    /// width change mid-run never retargets the motion.
    Running { started_at: Instant, target: f32 },
    /// Holding the current offset until the reset deadline, then snapping
    /// back to 0 and restarting.
    Resetting { at: Instant },
}

/// When the host should next wake the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    /// Motion is in flight; redraw on the next frame.
    NextFrame,
    /// Nothing moves until this deadline.
    At(Instant),
}

/// Outcome of advancing the timeline by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// A non-looping run finished naturally during this tick. Reported
    /// exactly once per run; interruptions never set it.
    pub completed: bool,
    /// Scheduling hint for the next wakeup, or `None` when the timeline is
    /// at rest.
    pub redraw: Option<Redraw>,
}

impl Tick {
    fn rest() -> Self {
        Self {
            completed: false,
            redraw: None,
        }
    }

    fn at(deadline: Instant) -> Self {
        Self {
            completed: false,
            redraw: Some(Redraw::At(deadline)),
        }
    }

    fn next_frame() -> Self {
        Self {
            completed: false,
            redraw: Some(Redraw::NextFrame),
        }
    }
}

/// The marquee animation state machine.
///
/// Imperative control happens through [`start_animation`], [`stop_animation`]
/// and [`reset_animation`]; measurements arrive through [`update_distance`];
/// time arrives through [`tick`]. Dropping the timeline cancels everything —
/// deadlines are plain values, so no callback can outlive it.
///
/// [`start_animation`]: Timeline::start_animation
/// [`stop_animation`]: Timeline::stop_animation
/// [`reset_animation`]: Timeline::reset_animation
/// [`update_distance`]: Timeline::update_distance
/// [`tick`]: Timeline::tick
#[derive(Debug, Clone)]
pub struct Timeline {
    config: MarqueeConfig,
    phase: Phase,
    offset: f32,
    distance: Option<f32>,
    assume_fits: bool,
}

impl Timeline {
    /// Create a timeline at rest. `assume_fits` is the conservative answer
    /// to "does the content fit?" before the first measurement arrives.
    pub fn new(config: MarqueeConfig, assume_fits: bool) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            offset: 0.0,
            distance: None,
            assume_fits,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &MarqueeConfig {
        &self.config
    }

    /// Replace the configuration. An in-flight run keeps its captured
    /// target; durations and curves are read live.
    pub fn set_config(&mut self, config: MarqueeConfig) {
        self.config = config;
    }

    /// Current horizontal offset to draw the text at, in `0..=-distance`.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Whether a scroll animation is in flight (between the start delay
    /// elapsing and a stop, reset or completion).
    pub fn is_animating(&self) -> bool {
        !matches!(self.phase, Phase::Idle | Phase::PendingStart { .. })
    }

    /// Last overflow distance this timeline was given, if any.
    pub fn distance(&self) -> Option<f32> {
        self.distance
    }

    /// Whether the content currently fits, falling back to the conservative
    /// assumption while unmeasured.
    pub fn content_fits(&self) -> bool {
        self.distance.map_or(self.assume_fits, |d| d <= 0.0)
    }

    /// Feed in a freshly computed overflow distance (or `None` when the
    /// widths are unknown). If the decision already fell on "fits" and the
    /// new distance shows overflow, the next tick starts the motion.
    pub fn update_distance(&mut self, distance: Option<f32>) {
        self.distance = distance;
    }

    /// Begin a scroll cycle: wait out the start delay, settle, measure,
    /// then scroll if the content overflows.
    ///
    /// A no-op while already animating. While the start delay is still
    /// pending, the deadline is replaced — last scheduling wins, so there is
    /// never more than one outstanding timer.
    pub fn start_animation(&mut self, now: Instant) {
        if self.is_animating() {
            return;
        }
        let at = now + self.config.start_delay;
        self.phase = Phase::PendingStart { at };
        log::debug!("marquee start scheduled in {:?}", self.config.start_delay);
    }

    /// Stop immediately: snap the offset back to 0 and drop any pending
    /// deadline. Never reports a completion.
    pub fn stop_animation(&mut self) {
        self.offset = 0.0;
        self.phase = Phase::Idle;
        log::debug!("marquee stopped");
    }

    /// Freeze the current offset, then after the effective reset delay snap
    /// back to 0 and start a new cycle. Interrupting a run this way never
    /// reports a completion.
    pub fn reset_animation(&mut self, now: Instant) {
        let at = now + self.effective_reset_delay();
        self.phase = Phase::Resetting { at };
    }

    /// The displayed content changed: forget the measured distance and
    /// reset, restarting after the reset and start delays.
    pub fn invalidate_content(&mut self, now: Instant) {
        self.distance = None;
        self.reset_animation(now);
    }

    /// True when the settle deadline has elapsed and the overflow decision
    /// is about to be made — the hook for hosts that measure imperatively
    /// rather than on every layout pass.
    pub fn needs_measurement(&self, now: Instant) -> bool {
        matches!(self.phase, Phase::Settling { at } if now >= at)
    }

    /// Advance the timeline to `now`.
    pub fn tick(&mut self, now: Instant) -> Tick {
        match self.phase {
            Phase::Idle => Tick::rest(),
            Phase::PendingStart { at } => {
                if now < at {
                    return Tick::at(at);
                }
                let settle = now + SETTLE_DELAY;
                self.phase = Phase::Settling { at: settle };
                Tick::at(settle)
            }
            Phase::Settling { at } => {
                if now < at {
                    return Tick::at(at);
                }
                self.decide(now)
            }
            Phase::Armed => match self.distance {
                Some(distance) if distance > 0.0 => self.begin_run(now, distance),
                _ => Tick::rest(),
            },
            Phase::Running { started_at, target } => {
                let elapsed = now.saturating_duration_since(started_at);
                if elapsed >= self.config.duration {
                    self.finish_run(now, target)
                } else {
                    let progress =
                        elapsed.as_secs_f32() / self.config.duration.as_secs_f32();
                    self.offset = -target * self.config.easing.apply(progress);
                    Tick::next_frame()
                }
            }
            Phase::Resetting { at } => {
                if now < at {
                    return Tick::at(at);
                }
                self.offset = 0.0;
                let start = now + self.config.start_delay;
                self.phase = Phase::PendingStart { at: start };
                Tick::at(start)
            }
        }
    }

    fn decide(&mut self, now: Instant) -> Tick {
        match self.distance {
            Some(distance) if distance > 0.0 => self.begin_run(now, distance),
            _ => {
                // Content fits (or is unmeasured): stay armed without motion.
                self.phase = Phase::Armed;
                Tick::rest()
            }
        }
    }

    fn begin_run(&mut self, now: Instant, target: f32) -> Tick {
        self.offset = 0.0;
        self.phase = Phase::Running {
            started_at: now,
            target,
        };
        log::debug!("marquee scrolling {target}px over {:?}", self.config.duration);
        Tick::next_frame()
    }

    fn finish_run(&mut self, now: Instant, target: f32) -> Tick {
        if self.config.repeat {
            self.offset = -target;
            let at = now + self.effective_reset_delay();
            self.phase = Phase::Resetting { at };
            Tick::at(at)
        } else {
            self.offset = 0.0;
            self.phase = Phase::Idle;
            log::debug!("marquee finished");
            Tick {
                completed: true,
                redraw: None,
            }
        }
    }

    fn effective_reset_delay(&self) -> Duration {
        self.config.reset_delay.max(MIN_RESET_DELAY)
    }
}

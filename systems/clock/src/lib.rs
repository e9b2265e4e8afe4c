#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Animation clock that owns the wave phase and advances it on a fixed cadence.

use std::time::Duration;

use wave_gauge_core::{Command, Event, Phase};

/// Cadence at which the wave phase advances.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(10);

/// Phase added on every tick.
pub const DEFAULT_PHASE_INCREMENT: f32 = 3.0;

/// Phase magnitude past which the clock wraps back towards zero.
pub const DEFAULT_WRAP_BOUND: f32 = 10_000.0;

/// Configuration parameters required to construct the animation clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    interval: Duration,
    increment: f32,
    wrap_bound: f32,
}

impl Config {
    /// Creates a new configuration using the provided cadence, step and wrap bound.
    #[must_use]
    pub const fn new(interval: Duration, increment: f32, wrap_bound: f32) -> Self {
        Self {
            interval,
            increment,
            wrap_bound,
        }
    }

    /// Time between two phase steps.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Phase added per step.
    #[must_use]
    pub const fn increment(&self) -> f32 {
        self.increment
    }

    /// Phase magnitude past which the clock wraps.
    #[must_use]
    pub const fn wrap_bound(&self) -> f32 {
        self.wrap_bound
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            DEFAULT_INTERVAL,
            DEFAULT_PHASE_INCREMENT,
            DEFAULT_WRAP_BOUND,
        )
    }
}

/// Ticker that advances the wave phase while running.
///
/// The clock never starts or stops itself. It reacts to [`Event::WaveStarted`]
/// and [`Event::WaveStopped`], accumulates [`Event::TimeAdvanced`] deltas and
/// answers with a single [`Command::AdvancePhase`] whenever at least one
/// interval elapsed.
#[derive(Debug)]
pub struct AnimationClock {
    config: Config,
    wrap_bound: f32,
    accumulator: Duration,
    phase: Phase,
    running: bool,
}

impl AnimationClock {
    /// Creates a stopped clock at phase zero.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            wrap_bound: config.wrap_bound,
            accumulator: Duration::ZERO,
            phase: Phase::ZERO,
            running: false,
        }
    }

    /// Starts the clock. The first step fires on the next advance.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.accumulator = self.config.interval;
    }

    /// Stops the clock and discards any partially elapsed interval.
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = Duration::ZERO;
    }

    /// Reports whether the clock is currently advancing the phase.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Phase reached by the most recent step.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Phase magnitude past which the clock currently wraps.
    #[must_use]
    pub const fn wrap_bound(&self) -> f32 {
        self.wrap_bound
    }

    /// Rounds the wrap bound down to a whole number of wave periods.
    ///
    /// Wrapping by a multiple of the period leaves the sampled wave unchanged,
    /// so the animation never jumps. At least one period is always kept.
    pub fn align_to_period(&mut self, period: f32) {
        if !period.is_finite() || period <= 0.0 {
            self.wrap_bound = self.config.wrap_bound;
            return;
        }
        let cycles = (self.config.wrap_bound / period).floor().max(1.0);
        self.wrap_bound = cycles * period;
    }

    /// Accumulates `dt` and performs one phase step per elapsed interval.
    ///
    /// The phase always stays within `0..wrap_bound`.
    ///
    /// Returns the number of steps performed.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if !self.running || self.config.interval.is_zero() {
            return 0;
        }

        self.accumulator = self.accumulator.saturating_add(dt);
        let mut steps = 0;
        while self.accumulator >= self.config.interval {
            self.accumulator -= self.config.interval;
            self.step_phase();
            steps += 1;
        }
        steps
    }

    /// Consumes world events and emits the resulting phase command.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        let mut steps = 0;
        for event in events {
            match event {
                Event::WaveStarted => self.start(),
                Event::WaveStopped => self.stop(),
                Event::GeometryConfigured { geometry } => {
                    self.align_to_period(geometry.wave_period());
                }
                Event::TimeAdvanced { dt } => steps += self.advance(*dt),
                _ => {}
            }
        }

        if steps > 0 {
            out.push(Command::AdvancePhase { phase: self.phase });
        }
    }

    fn step_phase(&mut self) {
        let mut next = self.phase.get() + self.config.increment;
        if self.wrap_bound > 0.0 {
            next = next.rem_euclid(self.wrap_bound);
        }
        self.phase = Phase::new(next);
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

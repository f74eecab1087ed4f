//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter.  The
//! mapping to simulated seconds is held in `StepClock`:
//!
//!   time_secs = tick * step_secs
//!
//! Using an integer tick as the canonical time unit means step arithmetic is
//! exact: `time >= horizon` comparisons never suffer from accumulated
//! floating-point drift, and the scheduler's termination condition is a plain
//! integer comparison.
//!
//! The default step is 1 s (fine enough to resolve bathroom walks); anything
//! finer or coarser is just a different `step_secs`.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation step counter.
///
/// Stored as `u64`: at 1 step/second a u64 lasts ~585 billion years, so
/// overflow is not a practical concern for any flight.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── StepClock ─────────────────────────────────────────────────────────────────

/// Converts between step counts and simulated seconds.
///
/// `StepClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepClock {
    /// Simulated seconds one step represents.  Must be positive and finite.
    pub step_secs: f64,
    /// The current step — advanced by `StepClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl StepClock {
    /// Create a clock at tick 0 with the given step length.
    pub fn new(step_secs: f64) -> Self {
        Self {
            step_secs,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one step.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Simulated seconds at the *start* of the current step.
    #[inline]
    pub fn time_secs(&self) -> f64 {
        self.current_tick.0 as f64 * self.step_secs
    }

}

impl fmt::Display for StepClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1}s)", self.current_tick, self.time_secs())
    }
}

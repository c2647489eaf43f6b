//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a single monotonically increasing `Phase`
//! counter — there is no wall-clock mapping (the simulation has no notion
//! of real time, only phases-per-day/week/month/year ratios, which live in
//! `SimulationConfig`). Using an integer phase as the canonical time unit
//! means all shift/cycle arithmetic is exact and comparisons are O(1).

use std::fmt;

// ── Phase ────────────────────────────────────────────────────────────────────

/// An absolute simulation phase counter.
///
/// Stored as `u64`: at any realistic phases-per-year configuration this
/// never overflows within a run's lifetime.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Phase(pub u64);

impl Phase {
    pub const ZERO: Phase = Phase(0);

    /// Return the phase `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Phase {
        Phase(self.0 + n)
    }

    /// Phases elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Phase) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Phase {
    type Output = Phase;
    #[inline]
    fn add(self, rhs: u64) -> Phase {
        Phase(self.0 + rhs)
    }
}

impl std::ops::Sub for Phase {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Phase) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

// ── PhaseClock ────────────────────────────────────────────────────────────────

/// Drives the phase counter forward one step per tick.
///
/// Cheap to copy and intentionally holds no heap data.
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseClock {
    pub current_phase: Phase,
}

impl PhaseClock {
    pub fn new() -> Self {
        Self { current_phase: Phase::ZERO }
    }

    /// Advance the clock by one phase.
    #[inline]
    pub fn advance(&mut self) {
        self.current_phase = self.current_phase.offset(1);
    }
}

impl fmt::Display for PhaseClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.current_phase)
    }
}

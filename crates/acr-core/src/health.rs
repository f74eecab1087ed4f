//! Passenger health state machine.

use std::fmt;

/// The four-compartment health state of one passenger.
///
/// Transitions are strictly monotonic along
/// `Susceptible → Exposed → Infectious → Removed`; the engine never moves a
/// state backwards.  Cumulative dose is accumulated only while `Susceptible`
/// and frozen thereafter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HealthState {
    #[default]
    Susceptible,
    Exposed,
    Infectious,
    Removed,
}

impl HealthState {
    /// The next state along the S→E→I→R chain, or `None` for `Removed`.
    pub fn next(self) -> Option<HealthState> {
        match self {
            HealthState::Susceptible => Some(HealthState::Exposed),
            HealthState::Exposed => Some(HealthState::Infectious),
            HealthState::Infectious => Some(HealthState::Removed),
            HealthState::Removed => None,
        }
    }

    #[inline]
    pub fn is_susceptible(self) -> bool {
        matches!(self, HealthState::Susceptible)
    }

    /// `true` once the agent has ever been infected (E, I, or R).
    #[inline]
    pub fn is_infected(self) -> bool {
        !self.is_susceptible()
    }

    /// Single-letter code used in CSV output and roster files.
    pub fn code(self) -> &'static str {
        match self {
            HealthState::Susceptible => "S",
            HealthState::Exposed => "E",
            HealthState::Infectious => "I",
            HealthState::Removed => "R",
        }
    }

    /// Parse the single-letter code (case-insensitive).
    pub fn from_code(s: &str) -> Option<HealthState> {
        match s.trim() {
            "S" | "s" => Some(HealthState::Susceptible),
            "E" | "e" => Some(HealthState::Exposed),
            "I" | "i" => Some(HealthState::Infectious),
            "R" | "r" => Some(HealthState::Removed),
            _ => None,
        }
    }
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

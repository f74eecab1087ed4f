//! Per-replicate result record.

use acr_core::{AgentId, HealthState, ReplicateId, SeatId};
use acr_scenario::AgentClass;
use serde::{Deserialize, Serialize};

/// Final outcome of one passenger in one replicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentOutcome {
    /// Roster id (stable across replicates even when seat blocking changes
    /// the run-local indices).
    pub agent: AgentId,
    pub seat: SeatId,
    pub class: AgentClass,
    pub final_state: HealthState,
    /// Cumulative inhaled dose at the end of the run.
    pub dose: f64,
    /// Simulated seconds of the S→E transition, if it happened in-flight.
    pub onset_secs: Option<f64>,
}

/// Everything one completed replicate reports back to the ensemble layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskRecord {
    pub replicate: ReplicateId,
    /// The replicate's RNG seed, recorded for exact replay.
    pub seed: u64,
    /// Steps actually executed.
    pub steps: u64,
    /// Roster agents excluded by seat blocking.
    pub excluded_agents: usize,
    /// Final health-state counts, indexed `[S, E, I, R]`.
    pub state_counts: [usize; 4],
    /// Agents that were infected at boarding (E or I at step 0).
    pub initial_infected: usize,
    /// Per-agent outcomes in roster-id order.
    pub agents: Vec<AgentOutcome>,
    /// Cumulative inhaled dose attributed to each cabin zone, indexed by
    /// `ZoneId`.
    pub zone_exposure: Vec<f64>,
}

impl RiskRecord {
    /// Agents infected during the flight (onset after boarding).
    pub fn in_flight_infections(&self) -> usize {
        self.agents
            .iter()
            .filter(|a| matches!(a.onset_secs, Some(t) if t > 0.0))
            .count()
    }

    /// In-flight infections over agents that boarded susceptible.
    ///
    /// Returns 0 for runs with no susceptible boarders.
    pub fn attack_rate(&self) -> f64 {
        let at_risk = self.agents.len() - self.initial_infected;
        if at_risk == 0 {
            return 0.0;
        }
        self.in_flight_infections() as f64 / at_risk as f64
    }
}

//! Plain data row types written by report backends.

use acr_ensemble::EnsembleSummary;

/// Final outcome of one agent in one replicate.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentOutcomeRow {
    pub replicate: u32,
    pub seed: u64,
    pub agent_id: u32,
    pub seat_id: u32,
    /// Reporting class label (`seated`, `bathroom-visitor`, `crew`).
    pub class: &'static str,
    /// Single-letter health-state code (`S`, `E`, `I`, `R`).
    pub final_state: &'static str,
    pub dose: f64,
    /// Empty when the agent was never exposed in-flight.
    pub onset_secs: Option<f64>,
}

/// Flatten every completed replicate's per-agent outcomes into rows.
pub fn agent_outcome_rows(summary: &EnsembleSummary) -> Vec<AgentOutcomeRow> {
    summary
        .records
        .iter()
        .flat_map(|record| {
            record.agents.iter().map(|a| AgentOutcomeRow {
                replicate: record.replicate.0,
                seed: record.seed,
                agent_id: a.agent.0,
                seat_id: a.seat.0,
                class: a.class.label(),
                final_state: a.final_state.code(),
                dose: a.dose,
                onset_secs: a.onset_secs,
            })
        })
        .collect()
}

/// Column label for a percentile, e.g. `p5` or `p2.5`.
pub fn percentile_label(p: f64) -> String {
    if p.fract() == 0.0 {
        format!("p{}", p as i64)
    } else {
        format!("p{p}")
    }
}

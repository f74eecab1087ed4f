use acr_core::AgentId;
use thiserror::Error;

/// Errors raised while constructing or evaluating the infection model.
#[derive(Debug, Error)]
pub enum InfectionError {
    /// A curve or timer parameter is outside its valid range.
    #[error("invalid infection parameter {what}: {value}")]
    InvalidParameter { what: &'static str, value: f64 },

    /// A dose-response evaluation produced a probability outside [0, 1].
    #[error("dose-response produced invalid probability {probability} for agent {agent} (dose {dose})")]
    InvalidProbability {
        agent: AgentId,
        dose: f64,
        probability: f64,
    },
}

pub type InfectionResult<T> = Result<T, InfectionError>;

//! Error types for acr-agent.

use acr_core::AgentId;
use acr_field::FieldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    /// An agent's trajectory left the concentration field's coverage — a
    /// scenario configuration bug, fatal to the owning replicate.
    #[error("agent {agent} trajectory left field coverage at t={time}s: {source}")]
    TrajectoryOutOfBounds {
        agent: AgentId,
        time: f64,
        source: FieldError,
    },

    /// A computed step dose came out NaN, infinite, or negative.
    #[error("agent {agent} produced invalid step dose {value} at t={time}s")]
    NumericIntegrity {
        agent: AgentId,
        value: f64,
        time: f64,
    },

    #[error("store build error: {0}")]
    Build(String),
}

pub type AgentResult<T> = Result<T, AgentError>;

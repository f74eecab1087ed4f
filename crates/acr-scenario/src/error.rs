//! Error types for acr-scenario.
//!
//! Everything here is a *validation* failure: raised while a scenario is
//! being constructed or loaded, always before any simulation starts, and
//! never partially applied.

use acr_core::AgentId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("invalid scenario configuration: {0}")]
    Validation(String),

    #[error("ventilation_scale must be a positive finite number, got {value}")]
    VentilationScale { value: f64 },

    #[error("mask efficacy for {agent} must be within [0, 1], got {value}")]
    MaskEfficacy { agent: AgentId, value: f64 },

    #[error("no seat at row {row}, column {column}")]
    UnknownSeat { row: u32, column: u32 },

    #[error("agent {0} appears more than once in the roster")]
    DuplicateAgent(AgentId),

    #[error("seat at row {row}, column {column} is assigned to more than one agent")]
    DuplicateSeat { row: u32, column: u32 },

    #[error("roster parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScenarioResult<T> = Result<T, ScenarioError>;

//! Engine-wide base error type.
//!
//! Sub-crates define their own error enums and either convert into
//! `CoreError` via `From` impls or wrap it as one variant.  Both patterns
//! are acceptable; prefer whichever keeps error sites clean.

use thiserror::Error;

use crate::AgentId;

/// The top-level error type for `acr-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    /// A dose, concentration, or probability came out NaN, infinite, or
    /// negative — a modeling bug, fatal to the owning replicate.
    #[error("numeric integrity violation in {what}: {value}{}", fmt_agent(.agent))]
    NumericIntegrity {
        what: &'static str,
        value: f64,
        agent: Option<AgentId>,
    },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn fmt_agent(agent: &Option<AgentId>) -> String {
    match agent {
        Some(a) => format!(" ({a})"),
        None => String::new(),
    }
}

/// Shorthand result type for all `acr-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;

/// Reject non-finite or negative values at a validation boundary.
pub fn ensure_non_negative(
    what: &'static str,
    value: f64,
    agent: Option<AgentId>,
) -> CoreResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::NumericIntegrity { what, value, agent });
    }
    Ok(())
}

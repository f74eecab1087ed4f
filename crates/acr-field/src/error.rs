//! Error types for acr-field.

use acr_core::CabinPoint;
use thiserror::Error;

/// Errors raised at field construction (validation) or query time.
#[derive(Debug, Error)]
pub enum FieldError {
    // ── Construction-time validation ──────────────────────────────────────
    #[error("field has no snapshots")]
    EmptySnapshots,

    #[error("snapshot {index} timestamp {time} does not increase past {prev}")]
    NonMonotonicTimestamps { index: usize, time: f64, prev: f64 },

    #[error("snapshot {index} has {got} cells, grid expects {expected}")]
    SnapshotSizeMismatch {
        index: usize,
        expected: usize,
        got: usize,
    },

    #[error("snapshot {index} cell {cell} holds invalid concentration {value}")]
    InvalidValue {
        index: usize,
        cell: usize,
        value: f64,
    },

    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    // ── Query-time failures ───────────────────────────────────────────────
    /// Position lies outside the spatial domain.  Never extrapolated.
    #[error("position {position} is outside the field domain")]
    OutOfDomain { position: CabinPoint },

    /// Query time lies outside the snapshot coverage `[start, end]`.
    #[error("time {time}s is outside field coverage [{start}s, {end}s]")]
    OutOfCoverage { time: f64, start: f64, end: f64 },

    #[error("integration interval [{t0}s, {t1}s] is reversed or non-finite")]
    InvalidInterval { t0: f64, t1: f64 },
}

/// Alias for `Result<T, FieldError>`.
pub type FieldResult<T> = Result<T, FieldError>;

use acr_scenario::ScenarioError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnsembleError {
    /// The shared scenario was rejected before any replicate started.
    #[error("scenario error: {0}")]
    Scenario(#[from] ScenarioError),

    /// The Rayon worker pool could not be constructed.
    #[error("worker pool construction failed: {0}")]
    WorkerPool(String),

    /// Every replicate failed; there is nothing to summarize.
    #[error("all {replicates} replicates failed (first: {first_error})")]
    AllReplicatesFailed {
        replicates: u32,
        first_error: String,
    },
}

pub type EnsembleResult<T> = Result<T, EnsembleError>;

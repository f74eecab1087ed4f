use acr_agent::AgentError;
use acr_core::Tick;
use acr_infection::InfectionError;
use acr_scenario::ScenarioError;
use thiserror::Error;

/// Errors that terminate a replicate run.
///
/// Step-level failures carry the step at which they occurred; the ensemble
/// layer records the failed replicate and keeps going.
#[derive(Debug, Error)]
pub enum RunError {
    /// Scenario inputs were rejected before the run started.
    #[error("scenario error: {0}")]
    Scenario(#[from] ScenarioError),

    /// Store construction failed before the run started.
    #[error("replicate setup failed: {0}")]
    Setup(AgentError),

    /// The field's snapshots end before the horizon: the step's interval
    /// `[t, t + dt]` is no longer covered.
    #[error("field coverage ends at {end_secs:.1}s, before the step at {step}")]
    FieldExhausted { step: Tick, end_secs: f64 },

    /// The dose phase failed (trajectory left the field, non-finite dose).
    #[error("dose phase failed at {step}: {source}")]
    Dose {
        step: Tick,
        #[source]
        source: AgentError,
    },

    /// The transition phase failed (invalid infection probability).
    #[error("transition phase failed at {step}: {source}")]
    Transition {
        step: Tick,
        #[source]
        source: InfectionError,
    },

    /// Zone aggregation produced a non-finite exposure total.
    #[error("zone exposure became non-finite at {step} (zone {zone}: {value})")]
    ZoneIntegrity { step: Tick, zone: u16, value: f64 },

    /// The run's cancel token was triggered.
    #[error("run cancelled at {step}")]
    Cancelled { step: Tick },

    /// The run exceeded its configured step budget.
    #[error("step budget of {budget} steps exhausted at {step}")]
    StepBudgetExceeded { step: Tick, budget: u64 },

    /// The run exceeded its configured wall-clock budget.
    #[error("wall-clock budget of {budget_secs:.1}s exceeded at {step} ({elapsed_secs:.1}s elapsed)")]
    WallClockExceeded {
        step: Tick,
        budget_secs: f64,
        elapsed_secs: f64,
    },

    /// `run` was called on a replicate that already ran.
    #[error("replicate already ran (phase {phase})")]
    AlreadyRan { phase: &'static str },
}

pub type RunResult<T> = Result<T, RunError>;

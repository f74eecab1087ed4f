//! Top-level scenario configuration and the agent roster entry.
//!
//! `ScenarioConfig` is the explicit immutable parameter object passed into
//! the ensemble runner at construction — there is no process-wide mutable
//! simulation state anywhere in the engine.  Typically deserialized from a
//! TOML/JSON file by the application crate.

use acr_core::{HealthState, SeatId};

use crate::trajectory::TrajectoryKind;
use crate::{ScenarioError, ScenarioResult};

// ── ScenarioConfig ────────────────────────────────────────────────────────────

/// Run geometry and ensemble parameters for one scenario.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ScenarioConfig {
    /// Simulation step length in seconds.  1 s is the stock resolution.
    pub step_secs: f64,

    /// Total simulated seconds per replicate.
    pub horizon_secs: f64,

    /// Number of independent replicate runs in the ensemble.
    pub replicates: u32,

    /// Replicate `i` is seeded with `seed_base + i` — distinct but
    /// reproducible random streams.
    pub seed_base: u64,

    /// Percentiles (0–100) reported per agent class and per zone.
    #[serde(default = "default_percentiles")]
    pub percentiles: Vec<f64>,

    /// Worker thread count for the replicate pool.  `None` uses all logical
    /// cores (with the `parallel` feature; ignored otherwise).
    #[serde(default)]
    pub workers: Option<usize>,

    /// Hard cap on steps per replicate; exceeding it fails that replicate
    /// only.  `None` derives no cap beyond the horizon itself.
    #[serde(default)]
    pub step_budget: Option<u64>,

    /// Wall-clock budget per replicate in seconds; exceeding it fails that
    /// replicate only.
    #[serde(default)]
    pub wall_clock_budget_secs: Option<f64>,
}

fn default_percentiles() -> Vec<f64> {
    vec![5.0, 50.0, 95.0]
}

impl ScenarioConfig {
    /// Fail-fast validation; called by the ensemble runner before any
    /// replicate starts.
    pub fn validate(&self) -> ScenarioResult<()> {
        if !self.step_secs.is_finite() || self.step_secs <= 0.0 {
            return Err(ScenarioError::Validation(format!(
                "step_secs must be positive, got {}",
                self.step_secs
            )));
        }
        if !self.horizon_secs.is_finite() || self.horizon_secs < self.step_secs {
            return Err(ScenarioError::Validation(format!(
                "horizon_secs must be at least one step ({}), got {}",
                self.step_secs, self.horizon_secs
            )));
        }
        if self.replicates == 0 {
            return Err(ScenarioError::Validation(
                "replicates must be at least 1".into(),
            ));
        }
        for &p in &self.percentiles {
            if !p.is_finite() || !(0.0..=100.0).contains(&p) {
                return Err(ScenarioError::Validation(format!(
                    "percentile {p} is outside [0, 100]"
                )));
            }
        }
        if let Some(0) = self.step_budget {
            return Err(ScenarioError::Validation(
                "step_budget of 0 would fail every replicate immediately".into(),
            ));
        }
        if let Some(w) = self.wall_clock_budget_secs
            && (!w.is_finite() || w <= 0.0)
        {
            return Err(ScenarioError::Validation(format!(
                "wall_clock_budget_secs must be positive, got {w}"
            )));
        }
        Ok(())
    }

    /// Number of whole steps per replicate.
    pub fn total_steps(&self) -> u64 {
        (self.horizon_secs / self.step_secs).ceil() as u64
    }
}

// ── AgentSpec ─────────────────────────────────────────────────────────────────

/// One roster entry: where an agent sits and how it behaves.
///
/// The roster index is the agent's id for policy lookups and reports; the
/// store builder assigns dense run-local ids after seat blocking.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct AgentSpec {
    pub seat: SeatId,
    pub kind: TrajectoryKind,
    /// Health state at boarding.  Seeding a few `Infectious` agents matches
    /// how the CFD collaborator places its contamination sources.
    pub initial_state: HealthState,
    /// Non-compliant agents ignore their assigned mask.
    pub compliant: bool,
}

impl AgentSpec {
    pub fn seated(seat: SeatId) -> Self {
        Self {
            seat,
            kind: TrajectoryKind::Stationary,
            initial_state: HealthState::Susceptible,
            compliant: true,
        }
    }
}

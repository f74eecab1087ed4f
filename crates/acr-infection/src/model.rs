use acr_agent::PassengerStore;
use acr_core::{AgentId, HealthState, ReplicateRng};
use serde::{Deserialize, Serialize};

use crate::error::{InfectionError, InfectionResult};
use crate::response::DoseResponse;

/// Holding-time distribution for a timed health-state transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "timer", rename_all = "snake_case")]
pub enum ProgressionTimer {
    /// Deterministic holding time.
    Fixed { secs: f64 },
    /// Exponentially distributed holding time with the given mean.
    Exponential { mean_secs: f64 },
}

impl ProgressionTimer {
    pub fn validate(&self, what: &'static str) -> InfectionResult<()> {
        let value = match *self {
            ProgressionTimer::Fixed { secs } => secs,
            ProgressionTimer::Exponential { mean_secs } => mean_secs,
        };
        if !value.is_finite() || value < 0.0 {
            return Err(InfectionError::InvalidParameter { what, value });
        }
        Ok(())
    }

    /// Draws one holding time in seconds.
    pub fn draw(&self, rng: &mut ReplicateRng) -> f64 {
        match *self {
            ProgressionTimer::Fixed { secs } => secs,
            ProgressionTimer::Exponential { mean_secs } => rng.exp_secs(mean_secs),
        }
    }
}

/// Per-step infection and progression logic for one replicate.
///
/// One transition pass runs after all dose updates of a step, visiting
/// agents in ascending run-local id order so replicated runs consume RNG
/// draws identically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InfectionModel {
    /// Map from cumulative dose to infection probability.
    pub response: DoseResponse,
    /// Holding time in Exposed before turning Infectious.
    pub latent: ProgressionTimer,
    /// Holding time in Infectious before removal.
    pub infectious: ProgressionTimer,
}

impl InfectionModel {
    pub fn new(
        response: DoseResponse,
        latent: ProgressionTimer,
        infectious: ProgressionTimer,
    ) -> InfectionResult<Self> {
        response.validate()?;
        latent.validate("latent period")?;
        infectious.validate("infectious period")?;
        Ok(InfectionModel {
            response,
            latent,
            infectious,
        })
    }

    /// Run one transition pass at simulated time `now_secs`.
    ///
    /// Susceptible agents roll against the dose-response probability of
    /// their cumulative dose; newly exposed agents get a latent timer.
    /// Exposed and Infectious agents whose timer has elapsed advance one
    /// state.  Agents that boarded already infected carry no timer yet and
    /// get one drawn here on first evaluation, anchored at `now_secs`.
    ///
    /// Returns the number of new S -> E exposures this step.
    pub fn step_transitions(
        &self,
        store: &mut PassengerStore,
        now_secs: f64,
        rng: &mut ReplicateRng,
    ) -> InfectionResult<usize> {
        let mut exposures = 0;
        for i in 0..store.count {
            let agent = AgentId(i as u32);
            match store.health[i] {
                HealthState::Susceptible => {
                    let dose = store.dose[i];
                    let p = self.response.probability(dose);
                    if !p.is_finite() {
                        return Err(InfectionError::InvalidProbability {
                            agent,
                            dose,
                            probability: p,
                        });
                    }
                    if rng.uniform() < p {
                        let next_at = now_secs + self.latent.draw(rng);
                        store.transition(agent, now_secs, Some(next_at));
                        exposures += 1;
                    }
                }
                HealthState::Exposed => {
                    match store.next_transition_secs[i] {
                        Some(at) if at <= now_secs => {
                            let next_at = now_secs + self.infectious.draw(rng);
                            store.transition(agent, now_secs, Some(next_at));
                        }
                        Some(_) => {}
                        // Boarded exposed; anchor the latent timer now.
                        None => {
                            store.next_transition_secs[i] =
                                Some(now_secs + self.latent.draw(rng));
                        }
                    }
                }
                HealthState::Infectious => match store.next_transition_secs[i] {
                    Some(at) if at <= now_secs => {
                        store.transition(agent, now_secs, None);
                    }
                    Some(_) => {}
                    None => {
                        store.next_transition_secs[i] =
                            Some(now_secs + self.infectious.draw(rng));
                    }
                },
                HealthState::Removed => {}
            }
        }
        Ok(exposures)
    }
}

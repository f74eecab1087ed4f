//! The exposure step: field integration → policy adjustment → dose update.

use acr_core::AgentId;
use acr_field::FieldSampler;
use acr_scenario::InterventionPolicy;

use crate::store::PassengerStore;
use crate::{AgentError, AgentResult};

impl PassengerStore {
    /// Advance every agent's cumulative dose over the step `[t, t+dt]`.
    ///
    /// For each still-susceptible agent, in ascending id order:
    ///
    /// ```text
    /// step_dose = integrate(position(t), t, t+dt) / ventilation_scale
    ///             * (1 - effective_mask)
    /// ```
    ///
    /// Non-susceptible agents are skipped — their dose is frozen.  Each
    /// agent's step dose is written into `step_doses` (zero for skipped
    /// agents) so the aggregator can attribute it to a zone.
    ///
    /// # Errors
    ///
    /// - [`AgentError::TrajectoryOutOfBounds`] if an agent's position or the
    ///   step interval leaves field coverage — a scenario configuration bug,
    ///   fatal to the run, never retried.
    /// - [`AgentError::NumericIntegrity`] if a step dose comes out NaN,
    ///   infinite, or negative.
    pub fn advance_doses(
        &mut self,
        sampler: &FieldSampler,
        policy: &InterventionPolicy,
        t: f64,
        dt: f64,
        step_doses: &mut [f64],
    ) -> AgentResult<()> {
        debug_assert_eq!(step_doses.len(), self.count);
        let ventilation = policy.ventilation_scale();

        for i in 0..self.count {
            step_doses[i] = 0.0;
            if !self.health[i].is_susceptible() {
                continue;
            }
            let agent = AgentId(i as u32);

            let position = self.trajectories[i].position_at(t);
            let exposure = sampler.integrate(position, t, t + dt).map_err(|source| {
                AgentError::TrajectoryOutOfBounds {
                    agent,
                    time: t,
                    source,
                }
            })?;

            let step_dose = exposure / ventilation * (1.0 - self.effective_mask[i]);
            if !step_dose.is_finite() || step_dose < 0.0 {
                return Err(AgentError::NumericIntegrity {
                    agent,
                    value: step_dose,
                    time: t,
                });
            }

            self.dose[i] += step_dose;
            step_doses[i] = step_dose;
        }

        Ok(())
    }
}

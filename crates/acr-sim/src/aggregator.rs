//! Per-zone exposure accumulation and end-of-run record assembly.

use acr_agent::PassengerStore;
use acr_core::{ReplicateId, Tick};
use acr_scenario::CabinLayout;

use crate::error::{RunError, RunResult};
use crate::record::{AgentOutcome, RiskRecord};

/// Accumulates where inhaled dose was picked up over the course of a run.
///
/// Each step, every agent's fresh step dose is attributed to the cabin zone
/// the agent occupied at the start of that step.  Totals are validated as
/// they grow; a non-finite zone total aborts the replicate rather than
/// silently poisoning the ensemble statistics.
pub struct RiskAggregator {
    zone_exposure: Vec<f64>,
    initial_infected: usize,
}

impl RiskAggregator {
    /// Create an aggregator for a run, capturing the boarding state.
    pub fn new(layout: &CabinLayout, store: &PassengerStore) -> Self {
        RiskAggregator {
            zone_exposure: vec![0.0; layout.zone_count()],
            initial_infected: store.infected_count(),
        }
    }

    pub fn zone_exposure(&self) -> &[f64] {
        &self.zone_exposure
    }

    /// Fold one step's doses into the zone totals.
    ///
    /// `step_doses` is the scratch buffer filled by the dose phase (zero for
    /// non-susceptible agents); `t` is the step's start time, used to locate
    /// each agent.
    pub fn record(
        &mut self,
        store: &PassengerStore,
        step_doses: &[f64],
        layout: &CabinLayout,
        t: f64,
        step: Tick,
    ) -> RunResult<()> {
        for agent in store.agent_ids() {
            let dose = step_doses[agent.index()];
            if dose == 0.0 {
                continue;
            }
            let zone = layout.zone_of(store.position_at(agent, t));
            let total = &mut self.zone_exposure[zone.index()];
            *total += dose;
            if !total.is_finite() {
                return Err(RunError::ZoneIntegrity {
                    step,
                    zone: zone.0,
                    value: *total,
                });
            }
        }
        Ok(())
    }

    /// Assemble the final [`RiskRecord`] from the end-of-run store.
    pub fn finish(
        &self,
        store: &PassengerStore,
        replicate: ReplicateId,
        seed: u64,
        steps: u64,
        excluded_agents: usize,
    ) -> RiskRecord {
        // Run-local order is ascending roster id (builder invariant), so the
        // outcome list comes out roster-ordered for free.
        let agents = store
            .agent_ids()
            .map(|a| {
                let i = a.index();
                AgentOutcome {
                    agent: store.roster_ids[i],
                    seat: store.seats[i],
                    class: store.classes[i],
                    final_state: store.health[i],
                    dose: store.dose[i],
                    onset_secs: store.onset_secs[i],
                }
            })
            .collect();

        RiskRecord {
            replicate,
            seed,
            steps,
            excluded_agents,
            state_counts: store.state_counts(),
            initial_infected: self.initial_infected,
            agents,
            zone_exposure: self.zone_exposure.clone(),
        }
    }
}

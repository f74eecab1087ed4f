//! Scenario bundle and the fluent builder for a [`Run`].

use acr_agent::PassengerStoreBuilder;
use acr_core::{ReplicateId, ReplicateRng};
use acr_field::FieldSampler;
use acr_infection::InfectionModel;
use acr_scenario::{AgentSpec, CabinLayout, InterventionPolicy, ScenarioConfig, ScenarioResult};

use crate::cancel::CancelToken;
use crate::error::{RunError, RunResult};
use crate::run::Run;

/// Everything shared read-only by all replicates of one ensemble.
///
/// Built once, validated once, then borrowed by every [`Run`].
pub struct Scenario {
    pub layout: CabinLayout,
    pub sampler: FieldSampler,
    pub policy: InterventionPolicy,
    pub model: InfectionModel,
    /// Roster in ascending agent-id order.
    pub roster: Vec<AgentSpec>,
    pub config: ScenarioConfig,
}

impl Scenario {
    /// Validate the run configuration.  Layout, sampler, policy, and model
    /// are already validated by their own constructors.
    pub fn validate(&self) -> ScenarioResult<()> {
        self.config.validate()
    }
}

/// Fluent builder for [`Run`].
///
/// # Example
///
/// ```rust,ignore
/// let mut run = RunBuilder::new(ReplicateId(3), &scenario)
///     .cancel(token.clone())
///     .build()?;
/// let record = run.run(&mut NoopObserver)?;
/// ```
pub struct RunBuilder<'a> {
    replicate: ReplicateId,
    scenario: &'a Scenario,
    cancel: Option<CancelToken>,
}

impl<'a> RunBuilder<'a> {
    pub fn new(replicate: ReplicateId, scenario: &'a Scenario) -> Self {
        Self {
            replicate,
            scenario,
            cancel: None,
        }
    }

    /// Attach a cancellation token shared with the ensemble driver.
    ///
    /// If not called, the run gets a private token nobody can trigger.
    pub fn cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Validate the scenario, seed the replicate's RNG stream, materialize
    /// the passenger store, and return a ready-to-run [`Run`].
    ///
    /// The seed is `seed_base + replicate`, so an ensemble's replicates get
    /// consecutive, non-overlapping stream identities and any single
    /// replicate can be replayed in isolation from its recorded seed.
    pub fn build(self) -> RunResult<Run<'a>> {
        let scenario = self.scenario;
        scenario.validate()?;

        let seed = scenario.config.seed_base + u64::from(self.replicate.0);
        let mut rng = ReplicateRng::new(seed);

        let (store, excluded_agents) = PassengerStoreBuilder::new(
            &scenario.layout,
            &scenario.roster,
            &scenario.policy,
            scenario.config.horizon_secs,
        )
        .build(&mut rng)
        .map_err(RunError::Setup)?;

        Ok(Run::new(
            self.replicate,
            seed,
            scenario,
            store,
            rng,
            self.cancel.unwrap_or_default(),
            excluded_agents,
        ))
    }
}

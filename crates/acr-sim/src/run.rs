//! The `Run` struct and its step loop.

use std::fmt;
use std::time::Instant;

use acr_agent::PassengerStore;
use acr_core::{ReplicateId, ReplicateRng, StepClock, Tick};

use crate::aggregator::RiskAggregator;
use crate::builder::Scenario;
use crate::cancel::CancelToken;
use crate::error::{RunError, RunResult};
use crate::observer::RunObserver;
use crate::record::RiskRecord;

// ── RunPhase ─────────────────────────────────────────────────────────────────

/// Lifecycle of one replicate run.
///
/// ```text
/// Initialized ──run()──▶ Running ──▶ Completed
///                           │
///                           └──────▶ Failed
/// ```
///
/// `Completed` and `Failed` are terminal; calling `run` again returns
/// [`RunError::AlreadyRan`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RunPhase {
    Initialized,
    Running,
    Completed,
    Failed,
}

impl RunPhase {
    pub fn name(self) -> &'static str {
        match self {
            RunPhase::Initialized => "initialized",
            RunPhase::Running => "running",
            RunPhase::Completed => "completed",
            RunPhase::Failed => "failed",
        }
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Run ──────────────────────────────────────────────────────────────────────

/// One replicate run: a passenger store, a private RNG stream, and the
/// step loop that drives them to the horizon.
///
/// Create via [`RunBuilder`][crate::RunBuilder].  The scenario is borrowed
/// read-only, so an ensemble can drive many `Run`s off one shared scenario.
pub struct Run<'a> {
    replicate: ReplicateId,
    seed: u64,
    phase: RunPhase,
    clock: StepClock,
    total_steps: u64,
    scenario: &'a Scenario,
    store: PassengerStore,
    rng: ReplicateRng,
    aggregator: RiskAggregator,
    cancel: CancelToken,
    step_budget: Option<u64>,
    wall_clock_budget_secs: Option<f64>,
    /// Scratch buffer reused across steps by the dose phase.
    step_doses: Vec<f64>,
    excluded_agents: usize,
}

impl<'a> Run<'a> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        replicate: ReplicateId,
        seed: u64,
        scenario: &'a Scenario,
        store: PassengerStore,
        rng: ReplicateRng,
        cancel: CancelToken,
        excluded_agents: usize,
    ) -> Self {
        let aggregator = RiskAggregator::new(&scenario.layout, &store);
        let step_doses = vec![0.0; store.count];
        Run {
            replicate,
            seed,
            phase: RunPhase::Initialized,
            clock: StepClock::new(scenario.config.step_secs),
            total_steps: scenario.config.total_steps(),
            scenario,
            store,
            rng,
            aggregator,
            cancel,
            step_budget: scenario.config.step_budget,
            wall_clock_budget_secs: scenario.config.wall_clock_budget_secs,
            step_doses,
            excluded_agents,
        }
    }

    pub fn replicate(&self) -> ReplicateId {
        self.replicate
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Read-only view of the passenger state (useful after a failed run).
    pub fn store(&self) -> &PassengerStore {
        &self.store
    }

    /// Run from step 0 to the horizon and return the replicate's record.
    ///
    /// The loop enforces, in order at each step boundary: cancellation, the
    /// step budget, the wall-clock budget, and field coverage of the step's
    /// interval.  Any phase failure marks the
    /// run [`RunPhase::Failed`] and propagates the error with its step
    /// attached; the ensemble layer records it and moves on.
    pub fn run<O: RunObserver>(&mut self, observer: &mut O) -> RunResult<RiskRecord> {
        if self.phase != RunPhase::Initialized {
            return Err(RunError::AlreadyRan {
                phase: self.phase.name(),
            });
        }
        self.phase = RunPhase::Running;
        let started = Instant::now();

        while self.clock.current_tick.0 < self.total_steps {
            let step = self.clock.current_tick;

            if self.cancel.is_cancelled() {
                self.phase = RunPhase::Failed;
                return Err(RunError::Cancelled { step });
            }
            if let Some(budget) = self.step_budget
                && step.0 >= budget
            {
                self.phase = RunPhase::Failed;
                return Err(RunError::StepBudgetExceeded { step, budget });
            }
            if let Some(budget_secs) = self.wall_clock_budget_secs {
                let elapsed_secs = started.elapsed().as_secs_f64();
                if elapsed_secs > budget_secs {
                    self.phase = RunPhase::Failed;
                    return Err(RunError::WallClockExceeded {
                        step,
                        budget_secs,
                        elapsed_secs,
                    });
                }
            }

            // Coverage is checked per step, not per sample: once every agent
            // has left Susceptible the dose phase stops querying the field,
            // and exhaustion must still fail the run.
            let t = self.clock.time_secs();
            let field = self.scenario.sampler.field();
            if !field.covers_interval(t, t + self.clock.step_secs) {
                self.phase = RunPhase::Failed;
                let (_, end_secs) = field.time_coverage();
                return Err(RunError::FieldExhausted { step, end_secs });
            }

            observer.on_step_start(step);
            let exposures = match self.step(step) {
                Ok(e) => e,
                Err(e) => {
                    self.phase = RunPhase::Failed;
                    return Err(e);
                }
            };
            observer.on_step_end(step, exposures, &self.store);

            self.clock.advance();
        }

        self.phase = RunPhase::Completed;
        observer.on_run_end(self.clock.current_tick);
        Ok(self.aggregator.finish(
            &self.store,
            self.replicate,
            self.seed,
            self.clock.current_tick.0,
            self.excluded_agents,
        ))
    }

    /// One simulation step: doses, then transitions, then zone aggregation.
    ///
    /// Every agent's dose update completes before any transition roll, so
    /// all rolls within a step see the same dose snapshot.  Transitions are
    /// evaluated at the step's *end* time (the dose was inhaled over the
    /// step, so onset cannot precede it).
    fn step(&mut self, step: Tick) -> RunResult<usize> {
        let t = self.clock.time_secs();
        let dt = self.clock.step_secs;
        let scenario = self.scenario;

        self.store
            .advance_doses(
                &scenario.sampler,
                &scenario.policy,
                t,
                dt,
                &mut self.step_doses,
            )
            .map_err(|source| RunError::Dose { step, source })?;

        let exposures = scenario
            .model
            .step_transitions(&mut self.store, t + dt, &mut self.rng)
            .map_err(|source| RunError::Transition { step, source })?;

        self.aggregator
            .record(&self.store, &self.step_doses, &scenario.layout, t, step)?;

        Ok(exposures)
    }
}

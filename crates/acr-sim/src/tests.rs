use acr_core::{HealthState, ReplicateId, Tick};
use acr_field::{ConcentrationField, FieldGrid, FieldSampler, Snapshot, SpatialInterp};
use acr_infection::{DoseResponse, InfectionModel, ProgressionTimer};
use acr_scenario::{AgentSpec, CabinLayout, InterventionPolicy, ScenarioConfig};

use crate::builder::{RunBuilder, Scenario};
use crate::error::RunError;
use crate::observer::{NoopObserver, RunObserver};
use crate::run::RunPhase;

/// A flat field at `value` covering the whole cabin until `t_end`.
fn constant_sampler(value: f64, t_end: f64) -> FieldSampler {
    let layout = CabinLayout::three_three_three();
    let grid = FieldGrid::new(0.0, layout.length_m(), 0.0, layout.width_m(), 8, 4).unwrap();
    let cells = grid.cell_count();
    let field = ConcentrationField::new(
        grid,
        "quanta/m3",
        vec![
            Snapshot::new(0.0, vec![value; cells]),
            Snapshot::new(t_end, vec![value; cells]),
        ],
    )
    .unwrap();
    FieldSampler::new(field, SpatialInterp::NearestCell)
}

fn inert_model() -> InfectionModel {
    // Latent/infectious timers never fire within test horizons.
    InfectionModel::new(
        DoseResponse::exponential_default(),
        ProgressionTimer::Fixed { secs: 1e9 },
        ProgressionTimer::Fixed { secs: 1e9 },
    )
    .unwrap()
}

fn roster_of(n: u32) -> Vec<AgentSpec> {
    let layout = CabinLayout::three_three_three();
    (0..n)
        .map(|i| AgentSpec::seated(layout.seat_at(i / 9, i % 9).unwrap()))
        .collect()
}

fn scenario(field_value: f64, horizon_secs: f64, coverage_secs: f64, n: u32) -> Scenario {
    Scenario {
        layout: CabinLayout::three_three_three(),
        sampler: constant_sampler(field_value, coverage_secs),
        policy: InterventionPolicy::baseline(),
        model: inert_model(),
        roster: roster_of(n),
        config: ScenarioConfig {
            step_secs: 1.0,
            horizon_secs,
            replicates: 1,
            seed_base: 42,
            percentiles: vec![5.0, 50.0, 95.0],
            workers: None,
            step_budget: None,
            wall_clock_budget_secs: None,
        },
    }
}

struct StepCounter {
    steps: u64,
    run_ended: bool,
}

impl RunObserver for StepCounter {
    fn on_step_end(&mut self, _step: Tick, _exposures: usize, _store: &acr_agent::PassengerStore) {
        self.steps += 1;
    }
    fn on_run_end(&mut self, _final_step: Tick) {
        self.run_ended = true;
    }
}

mod lifecycle {
    use super::*;

    #[test]
    fn completed_run_reports_every_step() {
        let sc = scenario(0.0, 60.0, 120.0, 6);
        let mut run = RunBuilder::new(ReplicateId(0), &sc).build().unwrap();
        assert_eq!(run.phase(), RunPhase::Initialized);

        let mut counter = StepCounter {
            steps: 0,
            run_ended: false,
        };
        let record = run.run(&mut counter).unwrap();

        assert_eq!(run.phase(), RunPhase::Completed);
        assert_eq!(record.steps, 60);
        assert_eq!(counter.steps, 60);
        assert!(counter.run_ended);
        assert_eq!(record.agents.len(), 6);
        assert_eq!(record.state_counts, [6, 0, 0, 0]);
    }

    #[test]
    fn second_run_call_is_rejected() {
        let sc = scenario(0.0, 10.0, 20.0, 2);
        let mut run = RunBuilder::new(ReplicateId(0), &sc).build().unwrap();
        run.run(&mut NoopObserver).unwrap();
        assert!(matches!(
            run.run(&mut NoopObserver),
            Err(RunError::AlreadyRan { phase: "completed" })
        ));
    }

    #[test]
    fn fractional_horizon_rounds_up_to_whole_steps() {
        let mut sc = scenario(0.0, 10.5, 20.0, 1);
        sc.config.step_secs = 1.0;
        let mut run = RunBuilder::new(ReplicateId(0), &sc).build().unwrap();
        let record = run.run(&mut NoopObserver).unwrap();
        assert_eq!(record.steps, 11);
    }
}

mod determinism {
    use super::*;

    #[test]
    fn same_replicate_reproduces_the_exact_record() {
        let sc = scenario(5.0, 30.0, 60.0, 12);
        let run_once = || {
            RunBuilder::new(ReplicateId(2), &sc)
                .build()
                .unwrap()
                .run(&mut NoopObserver)
                .unwrap()
        };
        assert_eq!(run_once(), run_once());
    }

    #[test]
    fn replicate_seeds_are_consecutive_from_the_base() {
        let sc = scenario(0.0, 5.0, 10.0, 1);
        for i in 0..4u32 {
            let mut run = RunBuilder::new(ReplicateId(i), &sc).build().unwrap();
            let record = run.run(&mut NoopObserver).unwrap();
            assert_eq!(record.seed, 42 + u64::from(i));
            assert_eq!(record.replicate, ReplicateId(i));
        }
    }
}

mod failure {
    use super::*;

    #[test]
    fn horizon_beyond_field_coverage_fails_the_run() {
        // Field covers [0, 30] but the run needs 60 s; the first step whose
        // interval leaves coverage is [30, 31].
        let sc = scenario(1.0, 60.0, 30.0, 3);
        let mut run = RunBuilder::new(ReplicateId(0), &sc).build().unwrap();
        let err = run.run(&mut NoopObserver).unwrap_err();
        assert!(matches!(err, RunError::FieldExhausted { step: Tick(30), .. }));
        assert_eq!(run.phase(), RunPhase::Failed);
    }

    #[test]
    fn coverage_exhaustion_fails_even_with_no_susceptibles() {
        // A run with nobody left to dose must still notice that the field
        // ended before the horizon.
        let mut sc = scenario(1.0, 10.0, 5.0, 1);
        sc.roster[0].initial_state = HealthState::Removed;
        let mut run = RunBuilder::new(ReplicateId(0), &sc).build().unwrap();
        let err = run.run(&mut NoopObserver).unwrap_err();
        assert!(matches!(
            err,
            RunError::FieldExhausted {
                step: Tick(5),
                end_secs,
            } if end_secs == 5.0
        ));
        assert_eq!(run.phase(), RunPhase::Failed);
    }

    #[test]
    fn pre_cancelled_token_stops_at_step_zero() {
        let sc = scenario(0.0, 60.0, 120.0, 3);
        let token = crate::CancelToken::new();
        token.cancel();
        let mut run = RunBuilder::new(ReplicateId(0), &sc)
            .cancel(token)
            .build()
            .unwrap();
        assert!(matches!(
            run.run(&mut NoopObserver),
            Err(RunError::Cancelled { step: Tick(0) })
        ));
        assert_eq!(run.phase(), RunPhase::Failed);
    }

    #[test]
    fn step_budget_is_enforced() {
        let mut sc = scenario(0.0, 60.0, 120.0, 3);
        sc.config.step_budget = Some(10);
        let mut run = RunBuilder::new(ReplicateId(0), &sc).build().unwrap();
        assert!(matches!(
            run.run(&mut NoopObserver),
            Err(RunError::StepBudgetExceeded {
                step: Tick(10),
                budget: 10
            })
        ));
        assert_eq!(run.phase(), RunPhase::Failed);
    }
}

mod outcomes {
    use super::*;

    #[test]
    fn saturating_field_infects_every_susceptible() {
        // One step of this field saturates the dose-response curve.
        let mut sc = scenario(1.0e6, 30.0, 60.0, 9);
        sc.model = InfectionModel::new(
            DoseResponse::exponential_default(),
            ProgressionTimer::Fixed { secs: 5.0 },
            ProgressionTimer::Fixed { secs: 10.0 },
        )
        .unwrap();
        let mut run = RunBuilder::new(ReplicateId(0), &sc).build().unwrap();
        let record = run.run(&mut NoopObserver).unwrap();

        // Everyone exposed at t = 1, infectious by t = 6, removed by t = 16.
        assert_eq!(record.state_counts, [0, 0, 0, 9]);
        assert_eq!(record.in_flight_infections(), 9);
        assert!((record.attack_rate() - 1.0).abs() < 1e-12);
        for outcome in &record.agents {
            assert_eq!(outcome.onset_secs, Some(1.0));
        }
    }

    #[test]
    fn zone_exposure_totals_match_agent_doses() {
        let sc = scenario(2.0, 30.0, 60.0, 18);
        let mut run = RunBuilder::new(ReplicateId(1), &sc).build().unwrap();
        let record = run.run(&mut NoopObserver).unwrap();

        let agent_total: f64 = record.agents.iter().map(|a| a.dose).sum();
        let zone_total: f64 = record.zone_exposure.iter().sum();
        assert!((agent_total - zone_total).abs() < 1e-9 * agent_total.max(1.0));
        assert_eq!(record.zone_exposure.len(), sc.layout.zone_count());
    }

    #[test]
    fn boarded_infectious_agents_are_not_counted_in_flight() {
        let mut sc = scenario(0.0, 10.0, 20.0, 4);
        sc.roster[0].initial_state = HealthState::Infectious;
        let mut run = RunBuilder::new(ReplicateId(0), &sc).build().unwrap();
        let record = run.run(&mut NoopObserver).unwrap();

        assert_eq!(record.initial_infected, 1);
        assert_eq!(record.in_flight_infections(), 0);
        assert_eq!(record.attack_rate(), 0.0);
    }
}

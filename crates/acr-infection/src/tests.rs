use acr_agent::PassengerStore;
use acr_core::{AgentId, CabinPoint, HealthState, ReplicateRng, SeatId};
use acr_scenario::{AgentClass, Trajectory};

use crate::error::InfectionError;
use crate::model::{InfectionModel, ProgressionTimer};
use crate::response::DoseResponse;

fn store_of(states: &[HealthState], doses: &[f64]) -> PassengerStore {
    assert_eq!(states.len(), doses.len());
    let count = states.len();
    PassengerStore {
        count,
        roster_ids: (0..count as u32).map(AgentId).collect(),
        seats: (0..count as u32).map(SeatId).collect(),
        classes: vec![AgentClass::Seated; count],
        trajectories: (0..count)
            .map(|_| Trajectory::stationary(CabinPoint { x: 1.0, y: 1.0 }))
            .collect(),
        health: states.to_vec(),
        dose: doses.to_vec(),
        effective_mask: vec![0.0; count],
        onset_secs: vec![None; count],
        next_transition_secs: vec![None; count],
    }
}

fn fixed_model(response: DoseResponse) -> InfectionModel {
    InfectionModel::new(
        response,
        ProgressionTimer::Fixed { secs: 10.0 },
        ProgressionTimer::Fixed { secs: 20.0 },
    )
    .unwrap()
}

mod response {
    use super::*;

    #[test]
    fn exponential_matches_closed_form() {
        let curve = DoseResponse::exponential_default();
        assert_eq!(curve.probability(0.0), 0.0);
        let p = curve.probability(10.0);
        assert!((p - (1.0 - (-1.0_f64).exp())).abs() < 1e-12);
    }

    #[test]
    fn hill_reaches_half_at_half_dose() {
        let curve = DoseResponse::Hill {
            half_dose: 5.0,
            exponent: 2.0,
        };
        assert!((curve.probability(5.0) - 0.5).abs() < 1e-12);
        assert_eq!(curve.probability(0.0), 0.0);
    }

    #[test]
    fn both_curves_are_monotone_and_bounded() {
        let curves = [
            DoseResponse::ExponentialSaturating { scale: 0.3 },
            DoseResponse::Hill {
                half_dose: 2.0,
                exponent: 1.5,
            },
        ];
        for curve in curves {
            let mut prev = 0.0;
            for k in 0..200 {
                let dose = k as f64 * 0.25;
                let p = curve.probability(dose);
                assert!((0.0..=1.0).contains(&p), "{curve:?} at {dose}: {p}");
                assert!(p >= prev, "{curve:?} not monotone at {dose}");
                prev = p;
            }
        }
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let bad = [
            DoseResponse::ExponentialSaturating { scale: 0.0 },
            DoseResponse::ExponentialSaturating { scale: f64::NAN },
            DoseResponse::Hill {
                half_dose: -1.0,
                exponent: 2.0,
            },
            DoseResponse::Hill {
                half_dose: 1.0,
                exponent: 0.0,
            },
        ];
        for curve in bad {
            assert!(matches!(
                curve.validate(),
                Err(InfectionError::InvalidParameter { .. })
            ));
        }
    }
}

mod timers {
    use super::*;

    #[test]
    fn fixed_timer_is_deterministic() {
        let mut rng = ReplicateRng::new(7);
        let timer = ProgressionTimer::Fixed { secs: 42.0 };
        assert_eq!(timer.draw(&mut rng), 42.0);
        assert_eq!(timer.draw(&mut rng), 42.0);
    }

    #[test]
    fn exponential_timer_is_non_negative() {
        let mut rng = ReplicateRng::new(11);
        let timer = ProgressionTimer::Exponential { mean_secs: 120.0 };
        for _ in 0..100 {
            let t = timer.draw(&mut rng);
            assert!(t.is_finite() && t >= 0.0);
        }
    }

    #[test]
    fn negative_timer_is_rejected() {
        assert!(
            InfectionModel::new(
                DoseResponse::exponential_default(),
                ProgressionTimer::Fixed { secs: -1.0 },
                ProgressionTimer::Fixed { secs: 1.0 },
            )
            .is_err()
        );
    }
}

mod transitions {
    use super::*;

    #[test]
    fn zero_dose_never_exposes() {
        let model = fixed_model(DoseResponse::exponential_default());
        let mut store = store_of(&[HealthState::Susceptible; 4], &[0.0; 4]);
        let mut rng = ReplicateRng::new(3);
        for step in 0..100 {
            let now = step as f64;
            let exposed = model.step_transitions(&mut store, now, &mut rng).unwrap();
            assert_eq!(exposed, 0);
        }
        assert_eq!(store.state_counts(), [4, 0, 0, 0]);
    }

    #[test]
    fn saturating_dose_exposes_and_stamps_onset() {
        // exp(-0.1 * 1e6) underflows to 0, so p is exactly 1.
        let model = fixed_model(DoseResponse::exponential_default());
        let mut store = store_of(&[HealthState::Susceptible], &[1e6]);
        let mut rng = ReplicateRng::new(5);
        let exposed = model.step_transitions(&mut store, 30.0, &mut rng).unwrap();
        assert_eq!(exposed, 1);
        assert_eq!(store.health[0], HealthState::Exposed);
        assert_eq!(store.onset_secs[0], Some(30.0));
        assert_eq!(store.next_transition_secs[0], Some(40.0));
    }

    #[test]
    fn fixed_timers_walk_the_full_chain() {
        let model = fixed_model(DoseResponse::exponential_default());
        let mut store = store_of(&[HealthState::Susceptible], &[1e6]);
        let mut rng = ReplicateRng::new(1);

        model.step_transitions(&mut store, 0.0, &mut rng).unwrap();
        assert_eq!(store.health[0], HealthState::Exposed);

        // Latent timer fires at t = 10.
        model.step_transitions(&mut store, 9.0, &mut rng).unwrap();
        assert_eq!(store.health[0], HealthState::Exposed);
        model.step_transitions(&mut store, 10.0, &mut rng).unwrap();
        assert_eq!(store.health[0], HealthState::Infectious);
        assert_eq!(store.next_transition_secs[0], Some(30.0));

        // Infectious timer fires at t = 30; Removed is terminal.
        model.step_transitions(&mut store, 30.0, &mut rng).unwrap();
        assert_eq!(store.health[0], HealthState::Removed);
        assert_eq!(store.next_transition_secs[0], None);
        model.step_transitions(&mut store, 60.0, &mut rng).unwrap();
        assert_eq!(store.health[0], HealthState::Removed);
    }

    #[test]
    fn boarded_exposed_gets_timer_on_first_pass() {
        let model = fixed_model(DoseResponse::exponential_default());
        let mut store = store_of(&[HealthState::Exposed], &[0.0]);
        let mut rng = ReplicateRng::new(2);

        model.step_transitions(&mut store, 0.0, &mut rng).unwrap();
        assert_eq!(store.health[0], HealthState::Exposed);
        assert_eq!(store.next_transition_secs[0], Some(10.0));

        model.step_transitions(&mut store, 10.0, &mut rng).unwrap();
        assert_eq!(store.health[0], HealthState::Infectious);
    }

    #[test]
    fn boarded_infectious_gets_timer_on_first_pass() {
        let model = fixed_model(DoseResponse::exponential_default());
        let mut store = store_of(&[HealthState::Infectious], &[0.0]);
        let mut rng = ReplicateRng::new(2);

        model.step_transitions(&mut store, 0.0, &mut rng).unwrap();
        assert_eq!(store.health[0], HealthState::Infectious);
        assert_eq!(store.next_transition_secs[0], Some(20.0));

        model.step_transitions(&mut store, 20.0, &mut rng).unwrap();
        assert_eq!(store.health[0], HealthState::Removed);
    }

    #[test]
    fn same_seed_gives_identical_outcomes() {
        let model = InfectionModel::new(
            DoseResponse::exponential_default(),
            ProgressionTimer::Exponential { mean_secs: 300.0 },
            ProgressionTimer::Exponential { mean_secs: 600.0 },
        )
        .unwrap();
        let doses: Vec<f64> = (0..20).map(|i| i as f64 * 2.0).collect();

        let run = |seed: u64| {
            let mut store = store_of(&[HealthState::Susceptible; 20], &doses);
            let mut rng = ReplicateRng::new(seed);
            for step in 0..50 {
                model
                    .step_transitions(&mut store, step as f64, &mut rng)
                    .unwrap();
            }
            (store.health.clone(), store.onset_secs.clone())
        };

        assert_eq!(run(77), run(77));
        assert_ne!(run(77), run(78)); // different seed, different draws
    }
}

//! Unit tests for cabin geometry, trajectories, policy, and the roster loader.

#[cfg(test)]
mod cabin {
    use acr_core::{CabinPoint, ZoneId};

    use crate::cabin::{CabinLayout, Section};

    #[test]
    fn stock_layout_seat_count() {
        let layout = CabinLayout::three_three_three();
        assert_eq!(layout.seat_count(), 27 * 9);
    }

    #[test]
    fn all_seats_inside_cabin() {
        let layout = CabinLayout::three_three_three();
        for seat in layout.seats() {
            let p = seat.position;
            assert!(p.x > 0.0 && p.x < layout.length_m(), "seat {} x", seat.id);
            assert!(p.y > 0.0 && p.y < layout.width_m(), "seat {} y", seat.id);
        }
    }

    #[test]
    fn sections_split_at_middle_bathroom() {
        let layout = CabinLayout::three_three_three();
        let front_seats = layout
            .seats()
            .iter()
            .filter(|s| s.section == Section::Front)
            .count();
        assert_eq!(front_seats, 13 * 9);
        for seat in layout.seats() {
            assert_eq!(layout.section_of_x(seat.position.x), seat.section);
        }
    }

    #[test]
    fn seat_lookup_by_grid() {
        let layout = CabinLayout::three_three_three();
        let id = layout.seat_at(0, 0).unwrap();
        let seat = layout.seat(id);
        assert_eq!((seat.row, seat.column), (0, 0));
        assert!(layout.seat_at(99, 0).is_err());
    }

    #[test]
    fn zone_partitioning() {
        let layout = CabinLayout::three_three_three();
        assert_eq!(layout.zone_count(), 6);

        // Every seat maps to a valid zone, and its band matches its column.
        for seat in layout.seats() {
            let zone = layout.zone_of(seat.position);
            assert!(zone.index() < layout.zone_count());
            let band = seat.column / 3;
            assert_eq!(zone.index() % 3, band as usize, "seat {}", seat.id);
        }
    }

    #[test]
    fn zone_labels() {
        let layout = CabinLayout::three_three_three();
        assert_eq!(layout.zone_label(ZoneId(0)), "front-left");
        assert_eq!(layout.zone_label(ZoneId(4)), "rear-middle");
        assert_eq!(layout.zone_label(ZoneId(5)), "rear-right");
    }

    #[test]
    fn nearest_aisle() {
        let layout = CabinLayout::three_three_three();
        let aisles = layout.aisle_ys();
        assert_eq!(layout.nearest_aisle_y(0.0), aisles[0]);
        assert_eq!(layout.nearest_aisle_y(layout.width_m()), aisles[1]);
    }

    #[test]
    fn bathrooms_inside_cabin() {
        let layout = CabinLayout::three_three_three();
        for b in [layout.middle_bathroom(), layout.rear_bathroom()] {
            assert!(b.x > 0.0 && b.x < layout.length_m());
            assert!(b.y > 0.0 && b.y < layout.width_m());
        }
        assert!(layout.rear_bathroom().x > layout.middle_bathroom().x);
        let _ = CabinPoint::new(0.0, 0.0);
    }
}

#[cfg(test)]
mod trajectory {
    use acr_core::{CabinPoint, ReplicateRng};

    use crate::cabin::CabinLayout;
    use crate::trajectory::{self, AgentClass, Trajectory, TrajectoryKind, Waypoint};

    fn layout() -> CabinLayout {
        CabinLayout::three_three_three()
    }

    #[test]
    fn stationary_never_moves() {
        let seat = CabinPoint::new(10.0, 1.0);
        let traj = Trajectory::stationary(seat);
        for t in [0.0, 100.0, 1e6] {
            assert_eq!(traj.position_at(t), seat);
        }
        assert!(traj.is_stationary());
    }

    #[test]
    fn position_interpolates_between_waypoints() {
        let traj = Trajectory::from_waypoints(vec![
            Waypoint {
                time_secs: 0.0,
                position: CabinPoint::new(0.0, 0.0),
            },
            Waypoint {
                time_secs: 10.0,
                position: CabinPoint::new(10.0, 0.0),
            },
        ]);
        let p = traj.position_at(2.5);
        assert!((p.x - 2.5).abs() < 1e-12);
        // Clamped outside the span.
        assert_eq!(traj.position_at(-5.0).x, 0.0);
        assert_eq!(traj.position_at(50.0).x, 10.0);
    }

    #[test]
    fn bathroom_visitor_returns_to_seat() {
        let layout = layout();
        let seat = layout.seat(layout.seat_at(3, 0).unwrap()).position;
        let mut rng = ReplicateRng::new(42);
        // High trip rate so the horizon surely contains at least one trip.
        let kind = TrajectoryKind::BathroomVisitor {
            trips_per_sec: 0.01,
            dwell_secs: 30.0,
        };
        let traj = trajectory::generate(kind, seat, &layout, 3600.0, &mut rng);
        assert!(!traj.is_stationary(), "expected at least one trip");

        let last = traj.waypoints().last().unwrap();
        assert_eq!(last.position, seat, "trips must end back at the seat");
    }

    #[test]
    fn walkers_stay_inside_cabin() {
        let layout = layout();
        let seat = layout.seat(layout.seat_at(20, 8).unwrap()).position;
        let mut rng = ReplicateRng::new(7);
        let kind = TrajectoryKind::BathroomVisitor {
            trips_per_sec: 0.01,
            dwell_secs: 30.0,
        };
        let traj = trajectory::generate(kind, seat, &layout, 3600.0, &mut rng);
        for wp in traj.waypoints() {
            assert!(wp.position.x >= 0.0 && wp.position.x <= layout.length_m());
            assert!(wp.position.y >= 0.0 && wp.position.y <= layout.width_m());
        }
    }

    #[test]
    fn crew_patrol_covers_both_ends() {
        let layout = layout();
        let mut rng = ReplicateRng::new(1);
        let traj = trajectory::generate(
            TrajectoryKind::CrewPatrol { dwell_secs: 60.0 },
            CabinPoint::new(1.0, 1.0),
            &layout,
            3600.0,
            &mut rng,
        );
        let max_x = traj
            .waypoints()
            .iter()
            .map(|w| w.position.x)
            .fold(f64::MIN, f64::max);
        let min_x = traj
            .waypoints()
            .iter()
            .map(|w| w.position.x)
            .fold(f64::MAX, f64::min);
        assert!(max_x > layout.length_m() * 0.9, "patrol reaches the tail");
        assert!(min_x < layout.length_m() * 0.1, "patrol reaches the nose");
    }

    #[test]
    fn generation_is_deterministic_per_seed() {
        let layout = layout();
        let seat = layout.seat(layout.seat_at(5, 2).unwrap()).position;
        let kind = TrajectoryKind::bathroom_default();

        let build = |seed: u64| {
            let mut rng = ReplicateRng::new(seed);
            trajectory::generate(kind, seat, &layout, 3600.0, &mut rng)
        };
        let a = build(99);
        let b = build(99);
        assert_eq!(a.waypoints().len(), b.waypoints().len());
        for (x, y) in a.waypoints().iter().zip(b.waypoints()) {
            assert_eq!(x.time_secs, y.time_secs);
            assert_eq!(x.position, y.position);
        }
    }

    #[test]
    fn kind_to_class() {
        assert_eq!(TrajectoryKind::Stationary.class(), AgentClass::Seated);
        assert_eq!(
            TrajectoryKind::bathroom_default().class(),
            AgentClass::BathroomVisitor
        );
        assert_eq!(TrajectoryKind::crew_default().class(), AgentClass::Crew);
        assert_eq!(AgentClass::Crew.label(), "crew");
    }
}

#[cfg(test)]
mod policy {
    use std::collections::{HashMap, HashSet};

    use acr_core::{AgentId, SeatId};

    use crate::policy::InterventionPolicy;
    use crate::ScenarioError;

    #[test]
    fn baseline_is_neutral() {
        let p = InterventionPolicy::baseline();
        assert_eq!(p.ventilation_scale(), 1.0);
        assert_eq!(p.mask_for(AgentId(0)), 0.0);
        assert!(!p.is_seat_blocked(SeatId(0)));
    }

    #[test]
    fn ventilation_scale_must_be_positive() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err =
                InterventionPolicy::new(bad, HashMap::new(), HashSet::new()).unwrap_err();
            assert!(matches!(err, ScenarioError::VentilationScale { .. }));
        }
    }

    #[test]
    fn mask_efficacy_range_checked() {
        let mut masks = HashMap::new();
        masks.insert(AgentId(3), 1.5);
        let err = InterventionPolicy::new(1.0, masks, HashSet::new()).unwrap_err();
        assert!(matches!(
            err,
            ScenarioError::MaskEfficacy {
                agent: AgentId(3),
                ..
            }
        ));
    }

    #[test]
    fn uniform_masks_apply_to_listed_agents_only() {
        let p = InterventionPolicy::uniform_masks([AgentId(0), AgentId(2)], 0.5).unwrap();
        assert_eq!(p.mask_for(AgentId(0)), 0.5);
        assert_eq!(p.mask_for(AgentId(1)), 0.0);
        assert_eq!(p.mask_for(AgentId(2)), 0.5);
    }

    #[test]
    fn blocked_seats_reported() {
        let blocked: HashSet<_> = [SeatId(5), SeatId(9)].into_iter().collect();
        let p = InterventionPolicy::new(2.0, HashMap::new(), blocked).unwrap();
        assert!(p.is_seat_blocked(SeatId(5)));
        assert!(!p.is_seat_blocked(SeatId(6)));
        assert_eq!(p.blocked_seat_count(), 2);
    }
}

#[cfg(test)]
mod config {
    use crate::config::ScenarioConfig;

    fn valid() -> ScenarioConfig {
        ScenarioConfig {
            step_secs: 1.0,
            horizon_secs: 3600.0,
            replicates: 10,
            seed_base: 42,
            percentiles: vec![5.0, 50.0, 95.0],
            workers: None,
            step_budget: None,
            wall_clock_budget_secs: None,
        }
    }

    #[test]
    fn valid_config_passes() {
        valid().validate().unwrap();
    }

    #[test]
    fn bad_step_rejected() {
        let mut c = valid();
        c.step_secs = 0.0;
        assert!(c.validate().is_err());
        c.step_secs = f64::NAN;
        assert!(c.validate().is_err());
    }

    #[test]
    fn horizon_must_cover_one_step() {
        let mut c = valid();
        c.horizon_secs = 0.5;
        assert!(c.validate().is_err());
    }

    #[test]
    fn zero_replicates_rejected() {
        let mut c = valid();
        c.replicates = 0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn percentiles_bounded() {
        let mut c = valid();
        c.percentiles = vec![101.0];
        assert!(c.validate().is_err());
    }

    #[test]
    fn total_steps_rounds_up() {
        let mut c = valid();
        c.horizon_secs = 10.0;
        assert_eq!(c.total_steps(), 10);
        c.horizon_secs = 10.5;
        assert_eq!(c.total_steps(), 11);
    }
}

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use acr_core::HealthState;

    use crate::cabin::CabinLayout;
    use crate::loader::load_roster_reader;
    use crate::trajectory::TrajectoryKind;
    use crate::ScenarioError;

    const ROSTER: &str = "\
agent_id,row,column,role,initial_state,compliant\n\
0,0,0,seated,S,1\n\
1,0,1,bathroom,S,1\n\
2,3,4,seated,I,1\n\
3,12,8,crew,S,0\n\
";

    #[test]
    fn loads_well_formed_roster() {
        let layout = CabinLayout::three_three_three();
        let roster = load_roster_reader(Cursor::new(ROSTER), &layout).unwrap();
        assert_eq!(roster.len(), 4);
        assert!(matches!(roster[0].kind, TrajectoryKind::Stationary));
        assert!(matches!(
            roster[1].kind,
            TrajectoryKind::BathroomVisitor { .. }
        ));
        assert_eq!(roster[2].initial_state, HealthState::Infectious);
        assert!(!roster[3].compliant);
    }

    #[test]
    fn duplicate_agent_rejected() {
        let csv = "\
agent_id,row,column,role,initial_state,compliant\n\
0,0,0,seated,S,1\n\
0,0,1,seated,S,1\n\
";
        let layout = CabinLayout::three_three_three();
        let err = load_roster_reader(Cursor::new(csv), &layout).unwrap_err();
        assert!(matches!(err, ScenarioError::DuplicateAgent(_)));
    }

    #[test]
    fn duplicate_seat_rejected() {
        let csv = "\
agent_id,row,column,role,initial_state,compliant\n\
0,0,0,seated,S,1\n\
1,0,0,seated,S,1\n\
";
        let layout = CabinLayout::three_three_three();
        let err = load_roster_reader(Cursor::new(csv), &layout).unwrap_err();
        assert!(matches!(err, ScenarioError::DuplicateSeat { .. }));
    }

    #[test]
    fn sparse_ids_rejected() {
        let csv = "\
agent_id,row,column,role,initial_state,compliant\n\
0,0,0,seated,S,1\n\
2,0,1,seated,S,1\n\
";
        let layout = CabinLayout::three_three_three();
        let err = load_roster_reader(Cursor::new(csv), &layout).unwrap_err();
        assert!(matches!(err, ScenarioError::Validation(_)));
    }

    #[test]
    fn unknown_seat_and_role_rejected() {
        let layout = CabinLayout::three_three_three();
        let bad_seat = "\
agent_id,row,column,role,initial_state,compliant\n\
0,99,0,seated,S,1\n\
";
        assert!(matches!(
            load_roster_reader(Cursor::new(bad_seat), &layout).unwrap_err(),
            ScenarioError::UnknownSeat { row: 99, .. }
        ));

        let bad_role = "\
agent_id,row,column,role,initial_state,compliant\n\
0,0,0,lounging,S,1\n\
";
        assert!(matches!(
            load_roster_reader(Cursor::new(bad_role), &layout).unwrap_err(),
            ScenarioError::Parse(_)
        ));
    }
}

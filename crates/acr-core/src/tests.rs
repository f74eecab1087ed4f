//! Unit tests for acr-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, SeatId, ZoneId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(AgentId(0) < AgentId(1));
        assert!(SeatId(100) > SeatId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(SeatId::INVALID.0, u32::MAX);
        assert_eq!(ZoneId::INVALID.0, u16::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod point {
    use crate::CabinPoint;

    #[test]
    fn zero_distance() {
        let p = CabinPoint::new(20.0, 3.0);
        assert_eq!(p.distance_m(p), 0.0);
    }

    #[test]
    fn pythagorean_distance() {
        let a = CabinPoint::new(0.0, 0.0);
        let b = CabinPoint::new(3.0, 4.0);
        assert!((a.distance_m(b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = CabinPoint::new(0.0, 0.0);
        let b = CabinPoint::new(10.0, 2.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        let mid = a.lerp(b, 0.5);
        assert!((mid.x - 5.0).abs() < 1e-12);
        assert!((mid.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn nan_is_not_finite() {
        assert!(!CabinPoint::new(f64::NAN, 0.0).is_finite());
        assert!(CabinPoint::new(1.0, 2.0).is_finite());
    }
}

#[cfg(test)]
mod time {
    use crate::{StepClock, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(Tick(15) - Tick(10), 5u64);
    }

    #[test]
    fn clock_time_secs() {
        let mut clock = StepClock::new(1.0);
        assert_eq!(clock.time_secs(), 0.0);
        clock.advance();
        assert_eq!(clock.time_secs(), 1.0);
        for _ in 0..9 {
            clock.advance();
        }
        assert_eq!(clock.time_secs(), 10.0);
    }

    #[test]
    fn fractional_step() {
        let mut clock = StepClock::new(0.5);
        clock.advance();
        clock.advance();
        clock.advance();
        assert!((clock.time_secs() - 1.5).abs() < 1e-12);
    }

}

#[cfg(test)]
mod rng {
    use crate::ReplicateRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = ReplicateRng::new(12345);
        let mut r2 = ReplicateRng::new(12345);
        for _ in 0..100 {
            let a: f64 = r1.random();
            let b: f64 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn adjacent_seeds_diverge() {
        let mut r0 = ReplicateRng::new(1);
        let mut r1 = ReplicateRng::new(2);
        let a: u64 = r0.random();
        let b: u64 = r1.random();
        assert_ne!(a, b, "streams for adjacent replicate seeds should diverge");
    }

    #[test]
    fn uniform_in_unit_interval() {
        let mut rng = ReplicateRng::new(0);
        for _ in 0..1000 {
            let v = rng.uniform();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = ReplicateRng::new(0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
    }

    #[test]
    fn exp_secs_positive_and_finite() {
        let mut rng = ReplicateRng::new(7);
        for _ in 0..1000 {
            let d = rng.exp_secs(120.0);
            assert!(d.is_finite());
            assert!(d >= 0.0);
        }
    }
}

#[cfg(test)]
mod health {
    use crate::HealthState;

    #[test]
    fn chain_is_monotonic() {
        let mut s = HealthState::Susceptible;
        let mut seen = vec![s];
        while let Some(next) = s.next() {
            assert!(next > s);
            s = next;
            seen.push(s);
        }
        assert_eq!(seen.len(), 4);
        assert_eq!(s, HealthState::Removed);
    }

    #[test]
    fn code_roundtrip() {
        for s in [
            HealthState::Susceptible,
            HealthState::Exposed,
            HealthState::Infectious,
            HealthState::Removed,
        ] {
            assert_eq!(HealthState::from_code(s.code()), Some(s));
        }
        assert_eq!(HealthState::from_code("x"), None);
    }
}

#[cfg(test)]
mod error {
    use crate::error::ensure_non_negative;

    #[test]
    fn rejects_nan_and_negative() {
        assert!(ensure_non_negative("dose", f64::NAN, None).is_err());
        assert!(ensure_non_negative("dose", -0.1, None).is_err());
        assert!(ensure_non_negative("dose", 0.0, None).is_ok());
        assert!(ensure_non_negative("dose", 3.5, None).is_ok());
    }
}

//! Deterministic per-replicate RNG wrapper.
//!
//! # Determinism strategy
//!
//! Each replicate of an ensemble owns exactly one `ReplicateRng`, seeded as
//! `seed_base + replicate_index` by the ensemble runner.  Every stochastic
//! decision inside that replicate — trajectory generation, infection draws,
//! progression timers — consumes draws from this single stream in a fixed
//! order (ascending agent id within each simulation step).  This means:
//!
//! - Re-running a replicate with the same seed reproduces the run exactly.
//! - Replicates never share RNG state (no contention, no cross-replicate
//!   ordering dependency), so they are free to run on separate threads.
//! - There is no process-wide random state anywhere in the engine.
//!
//! The type is deliberately `!Sync`: a replicate's stream must never be
//! observed from two threads.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// The private deterministic random stream of one replicate run.
pub struct ReplicateRng(SmallRng);

impl ReplicateRng {
    pub fn new(seed: u64) -> Self {
        ReplicateRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// A uniform draw in `[0, 1)` — the canonical infection-draw primitive.
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Sample an exponentially distributed duration with the given mean, via
    /// inverse-CDF.  Used for stochastic progression timers.
    #[inline]
    pub fn exp_secs(&mut self, mean_secs: f64) -> f64 {
        // 1 - u is in (0, 1], so ln() is finite and non-positive.
        let u: f64 = self.0.r#gen();
        -mean_secs * (1.0 - u).ln()
    }
}

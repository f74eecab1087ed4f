//! `acr-ensemble` — Monte Carlo ensemble driver for the acr cabin-risk
//! engine.
//!
//! # Replicate independence
//!
//! An ensemble is `replicates` independent runs of one shared, read-only
//! [`Scenario`](acr_sim::Scenario).  Replicate `i` is seeded with
//! `seed_base + i`, owns its RNG stream and passenger store outright, and
//! never touches another replicate's state — which is why the `parallel`
//! feature can fan replicates out over Rayon with nothing but a `collect`
//! at the end, and why the summary is byte-identical whether the pool ran
//! on one thread or sixteen.
//!
//! # Failure accounting
//!
//! A failed replicate (field coverage gap, budget blown, cancellation) is
//! recorded with its error and excluded from the statistics; the rest of
//! the ensemble keeps its results.  Only an ensemble with *zero* completed
//! replicates is an error.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                          |
//! |------------|-------------------------------------------------|
//! | `parallel` | Runs replicates on Rayon's thread pool.         |

pub mod error;
pub mod runner;
pub mod stats;


pub use error::{EnsembleError, EnsembleResult};
pub use runner::{merge, EnsembleRunner, EnsembleSummary, ReplicateFailure};
pub use stats::{ClassStats, SummaryStats, ZoneStats};

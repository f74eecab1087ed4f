//! `acr-sim` — the per-replicate scheduler for the acr cabin-risk engine.
//!
//! # Two-phase step loop
//!
//! ```text
//! for step in 0..total_steps:
//!   ① Doses       — integrate the concentration field along every
//!                    susceptible agent's trajectory over [t, t+dt],
//!                    apply ventilation scaling and mask efficacy.
//!   ② Transitions — roll each susceptible agent against the dose-response
//!                    curve, fire elapsed progression timers
//!                    (ascending agent-id order, one shared RNG stream).
//!   ③ Aggregate   — attribute each agent's step dose to the cabin zone it
//!                    occupied, update the per-zone exposure totals.
//! ```
//!
//! All dose updates of a step complete before any transition of that step,
//! so within one step the transition probabilities are evaluated against a
//! consistent dose snapshot.
//!
//! # Lifecycle
//!
//! A [`Run`] moves through [`RunPhase`]: `Initialized → Running →
//! Completed | Failed`.  A failed or completed run cannot be restarted;
//! the ensemble layer creates a fresh `Run` per replicate instead.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let mut run = RunBuilder::new(ReplicateId(0), &scenario).build()?;
//! let record = run.run(&mut NoopObserver)?;
//! println!("attack rate {:.3}", record.attack_rate());
//! ```

pub mod aggregator;
pub mod builder;
pub mod cancel;
pub mod error;
pub mod observer;
pub mod record;
pub mod run;

#[cfg(test)]
mod tests;

pub use aggregator::RiskAggregator;
pub use builder::{RunBuilder, Scenario};
pub use cancel::CancelToken;
pub use error::{RunError, RunResult};
pub use observer::{NoopObserver, RunObserver};
pub use record::{AgentOutcome, RiskRecord};
pub use run::{Run, RunPhase};

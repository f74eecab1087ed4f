//! Dose-response curves and health-state progression.
//!
//! The [`InfectionModel`] maps each agent's cumulative inhaled dose to a
//! per-step probability of becoming exposed, and drives the downstream
//! Exposed -> Infectious -> Removed progression with per-agent timers.
//!
//! Module table:
//! - [`response`]: monotone dose-response curves.
//! - [`model`]: progression timers and the per-step transition pass.
//! - [`error`]: error taxonomy for this crate.

pub mod error;
pub mod model;
pub mod response;

pub use error::{InfectionError, InfectionResult};
pub use model::{InfectionModel, ProgressionTimer};
pub use response::DoseResponse;

#[cfg(test)]
mod tests;

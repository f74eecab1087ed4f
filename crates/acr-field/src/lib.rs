//! `acr-field` — concentration field storage and sampling.
//!
//! Wraps a precomputed spatio-temporal pathogen concentration field (a
//! time-ordered sequence of 2-D grid snapshots exported by an external CFD
//! collaborator) and answers point/time queries and time-interval integrals.
//!
//! # Contract
//!
//! - [`FieldSampler::sample`] — concentration at a cabin position and time.
//! - [`FieldSampler::integrate`] — piecewise-linear time integral of
//!   concentration at a fixed position, the building block of inhaled dose.
//!
//! Queries outside the spatial domain or outside the covered time range
//! fail with [`FieldError`]; the sampler never extrapolates silently.
//!
//! All data is immutable after construction, so a `FieldSampler` is safe to
//! share read-only (via `Arc`) across any number of replicate workers.

pub mod error;
pub mod field;
pub mod sampler;


pub use error::{FieldError, FieldResult};
pub use field::{ConcentrationField, FieldGrid, Snapshot};
pub use sampler::{FieldSampler, SpatialInterp};

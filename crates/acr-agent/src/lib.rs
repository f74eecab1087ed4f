//! `acr-agent` — passenger state storage and dose accumulation.
//!
//! # Storage layout
//!
//! Passenger state is Structure-of-Arrays: one `Vec` per attribute, indexed
//! by run-local [`AgentId`](acr_core::AgentId).  The step loop touches every
//! agent every step, so parallel arrays keep the hot fields (health, dose,
//! trajectory) cache-friendly and make the fixed ascending-id iteration
//! order explicit.
//!
//! # Dose semantics
//!
//! [`PassengerStore::advance_doses`] implements the exposure step: for every
//! still-susceptible agent it integrates the concentration field along the
//! agent's position over `[t, t+dt]`, applies the intervention policy
//! (ventilation scaling, mask efficacy × compliance), and adds the result to
//! the agent's cumulative dose.  Dose is non-decreasing while `Susceptible`
//! and frozen the moment the agent leaves that state.

pub mod builder;
pub mod dose;
pub mod error;
pub mod store;


pub use builder::PassengerStoreBuilder;
pub use error::{AgentError, AgentResult};
pub use store::PassengerStore;

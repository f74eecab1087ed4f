//! `acr-scenario` — scenario description for the acr cabin-risk engine.
//!
//! Everything the simulation layer needs to know about one "what-if"
//! scenario lives here, separate from the engine that runs it:
//!
//! | Module         | Contents                                              |
//! |----------------|-------------------------------------------------------|
//! | [`cabin`]      | `CabinLayout` — seats, aisles, bathrooms, zones       |
//! | [`trajectory`] | trajectory variants and waypoint materialization      |
//! | [`policy`]     | `InterventionPolicy` — ventilation/mask/seat-block    |
//! | [`config`]     | `ScenarioConfig`, `AgentSpec`                         |
//! | [`loader`]     | CSV roster loader                                     |
//!
//! All types here are immutable configuration: validated once at
//! construction, then shared read-only across every replicate of an
//! ensemble.

pub mod cabin;
pub mod config;
pub mod error;
pub mod loader;
pub mod policy;
pub mod trajectory;

#[cfg(test)]
mod tests;

pub use cabin::{CabinLayout, Seat, Section};
pub use config::{AgentSpec, ScenarioConfig};
pub use error::{ScenarioError, ScenarioResult};
pub use loader::{load_roster_csv, load_roster_reader};
pub use policy::InterventionPolicy;
pub use trajectory::{AgentClass, Trajectory, TrajectoryKind, Waypoint};

//! `acr-core` — foundational types for the `acr` cabin-risk engine.
//!
//! This crate is a dependency of every other `acr-*` crate.  It intentionally
//! has no `acr-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                          |
//! |-------------|---------------------------------------------------|
//! | [`ids`]     | `AgentId`, `SeatId`, `ZoneId`, `ReplicateId`      |
//! | [`point`]   | `CabinPoint`, planar distance                     |
//! | [`time`]    | `Tick`, `StepClock`                               |
//! | [`rng`]     | `ReplicateRng` (per-replicate deterministic RNG)  |
//! | [`health`]  | `HealthState` enum and transition ordering        |
//! | [`error`]   | `CoreError`, `CoreResult`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                |
//! |---------|-------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.   |

pub mod error;
pub mod health;
pub mod ids;
pub mod point;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use health::HealthState;
pub use ids::{AgentId, ReplicateId, SeatId, ZoneId};
pub use point::CabinPoint;
pub use rng::ReplicateRng;
pub use time::{StepClock, Tick};

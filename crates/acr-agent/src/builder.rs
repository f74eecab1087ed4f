//! Builder materializing a [`PassengerStore`] from a scenario roster.
//!
//! # Seat blocking
//!
//! The intervention policy's blocked-seat set is applied here: roster agents
//! assigned a blocked seat are excluded from the run entirely (the
//! distancing intervention), and the surviving agents get dense run-local
//! ids.  `roster_ids` preserves the original identity for policy lookups
//! and reporting.
//!
//! # Determinism
//!
//! Trajectory materialization consumes draws from the replicate RNG in
//! ascending roster order, so a fixed replicate seed always yields the same
//! set of trajectories.

use acr_core::{HealthState, ReplicateRng};
use acr_scenario::{trajectory, AgentSpec, CabinLayout, InterventionPolicy};

use crate::store::PassengerStore;
use crate::{AgentError, AgentResult};

/// Fluent builder for [`PassengerStore`].
pub struct PassengerStoreBuilder<'a> {
    layout: &'a CabinLayout,
    roster: &'a [AgentSpec],
    policy: &'a InterventionPolicy,
    horizon_secs: f64,
}

impl<'a> PassengerStoreBuilder<'a> {
    pub fn new(
        layout: &'a CabinLayout,
        roster: &'a [AgentSpec],
        policy: &'a InterventionPolicy,
        horizon_secs: f64,
    ) -> Self {
        Self {
            layout,
            roster,
            policy,
            horizon_secs,
        }
    }

    /// Materialize the store for one replicate.
    ///
    /// Returns the store and the number of roster agents excluded by seat
    /// blocking.
    pub fn build(self, rng: &mut ReplicateRng) -> AgentResult<(PassengerStore, usize)> {
        let mut seen_seats = vec![false; self.layout.seat_count()];

        let capacity = self.roster.len();
        let mut store = PassengerStore {
            count: 0,
            roster_ids: Vec::with_capacity(capacity),
            seats: Vec::with_capacity(capacity),
            classes: Vec::with_capacity(capacity),
            trajectories: Vec::with_capacity(capacity),
            health: Vec::with_capacity(capacity),
            dose: Vec::with_capacity(capacity),
            effective_mask: Vec::with_capacity(capacity),
            onset_secs: Vec::with_capacity(capacity),
            next_transition_secs: Vec::with_capacity(capacity),
        };
        let mut excluded = 0usize;

        for (roster_index, spec) in self.roster.iter().enumerate() {
            let roster_id =
                acr_core::AgentId::try_from(roster_index).map_err(|_| {
                    AgentError::Build(format!("roster too large at index {roster_index}"))
                })?;

            if spec.seat.index() >= self.layout.seat_count() {
                return Err(AgentError::Build(format!(
                    "agent {roster_id} assigned nonexistent seat {}",
                    spec.seat
                )));
            }
            if seen_seats[spec.seat.index()] {
                return Err(AgentError::Build(format!(
                    "seat {} assigned to more than one agent",
                    spec.seat
                )));
            }
            seen_seats[spec.seat.index()] = true;

            if self.policy.is_seat_blocked(spec.seat) {
                excluded += 1;
                continue;
            }

            let seat_position = self.layout.seat(spec.seat).position;
            let trajectory = trajectory::generate(
                spec.kind,
                seat_position,
                self.layout,
                self.horizon_secs,
                rng,
            );

            let mask = if spec.compliant {
                self.policy.mask_for(roster_id)
            } else {
                0.0
            };

            store.roster_ids.push(roster_id);
            store.seats.push(spec.seat);
            store.classes.push(spec.kind.class());
            store.trajectories.push(trajectory);
            store.health.push(spec.initial_state);
            store.dose.push(0.0);
            store.effective_mask.push(mask);
            store.onset_secs.push(match spec.initial_state {
                HealthState::Susceptible => None,
                // Pre-infected boarders count as onset at t=0.
                _ => Some(0.0),
            });
            store.next_transition_secs.push(None);
        }

        store.count = store.roster_ids.len();
        Ok((store, excluded))
    }
}

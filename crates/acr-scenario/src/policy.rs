//! `InterventionPolicy` — the "what-if" knobs of a scenario.
//!
//! Pure configuration: validated once at construction, queried read-only by
//! the dose accumulator and the store builder.  A policy never mutates
//! during a run, so one instance is shared by reference across every
//! replicate.
//!
//! # Recognized modifiers
//!
//! | Field                    | Effect                                         |
//! |--------------------------|------------------------------------------------|
//! | `ventilation_scale`      | Divides every sampled concentration (post-hoc  |
//! |                          | scaling of the CFD field; a scale of 2 halves  |
//! |                          | exposure everywhere).                          |
//! | `mask_efficacy_by_agent` | Fraction of inhaled dose blocked per agent.    |
//! | `blocked_seats`          | Seats excluded from occupancy (distancing);    |
//! |                          | agents assigned to them sit out the run.       |

use std::collections::{HashMap, HashSet};

use acr_core::{AgentId, SeatId};

use crate::{ScenarioError, ScenarioResult};

/// Immutable intervention configuration, shared across all replicates.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct InterventionPolicy {
    ventilation_scale: f64,
    mask_efficacy_by_agent: HashMap<AgentId, f64>,
    blocked_seats: HashSet<SeatId>,
}

impl InterventionPolicy {
    /// Validate and freeze a policy.  Out-of-range values fail here, before
    /// any simulation starts — never at sample time.
    pub fn new(
        ventilation_scale: f64,
        mask_efficacy_by_agent: HashMap<AgentId, f64>,
        blocked_seats: HashSet<SeatId>,
    ) -> ScenarioResult<Self> {
        if !ventilation_scale.is_finite() || ventilation_scale <= 0.0 {
            return Err(ScenarioError::VentilationScale {
                value: ventilation_scale,
            });
        }
        for (&agent, &eff) in &mask_efficacy_by_agent {
            if !eff.is_finite() || !(0.0..=1.0).contains(&eff) {
                return Err(ScenarioError::MaskEfficacy { agent, value: eff });
            }
        }
        Ok(Self {
            ventilation_scale,
            mask_efficacy_by_agent,
            blocked_seats,
        })
    }

    /// No interventions: ventilation scale 1, no masks, all seats open.
    pub fn baseline() -> Self {
        Self {
            ventilation_scale: 1.0,
            mask_efficacy_by_agent: HashMap::new(),
            blocked_seats: HashSet::new(),
        }
    }

    /// A baseline policy with a uniform mask efficacy for the given agents.
    pub fn uniform_masks(
        agents: impl IntoIterator<Item = AgentId>,
        efficacy: f64,
    ) -> ScenarioResult<Self> {
        let map = agents.into_iter().map(|a| (a, efficacy)).collect();
        Self::new(1.0, map, HashSet::new())
    }

    #[inline]
    pub fn ventilation_scale(&self) -> f64 {
        self.ventilation_scale
    }

    /// Mask efficacy for an agent; unmasked agents get 0.
    #[inline]
    pub fn mask_for(&self, agent: AgentId) -> f64 {
        self.mask_efficacy_by_agent
            .get(&agent)
            .copied()
            .unwrap_or(0.0)
    }

    #[inline]
    pub fn is_seat_blocked(&self, seat: SeatId) -> bool {
        self.blocked_seats.contains(&seat)
    }

    pub fn blocked_seat_count(&self) -> usize {
        self.blocked_seats.len()
    }
}

impl Default for InterventionPolicy {
    fn default() -> Self {
        Self::baseline()
    }
}

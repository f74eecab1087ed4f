//! `PassengerStore` — SoA storage for all passenger state in one replicate.

use acr_core::{AgentId, CabinPoint, HealthState, SeatId};
use acr_scenario::{AgentClass, Trajectory};

/// Structure-of-Arrays storage for all passengers of one replicate run.
///
/// Every `Vec` field has exactly `count` elements; the run-local `AgentId`
/// value is the index into all of them:
///
/// ```ignore
/// let dose = store.dose[agent.index()];  // O(1), cache-friendly
/// ```
///
/// The store is exclusively owned by its replicate's scheduler and never
/// shared across threads; replicate independence is what makes ensemble
/// parallelism safe.
#[derive(Debug)]
pub struct PassengerStore {
    /// Number of passengers in the run.  Equals the length of every SoA `Vec`.
    pub count: usize,

    /// Roster id of each passenger (run-local ids are re-densified after
    /// seat blocking, so they can differ from roster ids).
    pub roster_ids: Vec<AgentId>,

    /// Assigned seat.
    pub seats: Vec<SeatId>,

    /// Reporting class, derived from the trajectory variant.
    pub classes: Vec<AgentClass>,

    /// Materialized movement path, immutable during the run.
    pub trajectories: Vec<Trajectory>,

    /// Current health state; transitions only move forward along S→E→I→R.
    pub health: Vec<HealthState>,

    /// Cumulative inhaled dose.  Non-decreasing while `Susceptible`, frozen
    /// thereafter.
    pub dose: Vec<f64>,

    /// Effective mask factor in [0, 1]: assigned efficacy for compliant
    /// agents, 0 for non-compliant ones.  Precomputed at build time.
    pub effective_mask: Vec<f64>,

    /// Simulated seconds of the S→E transition, if it has happened.
    pub onset_secs: Vec<Option<f64>>,

    /// When the current timed transition (E→I or I→R) fires, if one is
    /// pending.  Set at the moment of the prior transition.
    pub next_transition_secs: Vec<Option<f64>>,
}

impl PassengerStore {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over run-local `AgentId`s in ascending index order — the
    /// fixed processing order of every step phase.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    /// The agent's position at simulated time `t`.
    #[inline]
    pub fn position_at(&self, agent: AgentId, t: f64) -> CabinPoint {
        self.trajectories[agent.index()].position_at(t)
    }

    #[inline]
    pub fn is_susceptible(&self, agent: AgentId) -> bool {
        self.health[agent.index()].is_susceptible()
    }

    /// Counts per health state, indexed `[S, E, I, R]`.
    pub fn state_counts(&self) -> [usize; 4] {
        let mut counts = [0usize; 4];
        for &h in &self.health {
            counts[h as usize] += 1;
        }
        counts
    }

    /// Number of agents that have ever been infected (E, I, or R).
    pub fn infected_count(&self) -> usize {
        self.health.iter().filter(|h| h.is_infected()).count()
    }

    /// Advance one agent along the S→E→I→R chain.
    ///
    /// `now_secs` stamps the onset for S→E; `next_at` schedules the
    /// following timed transition (`None` for the terminal state).
    /// The chain only moves forward; callers decide *when*, this method
    /// records *that*.
    pub fn transition(&mut self, agent: AgentId, now_secs: f64, next_at: Option<f64>) {
        let i = agent.index();
        let Some(next_state) = self.health[i].next() else {
            return;
        };
        if self.health[i] == HealthState::Susceptible {
            self.onset_secs[i] = Some(now_secs);
        }
        self.health[i] = next_state;
        self.next_transition_secs[i] = next_at;
    }
}

//! Passenger movement as materialized waypoint trajectories.
//!
//! # Design
//!
//! Movement behavior is a closed set of tagged variants
//! ([`TrajectoryKind`]), selected per agent at construction — not an open
//! inheritance hierarchy.  At replicate setup each agent's kind is
//! *materialized* into an ordered `(time → position)` waypoint list using
//! the replicate's private RNG.  During the run the trajectory is immutable
//! and `position_at` is a pure lookup, which keeps the step loop free of
//! stochastic movement decisions and makes replays byte-identical for a
//! given seed.
//!
//! # Aisle routing
//!
//! Walking agents move seat → nearest aisle → along the aisle → lateral to
//! the destination, at a fixed walking speed.  This mirrors how passengers
//! actually traverse a cabin and keeps walkers out of the seat blocks.

use acr_core::{CabinPoint, ReplicateRng};

use crate::cabin::{CabinLayout, Section};

/// Walking speed for all moving agents, metres per second.
const WALK_SPEED_MPS: f64 = 0.5;

/// Probability a front-section passenger picks the middle bathroom over the
/// rear one.
const FRONT_PREFERS_MIDDLE: f64 = 0.7;

// ── AgentClass ────────────────────────────────────────────────────────────────

/// Reporting class of an agent, derived from its trajectory variant.
/// Ensemble statistics are aggregated per class.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
pub enum AgentClass {
    Seated,
    BathroomVisitor,
    Crew,
}

impl AgentClass {
    pub const ALL: [AgentClass; 3] = [
        AgentClass::Seated,
        AgentClass::BathroomVisitor,
        AgentClass::Crew,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AgentClass::Seated => "seated",
            AgentClass::BathroomVisitor => "bathroom-visitor",
            AgentClass::Crew => "crew",
        }
    }

    /// Stable index for SoA storage and stats arrays.
    pub fn index(self) -> usize {
        match self {
            AgentClass::Seated => 0,
            AgentClass::BathroomVisitor => 1,
            AgentClass::Crew => 2,
        }
    }
}

// ── TrajectoryKind ────────────────────────────────────────────────────────────

/// The closed set of movement variants an agent can be assigned.
#[derive(Copy, Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
pub enum TrajectoryKind {
    /// Seated for the whole run.
    Stationary,
    /// Seated, with stochastic bathroom trips.
    BathroomVisitor {
        /// Per-second probability of starting a trip (0.0005/s gives one
        /// to two trips per hour).
        trips_per_sec: f64,
        /// Seconds spent at the bathroom before walking back.
        dwell_secs: f64,
    },
    /// Cabin crew: repeated front↔rear patrols along the aisles.
    CrewPatrol {
        /// Seconds paused at each end of a patrol leg.
        dwell_secs: f64,
    },
}

impl TrajectoryKind {
    pub fn class(self) -> AgentClass {
        match self {
            TrajectoryKind::Stationary => AgentClass::Seated,
            TrajectoryKind::BathroomVisitor { .. } => AgentClass::BathroomVisitor,
            TrajectoryKind::CrewPatrol { .. } => AgentClass::Crew,
        }
    }

    /// Stock bathroom-visitor parameters.
    pub fn bathroom_default() -> Self {
        TrajectoryKind::BathroomVisitor {
            trips_per_sec: 0.0005,
            dwell_secs: 60.0,
        }
    }

    pub fn crew_default() -> Self {
        TrajectoryKind::CrewPatrol { dwell_secs: 300.0 }
    }
}

// ── Trajectory ────────────────────────────────────────────────────────────────

/// One time-stamped position along a trajectory.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Waypoint {
    pub time_secs: f64,
    pub position: CabinPoint,
}

/// An ordered `(time → position)` path, immutable once materialized.
///
/// Positions before the first waypoint clamp to the first; positions after
/// the last clamp to the last (the agent sits still between excursions).
#[derive(Clone, Debug)]
pub struct Trajectory {
    waypoints: Vec<Waypoint>,
}

impl Trajectory {
    /// A trajectory that never moves.
    pub fn stationary(position: CabinPoint) -> Self {
        Self {
            waypoints: vec![Waypoint {
                time_secs: 0.0,
                position,
            }],
        }
    }

    /// Build from raw waypoints.  Waypoint times must be non-decreasing;
    /// this is an internal constructor so it is debug-asserted, not
    /// error-returned.
    pub(crate) fn from_waypoints(waypoints: Vec<Waypoint>) -> Self {
        debug_assert!(!waypoints.is_empty());
        debug_assert!(
            waypoints.windows(2).all(|w| w[0].time_secs <= w[1].time_secs),
            "waypoint times must be non-decreasing"
        );
        Self { waypoints }
    }

    #[inline]
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Position at time `t`, clamped to the endpoints outside the covered
    /// span and linearly interpolated between waypoints inside it.
    pub fn position_at(&self, t: f64) -> CabinPoint {
        let wps = &self.waypoints;
        if t <= wps[0].time_secs {
            return wps[0].position;
        }
        let last = &wps[wps.len() - 1];
        if t >= last.time_secs {
            return last.position;
        }
        // Index of the first waypoint strictly after t; >= 1 by the checks above.
        let hi = wps.partition_point(|w| w.time_secs <= t);
        let (a, b) = (&wps[hi - 1], &wps[hi]);
        let span = b.time_secs - a.time_secs;
        if span <= 0.0 {
            return b.position;
        }
        a.position.lerp(b.position, (t - a.time_secs) / span)
    }

    /// `true` if every waypoint sits at the same position.
    pub fn is_stationary(&self) -> bool {
        self.waypoints
            .windows(2)
            .all(|w| w[0].position == w[1].position)
    }
}

// ── Materialization ───────────────────────────────────────────────────────────

/// Materialize a trajectory for one agent.
///
/// `seat_position` anchors seated variants; crew agents start at the front
/// galley.  Draws (trip times, bathroom choice) come from `rng`, so with a
/// fixed replicate seed the result is fully reproducible.
pub fn generate(
    kind: TrajectoryKind,
    seat_position: CabinPoint,
    layout: &CabinLayout,
    horizon_secs: f64,
    rng: &mut ReplicateRng,
) -> Trajectory {
    match kind {
        TrajectoryKind::Stationary => Trajectory::stationary(seat_position),
        TrajectoryKind::BathroomVisitor {
            trips_per_sec,
            dwell_secs,
        } => generate_bathroom_visits(
            seat_position,
            layout,
            horizon_secs,
            trips_per_sec,
            dwell_secs,
            rng,
        ),
        TrajectoryKind::CrewPatrol { dwell_secs } => {
            generate_crew_patrol(layout, horizon_secs, dwell_secs)
        }
    }
}

fn generate_bathroom_visits(
    seat: CabinPoint,
    layout: &CabinLayout,
    horizon_secs: f64,
    trips_per_sec: f64,
    dwell_secs: f64,
    rng: &mut ReplicateRng,
) -> Trajectory {
    let mut wps = vec![Waypoint {
        time_secs: 0.0,
        position: seat,
    }];
    let mut t = 0.0;

    if trips_per_sec <= 0.0 {
        return Trajectory::from_waypoints(wps);
    }
    let mean_gap = 1.0 / trips_per_sec;

    loop {
        let gap = rng.exp_secs(mean_gap);
        let depart = t + gap;
        if depart >= horizon_secs {
            break;
        }

        // Front passengers prefer the middle bathroom; rear passengers use
        // the rear one.
        let bathroom = match layout.section_of_x(seat.x) {
            Section::Front if rng.gen_bool(FRONT_PREFERS_MIDDLE) => layout.middle_bathroom(),
            Section::Front => layout.rear_bathroom(),
            Section::Rear => layout.rear_bathroom(),
        };

        // Seat stays occupied until departure.
        wps.push(Waypoint {
            time_secs: depart,
            position: seat,
        });
        let arrive = append_walk(&mut wps, seat, bathroom, depart, layout);
        let leave = arrive + dwell_secs;
        wps.push(Waypoint {
            time_secs: leave,
            position: bathroom,
        });
        let back = append_walk(&mut wps, bathroom, seat, leave, layout);
        t = back;
        if t >= horizon_secs {
            break;
        }
    }

    Trajectory::from_waypoints(wps)
}

fn generate_crew_patrol(
    layout: &CabinLayout,
    horizon_secs: f64,
    dwell_secs: f64,
) -> Trajectory {
    // Crew work the galleys at the cabin ends; patrol legs alternate aisles.
    let aisles = layout.aisle_ys();
    let front_x = layout.length_m() * 0.02;
    let rear_x = layout.length_m() * 0.95;

    let mut wps = Vec::new();
    let mut t = 0.0;
    let mut at_front = true;
    let mut leg = 0usize;

    let start = CabinPoint::new(front_x, aisles[0]);
    wps.push(Waypoint {
        time_secs: 0.0,
        position: start,
    });

    while t < horizon_secs {
        let aisle_y = aisles[leg % aisles.len()];
        let from = CabinPoint::new(if at_front { front_x } else { rear_x }, aisle_y);
        let to = CabinPoint::new(if at_front { rear_x } else { front_x }, aisle_y);
        // Slide to this leg's aisle, then walk its length.
        let current = wps[wps.len() - 1].position;
        let t1 = append_walk(&mut wps, current, from, t, layout);
        let t2 = append_walk(&mut wps, from, to, t1, layout);
        t = t2 + dwell_secs;
        wps.push(Waypoint {
            time_secs: t,
            position: to,
        });
        at_front = !at_front;
        leg += 1;
    }

    Trajectory::from_waypoints(wps)
}

/// Append aisle-routed waypoints walking `from → to`, starting at
/// `start_secs`.  Returns the arrival time.
fn append_walk(
    wps: &mut Vec<Waypoint>,
    from: CabinPoint,
    to: CabinPoint,
    start_secs: f64,
    layout: &CabinLayout,
) -> f64 {
    let mut t = start_secs;
    let mut pos = from;
    for corner in aisle_path(from, to, layout) {
        let d = pos.distance_m(corner);
        if d <= f64::EPSILON {
            continue;
        }
        t += d / WALK_SPEED_MPS;
        wps.push(Waypoint {
            time_secs: t,
            position: corner,
        });
        pos = corner;
    }
    t
}

/// Corner points of the aisle route `from → to`: lateral to the nearest
/// aisle, along the aisle, then lateral to the destination.
fn aisle_path(from: CabinPoint, to: CabinPoint, layout: &CabinLayout) -> Vec<CabinPoint> {
    let aisle_y = layout.nearest_aisle_y(from.y);
    vec![
        CabinPoint::new(from.x, aisle_y),
        CabinPoint::new(to.x, aisle_y),
        to,
    ]
}

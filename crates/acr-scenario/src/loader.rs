//! CSV roster loader.
//!
//! # CSV format
//!
//! One row per boarding agent.  `agent_id`s must be dense: `0..n` with no
//! gaps (the id doubles as the roster index used by policy lookups).
//!
//! ```csv
//! agent_id,row,column,role,initial_state,compliant
//! 0,0,0,seated,S,1
//! 1,0,1,bathroom,S,1
//! 2,3,4,seated,I,1
//! 3,12,8,crew,S,0
//! ```
//!
//! **`role`** field:
//!
//! | Value      | Meaning                                            |
//! |------------|----------------------------------------------------|
//! | `seated`   | [`TrajectoryKind::Stationary`]                     |
//! | `bathroom` | [`TrajectoryKind::bathroom_default`]               |
//! | `crew`     | [`TrajectoryKind::crew_default`]                   |
//!
//! **`initial_state`** is the single-letter S/E/I/R code;
//! **`compliant`** is `0` or `1`.

use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use acr_core::AgentId;

use crate::cabin::CabinLayout;
use crate::config::AgentSpec;
use crate::trajectory::TrajectoryKind;
use crate::{ScenarioError, ScenarioResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RosterRecord {
    agent_id: u32,
    row: u32,
    column: u32,
    role: String,
    initial_state: String,
    compliant: u8,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load an agent roster from a CSV file.
///
/// Returns a `Vec<AgentSpec>` indexed by agent id.
pub fn load_roster_csv(path: &Path, layout: &CabinLayout) -> ScenarioResult<Vec<AgentSpec>> {
    let file = std::fs::File::open(path).map_err(ScenarioError::Io)?;
    load_roster_reader(file, layout)
}

/// Like [`load_roster_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedded rosters.
pub fn load_roster_reader<R: Read>(
    reader: R,
    layout: &CabinLayout,
) -> ScenarioResult<Vec<AgentSpec>> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let mut by_id: HashMap<u32, AgentSpec> = HashMap::new();
    let mut seats_taken: HashSet<(u32, u32)> = HashSet::new();

    for result in csv_reader.deserialize::<RosterRecord>() {
        let record = result.map_err(|e| ScenarioError::Parse(e.to_string()))?;
        let spec = parse_record(&record, layout)?;

        if by_id.insert(record.agent_id, spec).is_some() {
            return Err(ScenarioError::DuplicateAgent(AgentId(record.agent_id)));
        }
        if !seats_taken.insert((record.row, record.column)) {
            return Err(ScenarioError::DuplicateSeat {
                row: record.row,
                column: record.column,
            });
        }
    }

    // Ids must be dense 0..n — the roster index is the agent id.
    let count = by_id.len();
    let mut roster = Vec::with_capacity(count);
    for id in 0..count as u32 {
        match by_id.remove(&id) {
            Some(spec) => roster.push(spec),
            None => {
                return Err(ScenarioError::Validation(format!(
                    "roster agent_ids must be dense 0..{count}, missing {id}"
                )));
            }
        }
    }

    Ok(roster)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_record(record: &RosterRecord, layout: &CabinLayout) -> ScenarioResult<AgentSpec> {
    let seat = layout.seat_at(record.row, record.column)?;

    let kind = match record.role.trim() {
        "seated" => TrajectoryKind::Stationary,
        "bathroom" => TrajectoryKind::bathroom_default(),
        "crew" => TrajectoryKind::crew_default(),
        other => {
            return Err(ScenarioError::Parse(format!(
                "invalid role {other:?}: expected \"seated\", \"bathroom\", or \"crew\""
            )));
        }
    };

    let initial_state = acr_core::HealthState::from_code(&record.initial_state)
        .ok_or_else(|| {
            ScenarioError::Parse(format!(
                "invalid initial_state {:?}: expected S, E, I, or R",
                record.initial_state
            ))
        })?;

    let compliant = match record.compliant {
        0 => false,
        1 => true,
        other => {
            return Err(ScenarioError::Parse(format!(
                "invalid compliant flag {other}: expected 0 or 1"
            )));
        }
    };

    Ok(AgentSpec {
        seat,
        kind,
        initial_state,
        compliant,
    })
}

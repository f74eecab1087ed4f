//! Cabin floor-plan geometry: seats, aisles, bathrooms, and reporting zones.
//!
//! # The 3-3-3 layout
//!
//! The stock layout models a twin-aisle cabin: 13 front rows and 14 rear
//! rows of 9 seats each (three seat blocks of three, separated by two
//! aisles), a bathroom at the section boundary and another near the tail.
//! Lateral positions are derived from the cabin width by dividing it into
//! 11 equal slots (9 seat columns + 2 aisles), so every seat and aisle is
//! guaranteed to lie inside the cabin bounds.
//!
//! # Zones
//!
//! Risk statistics aggregate over zones: cabin section (front/rear) × seat
//! band (left/middle/right, split at the two aisle centrelines) — six zones
//! for the stock layout.  `zone_of` maps any cabin point to its zone in
//! O(1).

use acr_core::{CabinPoint, SeatId, ZoneId};

use crate::{ScenarioError, ScenarioResult};

// ── Stock 3-3-3 dimensions ────────────────────────────────────────────────────

const CABIN_LENGTH_M: f64 = 40.0;
const CABIN_WIDTH_M: f64 = 6.0;
const FRONT_ROWS: u32 = 13;
const REAR_ROWS: u32 = 14;
const SEATS_PER_ROW: u32 = 9;
/// 9 seat columns + 2 aisles.
const LATERAL_SLOTS: u32 = 11;

// ── Section ───────────────────────────────────────────────────────────────────

/// Front or rear cabin section, split at the middle bathroom.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
pub enum Section {
    Front,
    Rear,
}

impl Section {
    pub fn label(self) -> &'static str {
        match self {
            Section::Front => "front",
            Section::Rear => "rear",
        }
    }
}

// ── Seat ──────────────────────────────────────────────────────────────────────

/// One seat: grid coordinates, floor position, and section membership.
#[derive(Clone, Debug)]
pub struct Seat {
    pub id: SeatId,
    pub row: u32,
    pub column: u32,
    pub position: CabinPoint,
    pub section: Section,
}

// ── CabinLayout ───────────────────────────────────────────────────────────────

/// Immutable cabin geometry shared by every replicate of a scenario.
#[derive(Clone, Debug)]
pub struct CabinLayout {
    length_m: f64,
    width_m: f64,
    seats: Vec<Seat>,
    /// Y centrelines of the aisles, ascending.  Also the zone band splits.
    aisle_ys: Vec<f64>,
    /// Bathroom positions: `[0]` at the section boundary, `[1]` near the tail.
    bathrooms: Vec<CabinPoint>,
    /// X coordinate splitting front from rear section.
    section_boundary_x: f64,
}

impl CabinLayout {
    /// The stock 3-3-3 twin-aisle cabin (13 + 14 rows, 40 m × 6 m).
    pub fn three_three_three() -> Self {
        let total_rows = FRONT_ROWS + REAR_ROWS;
        // Row pitch leaves slack fore and aft for galleys and bathrooms.
        let row_pitch = CABIN_LENGTH_M / (total_rows + 2) as f64;
        let slot = CABIN_WIDTH_M / LATERAL_SLOTS as f64;

        // Lateral slot centres: seats at slots 0-2, 4-6, 8-10; aisles at 3 and 7.
        let slot_y = |i: u32| (i as f64 + 0.5) * slot;
        let aisle_ys = vec![slot_y(3), slot_y(7)];
        let column_y: Vec<f64> = [0u32, 1, 2, 4, 5, 6, 8, 9, 10]
            .iter()
            .map(|&i| slot_y(i))
            .collect();

        let section_boundary_x =
            (FRONT_ROWS as f64 / total_rows as f64) * CABIN_LENGTH_M;
        let bathrooms = vec![
            CabinPoint::new(section_boundary_x, CABIN_WIDTH_M / 2.0),
            CabinPoint::new(CABIN_LENGTH_M * 0.95, CABIN_WIDTH_M / 2.0),
        ];

        let mut seats = Vec::with_capacity((total_rows * SEATS_PER_ROW) as usize);
        for row in 0..total_rows {
            let (x, section) = if row < FRONT_ROWS {
                ((row + 1) as f64 * row_pitch, Section::Front)
            } else {
                // Extra half pitch leaves room for the middle bathroom.
                let rear_row = row - FRONT_ROWS;
                (
                    (FRONT_ROWS as f64 + 1.5 + (rear_row + 1) as f64) * row_pitch,
                    Section::Rear,
                )
            };
            for column in 0..SEATS_PER_ROW {
                seats.push(Seat {
                    id: SeatId(seats.len() as u32),
                    row,
                    column,
                    position: CabinPoint::new(x, column_y[column as usize]),
                    section,
                });
            }
        }

        Self {
            length_m: CABIN_LENGTH_M,
            width_m: CABIN_WIDTH_M,
            seats,
            aisle_ys,
            bathrooms,
            section_boundary_x,
        }
    }

    // ── Geometry ──────────────────────────────────────────────────────────

    #[inline]
    pub fn length_m(&self) -> f64 {
        self.length_m
    }

    #[inline]
    pub fn width_m(&self) -> f64 {
        self.width_m
    }

    #[inline]
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    #[inline]
    pub fn seat(&self, id: SeatId) -> &Seat {
        &self.seats[id.index()]
    }

    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    /// Look up a seat by grid coordinates.
    pub fn seat_at(&self, row: u32, column: u32) -> ScenarioResult<SeatId> {
        self.seats
            .iter()
            .find(|s| s.row == row && s.column == column)
            .map(|s| s.id)
            .ok_or(ScenarioError::UnknownSeat { row, column })
    }

    #[inline]
    pub fn aisle_ys(&self) -> &[f64] {
        &self.aisle_ys
    }

    /// The aisle centreline nearest to `y`.
    pub fn nearest_aisle_y(&self, y: f64) -> f64 {
        let mut best = self.aisle_ys[0];
        for &a in &self.aisle_ys[1..] {
            if (y - a).abs() < (y - best).abs() {
                best = a;
            }
        }
        best
    }

    /// Bathroom at the front/rear section boundary.
    #[inline]
    pub fn middle_bathroom(&self) -> CabinPoint {
        self.bathrooms[0]
    }

    /// Bathroom near the tail.
    #[inline]
    pub fn rear_bathroom(&self) -> CabinPoint {
        self.bathrooms[1]
    }

    /// Which section an x coordinate falls in.
    #[inline]
    pub fn section_of_x(&self, x: f64) -> Section {
        if x <= self.section_boundary_x {
            Section::Front
        } else {
            Section::Rear
        }
    }

    // ── Zones ─────────────────────────────────────────────────────────────

    /// Number of reporting zones: 2 sections × (aisle count + 1) bands.
    pub fn zone_count(&self) -> usize {
        2 * (self.aisle_ys.len() + 1)
    }

    /// Map a cabin point to its reporting zone.
    pub fn zone_of(&self, p: CabinPoint) -> ZoneId {
        let band = self.aisle_ys.iter().filter(|&&a| p.y >= a).count();
        let section = match self.section_of_x(p.x) {
            Section::Front => 0,
            Section::Rear => 1,
        };
        ZoneId((section * (self.aisle_ys.len() + 1) + band) as u16)
    }

    /// Human-readable zone label, e.g. `"front-left"`.
    pub fn zone_label(&self, zone: ZoneId) -> String {
        let bands_per_section = self.aisle_ys.len() + 1;
        let section = if zone.index() / bands_per_section == 0 {
            "front"
        } else {
            "rear"
        };
        let band = match zone.index() % bands_per_section {
            0 => "left",
            1 => "middle",
            2 => "right",
            n => return format!("{section}-band{n}"),
        };
        format!("{section}-{band}")
    }
}

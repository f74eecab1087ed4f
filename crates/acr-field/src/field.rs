//! Immutable concentration field data: grid geometry plus time-stamped
//! snapshots.
//!
//! # Layout
//!
//! A snapshot stores one `f64` per grid cell in row-major order
//! (`cell = iy * nx + ix`).  Cell `(ix, iy)` covers
//!
//! ```text
//! x ∈ [x_min + ix*dx, x_min + (ix+1)*dx)    dx = (x_max - x_min) / nx
//! y ∈ [y_min + iy*dy, y_min + (iy+1)*dy)    dy = (y_max - y_min) / ny
//! ```
//!
//! with its representative value at the cell centre.  Snapshots must be
//! strictly time-ordered; validation happens once in
//! [`ConcentrationField::new`] so every later query can assume a well-formed
//! field.

use acr_core::CabinPoint;

use crate::{FieldError, FieldResult};

// ── FieldGrid ─────────────────────────────────────────────────────────────────

/// Spatial domain bounds and resolution of a concentration field.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldGrid {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    /// Cell counts along x and y.
    pub nx: usize,
    pub ny: usize,
}

impl FieldGrid {
    pub fn new(
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
        nx: usize,
        ny: usize,
    ) -> FieldResult<Self> {
        let grid = Self {
            x_min,
            x_max,
            y_min,
            y_max,
            nx,
            ny,
        };
        grid.validate()?;
        Ok(grid)
    }

    fn validate(&self) -> FieldResult<()> {
        let bounds = [self.x_min, self.x_max, self.y_min, self.y_max];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(FieldError::InvalidGrid("non-finite domain bounds".into()));
        }
        if self.x_max <= self.x_min || self.y_max <= self.y_min {
            return Err(FieldError::InvalidGrid(format!(
                "empty extent: x [{}, {}], y [{}, {}]",
                self.x_min, self.x_max, self.y_min, self.y_max
            )));
        }
        if self.nx == 0 || self.ny == 0 {
            return Err(FieldError::InvalidGrid(format!(
                "zero resolution: {}x{}",
                self.nx, self.ny
            )));
        }
        Ok(())
    }

    /// Number of cells per snapshot.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.nx * self.ny
    }

    /// Cell width along x.
    #[inline]
    pub fn dx(&self) -> f64 {
        (self.x_max - self.x_min) / self.nx as f64
    }

    /// Cell height along y.
    #[inline]
    pub fn dy(&self) -> f64 {
        (self.y_max - self.y_min) / self.ny as f64
    }

    /// `true` if `p` lies inside the domain (closed on all edges).
    #[inline]
    pub fn contains(&self, p: CabinPoint) -> bool {
        p.is_finite()
            && p.x >= self.x_min
            && p.x <= self.x_max
            && p.y >= self.y_min
            && p.y <= self.y_max
    }

    /// Cell indices containing `p`.  Caller must have checked `contains(p)`;
    /// the max edge maps into the last cell.
    #[inline]
    pub fn cell_of(&self, p: CabinPoint) -> (usize, usize) {
        let ix = (((p.x - self.x_min) / self.dx()) as usize).min(self.nx - 1);
        let iy = (((p.y - self.y_min) / self.dy()) as usize).min(self.ny - 1);
        (ix, iy)
    }

    /// Centre of cell `(ix, iy)`.
    #[inline]
    pub fn cell_center(&self, ix: usize, iy: usize) -> CabinPoint {
        CabinPoint::new(
            self.x_min + (ix as f64 + 0.5) * self.dx(),
            self.y_min + (iy as f64 + 0.5) * self.dy(),
        )
    }
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

/// One time-stamped concentration snapshot: a value per grid cell,
/// row-major (`cell = iy * nx + ix`).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// Simulated seconds at which the CFD collaborator exported this frame.
    pub time_secs: f64,
    pub values: Vec<f64>,
}

impl Snapshot {
    pub fn new(time_secs: f64, values: Vec<f64>) -> Self {
        Self { time_secs, values }
    }
}

// ── ConcentrationField ────────────────────────────────────────────────────────

/// An immutable spatio-temporal concentration field.
///
/// Invariants, established once at construction:
/// - at least one snapshot;
/// - strictly increasing snapshot timestamps;
/// - every snapshot has exactly `grid.cell_count()` values;
/// - every value is finite and non-negative.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConcentrationField {
    grid: FieldGrid,
    /// Unit of concentration, carried through to reports (e.g. "quanta/m3").
    unit: String,
    snapshots: Vec<Snapshot>,
}

impl ConcentrationField {
    /// Validate and freeze a field.  This is the only constructor; all
    /// sampling code may rely on the invariants listed on the type.
    pub fn new(
        grid: FieldGrid,
        unit: impl Into<String>,
        snapshots: Vec<Snapshot>,
    ) -> FieldResult<Self> {
        grid.validate()?;
        if snapshots.is_empty() {
            return Err(FieldError::EmptySnapshots);
        }

        let expected = grid.cell_count();
        let mut prev_time = f64::NEG_INFINITY;
        for (index, snap) in snapshots.iter().enumerate() {
            if !snap.time_secs.is_finite() || snap.time_secs <= prev_time {
                return Err(FieldError::NonMonotonicTimestamps {
                    index,
                    time: snap.time_secs,
                    prev: prev_time,
                });
            }
            prev_time = snap.time_secs;

            if snap.values.len() != expected {
                return Err(FieldError::SnapshotSizeMismatch {
                    index,
                    expected,
                    got: snap.values.len(),
                });
            }
            for (cell, &value) in snap.values.iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(FieldError::InvalidValue { index, cell, value });
                }
            }
        }

        Ok(Self {
            grid,
            unit: unit.into(),
            snapshots,
        })
    }

    #[inline]
    pub fn grid(&self) -> &FieldGrid {
        &self.grid
    }

    #[inline]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    #[inline]
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Inclusive time range `[first, last]` covered by the snapshots.
    #[inline]
    pub fn time_coverage(&self) -> (f64, f64) {
        (
            self.snapshots[0].time_secs,
            self.snapshots[self.snapshots.len() - 1].time_secs,
        )
    }

    /// `true` if `[t0, t1]` lies fully inside the covered time range.
    #[inline]
    pub fn covers_interval(&self, t0: f64, t1: f64) -> bool {
        let (start, end) = self.time_coverage();
        t0 >= start && t1 <= end
    }

    /// Index of the last snapshot with `time_secs <= t`.  Caller must have
    /// checked that `t` is within coverage.
    #[inline]
    pub(crate) fn bracket_index(&self, t: f64) -> usize {
        // partition_point returns the count of snapshots with time <= t,
        // which is >= 1 inside coverage.
        let upper = self.snapshots.partition_point(|s| s.time_secs <= t);
        upper - 1
    }
}

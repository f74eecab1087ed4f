//! Point/time sampling and time-interval integration over a
//! [`ConcentrationField`].
//!
//! # Interpolation
//!
//! Spatial: nearest-cell or bilinear between the four surrounding cell
//! centres, chosen at sampler construction.  Bilinear clamps to the centre
//! grid at the domain edges (no extrapolation beyond the outermost centres).
//!
//! Temporal: linear between the two snapshots bracketing the query time.
//!
//! # Integration
//!
//! Concentration at a fixed position is piecewise-linear in time, so
//! [`FieldSampler::integrate`] splits `[t0, t1]` at every interior snapshot
//! timestamp and sums exact trapezoids — not a naive `c(t0) * (t1 - t0)`.
//! The result is additive over interval subdivisions up to float rounding.

use acr_core::CabinPoint;

use crate::{ConcentrationField, FieldError, FieldResult};

// ── SpatialInterp ─────────────────────────────────────────────────────────────

/// Spatial interpolation scheme used by [`FieldSampler::sample`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpatialInterp {
    /// Value of the cell containing the query point.
    #[default]
    NearestCell,
    /// Bilinear blend of the four surrounding cell centres.
    Bilinear,
}

// ── FieldSampler ──────────────────────────────────────────────────────────────

/// Pure query interface over an immutable [`ConcentrationField`].
///
/// Holds no mutable state; share one instance read-only (behind `Arc`)
/// across all replicate workers.
#[derive(Clone, Debug)]
pub struct FieldSampler {
    field: ConcentrationField,
    interp: SpatialInterp,
}

impl FieldSampler {
    pub fn new(field: ConcentrationField, interp: SpatialInterp) -> Self {
        Self { field, interp }
    }

    #[inline]
    pub fn field(&self) -> &ConcentrationField {
        &self.field
    }

    #[inline]
    pub fn interp(&self) -> SpatialInterp {
        self.interp
    }

    /// Concentration at `position` and time `t`.
    ///
    /// Fails with [`FieldError::OutOfDomain`] / [`FieldError::OutOfCoverage`]
    /// rather than extrapolating.
    pub fn sample(&self, position: CabinPoint, t: f64) -> FieldResult<f64> {
        self.check_position(position)?;
        self.check_time(t)?;

        let k = self.field.bracket_index(t);
        let snaps = self.field.snapshots();
        if k + 1 == snaps.len() {
            // Exactly at the last snapshot.
            return Ok(self.spatial_at(position, k));
        }

        let (ta, tb) = (snaps[k].time_secs, snaps[k + 1].time_secs);
        let f = (t - ta) / (tb - ta);
        let ca = self.spatial_at(position, k);
        let cb = self.spatial_at(position, k + 1);
        Ok(ca + (cb - ca) * f)
    }

    /// Time integral of concentration at a fixed `position` over `[t0, t1]`,
    /// in concentration-seconds.
    ///
    /// Piecewise-linear: exact trapezoids over every snapshot interval
    /// intersecting `[t0, t1]`.  `t1 >= t0` is required and the whole
    /// interval must be within coverage.
    pub fn integrate(&self, position: CabinPoint, t0: f64, t1: f64) -> FieldResult<f64> {
        if !t0.is_finite() || !t1.is_finite() || t1 < t0 {
            return Err(FieldError::InvalidInterval { t0, t1 });
        }
        self.check_position(position)?;
        self.check_time(t0)?;
        self.check_time(t1)?;
        if t1 == t0 {
            return Ok(0.0);
        }

        let snaps = self.field.snapshots();
        let k0 = self.field.bracket_index(t0);
        let k1 = self.field.bracket_index(t1);

        // Spatial values at each snapshot touching the interval, computed once.
        let values: Vec<f64> = (k0..=(k1 + 1).min(snaps.len() - 1))
            .map(|k| self.spatial_at(position, k))
            .collect();
        let value_at = |t: f64| -> f64 {
            let k = self.field.bracket_index(t);
            if k + 1 == snaps.len() {
                return values[k - k0];
            }
            let (ta, tb) = (snaps[k].time_secs, snaps[k + 1].time_secs);
            let f = (t - ta) / (tb - ta);
            let ca = values[k - k0];
            let cb = values[k + 1 - k0];
            ca + (cb - ca) * f
        };

        let mut total = 0.0;
        let mut seg_start = t0;
        let mut seg_start_c = value_at(t0);
        for snap in &snaps[(k0 + 1)..=k1] {
            let ti = snap.time_secs;
            if ti <= seg_start {
                continue;
            }
            let ci = value_at(ti);
            total += 0.5 * (seg_start_c + ci) * (ti - seg_start);
            seg_start = ti;
            seg_start_c = ci;
        }
        let end_c = value_at(t1);
        total += 0.5 * (seg_start_c + end_c) * (t1 - seg_start);

        Ok(total)
    }

    // ── Internal helpers ──────────────────────────────────────────────────

    fn check_position(&self, position: CabinPoint) -> FieldResult<()> {
        if !self.field.grid().contains(position) {
            return Err(FieldError::OutOfDomain { position });
        }
        Ok(())
    }

    fn check_time(&self, t: f64) -> FieldResult<()> {
        let (start, end) = self.field.time_coverage();
        if !t.is_finite() || t < start || t > end {
            return Err(FieldError::OutOfCoverage {
                time: t,
                start,
                end,
            });
        }
        Ok(())
    }

    /// Spatial interpolation within snapshot `k`.  Position already bounds-checked.
    fn spatial_at(&self, p: CabinPoint, k: usize) -> f64 {
        let grid = self.field.grid();
        let values = &self.field.snapshots()[k].values;

        match self.interp {
            SpatialInterp::NearestCell => {
                let (ix, iy) = grid.cell_of(p);
                values[iy * grid.nx + ix]
            }
            SpatialInterp::Bilinear => {
                // Continuous cell-centre coordinates; edge-clamped.
                let u = ((p.x - grid.x_min) / grid.dx() - 0.5)
                    .clamp(0.0, (grid.nx - 1) as f64);
                let v = ((p.y - grid.y_min) / grid.dy() - 0.5)
                    .clamp(0.0, (grid.ny - 1) as f64);

                let ix0 = (u as usize).min(grid.nx.saturating_sub(2));
                let iy0 = (v as usize).min(grid.ny.saturating_sub(2));
                let ix1 = (ix0 + 1).min(grid.nx - 1);
                let iy1 = (iy0 + 1).min(grid.ny - 1);
                let fx = (u - ix0 as f64).clamp(0.0, 1.0);
                let fy = (v - iy0 as f64).clamp(0.0, 1.0);

                let at = |ix: usize, iy: usize| values[iy * grid.nx + ix];
                let c00 = at(ix0, iy0);
                let c10 = at(ix1, iy0);
                let c01 = at(ix0, iy1);
                let c11 = at(ix1, iy1);

                let bottom = c00 + (c10 - c00) * fx;
                let top = c01 + (c11 - c01) * fx;
                bottom + (top - bottom) * fy
            }
        }
    }
}

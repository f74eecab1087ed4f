//! Synthetic concentration field for the demo.
//!
//! Stands in for a CFD solve: each infectious passenger contributes a
//! Gaussian plume centred on their seat, wide along the cabin axis and
//! narrow across it (recirculating row-wise airflow spreads aerosols much
//! further fore-aft than port-starboard).  The plume pattern is static over
//! the flight; a real CFD export would supply time-varying snapshots on the
//! same grid.

use acr_core::CabinPoint;
use acr_field::{ConcentrationField, FieldGrid, FieldResult, Snapshot};

/// Grid resolution matching the 50 × 20 export the CFD side produces.
const GRID_NX: usize = 50;
const GRID_NY: usize = 20;

/// Peak concentration one source adds at its own seat.
const SOURCE_PEAK: f64 = 10.0;
/// Plume spread along the cabin axis, metres.
const SIGMA_X_M: f64 = 5.0;
/// Plume spread across the cabin, metres.
const SIGMA_Y_M: f64 = 2.0;

/// Build a static plume field over the cabin from the source positions.
pub fn plume_field(
    length_m: f64,
    width_m: f64,
    sources: &[CabinPoint],
    horizon_secs: f64,
) -> FieldResult<ConcentrationField> {
    let grid = FieldGrid::new(0.0, length_m, 0.0, width_m, GRID_NX, GRID_NY)?;

    let mut values = vec![0.0; grid.cell_count()];
    for iy in 0..GRID_NY {
        for ix in 0..GRID_NX {
            let centre = grid.cell_center(ix, iy);
            let mut c = 0.0;
            for s in sources {
                let dx = (centre.x - s.x) / SIGMA_X_M;
                let dy = (centre.y - s.y) / SIGMA_Y_M;
                c += SOURCE_PEAK * (-0.5 * (dx * dx + dy * dy)).exp();
            }
            values[iy * GRID_NX + ix] = c;
        }
    }

    ConcentrationField::new(
        grid,
        "quanta/m3",
        vec![
            Snapshot::new(0.0, values.clone()),
            Snapshot::new(horizon_secs, values),
        ],
    )
}

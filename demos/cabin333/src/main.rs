//! cabin333 — full-cabin demo for the acr cabin-risk engine.
//!
//! A 3-3-3 twin-aisle cabin at ~90% occupancy flies a one-hour segment
//! with three infectious passengers aboard.  The concentration field is a
//! synthetic Gaussian plume centred on the sources (stand-in for a CFD
//! export on the same grid).  The ensemble runs twice: once with no
//! interventions and once with universal masking plus boosted ventilation,
//! and the report for the baseline run lands in `output/cabin333/`.

mod field;

use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use acr_core::{AgentId, CabinPoint, HealthState};
use acr_ensemble::{EnsembleRunner, EnsembleSummary};
use acr_field::{FieldSampler, SpatialInterp};
use acr_infection::{DoseResponse, InfectionModel, ProgressionTimer};
use acr_output::{write_report, CsvWriter};
use acr_scenario::{
    AgentSpec, CabinLayout, InterventionPolicy, ScenarioConfig, TrajectoryKind,
};
use acr_sim::Scenario;

use field::plume_field;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED_BASE: u64 = 42;
const STEP_SECS: f64 = 1.0;
const HORIZON_SECS: f64 = 3_600.0; // one-hour segment
const REPLICATES: u32 = 100;

/// Seats left empty: every 10th, giving ~90% occupancy.
const EMPTY_SEAT_STRIDE: u32 = 10;

/// `(row, column)` of the infectious passengers.
const SOURCE_SEATS: [(u32, u32); 3] = [(2, 4), (10, 1), (20, 7)];

const MASK_EFFICACY: f64 = 0.6;
const VENTILATION_BOOST: f64 = 1.5;

// ── Roster ────────────────────────────────────────────────────────────────────

/// Fill the cabin to ~90%, seed the sources, and add two crew members.
///
/// Every passenger gets the bathroom-visitor trajectory (anyone may get up
/// during a one-hour flight); crew patrol the aisles for the whole segment.
fn build_roster(layout: &CabinLayout) -> Result<Vec<AgentSpec>> {
    let mut roster = Vec::new();
    let mut skipped = 0u32;

    for seat in layout.seats() {
        let ordinal = seat.row * 9 + seat.column;
        if ordinal % EMPTY_SEAT_STRIDE == EMPTY_SEAT_STRIDE - 1 {
            skipped += 1;
            continue;
        }
        // Crew take the last two occupied seats of the rear row.
        let is_crew = seat.row == 26 && seat.column >= 7;
        let is_source = SOURCE_SEATS.contains(&(seat.row, seat.column));
        roster.push(AgentSpec {
            seat: seat.id,
            kind: if is_crew {
                TrajectoryKind::crew_default()
            } else {
                TrajectoryKind::bathroom_default()
            },
            initial_state: if is_source {
                HealthState::Infectious
            } else {
                HealthState::Susceptible
            },
            compliant: true,
        });
    }

    println!(
        "Roster: {} aboard ({} seats left empty, {} sources, 2 crew)",
        roster.len(),
        skipped,
        SOURCE_SEATS.len()
    );
    Ok(roster)
}

fn source_positions(layout: &CabinLayout) -> Result<Vec<CabinPoint>> {
    SOURCE_SEATS
        .iter()
        .map(|&(row, column)| {
            let id = layout.seat_at(row, column)?;
            Ok(layout.seat(id).position)
        })
        .collect()
}

// ── Scenario assembly ─────────────────────────────────────────────────────────

fn build_scenario(policy: InterventionPolicy) -> Result<Scenario> {
    let layout = CabinLayout::three_three_three();
    let sources = source_positions(&layout)?;
    let field = plume_field(layout.length_m(), layout.width_m(), &sources, HORIZON_SECS)?;

    Ok(Scenario {
        sampler: FieldSampler::new(field, SpatialInterp::Bilinear),
        policy,
        model: InfectionModel::new(
            DoseResponse::exponential_default(),
            // Latent and infectious periods far exceed one flight; within
            // the horizon virtually all transitions are S→E.
            ProgressionTimer::Exponential { mean_secs: 2.0 * 24.0 * 3_600.0 },
            ProgressionTimer::Exponential { mean_secs: 5.0 * 24.0 * 3_600.0 },
        )?,
        roster: build_roster(&layout)?,
        layout,
        config: ScenarioConfig {
            step_secs: STEP_SECS,
            horizon_secs: HORIZON_SECS,
            replicates: REPLICATES,
            seed_base: SEED_BASE,
            percentiles: vec![5.0, 50.0, 95.0],
            workers: None, // all logical cores
            step_budget: None,
            wall_clock_budget_secs: None,
        },
    })
}

fn masked_policy(roster_len: usize) -> Result<InterventionPolicy> {
    let masks: HashMap<AgentId, f64> = (0..roster_len as u32)
        .map(|i| (AgentId(i), MASK_EFFICACY))
        .collect();
    Ok(InterventionPolicy::new(
        VENTILATION_BOOST,
        masks,
        Default::default(),
    )?)
}

fn run_ensemble(name: &str, scenario: Scenario) -> Result<EnsembleSummary> {
    let t0 = Instant::now();
    let summary = EnsembleRunner::new(scenario)?.run()?;
    println!(
        "{name}: {}/{} replicates in {:.2} s  |  attack rate mean {:.4}, p95 {:.4}",
        summary.completed,
        summary.replicates,
        t0.elapsed().as_secs_f64(),
        summary.attack_rate.mean,
        summary
            .attack_rate
            .percentiles
            .iter()
            .find(|&&(p, _)| p == 95.0)
            .map(|&(_, v)| v)
            .unwrap_or(f64::NAN),
    );
    for failure in &summary.failures {
        eprintln!("  replicate {} failed: {}", failure.replicate, failure.error);
    }
    Ok(summary)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== cabin333 — airborne cabin-risk ensemble ===");
    println!(
        "Cabin: 3-3-3 twin-aisle  |  Horizon: {HORIZON_SECS} s  |  Replicates: {REPLICATES}  |  Seed base: {SEED_BASE}"
    );
    println!();

    // 1. Baseline: no interventions.
    let baseline_scenario = build_scenario(InterventionPolicy::baseline())?;
    let roster_len = baseline_scenario.roster.len();
    let baseline = run_ensemble("baseline", baseline_scenario)?;

    // 2. Intervention: universal masks + boosted ventilation.
    let masked = run_ensemble(
        "masks+ventilation",
        build_scenario(masked_policy(roster_len)?)?,
    )?;

    // 3. Zone table for the baseline run.
    println!();
    println!("{:<14} {:>12} {:>12} {:>12}", "Zone", "mean dose", "p5", "p95");
    println!("{}", "-".repeat(54));
    for zs in &baseline.zone_stats {
        let p5 = zs.exposure.percentiles.first().map(|&(_, v)| v).unwrap_or(0.0);
        let p95 = zs.exposure.percentiles.last().map(|&(_, v)| v).unwrap_or(0.0);
        println!(
            "{:<14} {:>12.2} {:>12.2} {:>12.2}",
            zs.label, zs.exposure.mean, p5, p95
        );
    }

    // 4. Intervention effect.
    println!();
    println!(
        "Universal {:.0}% masks + {VENTILATION_BOOST}x ventilation cut the mean attack rate {:.4} → {:.4}",
        MASK_EFFICACY * 100.0,
        baseline.attack_rate.mean,
        masked.attack_rate.mean
    );

    // 5. Write the baseline report.
    let out_dir = Path::new("output/cabin333");
    std::fs::create_dir_all(out_dir)?;
    let mut writer = CsvWriter::new(out_dir, &[5.0, 50.0, 95.0])?;
    write_report(&mut writer, &baseline)?;
    println!();
    println!("Baseline report written to {}", out_dir.display());

    Ok(())
}

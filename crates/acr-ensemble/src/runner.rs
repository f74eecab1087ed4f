//! The ensemble runner and the outcome merge.

use acr_core::{ReplicateId, ZoneId};
use acr_scenario::AgentClass;
use acr_sim::{CancelToken, NoopObserver, RiskRecord, RunBuilder, RunError, Scenario};
use serde::{Deserialize, Serialize};

use crate::error::{EnsembleError, EnsembleResult};
use crate::stats::{ClassStats, SummaryStats, ZoneStats};

/// One failed replicate, kept in the summary for the run report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicateFailure {
    pub replicate: ReplicateId,
    /// Rendered [`RunError`], including the step it occurred at.
    pub error: String,
}

/// Everything an ensemble run reports: per-replicate records, failure
/// accounting, and cross-replicate statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleSummary {
    /// Replicates requested.
    pub replicates: u32,
    /// Replicates that ran to the horizon.
    pub completed: usize,
    pub failures: Vec<ReplicateFailure>,
    /// In-flight infection fraction across replicates.
    pub attack_rate: SummaryStats,
    /// Absolute in-flight infection count across replicates.
    pub in_flight_infections: SummaryStats,
    pub class_stats: Vec<ClassStats>,
    pub zone_stats: Vec<ZoneStats>,
    /// Completed replicate records in replicate order, for per-agent output.
    pub records: Vec<RiskRecord>,
}

impl EnsembleSummary {
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }
}

/// Drives `config.replicates` independent runs of one scenario.
pub struct EnsembleRunner {
    scenario: Scenario,
    cancel: CancelToken,
}

impl EnsembleRunner {
    pub fn new(scenario: Scenario) -> EnsembleResult<Self> {
        scenario.validate()?;
        Ok(EnsembleRunner {
            scenario,
            cancel: CancelToken::new(),
        })
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// A token that cancels every in-flight and not-yet-started replicate.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Run the full ensemble and merge the outcomes.
    ///
    /// With the `parallel` feature, replicates run on a Rayon pool sized by
    /// `config.workers` (all logical cores if unset).  Results come back in
    /// replicate order either way, and per-replicate determinism makes the
    /// merged summary independent of the pool size.
    pub fn run(&self) -> EnsembleResult<EnsembleSummary> {
        let n = self.scenario.config.replicates;
        let outcomes = self.run_replicates(n)?;
        merge(&self.scenario, outcomes)
    }

    fn run_one(&self, i: u32) -> (ReplicateId, Result<RiskRecord, RunError>) {
        let replicate = ReplicateId(i);
        let outcome = RunBuilder::new(replicate, &self.scenario)
            .cancel(self.cancel.clone())
            .build()
            .and_then(|mut run| run.run(&mut NoopObserver));
        (replicate, outcome)
    }

    #[cfg(not(feature = "parallel"))]
    fn run_replicates(
        &self,
        n: u32,
    ) -> EnsembleResult<Vec<(ReplicateId, Result<RiskRecord, RunError>)>> {
        Ok((0..n).map(|i| self.run_one(i)).collect())
    }

    #[cfg(feature = "parallel")]
    fn run_replicates(
        &self,
        n: u32,
    ) -> EnsembleResult<Vec<(ReplicateId, Result<RiskRecord, RunError>)>> {
        use rayon::prelude::*;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.scenario.config.workers.unwrap_or(0))
            .build()
            .map_err(|e| EnsembleError::WorkerPool(e.to_string()))?;

        // into_par_iter over a range collects in index order, so the output
        // is replicate-ordered regardless of scheduling.
        Ok(pool.install(|| (0..n).into_par_iter().map(|i| self.run_one(i)).collect()))
    }
}

/// Merge per-replicate outcomes into an [`EnsembleSummary`].
///
/// Public so drivers that produce outcomes some other way (resumed runs,
/// injected failures in tests) can reuse the statistics path.
pub fn merge(
    scenario: &Scenario,
    outcomes: Vec<(ReplicateId, Result<RiskRecord, RunError>)>,
) -> EnsembleResult<EnsembleSummary> {
    let replicates = outcomes.len() as u32;
    let mut records = Vec::new();
    let mut failures = Vec::new();
    for (replicate, outcome) in outcomes {
        match outcome {
            Ok(record) => records.push(record),
            Err(e) => failures.push(ReplicateFailure {
                replicate,
                error: e.to_string(),
            }),
        }
    }

    if records.is_empty() {
        let first_error = failures
            .first()
            .map(|f| f.error.clone())
            .unwrap_or_else(|| "no replicates were run".into());
        return Err(EnsembleError::AllReplicatesFailed {
            replicates,
            first_error,
        });
    }

    let percentiles = &scenario.config.percentiles;

    let attack_rate = SummaryStats::from_samples(
        records.iter().map(RiskRecord::attack_rate).collect(),
        percentiles,
    );
    let in_flight_infections = SummaryStats::from_samples(
        records
            .iter()
            .map(|r| r.in_flight_infections() as f64)
            .collect(),
        percentiles,
    );

    let class_stats = class_stats(&records, percentiles);
    let zone_stats = zone_stats(scenario, &records, percentiles);

    Ok(EnsembleSummary {
        replicates,
        completed: records.len(),
        failures,
        attack_rate,
        in_flight_infections,
        class_stats,
        zone_stats,
        records,
    })
}

/// Per-class mean dose and infection fraction, sampled per replicate.
///
/// Classes with no agents in any replicate are omitted.
fn class_stats(records: &[RiskRecord], percentiles: &[f64]) -> Vec<ClassStats> {
    AgentClass::ALL
        .iter()
        .filter_map(|&class| {
            let mut dose_samples = Vec::with_capacity(records.len());
            let mut rate_samples = Vec::with_capacity(records.len());
            for record in records {
                let members: Vec<_> = record
                    .agents
                    .iter()
                    .filter(|a| a.class == class)
                    .collect();
                if members.is_empty() {
                    continue;
                }
                let n = members.len() as f64;
                dose_samples.push(members.iter().map(|a| a.dose).sum::<f64>() / n);
                let infected = members
                    .iter()
                    .filter(|a| matches!(a.onset_secs, Some(t) if t > 0.0))
                    .count();
                rate_samples.push(infected as f64 / n);
            }
            if dose_samples.is_empty() {
                return None;
            }
            Some(ClassStats {
                class,
                mean_dose: SummaryStats::from_samples(dose_samples, percentiles),
                infection_rate: SummaryStats::from_samples(rate_samples, percentiles),
            })
        })
        .collect()
}

fn zone_stats(
    scenario: &Scenario,
    records: &[RiskRecord],
    percentiles: &[f64],
) -> Vec<ZoneStats> {
    (0..scenario.layout.zone_count())
        .map(|z| {
            let zone = ZoneId(z as u16);
            let samples = records.iter().map(|r| r.zone_exposure[z]).collect();
            ZoneStats {
                zone,
                label: scenario.layout.zone_label(zone),
                exposure: SummaryStats::from_samples(samples, percentiles),
            }
        })
        .collect()
}

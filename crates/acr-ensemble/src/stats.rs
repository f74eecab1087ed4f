//! Summary statistics over replicate samples.

use acr_core::ZoneId;
use acr_scenario::AgentClass;
use serde::{Deserialize, Serialize};

/// Distribution summary of one metric across completed replicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Number of samples (completed replicates).
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n-1 denominator); 0 for a single sample.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// Requested percentiles as `(percentile, value)` pairs.
    pub percentiles: Vec<(f64, f64)>,
}

impl SummaryStats {
    /// Summarize a non-empty sample set.
    ///
    /// Percentiles use linear interpolation between order statistics, so
    /// the 50th percentile of `[1, 2, 3, 4]` is 2.5.
    ///
    /// # Panics
    /// Panics in debug mode on an empty sample set; callers gate on at
    /// least one completed replicate.
    pub fn from_samples(mut samples: Vec<f64>, percentiles: &[f64]) -> Self {
        debug_assert!(!samples.is_empty());
        let count = samples.len();
        let n = count as f64;

        let mean = samples.iter().sum::<f64>() / n;
        let std_dev = if count > 1 {
            let ss = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>();
            (ss / (n - 1.0)).sqrt()
        } else {
            0.0
        };

        samples.sort_by(|a, b| a.total_cmp(b));
        let percentiles = percentiles
            .iter()
            .map(|&p| (p, percentile_of_sorted(&samples, p)))
            .collect();

        SummaryStats {
            count,
            mean,
            std_dev,
            min: samples[0],
            max: samples[count - 1],
            percentiles,
        }
    }
}

/// Linear-interpolated percentile of an ascending-sorted slice.
fn percentile_of_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = p / 100.0 * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi.min(n - 1)] - sorted[lo]) * frac
}

/// Per-agent-class statistics across replicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassStats {
    pub class: AgentClass,
    /// Mean dose per agent of this class, summarized across replicates.
    pub mean_dose: SummaryStats,
    /// In-flight infection fraction within the class, across replicates.
    pub infection_rate: SummaryStats,
}

/// Per-cabin-zone exposure statistics across replicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneStats {
    pub zone: ZoneId,
    /// Human-readable zone name, e.g. `front-left`.
    pub label: String,
    /// Cumulative dose picked up in the zone, summarized across replicates.
    pub exposure: SummaryStats,
}

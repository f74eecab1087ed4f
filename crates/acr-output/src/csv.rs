//! CSV report backend.
//!
//! Creates four files in the configured output directory:
//! - `agent_outcomes.csv`  — one row per agent per completed replicate
//! - `zone_stats.csv`      — per-zone exposure statistics
//! - `class_stats.csv`     — per-class dose and infection statistics
//! - `ensemble_summary.csv`— key/value run accounting and attack rates
//!
//! The percentile columns of the stats files are derived from the
//! scenario's configured percentile list, so the writer takes that list at
//! construction.

use std::fs::File;
use std::path::Path;

use acr_ensemble::{ClassStats, EnsembleSummary, SummaryStats, ZoneStats};
use csv::Writer;

use crate::row::{percentile_label, AgentOutcomeRow};
use crate::writer::ReportWriter;
use crate::OutputResult;

/// Writes the ensemble report to four CSV files.
pub struct CsvWriter {
    outcomes: Writer<File>,
    zones: Writer<File>,
    classes: Writer<File>,
    summary: Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the four CSV files in `dir` and write header rows.
    ///
    /// `percentiles` must match the percentile list the summary was built
    /// with so the stats headers line up with the values.
    pub fn new(dir: &Path, percentiles: &[f64]) -> OutputResult<Self> {
        let mut outcomes = Writer::from_path(dir.join("agent_outcomes.csv"))?;
        outcomes.write_record([
            "replicate",
            "seed",
            "agent_id",
            "seat_id",
            "class",
            "final_state",
            "dose",
            "onset_secs",
        ])?;

        let p_cols: Vec<String> = percentiles.iter().map(|&p| percentile_label(p)).collect();
        let stat_cols = ["count", "mean", "std_dev", "min", "max"];

        let mut zones = Writer::from_path(dir.join("zone_stats.csv"))?;
        let mut header = vec!["zone".to_string(), "label".to_string()];
        header.extend(stat_cols.iter().map(|s| s.to_string()));
        header.extend(p_cols.iter().cloned());
        zones.write_record(&header)?;

        let mut classes = Writer::from_path(dir.join("class_stats.csv"))?;
        let mut header = vec!["class".to_string(), "metric".to_string()];
        header.extend(stat_cols.iter().map(|s| s.to_string()));
        header.extend(p_cols.iter().cloned());
        classes.write_record(&header)?;

        let mut summary = Writer::from_path(dir.join("ensemble_summary.csv"))?;
        summary.write_record(["key", "value"])?;

        Ok(Self {
            outcomes,
            zones,
            classes,
            summary,
            finished: false,
        })
    }
}

/// The `count,mean,std_dev,min,max,p…` tail shared by both stats files.
fn stat_fields(stats: &SummaryStats) -> Vec<String> {
    let mut fields = vec![
        stats.count.to_string(),
        stats.mean.to_string(),
        stats.std_dev.to_string(),
        stats.min.to_string(),
        stats.max.to_string(),
    ];
    fields.extend(stats.percentiles.iter().map(|(_, v)| v.to_string()));
    fields
}

impl ReportWriter for CsvWriter {
    fn write_agent_outcomes(&mut self, rows: &[AgentOutcomeRow]) -> OutputResult<()> {
        for row in rows {
            self.outcomes.write_record(&[
                row.replicate.to_string(),
                row.seed.to_string(),
                row.agent_id.to_string(),
                row.seat_id.to_string(),
                row.class.to_string(),
                row.final_state.to_string(),
                row.dose.to_string(),
                row.onset_secs.map(|t| t.to_string()).unwrap_or_default(),
            ])?;
        }
        Ok(())
    }

    fn write_zone_stats(&mut self, stats: &[ZoneStats]) -> OutputResult<()> {
        for zs in stats {
            let mut record = vec![zs.zone.0.to_string(), zs.label.clone()];
            record.extend(stat_fields(&zs.exposure));
            self.zones.write_record(&record)?;
        }
        Ok(())
    }

    fn write_class_stats(&mut self, stats: &[ClassStats]) -> OutputResult<()> {
        for cs in stats {
            for (metric, s) in [
                ("mean_dose", &cs.mean_dose),
                ("infection_rate", &cs.infection_rate),
            ] {
                let mut record = vec![cs.class.label().to_string(), metric.to_string()];
                record.extend(stat_fields(s));
                self.classes.write_record(&record)?;
            }
        }
        Ok(())
    }

    fn write_summary(&mut self, summary: &EnsembleSummary) -> OutputResult<()> {
        let mut pairs: Vec<(String, String)> = vec![
            ("replicates".into(), summary.replicates.to_string()),
            ("completed".into(), summary.completed.to_string()),
            ("failed".into(), summary.failure_count().to_string()),
        ];
        for (name, stats) in [
            ("attack_rate", &summary.attack_rate),
            ("in_flight_infections", &summary.in_flight_infections),
        ] {
            pairs.push((format!("{name}_mean"), stats.mean.to_string()));
            pairs.push((format!("{name}_std_dev"), stats.std_dev.to_string()));
            pairs.push((format!("{name}_min"), stats.min.to_string()));
            pairs.push((format!("{name}_max"), stats.max.to_string()));
            for &(p, v) in &stats.percentiles {
                pairs.push((format!("{name}_{}", percentile_label(p)), v.to_string()));
            }
        }
        for (key, value) in pairs {
            self.summary.write_record([key, value])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.outcomes.flush()?;
        self.zones.flush()?;
        self.classes.flush()?;
        self.summary.flush()?;
        Ok(())
    }
}

//! The `ReportWriter` trait implemented by report backends.

use acr_ensemble::{ClassStats, EnsembleSummary, ZoneStats};

use crate::row::{agent_outcome_rows, AgentOutcomeRow};
use crate::OutputResult;

/// Trait implemented by report backends (CSV today; anything that can
/// persist an ensemble report).
pub trait ReportWriter {
    /// Write the per-agent, per-replicate outcome rows.
    fn write_agent_outcomes(&mut self, rows: &[AgentOutcomeRow]) -> OutputResult<()>;

    /// Write the per-zone exposure statistics.
    fn write_zone_stats(&mut self, stats: &[ZoneStats]) -> OutputResult<()>;

    /// Write the per-class dose and infection statistics.
    fn write_class_stats(&mut self, stats: &[ClassStats]) -> OutputResult<()>;

    /// Write the top-level ensemble summary (replicate accounting and
    /// attack-rate statistics).
    fn write_summary(&mut self, summary: &EnsembleSummary) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Write a complete ensemble report through any backend.
pub fn write_report<W: ReportWriter>(writer: &mut W, summary: &EnsembleSummary) -> OutputResult<()> {
    writer.write_agent_outcomes(&agent_outcome_rows(summary))?;
    writer.write_zone_stats(&summary.zone_stats)?;
    writer.write_class_stats(&summary.class_stats)?;
    writer.write_summary(summary)?;
    writer.finish()
}

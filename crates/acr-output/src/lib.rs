//! `acr-output` — ensemble report writers for the acr cabin-risk engine.
//!
//! The engine hands a finished
//! [`EnsembleSummary`](acr_ensemble::EnsembleSummary) to a
//! [`ReportWriter`]; the backend decides the on-disk shape.  The CSV
//! backend is the default and writes four files (per-agent outcomes,
//! per-zone stats, per-class stats, and a key/value run summary).

pub mod csv;
pub mod error;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use row::{agent_outcome_rows, AgentOutcomeRow};
pub use writer::{write_report, ReportWriter};

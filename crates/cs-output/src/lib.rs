//! `cs-output` — CSV output backend for the citysim engine (§6).
//!
//! [`SimOutputObserver`] implements `cs_sim::SimObserver` and bridges the
//! tick loop's phase/death/dissolution/weekly-cycle/immigration hooks to any
//! [`OutputWriter`] backend. [`CsvWriter`] is the only backend provided,
//! writing three files: `activity_log.csv`, `transactions.csv`, and
//! `metrics.csv`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cs_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run_ticks(1000, &mut obs);
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod metrics;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use metrics::Metrics;
pub use observer::SimOutputObserver;
pub use row::{ActivityCategory, ActivityLogRow, MetricsRow, Severity, TransactionRow};
pub use writer::OutputWriter;

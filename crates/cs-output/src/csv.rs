//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `activity_log.csv`
//! - `transactions.csv`
//! - `metrics.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::row::{ActivityLogRow, MetricsRow, TransactionRow};
use crate::writer::OutputWriter;
use crate::OutputResult;

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    activity_log: Writer<File>,
    transactions: Writer<File>,
    metrics: Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut activity_log = Writer::from_path(dir.join("activity_log.csv"))?;
        activity_log.write_record(["phase", "category", "severity", "subject_id", "subject_name", "message"])?;

        let mut transactions = Writer::from_path(dir.join("transactions.csv"))?;
        transactions.write_record(["phase", "kind", "from", "to", "amount", "location", "good"])?;

        let mut metrics = Writer::from_path(dir.join("metrics.csv"))?;
        metrics.write_record([
            "phase",
            "retail_sales",
            "wholesale_sales",
            "wage_payments",
            "dividend_payments",
            "deaths",
            "immigrants",
        ])?;

        Ok(Self { activity_log, transactions, metrics, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_activity_log(&mut self, rows: &[ActivityLogRow]) -> OutputResult<()> {
        for row in rows {
            self.activity_log.write_record(&[
                row.phase.to_string(),
                row.category.as_str().to_string(),
                row.severity.as_str().to_string(),
                row.subject_id.to_string(),
                row.subject_name.clone(),
                row.message.clone(),
            ])?;
        }
        Ok(())
    }

    fn write_transactions(&mut self, rows: &[TransactionRow]) -> OutputResult<()> {
        for row in rows {
            self.transactions.write_record(&[
                row.phase.to_string(),
                row.kind.to_string(),
                row.from.clone(),
                row.to.clone(),
                row.amount.to_string(),
                row.location.map(|l| l.to_string()).unwrap_or_default(),
                row.good.clone().unwrap_or_default(),
            ])?;
        }
        Ok(())
    }

    fn write_metrics(&mut self, row: &MetricsRow) -> OutputResult<()> {
        self.metrics.write_record(&[
            row.phase.to_string(),
            row.retail_sales.to_string(),
            row.wholesale_sales.to_string(),
            row.wage_payments.to_string(),
            row.dividend_payments.to_string(),
            row.deaths.to_string(),
            row.immigrants.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.activity_log.flush()?;
        self.transactions.flush()?;
        self.metrics.flush()?;
        Ok(())
    }
}

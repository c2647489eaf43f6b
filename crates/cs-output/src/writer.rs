//! The `OutputWriter` trait implemented by all backend writers.

use crate::row::{ActivityLogRow, MetricsRow, TransactionRow};
use crate::OutputResult;

/// Trait implemented by output backends (CSV today; the shape leaves room
/// for another backend without touching `SimOutputObserver`).
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with [`crate::SimOutputObserver::take_error`].
pub trait OutputWriter {
    /// Write a batch of activity-log rows.
    fn write_activity_log(&mut self, rows: &[ActivityLogRow]) -> OutputResult<()>;

    /// Write a batch of transaction-ledger rows.
    fn write_transactions(&mut self, rows: &[TransactionRow]) -> OutputResult<()>;

    /// Write one phase's metrics row.
    fn write_metrics(&mut self, row: &MetricsRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

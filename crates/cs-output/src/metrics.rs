//! The §6 `Metrics` event sink: per-phase counters derived from the
//! transactions posted during that phase plus the handful of events
//! `SimObserver` surfaces directly.

use cs_world::{Transaction, TransactionKind};

use crate::row::MetricsRow;

/// Accumulates one phase's worth of counters. Reset after each flush.
#[derive(Debug, Default)]
pub struct Metrics {
    deaths: u64,
    immigrants: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_death(&mut self) {
        self.deaths += 1;
    }

    pub fn record_immigrant(&mut self) {
        self.immigrants += 1;
    }

    /// Build this phase's row from `new_transactions` (the slice posted
    /// since the last flush) and this struct's accumulated counters, then
    /// reset the counters for the next phase.
    pub fn take_row(&mut self, phase: u64, new_transactions: &[&Transaction]) -> MetricsRow {
        let mut row = MetricsRow {
            phase,
            deaths: self.deaths,
            immigrants: self.immigrants,
            ..Default::default()
        };
        for tx in new_transactions {
            match tx.kind {
                TransactionKind::Sale => row.retail_sales += 1,
                TransactionKind::Wholesale => row.wholesale_sales += 1,
                TransactionKind::Salary => row.wage_payments += 1,
                TransactionKind::Dividend => row.dividend_payments += 1,
                TransactionKind::Rent | TransactionKind::DeliveryFee | TransactionKind::Immigration => {}
            }
        }
        self.deaths = 0;
        self.immigrants = 0;
        row
    }
}

//! `SimOutputObserver<W>` — bridges `cs_sim::SimObserver` to an
//! `OutputWriter`.

use cs_core::Phase;
use cs_sim::SimObserver;
use cs_world::{AgentId, EntityRef, OrgId, Transaction, World};
use tracing::warn;

use crate::metrics::Metrics;
use crate::row::{ActivityCategory, ActivityLogRow, Severity, TransactionRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes the activity log, transaction ledger, and
/// per-phase metrics to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver`
/// methods have no return value. After `sim.run_ticks()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer: W,
    metrics: Metrics,
    activity_buf: Vec<ActivityLogRow>,
    flushed_transactions: usize,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            metrics: Metrics::new(),
            activity_buf: Vec::new(),
            flushed_transactions: 0,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run_ticks()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            warn!(error = %e, "output write failed");
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }

    fn push(&mut self, phase: u64, category: ActivityCategory, severity: Severity, subject_id: u32, subject_name: String, message: String) {
        self.activity_buf.push(ActivityLogRow { phase, category, severity, subject_id, subject_name, message });
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_death(&mut self, phase: Phase, agent: AgentId, world: &World) {
        self.metrics.record_death();
        let name = world.agent(agent).name.clone();
        self.push(
            phase.0,
            ActivityCategory::Hunger,
            Severity::Warning,
            agent.0,
            name,
            "died of starvation".to_string(),
        );
    }

    fn on_org_dissolved(&mut self, phase: Phase, org: OrgId, reason: &str) {
        self.push(
            phase.0,
            ActivityCategory::Business,
            Severity::Warning,
            org.0,
            format!("org-{}", org.0),
            format!("dissolved: {reason}"),
        );
    }

    fn on_weekly_cycle(&mut self, phase: Phase, org: OrgId, outcome: &cs_econ::WeeklyOutcome) {
        self.push(
            phase.0,
            ActivityCategory::Payroll,
            Severity::Info,
            org.0,
            format!("org-{}", org.0),
            format!(
                "weekly cycle: {} salaries paid, {} released, dividend={}, {} rents paid, {} evictions",
                outcome.salaries_paid, outcome.employees_released, outcome.dividend_paid,
                outcome.rents_paid, outcome.evictions,
            ),
        );
    }

    fn on_immigrant(&mut self, phase: Phase, agent: AgentId) {
        self.metrics.record_immigrant();
        self.push(
            phase.0,
            ActivityCategory::Housing,
            Severity::Info,
            agent.0,
            format!("agent-{}", agent.0),
            "immigrant entered the city".to_string(),
        );
    }

    fn on_phase_end(&mut self, phase: Phase, world: &World) {
        if !self.activity_buf.is_empty() {
            let rows = std::mem::take(&mut self.activity_buf);
            let result = self.writer.write_activity_log(&rows);
            self.store_err(result);
        }

        let all: Vec<&Transaction> = world.transactions.iter().collect();
        let new_txs = &all[self.flushed_transactions..];
        if !new_txs.is_empty() {
            let rows: Vec<TransactionRow> = new_txs.iter().map(|tx| transaction_row(phase.0, tx)).collect();
            let result = self.writer.write_transactions(&rows);
            self.store_err(result);
        }
        let metrics_row = self.metrics.take_row(phase.0, new_txs);
        self.flushed_transactions = all.len();
        let result = self.writer.write_metrics(&metrics_row);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_phase: Phase, _world: &World) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}

fn entity_label(entity: EntityRef) -> String {
    match entity {
        EntityRef::Agent(id) => format!("agent:{}", id.0),
        EntityRef::Org(id) => format!("org:{}", id.0),
        EntityRef::External => "external".to_string(),
    }
}

fn transaction_row(phase: u64, tx: &Transaction) -> TransactionRow {
    TransactionRow {
        phase,
        kind: transaction_kind_str(tx.kind),
        from: entity_label(tx.from),
        to: entity_label(tx.to),
        amount: tx.amount,
        location: tx.location.map(|l| l.0),
        good: tx.good.clone(),
    }
}

fn transaction_kind_str(kind: cs_world::TransactionKind) -> &'static str {
    use cs_world::TransactionKind::*;
    match kind {
        Sale => "sale",
        Wholesale => "wholesale",
        Salary => "salary",
        Dividend => "dividend",
        Rent => "rent",
        DeliveryFee => "delivery_fee",
        Immigration => "immigration",
    }
}

//! Plain data row types written by output backends.

/// One structured lifecycle event (§6): category/severity pair plus a
/// free-text message, emitted for the events the tick loop's
/// [`cs_sim::SimObserver`] hooks actually surface — death, org dissolution,
/// weekly payroll outcome, and immigration. The finer commerce/payroll
/// categories spec.md also names (`commerce`, `costs`, `purchase`, `travel`,
/// ...) are carried instead by [`TransactionRow`], since no executor in this
/// workspace emits a per-step event of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityLogRow {
    pub phase: u64,
    pub category: ActivityCategory,
    pub severity: Severity,
    pub subject_id: u32,
    pub subject_name: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityCategory {
    Business,
    Employment,
    Payroll,
    Housing,
    Hunger,
    Economy,
}

impl ActivityCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Business => "business",
            Self::Employment => "employment",
            Self::Payroll => "payroll",
            Self::Housing => "housing",
            Self::Hunger => "hunger",
            Self::Economy => "economy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
        }
    }
}

/// A [`cs_world::Transaction`] flattened for export — one row per ledger
/// entry, written incrementally as each phase completes.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub phase: u64,
    pub kind: &'static str,
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub location: Option<u32>,
    pub good: Option<String>,
}

/// Per-phase counters (§6 `Metrics`), scoped to what's actually observable:
/// transaction kinds already broken out by [`cs_world::TransactionKind`]
/// (`recordRetailSale`/`recordWholesaleSale`/`recordWagePayment`/
/// `recordDividendPayment`), plus the events `SimObserver` exposes directly
/// (`recordDeath`, `recordImmigrant`). spec.md also names `recordHire` and
/// `recordBusinessOpened`, but neither hiring (`seek_job`) nor opening a
/// business has any transaction or observer hook behind it in this
/// workspace — tracked in DESIGN.md rather than invented here.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricsRow {
    pub phase: u64,
    pub retail_sales: u64,
    pub wholesale_sales: u64,
    pub wage_payments: u64,
    pub dividend_payments: u64,
    pub deaths: u64,
    pub immigrants: u64,
}

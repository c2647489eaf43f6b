//! The append-only `TransactionHistory` — the source of truth for the
//! economy (§3): wallet balances are derivable from initial balances plus
//! this history, never mutated independently of it.

use cs_core::Phase;

use crate::{AgentId, LocationId, OrgId};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EntityRef {
    Agent(AgentId),
    Org(OrgId),
    /// Money sinks/sources with no ledger entity of their own (immigration
    /// stipends, purchase-orphaned sink, etc).
    External,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TransactionKind {
    Sale,
    Wholesale,
    Salary,
    Dividend,
    Rent,
    DeliveryFee,
    /// Starter credits granted to a freshly injected immigrant (§4.1 step
    /// 7) — the money-conservation property's sanctioned `External` inflow.
    Immigration,
}

/// One atomic money transfer, appended by `cs-econ::transact` every time
/// wallets move (§3, §4.4).
#[derive(Clone, Debug)]
pub struct Transaction {
    pub phase: Phase,
    pub kind: TransactionKind,
    pub from: EntityRef,
    pub to: EntityRef,
    pub amount: f64,
    pub location: Option<LocationId>,
    pub good: Option<String>,
}

/// Append-only ledger of every [`Transaction`] in the run.
#[derive(Clone, Debug, Default)]
pub struct TransactionHistory {
    records: Vec<Transaction>,
}

impl TransactionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tx: Transaction) {
        self.records.push(tx);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of every transfer touching `entity`, signed (`+` into, `-` out
    /// of) — used by the money-conservation property test (§8) to check
    /// that wallet deltas match the ledger exactly.
    pub fn net_flow(&self, entity: EntityRef) -> f64 {
        self.records
            .iter()
            .map(|tx| {
                let mut delta = 0.0;
                if tx.to == entity {
                    delta += tx.amount;
                }
                if tx.from == entity {
                    delta -= tx.amount;
                }
                delta
            })
            .sum()
    }
}

//! The active task attached to an agent and its sub-states.
//!
//! A [`Task`] is an instance of a behavior definition (owned by `cs-behavior`)
//! bound to one agent. It survives across phases until its completion
//! conditions hold, a higher-priority behavior pre-empts it, or the agent
//! dies. `cs-world` only knows the *shape* of a task (priority for
//! interrupt comparisons, a small typed parameter bag, and per-executor
//! sub-state) — the condition/executor semantics live in `cs-behavior`.

use std::collections::HashMap;

use crate::{LocationId, OrderId, VehicleId};

/// The four-level priority lattice of §4.2: `canInterrupt(a, b) ⟺
/// prio(a) > prio(b)`, so only the `Ord` relation between variants matters.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Priority {
    Idle,
    Normal,
    High,
    Critical,
}

impl Priority {
    /// `true` if a task at `self` priority may pre-empt one at `other`.
    #[inline]
    pub fn can_interrupt(self, other: Priority) -> bool {
        self > other
    }
}

/// A value in a behavior's `params` bag, as declared in the JSON behavior
/// definition. Kept deliberately small — executors only ever need a string
/// (good kind, location tag, a destination keyword) or a number
/// (threshold, quantity) out of `params`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ParamValue {
    Str(String),
    Num(f64),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            ParamValue::Num(_) => None,
        }
    }

    pub fn as_num(&self) -> Option<f64> {
        match self {
            ParamValue::Num(n) => Some(*n),
            ParamValue::Str(_) => None,
        }
    }
}

pub type Params = HashMap<String, ParamValue>;

/// The delivery executor's six-state sub-machine (§4.3 `deliver_goods`).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeliveryPhase {
    Assigning,
    Boarding,
    ToPickup,
    Loading,
    ToDelivery,
    Unloading,
}

/// The corpse-collection executor's four-state sub-machine, analogous to
/// `DeliveryPhase` (§4.3 `collect_corpses`).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CorpsePhase {
    Scanning,
    Traveling,
    Loading,
    Returning,
}

/// Per-executor scratch state that must persist across phases beyond what
/// `params` (read-only, from the behavior definition) and the agent's own
/// fields already capture.
#[derive(Clone, Debug, Default)]
pub enum TaskState {
    #[default]
    None,
    Delivery {
        phase: DeliveryPhase,
        order: Option<OrderId>,
        vehicle: Option<VehicleId>,
        pickup: Option<LocationId>,
        delivery: Option<LocationId>,
    },
    CorpseCollection {
        phase: CorpsePhase,
        vehicle: Option<VehicleId>,
        depot: Option<LocationId>,
    },
}

/// An active instance of a behavior, attached to one agent.
#[derive(Clone, Debug)]
pub struct Task {
    /// The owning behavior's declaration id — resolves both the executor
    /// and the completion conditions in the registry.
    pub behavior_id: String,
    pub priority: Priority,
    pub params: Params,
    pub state: TaskState,
}

impl Task {
    pub fn new(behavior_id: impl Into<String>, priority: Priority, params: Params) -> Self {
        Self {
            behavior_id: behavior_id.into(),
            priority,
            params,
            state: TaskState::None,
        }
    }

    pub fn param_str(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(ParamValue::as_str)
    }

    pub fn param_num(&self, key: &str) -> Option<f64> {
        self.params.get(key).and_then(ParamValue::as_num)
    }
}

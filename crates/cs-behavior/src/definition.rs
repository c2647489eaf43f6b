//! Declarative behavior definitions and the registry built from them
//! (§4.2, §6).

use std::collections::HashMap;

use cs_world::{Params, Priority};
use serde::Deserialize;

use crate::condition::Condition;
use crate::error::{BehaviorError, BehaviorResult};

/// One JSON-declared behavior (§4.2). `params` carries executor-specific
/// configuration (`destination`, `goodsType`, `locationTag`, ...).
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorDef {
    pub id: String,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub completion_conditions: Vec<Condition>,
    pub priority: Priority,
    pub executor: String,
    #[serde(default)]
    pub params: Params,
}

/// Every declared behavior, indexed two ways: by id (dispatch's task
/// lookup) and by priority tier preserving JSON declaration order within
/// each tier (the scheduler's "JSON order wins" tie-break, §4.2).
pub struct BehaviorRegistry {
    by_id: HashMap<String, BehaviorDef>,
    by_priority: HashMap<Priority, Vec<String>>,
}

impl BehaviorRegistry {
    /// Build a registry from a JSON array of behavior definitions,
    /// preserving array order within each priority tier.
    pub fn from_json(json: &str) -> BehaviorResult<Self> {
        let defs: Vec<BehaviorDef> = serde_json::from_str(json)?;
        Self::from_defs(defs)
    }

    pub fn from_defs(defs: Vec<BehaviorDef>) -> BehaviorResult<Self> {
        let mut by_id = HashMap::with_capacity(defs.len());
        let mut by_priority: HashMap<Priority, Vec<String>> = HashMap::new();

        for def in defs {
            if def.id.is_empty() {
                return Err(BehaviorError::InvalidDefinition(def.id.clone(), "empty id".into()));
            }
            by_priority.entry(def.priority).or_default().push(def.id.clone());
            by_id.insert(def.id.clone(), def);
        }

        Ok(Self { by_id, by_priority })
    }

    pub fn get(&self, id: &str) -> Option<&BehaviorDef> {
        self.by_id.get(id)
    }

    /// Behavior ids at `priority`, in declaration order.
    pub fn ids_at(&self, priority: Priority) -> &[String] {
        self.by_priority.get(&priority).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

//! The default behavior set driving the demo world: get housed, get a job,
//! eat when hungry, rest when tired, buy provisions, fall back to wandering.
//!
//! Loading behaviors from JSON (`--behaviors`) is also supported — see
//! `main.rs` — this module is just what runs absent that flag.

use cs_behavior::condition::{Condition, NeedKind};
use cs_behavior::definition::BehaviorDef;
use cs_world::{Params, Priority};

pub fn default_defs() -> Vec<BehaviorDef> {
    vec![
        BehaviorDef {
            id: "emergency_food".into(),
            conditions: vec![
                Condition::NeedsAbove { need: NeedKind::Hunger, value: 80.0 },
                Condition::InventoryBelow { good: "provisions".into(), qty: 1 },
            ],
            completion_conditions: vec![Condition::NeedsBelow { need: NeedKind::Hunger, value: 80.0 }],
            priority: Priority::Critical,
            executor: "emergency_food".into(),
            params: Params::new(),
        },
        BehaviorDef {
            id: "seek_housing".into(),
            conditions: vec![Condition::Homeless],
            completion_conditions: vec![Condition::HasResidence],
            priority: Priority::High,
            executor: "seek_housing".into(),
            params: Params::new(),
        },
        BehaviorDef {
            id: "rest_when_tired".into(),
            conditions: vec![Condition::NeedsAbove { need: NeedKind::Fatigue, value: 70.0 }],
            completion_conditions: vec![Condition::NeedsBelow { need: NeedKind::Fatigue, value: 70.0 }],
            priority: Priority::High,
            executor: "rest".into(),
            params: Params::new(),
        },
        BehaviorDef {
            id: "seek_job".into(),
            conditions: vec![Condition::Unemployed],
            completion_conditions: vec![Condition::HasEmployment],
            priority: Priority::Normal,
            executor: "seek_job".into(),
            params: Params::new(),
        },
        BehaviorDef {
            id: "work".into(),
            conditions: vec![Condition::AtWorkplace],
            completion_conditions: vec![Condition::Never],
            priority: Priority::Normal,
            executor: "work".into(),
            params: Params::new(),
        },
        BehaviorDef {
            id: "buy_provisions".into(),
            conditions: vec![Condition::InventoryBelow { good: "provisions".into(), qty: 3 }],
            completion_conditions: vec![Condition::InventoryAbove { good: "provisions".into(), qty: 2 }],
            priority: Priority::Normal,
            executor: "purchase".into(),
            params: [("goodsType".to_string(), cs_world::ParamValue::Str("provisions".into()))]
                .into_iter()
                .collect(),
        },
        BehaviorDef {
            id: "wander".into(),
            conditions: Vec::new(),
            completion_conditions: vec![Condition::Never],
            priority: Priority::Idle,
            executor: "wander".into(),
            params: Params::new(),
        },
    ]
}

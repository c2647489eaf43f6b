//! The condition-clause grammar (§4.2) and its evaluator.
//!
//! Clauses are declared as one-key JSON objects tagged by `type` so a
//! behavior's `conditions`/`completionConditions` array deserializes
//! straight off disk; `eval` then walks a clause tree against the live
//! world. Tag-bearing clauses (`atPublicSpace`, `atLocationWithTag`, the
//! shop-ownership predicates) resolve their tag string through the
//! `StringInterner` rather than comparing strings directly, per the
//! typed-predicate-over-interned-tags split described in `cs-core::interner`.

use cs_core::{Config, Phase, StringInterner};
use cs_world::{AgentId, LocationId, Task, World};

/// One of the three bounded needs a `needsAbove`/`needsBelow` clause names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NeedKind {
    Hunger,
    Fatigue,
    Leisure,
}

impl NeedKind {
    fn value(self, world: &World, agent: AgentId) -> f64 {
        let needs = &world.agent(agent).needs;
        match self {
            NeedKind::Hunger => needs.hunger,
            NeedKind::Fatigue => needs.fatigue,
            NeedKind::Leisure => needs.leisure,
        }
    }
}

/// The two named destinations `atLocation` can compare against (the
/// alternative is a bare location id, which this grammar leaves to
/// `atLocationWithTag` / an executor's own target resolution instead of
/// threading raw ids through conditions).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LocationTarget {
    EmployedAt,
    Residence,
}

/// A single entry/completion condition clause (§4.2's clause table). The
/// grammar is flat and composable only through `or`; `conditions` arrays
/// in a behavior definition are themselves an implicit AND over their
/// elements.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Condition {
    NeedsAbove { need: NeedKind, value: f64 },
    NeedsBelow { need: NeedKind, value: f64 },
    InventoryAbove { good: String, qty: u32 },
    InventoryBelow { good: String, qty: u32 },
    HasCredits,
    HasCreditsAbove { amount: f64 },
    HasEmployment,
    Unemployed,
    AtWorkplace,
    NotAtWorkplace,
    NotTraveling,
    Homeless,
    HasResidence,
    AtResidence,
    NotAtResidence,
    AtPublicSpace,
    NotAtPublicSpace,
    IsShopOwner,
    ShopNeedsStock { good: String },
    ShopHasStock { good: String },
    AtLocation { target: LocationTarget },
    AtLocationWithTag { tag: String },
    NotAtLocationWithTag { tag: String },
    PhasesSinceWorkShift { phases: u64 },
    PhasesWorkedThisShift { phases: u64 },
    PhasesSinceDeliveryShift { phases: u64 },
    PhasesDeliveredThisShift { phases: u64 },
    PhasesSinceCorpseShift { phases: u64 },
    MarketHasGoods { good: String },
    PhasesAtPub { phases: u64 },
    Or { clauses: Vec<Condition> },
    Never,
}

fn current_location(world: &World, agent: AgentId) -> Option<LocationId> {
    world.agent(agent).current_location()
}

fn has_tag(world: &World, interner: &StringInterner, location: LocationId, tag: &str) -> bool {
    match interner.lookup(tag) {
        Some(sym) => world.location(location).tags.has(sym),
        None => false,
    }
}

fn at_tagged(world: &World, interner: &StringInterner, agent: AgentId, tag: &str) -> bool {
    current_location(world, agent).is_some_and(|loc| has_tag(world, interner, loc, tag))
}

/// Locations tagged `retail` owned by any org `agent` leads.
fn owned_shops(world: &World, interner: &StringInterner, agent: AgentId) -> Vec<LocationId> {
    let Some(retail) = interner.lookup("retail") else { return Vec::new() };
    world
        .orgs
        .iter()
        .filter(|o| o.leader == agent)
        .flat_map(|o| o.locations.iter().copied())
        .filter(|&loc| world.location(loc).tags.has(retail))
        .collect()
}

/// Evaluate `cond` for `agent` at `phase` against the live `world`.
///
/// `task` is the agent's in-progress task, if any — only
/// [`Condition::PhasesAtPub`] reads it (a per-instance counter an
/// executor maintains in `task.params`, since no dedicated agent field
/// tracks pub-visit duration); every other clause only needs `world`.
pub fn eval(
    cond: &Condition,
    world: &World,
    interner: &StringInterner,
    config: &Config,
    agent: AgentId,
    phase: Phase,
    task: Option<&Task>,
) -> bool {
    let a = world.agent(agent);
    match cond {
        Condition::NeedsAbove { need, value } => need.value(world, agent) > *value,
        Condition::NeedsBelow { need, value } => need.value(world, agent) < *value,
        Condition::InventoryAbove { good, qty } => a.inventory_qty(good) > *qty,
        Condition::InventoryBelow { good, qty } => a.inventory_qty(good) < *qty,
        Condition::HasCredits => a.wallet > 0.0,
        Condition::HasCreditsAbove { amount } => a.wallet > *amount,
        Condition::HasEmployment => a.employment.is_employed(),
        Condition::Unemployed => !a.employment.is_employed(),
        Condition::AtWorkplace => {
            a.employment.employed_at.is_some() && current_location(world, agent) == a.employment.employed_at
        }
        Condition::NotAtWorkplace => {
            a.employment.employed_at.is_none() || current_location(world, agent) != a.employment.employed_at
        }
        Condition::NotTraveling => !a.is_traveling(),
        Condition::Homeless => a.residence.is_none(),
        Condition::HasResidence => a.residence.is_some(),
        Condition::AtResidence => a.residence.is_some() && current_location(world, agent) == a.residence,
        Condition::NotAtResidence => a.residence.is_none() || current_location(world, agent) != a.residence,
        Condition::AtPublicSpace => at_tagged(world, interner, agent, "public"),
        Condition::NotAtPublicSpace => !at_tagged(world, interner, agent, "public"),
        Condition::IsShopOwner => !owned_shops(world, interner, agent).is_empty(),
        Condition::ShopNeedsStock { good } => owned_shops(world, interner, agent)
            .iter()
            .any(|&loc| (world.location(loc).inventory_qty(good) as f64) < config.thresholds.restock_trigger),
        Condition::ShopHasStock { good } => owned_shops(world, interner, agent)
            .iter()
            .any(|&loc| world.location(loc).inventory_qty(good) >= config.thresholds.goods_order_stock_floor),
        Condition::AtLocation { target } => {
            let want = match target {
                LocationTarget::EmployedAt => a.employment.employed_at,
                LocationTarget::Residence => a.residence,
            };
            want.is_some() && current_location(world, agent) == want
        }
        Condition::AtLocationWithTag { tag } => at_tagged(world, interner, agent, tag),
        Condition::NotAtLocationWithTag { tag } => !at_tagged(world, interner, agent, tag),
        Condition::PhasesSinceWorkShift { phases } => a
            .work_shift
            .last_shift_end_phase
            .is_some_and(|p| phase.since(p) >= *phases),
        Condition::PhasesWorkedThisShift { phases } => a.work_shift.phases_worked as u64 >= *phases,
        Condition::PhasesSinceDeliveryShift { phases } => a
            .delivery_shift
            .last_shift_end_phase
            .is_some_and(|p| phase.since(p) >= *phases),
        Condition::PhasesDeliveredThisShift { phases } => a.delivery_shift.phases_worked as u64 >= *phases,
        Condition::PhasesSinceCorpseShift { phases } => a
            .corpse_shift
            .last_shift_end_phase
            .is_some_and(|p| phase.since(p) >= *phases),
        Condition::MarketHasGoods { good } => {
            let Some(retail) = interner.lookup("retail") else { return false };
            world
                .locations
                .iter()
                .any(|l| l.tags.has(retail) && l.inventory_qty(good) > 0)
        }
        Condition::PhasesAtPub { phases } => {
            task.and_then(|t| t.param_num("phasesAtPub")).is_some_and(|v| v >= *phases as f64)
        }
        Condition::Or { clauses } => {
            clauses.iter().any(|c| eval(c, world, interner, config, agent, phase, task))
        }
        Condition::Never => false,
    }
}

/// `true` iff every clause in `clauses` holds (the implicit AND over a
/// behavior's `conditions`/`completionConditions` array).
pub fn eval_all(
    clauses: &[Condition],
    world: &World,
    interner: &StringInterner,
    config: &Config,
    agent: AgentId,
    phase: Phase,
    task: Option<&Task>,
) -> bool {
    clauses.iter().all(|c| eval(c, world, interner, config, agent, phase, task))
}

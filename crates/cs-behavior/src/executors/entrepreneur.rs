//! `entrepreneur` (§4.3): an unemployed agent starts a small business
//! against the Business Opportunity Service's weighted demand score.

use cs_core::{AgentRng, Config, LocationTemplate, Phase, StringInterner};
use cs_world::{helpers, AgentId, Location, Org, Task, World};

use crate::executor::Executor;
use crate::executors::common::find_placement;

/// Demand score for one location template: how understocked its tagged
/// retail locations currently are, city-wide, plus a flat floor so a
/// never-yet-built template still has a chance (otherwise the first
/// business of any given kind could never be founded).
fn demand_score(world: &World, interner: &StringInterner, config: &Config, template: &LocationTemplate) -> f64 {
    let tag_syms: Vec<_> = template.tags.iter().filter_map(|t| interner.lookup(t)).collect();
    if tag_syms.len() != template.tags.len() {
        return 0.0;
    }
    let mut score = 1.0;
    for loc in world.locations.iter().filter(|l| tag_syms.iter().all(|&s| l.tags.has(s))) {
        let floor = config.thresholds.restock_trigger;
        score += (floor - loc.inventory_qty("provisions") as f64).max(0.0);
    }
    score
}

pub struct Entrepreneur;

impl Executor for Entrepreneur {
    fn step(
        &self,
        world: &mut World,
        config: &Config,
        interner: &StringInterner,
        agent: AgentId,
        phase: Phase,
        rng: &mut AgentRng,
        _task: &mut Task,
    ) -> bool {
        if world.agent(agent).employment.is_employed() {
            return true;
        }
        if rng.gen_bool(config.business.entrepreneur_try_rate) {
            try_found_business(world, config, interner, agent, phase, rng);
        }
        false // entrepreneur retries every phase until employed
    }
}

fn try_found_business(
    world: &mut World,
    config: &Config,
    interner: &StringInterner,
    agent: AgentId,
    phase: Phase,
    rng: &mut AgentRng,
) {
    let wallet = world.agent(agent).wallet;
    if wallet < config.thresholds.entrepreneur_credit_floor {
        return;
    }

    let weighted: Vec<(&LocationTemplate, f64)> = config
        .templates
        .locations
        .values()
        .map(|t| (t, demand_score(world, interner, config, t)))
        .collect();
    let Some(chosen) = rng.choose_weighted(&weighted) else {
        return;
    };
    let template = chosen.0.clone();

    if wallet < template.opening_cost {
        return;
    }
    let Some(building) = find_placement(world, interner, &template.allowed_building_tags) else {
        return;
    };

    let seed_capital = (wallet - template.opening_cost) / 2.0;
    world.agent_mut(agent).wallet -= template.opening_cost + seed_capital;

    let mut tags = cs_core::TagSet::new();
    for t in &template.tags {
        if let Some(sym) = interner.lookup(t) {
            tags.insert(sym);
        }
    }

    let org_id = world.push_org(|id| Org {
        id,
        leader: agent,
        wallet: seed_capital,
        locations: Vec::new(),
        weekly_phase_offset: (phase.0 % config.simulation.phases_per_week as u64) as u32,
        tags: cs_core::TagSet::new(),
    });

    let loc_id = world.push_location(|id| Location {
        id,
        building,
        floor: None,
        unit: None,
        tags,
        owner: Some(org_id),
        for_sale: false,
        opening_cost: template.opening_cost,
        employees: Vec::new(),
        employee_slots: template.employee_slots,
        inventory: template
            .starting_inventory
            .iter()
            .map(|(g, q)| (g.clone(), *q as u32))
            .collect(),
        inventory_capacity: template.inventory_capacity,
        residency: None,
    });

    world.org_mut(org_id).locations.push(loc_id);
    helpers::set_employment(world, agent, loc_id, org_id, 0.0, false);
}

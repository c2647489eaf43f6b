//! `consume_luxury` / `consume_entertainment` / `relax_home` (§4.3): the
//! three small one-shot leisure reducers that don't need a dedicated
//! location search.

use cs_core::{AgentRng, Config, Phase, StringInterner};
use cs_world::{AgentId, Task, World};

use crate::executor::Executor;
use crate::executors::common::{travel_toward, Arrival};

/// Consume one unit of `task.params["goodsType"]` (falling back to
/// `default_good`) from the agent's personal inventory, if held, reducing
/// leisure by `pub_satisfaction` — the same per-unit relief `visit_pub`
/// grants for a drink, since both are "spend one unit of a leisure good".
fn consume_one(world: &mut World, config: &Config, agent: AgentId, task: &Task, default_good: &str) -> bool {
    let good = task.param_str("goodsType").unwrap_or(default_good).to_string();
    let agent_ref = world.agent_mut(agent);
    if agent_ref.inventory_qty(&good) == 0 {
        return true; // nothing to consume: fail quietly, nothing more to do
    }
    let entry = agent_ref.inventory.entry(good).or_insert(0);
    *entry -= 1;
    if *entry == 0 {
        let good = task.param_str("goodsType").unwrap_or(default_good).to_string();
        agent_ref.inventory.remove(&good);
    }
    agent_ref.needs.leisure = (agent_ref.needs.leisure - config.thresholds.pub_satisfaction).max(0.0);
    true
}

pub struct ConsumeLuxury;

impl Executor for ConsumeLuxury {
    fn step(
        &self,
        world: &mut World,
        config: &Config,
        _interner: &StringInterner,
        agent: AgentId,
        _phase: Phase,
        _rng: &mut AgentRng,
        task: &mut Task,
    ) -> bool {
        consume_one(world, config, agent, task, "luxury_goods")
    }
}

pub struct ConsumeEntertainment;

impl Executor for ConsumeEntertainment {
    fn step(
        &self,
        world: &mut World,
        config: &Config,
        _interner: &StringInterner,
        agent: AgentId,
        _phase: Phase,
        _rng: &mut AgentRng,
        task: &mut Task,
    ) -> bool {
        consume_one(world, config, agent, task, "entertainment")
    }
}

pub struct RelaxHome;

impl Executor for RelaxHome {
    fn step(
        &self,
        world: &mut World,
        config: &Config,
        _interner: &StringInterner,
        agent: AgentId,
        _phase: Phase,
        _rng: &mut AgentRng,
        _task: &mut Task,
    ) -> bool {
        let Some(home) = world.agent(agent).residence else {
            return true; // homeless: nothing to relax at, fail quietly
        };
        if world.agent(agent).current_location() != Some(home) {
            return matches!(travel_toward(world, config, agent, home), Arrival::Failed);
        }
        world.agent_mut(agent).needs.leisure =
            (world.agent(agent).needs.leisure - config.thresholds.park_satisfaction_per_phase).max(0.0);
        true
    }
}

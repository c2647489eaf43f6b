//! `travel` (§4.3): move an agent to a named destination and stop.

use cs_core::{AgentRng, Config, Phase, StringInterner};
use cs_world::{AgentId, Task, World};

use crate::executor::Executor;
use crate::executors::common::{travel_toward, Arrival};

/// Resolve `task.params["destination"]` against the agent's own fields.
/// `"employedAt"`/`"residence"` are keywords; anything else is parsed as a
/// raw location-id index (used by behaviors that fill in a concrete
/// destination when the task is created, e.g. `seek_job`/`seek_housing`
/// handing off to a follow-up `travel` task).
fn resolve_destination(world: &World, agent: AgentId, task: &Task) -> Option<cs_world::LocationId> {
    match task.param_str("destination")? {
        "employedAt" => world.agent(agent).employment.employed_at,
        "residence" => world.agent(agent).residence,
        raw => raw.parse::<usize>().ok().and_then(|idx| {
            cs_world::LocationId::try_from(idx).ok()
        }),
    }
}

pub struct Travel;

impl Executor for Travel {
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
        let Some(destination) = resolve_destination(world, agent, task) else {
            return true; // nothing to resolve against, nothing to do
        };
        matches!(
            travel_toward(world, config, agent, destination),
            Arrival::Arrived | Arrival::Failed
        )
    }
}

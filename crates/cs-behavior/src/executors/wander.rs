//! `wander` (§4.3, idle priority): drift to the nearest public space.

use cs_core::{AgentRng, Config, Phase, StringInterner};
use cs_world::{AgentId, Task, World};

use crate::executor::Executor;
use crate::executors::common::{location_has_tag, travel_toward, Arrival};

pub struct Wander;

impl Executor for Wander {
    fn step(
        &self,
        world: &mut World,
        config: &Config,
        interner: &StringInterner,
        agent: AgentId,
        _phase: Phase,
        _rng: &mut AgentRng,
        _task: &mut Task,
    ) -> bool {
        let Some(current) = world.agent(agent).current_location() else {
            return false;
        };
        if location_has_tag(world, interner, current, "public") {
            return true;
        }
        let Some(park) = cs_travel::find_nearest_location(world, current, |loc| {
            location_has_tag(world, interner, loc.id, "public")
        }) else {
            return true; // nowhere public to go: fail quietly
        };
        matches!(travel_toward(world, config, agent, park), Arrival::Failed)
    }
}

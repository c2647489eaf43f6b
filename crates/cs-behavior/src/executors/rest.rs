//! `rest` (§4.3): recover fatigue toward a location-dependent floor.

use cs_core::{AgentRng, Config, Phase, StringInterner};
use cs_world::{AgentId, Task, World};

use crate::executor::Executor;
use crate::executors::common::{location_has_tag, travel_toward, Arrival};

pub struct Rest;

impl Executor for Rest {
    fn step(
        &self,
        world: &mut World,
        config: &Config,
        interner: &StringInterner,
        agent: AgentId,
        _phase: Phase,
        _rng: &mut AgentRng,
        task: &mut Task,
    ) -> bool {
        let urgent = task.param_str("restType") == Some("urgent");
        let residence = world.agent(agent).residence;

        if urgent {
            if let Some(home) = residence {
                if world.agent(agent).current_location() != Some(home) {
                    return matches!(travel_toward(world, config, agent, home), Arrival::Failed);
                }
            }
        }

        let current = world.agent(agent).current_location();
        let floor = match current {
            Some(loc) if Some(loc) == residence => config.thresholds.home_rest_reset,
            Some(loc) if location_has_tag(world, interner, loc, "shelter") => {
                config.thresholds.shelter_rest_reset
            }
            _ => config.thresholds.forced_rest_reset,
        };

        let fatigue = &mut world.agent_mut(agent).needs.fatigue;
        *fatigue = fatigue.min(floor);

        world.agent(agent).needs.fatigue < config.thresholds.rest_complete_fatigue
    }
}

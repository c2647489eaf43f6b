//! `leisure` (§4.3): unwind at a pub or park.

use cs_core::{AgentRng, Config, Phase, StringInterner};
use cs_world::{AgentId, LocationId, Task, World};

use crate::executor::Executor;
use crate::executors::common::{location_has_tag, travel_toward, Arrival};

const ALCOHOL: &str = "alcohol";

fn nearest_with_tag(world: &World, interner: &StringInterner, from: LocationId, tag: &str) -> Option<LocationId> {
    cs_travel::find_nearest_location(world, from, |loc| location_has_tag(world, interner, loc.id, tag))
}

pub struct Leisure;

impl Executor for Leisure {
    fn step(
        &self,
        world: &mut World,
        config: &Config,
        interner: &StringInterner,
        agent: AgentId,
        phase: Phase,
        _rng: &mut AgentRng,
        _task: &mut Task,
    ) -> bool {
        if world.agent(agent).needs.leisure < config.thresholds.leisure_complete {
            return true;
        }

        let Some(current) = world.agent(agent).current_location() else {
            return false;
        };

        if location_has_tag(world, interner, current, "leisure") {
            let loc = world.location(current);
            let stocked = loc.inventory_qty(ALCOHOL) >= 1;
            let price = cs_econ::retail_price(config, ALCOHOL);
            let affordable = world.agent(agent).wallet >= price;
            if stocked && affordable {
                if let Some(owner) = loc.owner {
                    let _ = cs_econ::retail_sale(world, config, phase, agent, current, owner, ALCOHOL, 1);
                    world.agent_mut(agent).needs.leisure -= config.thresholds.pub_satisfaction;
                    return false;
                }
            }
            world.agent_mut(agent).needs.leisure -= config.thresholds.park_satisfaction_per_phase;
            return false;
        }

        if location_has_tag(world, interner, current, "public") {
            world.agent_mut(agent).needs.leisure -= config.thresholds.park_satisfaction_per_phase;
            return false;
        }

        if let Some(pub_loc) = nearest_with_tag(world, interner, current, "leisure") {
            return matches!(travel_toward(world, config, agent, pub_loc), Arrival::Failed);
        }
        if let Some(park) = nearest_with_tag(world, interner, current, "public") {
            return matches!(travel_toward(world, config, agent, park), Arrival::Failed);
        }
        true // nowhere to go: fail quietly
    }
}

//! `emergency_food` (§4.3, critical priority): redirect toward the nearest
//! stocked retail location and buy.

use cs_core::{AgentRng, Config, Phase, StringInterner};
use cs_world::{helpers, AgentId, AgentLocation, LocationId, ParamValue, Task, World};

use crate::executor::Executor;
use crate::executors::common::location_has_tag;
use crate::executors::purchase::Purchase;

fn nearest_stocked_retail(world: &World, interner: &StringInterner, from: LocationId) -> Option<LocationId> {
    cs_travel::find_nearest_location(world, from, |loc| {
        location_has_tag(world, interner, loc.id, "retail") && loc.inventory_qty("provisions") > 0
    })
}

pub struct EmergencyFood;

impl Executor for EmergencyFood {
    fn step(
        &self,
        world: &mut World,
        config: &Config,
        interner: &StringInterner,
        agent: AgentId,
        phase: Phase,
        rng: &mut AgentRng,
        task: &mut Task,
    ) -> bool {
        if world.agent(agent).is_traveling() {
            // Already traveling toward *some* destination: retarget toward
            // the nearest stocked shop, searched from where the trip began.
            let from = match &world.agent(agent).location {
                Some(AgentLocation::Traveling { from, .. }) => *from,
                _ => return false,
            };
            if let Some(shop) = nearest_stocked_retail(world, interner, from) {
                cs_travel::redirect_travel(world, config, agent, shop);
            }
            return false;
        }

        let Some(current) = world.agent(agent).current_location() else {
            return false;
        };

        let here_stocked = location_has_tag(world, interner, current, "retail")
            && world.location(current).inventory_qty("provisions") > 0;

        if !here_stocked {
            let Some(shop) = nearest_stocked_retail(world, interner, current) else {
                return true; // no stocked shop anywhere: fail quietly
            };
            if cs_travel::location_distance(world, current, shop) == 0 {
                helpers::set_location(world, agent, shop);
            } else {
                let _ = cs_travel::start_travel(world, config, agent, shop);
                return false;
            }
        }

        task.params
            .entry("goodsType".into())
            .or_insert_with(|| ParamValue::Str("provisions".into()));
        Purchase.step(world, config, interner, agent, phase, rng, task)
    }
}

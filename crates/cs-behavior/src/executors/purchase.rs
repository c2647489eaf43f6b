//! `purchase` (§4.3): buy one good at the nearest stocked shop.

use cs_core::{AgentRng, Config, Phase, StringInterner};
use cs_world::{AgentId, LocationId, Task, World};

use crate::executor::Executor;
use crate::executors::common::{location_has_tag, travel_toward, Arrival};

fn find_stocked_shop(world: &World, interner: &StringInterner, from: LocationId, tag: &str, good: &str) -> Option<LocationId> {
    cs_travel::find_nearest_location(world, from, |loc| {
        location_has_tag(world, interner, loc.id, tag) && loc.inventory_qty(good) > 0
    })
}

pub struct Purchase;

impl Executor for Purchase {
    fn step(
        &self,
        world: &mut World,
        config: &Config,
        interner: &StringInterner,
        agent: AgentId,
        phase: Phase,
        _rng: &mut AgentRng,
        task: &mut Task,
    ) -> bool {
        let Some(good) = task.param_str("goodsType").map(str::to_string) else {
            return true;
        };
        let tag = task.param_str("locationTag").unwrap_or("retail").to_string();

        if world.agent(agent).inventory_qty(&good) >= 1 {
            return true;
        }

        let Some(current) = world.agent(agent).current_location() else {
            return false; // mid-travel: wait for arrival
        };

        let here_stocked = location_has_tag(world, interner, current, &tag)
            && world.location(current).inventory_qty(&good) > 0;

        if !here_stocked {
            let Some(shop) = find_stocked_shop(world, interner, current, &tag, &good) else {
                return true; // no stocked shop anywhere: fail quietly
            };
            return matches!(travel_toward(world, config, agent, shop), Arrival::Failed);
        }

        let shop = world.location(current);
        let owner = match shop.owner {
            Some(o) => o,
            None => return true,
        };
        let price = cs_econ::retail_price(config, &good);
        let stock = shop.inventory_qty(&good);
        let capacity_left = (world.agent(agent).inventory_capacity
            - world.agent(agent).inventory_used(|g| cs_econ::good_size(config, g)))
        .max(0.0);
        let affordable = if price > 0.0 {
            (world.agent(agent).wallet / price).floor() as u32
        } else {
            u32::MAX
        };
        let qty = [
            stock,
            affordable,
            capacity_left.floor() as u32,
            config.thresholds.purchase_max_qty,
        ]
        .into_iter()
        .min()
        .unwrap_or(0);

        if qty == 0 {
            return true; // unaffordable or no room: fail quietly
        }

        let _ = cs_econ::retail_sale(world, config, phase, agent, current, owner, &good, qty);
        true
    }
}

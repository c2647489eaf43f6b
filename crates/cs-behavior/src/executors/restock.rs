//! `restock` (§4.3): shop owner replenishes an under-stocked retail
//! location from a wholesaler.

use cs_core::{AgentRng, Config, Phase, StringInterner};
use cs_world::{AgentId, LocationId, Task, World};

use crate::executor::Executor;
use crate::executors::common::{location_has_tag, travel_toward, Arrival};

/// `good` is resolved from `task.params["goodsType"]`; falls back to
/// `"provisions"`, the only good the starter templates stock at retail.
fn good_of(task: &Task) -> String {
    task.param_str("goodsType").unwrap_or("provisions").to_string()
}

pub struct Restock;

impl Executor for Restock {
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
        let good = good_of(task);

        let Some(shop_id) = owned_understocked_shop(world, interner, config, agent, &good) else {
            return true; // nothing to restock right now
        };

        let Some(current) = world.agent(agent).current_location() else {
            return false;
        };
        if current != shop_id {
            return matches!(travel_toward(world, config, agent, shop_id), Arrival::Failed);
        }

        let Some(wholesaler) = find_wholesaler(world, interner, shop_id, &good, world.location(shop_id).owner) else {
            return true; // no seller available: fail quietly
        };

        let Some(buyer_org) = world.location(shop_id).owner else {
            return true;
        };
        let Some(seller_org) = world.location(wholesaler).owner else {
            return true;
        };

        let shop = world.location(shop_id);
        let capacity_gap =
            (shop.inventory_capacity - shop.inventory_used(|g| cs_econ::good_size(config, g))).max(0.0);
        let wholesale_stock = world.location(wholesaler).inventory_qty(&good);
        let price = cs_econ::wholesale_price(config, &good);
        let affordable = if price > 0.0 {
            (world.org(buyer_org).wallet / price).floor() as u32
        } else {
            u32::MAX
        };
        let qty = [
            capacity_gap.floor() as u32,
            wholesale_stock,
            affordable,
            config.thresholds.restock_target_qty,
        ]
        .into_iter()
        .min()
        .unwrap_or(0);

        if qty > 0 {
            let _ = cs_econ::wholesale_transfer(
                world, config, phase, buyer_org, shop_id, seller_org, wholesaler, &good, qty,
            );
        }
        true
    }
}

fn owned_understocked_shop(
    world: &World,
    interner: &StringInterner,
    config: &Config,
    agent: AgentId,
    good: &str,
) -> Option<LocationId> {
    let Some(retail) = interner.lookup("retail") else { return None };
    world
        .orgs
        .iter()
        .filter(|o| o.leader == agent)
        .flat_map(|o| o.locations.iter().copied())
        .find(|&loc| {
            let l = world.location(loc);
            l.tags.has(retail)
                && l.inventory_used(|g| cs_econ::good_size(config, g)) < l.inventory_capacity * 0.5
                && l.inventory_qty(good) < config.thresholds.restock_target_qty
        })
}

fn find_wholesaler(
    world: &World,
    interner: &StringInterner,
    from: LocationId,
    good: &str,
    own_org: Option<cs_world::OrgId>,
) -> Option<LocationId> {
    cs_travel::find_nearest_location(world, from, |loc| {
        location_has_tag(world, interner, loc.id, "wholesale")
            && loc.inventory_qty(good) > 0
            && loc.owner != own_org
    })
}

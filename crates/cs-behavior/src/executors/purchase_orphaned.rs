//! `purchase_orphaned` (§4.3): buy up a `forSale` orphaned location left
//! behind by a dissolved org.

use cs_core::{AgentRng, Config, Phase, StringInterner};
use cs_world::{helpers, AgentId, Org, Task, World};

use crate::executor::Executor;

/// Resale price of an orphaned location, and the buffer an agent needs on
/// top of it to be considered a candidate buyer (§4.3).
fn resale_price(config: &Config, opening_cost: f64) -> f64 {
    opening_cost * config.economy.resale_discount
}

pub struct PurchaseOrphaned;

impl Executor for PurchaseOrphaned {
    fn step(
        &self,
        world: &mut World,
        config: &Config,
        _interner: &StringInterner,
        agent: AgentId,
        phase: Phase,
        rng: &mut AgentRng,
        _task: &mut Task,
    ) -> bool {
        if world.agent(agent).employment.is_employed() {
            return true;
        }
        let wallet = world.agent(agent).wallet;
        let buffer = config.thresholds.entrepreneur_credit_floor;

        let Some(loc_id) = world
            .locations
            .iter()
            .filter(|l| l.for_sale && wallet >= resale_price(config, l.opening_cost) + buffer)
            .min_by_key(|l| l.id)
            .map(|l| l.id)
        else {
            return false; // nothing affordable for sale right now: keep trying
        };

        if !rng.gen_bool(config.business.purchase_orphaned_try_rate) {
            return false;
        }

        let purchase_price = resale_price(config, world.location(loc_id).opening_cost);
        let seed_capital = (wallet - purchase_price) / 2.0;

        world.agent_mut(agent).wallet -= purchase_price + seed_capital;

        let org_id = world.push_org(|id| Org {
            id,
            leader: agent,
            wallet: seed_capital,
            locations: vec![loc_id],
            weekly_phase_offset: (phase.0 % config.simulation.phases_per_week as u64) as u32,
            tags: cs_core::TagSet::new(),
        });

        let loc = world.location_mut(loc_id);
        loc.owner = Some(org_id);
        loc.for_sale = false;
        loc.employees.push(agent);

        helpers::set_employment(world, agent, loc_id, org_id, 0.0, false);
        true
    }
}

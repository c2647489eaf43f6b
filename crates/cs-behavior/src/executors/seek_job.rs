//! `seek_job` (§4.3): find and take the nearest open employee slot.

use cs_core::{AgentRng, Config, Phase, Range, StringInterner};
use cs_world::{helpers, AgentId, LocationId, Task, World};

use crate::executor::Executor;
use crate::executors::common::location_has_tag;

/// The salary tier a location's employees draw from, inferred from its
/// tags — there is no dedicated tier field on `Location`, so `professional`
/// and `skilled` tags opt a location into their matching tier and
/// everything else falls back to `unskilled`.
fn tier_for<'c>(world: &World, interner: &StringInterner, config: &'c Config, loc: LocationId) -> &'c Range {
    if location_has_tag(world, interner, loc, "professional") {
        &config.economy.salary_tiers.professional
    } else if location_has_tag(world, interner, loc, "skilled") {
        &config.economy.salary_tiers.skilled
    } else {
        &config.economy.salary_tiers.unskilled
    }
}

pub struct SeekJob;

impl Executor for SeekJob {
    fn step(
        &self,
        world: &mut World,
        config: &Config,
        interner: &StringInterner,
        agent: AgentId,
        _phase: Phase,
        rng: &mut AgentRng,
        _task: &mut Task,
    ) -> bool {
        if world.agent(agent).employment.is_employed() {
            return true;
        }
        let Some(current) = world.agent(agent).current_location() else {
            return false;
        };

        let Some(loc_id) = cs_travel::find_nearest_location(world, current, |loc| loc.has_open_slot()) else {
            return true; // no opening anywhere: fail quietly
        };
        let Some(org_id) = world.location(loc_id).owner else {
            return true;
        };

        let tier = tier_for(world, interner, config, loc_id);
        let salary = rng.gen_range(tier.min..=tier.max);

        helpers::set_employment(world, agent, loc_id, org_id, salary, true);
        world.location_mut(loc_id).employees.push(agent);
        true
    }
}

//! `seek_housing` (§4.3): take up residence at the cheapest affordable
//! non-shelter vacancy.

use cs_core::{AgentRng, Config, Phase, StringInterner};
use cs_world::{AgentId, Task, World};

use crate::executor::Executor;
use crate::executors::common::location_has_tag;

pub struct SeekHousing;

impl Executor for SeekHousing {
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
        if world.agent(agent).residence.is_some() {
            return true;
        }
        let wallet = world.agent(agent).wallet;

        let best = world
            .locations
            .iter()
            .filter(|l| {
                l.has_vacancy()
                    && !location_has_tag(world, interner, l.id, "shelter")
                    && l.residency.as_ref().is_some_and(|r| {
                        wallet >= r.rent_cost * config.thresholds.housing_buffer_weeks
                    })
            })
            .min_by(|a, b| {
                let ra = a.residency.as_ref().unwrap().rent_cost;
                let rb = b.residency.as_ref().unwrap().rent_cost;
                ra.partial_cmp(&rb).unwrap().then(a.id.cmp(&b.id))
            })
            .map(|l| l.id);

        let Some(loc_id) = best else {
            return true; // nothing affordable right now: fail quietly
        };

        world.agent_mut(agent).residence = Some(loc_id);
        world
            .location_mut(loc_id)
            .residency
            .as_mut()
            .expect("filtered on residency")
            .residents
            .push(agent);
        true
    }
}

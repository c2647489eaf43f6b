//! `visit_pub` (§4.3): travel to the nearest pub, pay a cover charge, and
//! linger for a configured number of phases (completion is the
//! `phasesAtPub` condition, tracked here as a task param).

use cs_core::{AgentRng, Config, Phase, StringInterner};
use cs_world::{AgentId, LocationId, ParamValue, Task, World};

use crate::executor::Executor;
use crate::executors::common::{location_has_tag, travel_toward, Arrival};

fn nearest_pub(world: &World, interner: &StringInterner, from: LocationId) -> Option<LocationId> {
    cs_travel::find_nearest_location(world, from, |loc| location_has_tag(world, interner, loc.id, "leisure"))
}

pub struct VisitPub;

impl Executor for VisitPub {
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
        let Some(current) = world.agent(agent).current_location() else {
            return false;
        };

        if !location_has_tag(world, interner, current, "leisure") {
            let Some(pub_loc) = nearest_pub(world, interner, current) else {
                return true; // no pub anywhere: fail quietly
            };
            return matches!(travel_toward(world, config, agent, pub_loc), Arrival::Failed);
        }

        let phases_at_pub = task.param_num("phasesAtPub").unwrap_or(0.0);
        if phases_at_pub == 0.0 {
            if let Some(owner) = world.location(current).owner {
                let _ = cs_econ::transfer_credits(
                    world,
                    phase,
                    cs_world::TransactionKind::Sale,
                    cs_world::EntityRef::Agent(agent),
                    cs_world::EntityRef::Org(owner),
                    config.thresholds.pub_fee,
                    Some(current),
                    None,
                );
            }
        }
        world.agent_mut(agent).needs.leisure = (world.agent(agent).needs.leisure
            - config.thresholds.pub_satisfaction / config.thresholds.pub_visit_duration.max(1) as f64)
            .max(0.0);

        task.params
            .insert("phasesAtPub".into(), ParamValue::Num(phases_at_pub + 1.0));
        false // completion is driven by the `phasesAtPub` condition clause
    }
}

//! `work` (§4.3): stay at the workplace, accruing a shift; `cs-econ`'s
//! weekly cycle is what actually pays the salary this shift earns toward.

use cs_core::{AgentRng, Config, Phase, StringInterner};
use cs_world::{AgentId, Task, World};

use crate::executor::Executor;
use crate::executors::common::travel_toward;

pub struct Work;

impl Executor for Work {
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
        let Some(workplace) = world.agent(agent).employment.employed_at else {
            return true; // lost employment since the behavior was selected
        };
        if world.agent(agent).current_location() != Some(workplace) {
            let _ = travel_toward(world, config, agent, workplace);
            return false;
        }

        let shift = &mut world.agent_mut(agent).work_shift;
        if !shift.offset_rolled {
            // Stagger shift starts across agents so everyone doesn't clock
            // out in lockstep (§4.3): burn a random head start once.
            let half = (config.simulation.shift_duration / 2).max(1);
            shift.phases_worked = rng.gen_range(0..half);
            shift.shift_start_phase = Some(phase);
            shift.offset_rolled = true;
        } else {
            shift.phases_worked += 1;
        }

        if world.agent(agent).work_shift.phases_worked >= config.simulation.shift_duration {
            world.agent_mut(agent).work_shift.reset(phase);
            return true;
        }
        false
    }
}

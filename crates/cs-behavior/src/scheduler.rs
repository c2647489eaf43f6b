//! The per-agent dispatch algorithm (§4.2): priority interrupt/resume over
//! declarative behaviors, driven by the registered [`ExecutorRegistry`].

use cs_core::{AgentRng, Config, Phase, StringInterner};
use cs_world::{AgentId, AgentStatus, Priority, Task, World};
use tracing::warn;

use crate::condition::eval_all;
use crate::definition::BehaviorRegistry;
use crate::executor::ExecutorRegistry;

const PRIORITIES_HIGH_DOWN: [Priority; 2] = [Priority::High, Priority::Normal];
const PRIORITIES_SELECT: [Priority; 3] = [Priority::High, Priority::Normal, Priority::Idle];

/// First behavior id at `priority`, in declaration order, whose entry
/// conditions currently hold for `agent`.
fn first_matching(
    registry: &BehaviorRegistry,
    priority: Priority,
    world: &World,
    interner: &StringInterner,
    config: &Config,
    agent: AgentId,
    phase: Phase,
    task: Option<&Task>,
) -> Option<String> {
    registry.ids_at(priority).iter().find_map(|id| {
        let def = registry.get(id)?;
        eval_all(&def.conditions, world, interner, config, agent, phase, task).then(|| id.clone())
    })
}

/// Run one step of `executor_id`'s executor against `task`, returning
/// whether the task completed. Clears (and warns on) unregistered ids
/// rather than ever looping (§4.2 "Failure").
fn run_executor(
    executors: &ExecutorRegistry,
    executor_id: &str,
    world: &mut World,
    config: &Config,
    interner: &StringInterner,
    agent: AgentId,
    phase: Phase,
    rng: &mut AgentRng,
    task: &mut Task,
) -> bool {
    match executors.get(executor_id) {
        Some(executor) => executor.step(world, config, interner, agent, phase, rng, task),
        None => {
            warn!(executor_id, ?agent, "unregistered executor id; clearing task");
            true
        }
    }
}

/// Start behavior `id`, attach its task to `agent`, and run its executor's
/// first step this same phase (§4.2 step 5: "its executor runs
/// immediately"). Returns the resulting task unless it completed on its
/// first step.
fn start_behavior(
    registry: &BehaviorRegistry,
    executors: &ExecutorRegistry,
    id: &str,
    world: &mut World,
    config: &Config,
    interner: &StringInterner,
    agent: AgentId,
    phase: Phase,
    rng: &mut AgentRng,
) -> Option<Task> {
    let def = registry.get(id)?;
    let mut task = Task::new(def.id.clone(), def.priority, def.params.clone());
    let complete = run_executor(executors, &def.executor, world, config, interner, agent, phase, rng, &mut task);
    (!complete).then_some(task)
}

/// Dispatch one agent for one phase (§4.2's full algorithm). Advances
/// `world.agent(agent).current_task` and, for traveling agents, the
/// travel countdown.
pub fn dispatch_agent(
    registry: &BehaviorRegistry,
    executors: &ExecutorRegistry,
    world: &mut World,
    config: &Config,
    interner: &StringInterner,
    agent: AgentId,
    phase: Phase,
    rng: &mut AgentRng,
) {
    if matches!(world.agent(agent).status, AgentStatus::Dead { .. }) {
        return;
    }

    if world.agent(agent).is_traveling() {
        if try_preempt(registry, executors, world, config, interner, agent, phase, rng, &[Priority::Critical]) {
            return;
        }
        if try_preempt(registry, executors, world, config, interner, agent, phase, rng, &PRIORITIES_HIGH_DOWN) {
            return;
        }
        let arrived = cs_travel::tick_agent_travel(world, agent);
        if !arrived {
            return;
        }
        // Arrival this phase unblocks criticals that require `notTraveling`.
        if try_preempt(registry, executors, world, config, interner, agent, phase, rng, &[Priority::Critical]) {
            return;
        }
    }

    if let Some(mut task) = world.agent_mut(agent).current_task.take() {
        if task.priority != Priority::Critical {
            if let Some(id) =
                first_matching(registry, Priority::Critical, world, interner, config, agent, phase, Some(&task))
            {
                if Priority::Critical.can_interrupt(task.priority) {
                    if let Some(new_task) =
                        start_behavior(registry, executors, &id, world, config, interner, agent, phase, rng)
                    {
                        world.agent_mut(agent).current_task = Some(new_task);
                    }
                    return;
                }
            }
        }

        let def = registry.get(&task.behavior_id);
        let completion_holds = def.is_some_and(|d| {
            eval_all(&d.completion_conditions, world, interner, config, agent, phase, Some(&task))
        });
        if completion_holds {
            select_new_task(registry, executors, world, config, interner, agent, phase, rng);
            return;
        }

        let executor_id = def.map(|d| d.executor.clone()).unwrap_or_default();
        let complete =
            run_executor(executors, &executor_id, world, config, interner, agent, phase, rng, &mut task);
        if !complete {
            world.agent_mut(agent).current_task = Some(task);
        }
        return;
    }

    select_new_task(registry, executors, world, config, interner, agent, phase, rng);
}

/// Check critical/high/normal tiers (as given) for a pre-empting match and,
/// if one applies and out-ranks the agent's current task, start it.
/// Returns `true` if dispatch for this phase is done.
#[allow(clippy::too_many_arguments)]
fn try_preempt(
    registry: &BehaviorRegistry,
    executors: &ExecutorRegistry,
    world: &mut World,
    config: &Config,
    interner: &StringInterner,
    agent: AgentId,
    phase: Phase,
    rng: &mut AgentRng,
    tiers: &[Priority],
) -> bool {
    let current_priority = world.agent(agent).current_task.as_ref().map(|t| t.priority);
    for &tier in tiers {
        if let Some(outranked) = current_priority {
            if !tier.can_interrupt(outranked) {
                continue;
            }
        }
        if let Some(id) = first_matching(registry, tier, world, interner, config, agent, phase, None) {
            if let Some(new_task) =
                start_behavior(registry, executors, &id, world, config, interner, agent, phase, rng)
            {
                world.agent_mut(agent).current_task = Some(new_task);
            } else {
                world.agent_mut(agent).current_task = None;
            }
            return true;
        }
    }
    false
}

/// §4.2 step 5: walk `high → normal → idle`, start the first matching
/// behavior found.
fn select_new_task(
    registry: &BehaviorRegistry,
    executors: &ExecutorRegistry,
    world: &mut World,
    config: &Config,
    interner: &StringInterner,
    agent: AgentId,
    phase: Phase,
    rng: &mut AgentRng,
) {
    for &tier in &PRIORITIES_SELECT {
        if let Some(id) = first_matching(registry, tier, world, interner, config, agent, phase, None) {
            let new_task =
                start_behavior(registry, executors, &id, world, config, interner, agent, phase, rng);
            world.agent_mut(agent).current_task = new_task;
            return;
        }
    }
}

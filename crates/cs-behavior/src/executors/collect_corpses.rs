//! `collect_corpses` (§4.3): the four-state analog of `deliver_goods` —
//! `scanning → traveling → loading → returning` — with early termination
//! when the driver's own hunger or fatigue crosses an emergency threshold.

use cs_core::{AgentRng, Config, Phase, StringInterner};
use cs_world::{helpers, AgentId, CorpsePhase, LocationId, Task, TaskState, VehicleId, VehicleOwner, World};

use crate::executor::Executor;

const CORPSE_GOOD: &str = "corpse";

pub struct CollectCorpses;

impl Executor for CollectCorpses {
    fn step(
        &self,
        world: &mut World,
        config: &Config,
        _interner: &StringInterner,
        agent: AgentId,
        phase: Phase,
        rng: &mut AgentRng,
        task: &mut Task,
    ) -> bool {
        let shift = &mut world.agent_mut(agent).corpse_shift;
        if !shift.offset_rolled {
            let half = (config.business.corpse_shift_duration / 2).max(1);
            shift.phases_worked = rng.gen_range(0..half);
            shift.shift_start_phase = Some(phase);
            shift.offset_rolled = true;
        } else {
            shift.phases_worked += 1;
        }
        let phases_worked = world.agent(agent).corpse_shift.phases_worked;

        if !matches!(task.state, TaskState::CorpseCollection { .. }) {
            task.state = TaskState::CorpseCollection { phase: CorpsePhase::Scanning, vehicle: None, depot: None };
        }

        let needs = &world.agent(agent).needs;
        let emergency = needs.hunger >= 80.0 || needs.fatigue >= 90.0;
        if emergency {
            end_shift_early(world, config, agent, phase, task);
            return true;
        }

        step_state_machine(world, config, agent, task);

        let shift_over = phases_worked >= config.business.corpse_shift_duration
            && matches!(&task.state, TaskState::CorpseCollection { phase: CorpsePhase::Scanning, vehicle: None, .. });
        if shift_over {
            world.agent_mut(agent).corpse_shift.reset(phase);
            return true;
        }
        false
    }
}

fn end_shift_early(world: &mut World, config: &Config, agent: AgentId, phase: Phase, task: &mut Task) {
    if let TaskState::CorpseCollection { vehicle: Some(vehicle_id), .. } = task.state {
        if world.agent(agent).in_vehicle() == Some(vehicle_id) {
            let building = world.vehicle(vehicle_id).building;
            if let Some(dest) = helpers::first_location_in_building(world, building) {
                let _ = helpers::exit_vehicle(world, vehicle_id, agent, dest);
            }
        }
    }
    let _ = config;
    world.agent_mut(agent).corpse_shift.reset(phase);
    task.state = TaskState::CorpseCollection { phase: CorpsePhase::Scanning, vehicle: None, depot: None };
}

fn logistics_org_of(world: &World, agent: AgentId) -> Option<cs_world::OrgId> {
    world.agent(agent).employment.employer
}

fn idle_vehicle_of(world: &World, org: cs_world::OrgId) -> Option<VehicleId> {
    world
        .vehicles
        .iter()
        .find(|v| v.owner == VehicleOwner::Org(org) && v.operator.is_none() && !v.is_traveling())
        .map(|v| v.id)
}

fn nearest_corpse_location(world: &World, from: LocationId) -> Option<LocationId> {
    cs_travel::find_nearest_location(world, from, |loc| loc.id != from && loc.inventory_qty(CORPSE_GOOD) > 0)
}

fn step_state_machine(world: &mut World, config: &Config, agent: AgentId, task: &mut Task) {
    let TaskState::CorpseCollection { phase: cphase, vehicle, depot } = task.state else {
        return;
    };

    match cphase {
        CorpsePhase::Scanning => {
            let Some(workplace) = world.agent(agent).employment.employed_at else { return };
            let Some(org) = logistics_org_of(world, agent) else { return };
            let Some(pickup) = nearest_corpse_location(world, workplace) else { return };
            let Some(vehicle_id) = idle_vehicle_of(world, org) else { return };

            if world.agent(agent).in_vehicle().is_none() {
                if helpers::board_vehicle(world, vehicle_id, agent, true).is_err() {
                    return;
                }
            }
            let pickup_building = world.location(pickup).building;
            if world.vehicle(vehicle_id).building != pickup_building
                && cs_travel::start_vehicle_travel(world, config, vehicle_id, pickup_building).is_err()
            {
                return;
            }
            task.state = TaskState::CorpseCollection {
                phase: CorpsePhase::Traveling,
                vehicle: Some(vehicle_id),
                depot: Some(workplace),
            };
            let _ = pickup;
        }

        CorpsePhase::Traveling => {
            let Some(vehicle_id) = vehicle else { return reset(task) };
            if world.vehicle(vehicle_id).is_traveling() {
                return; // vehicle-tick sub-pass advances travel
            }
            task.state = TaskState::CorpseCollection { phase: CorpsePhase::Loading, vehicle, depot };
        }

        CorpsePhase::Loading => {
            let Some(vehicle_id) = vehicle else { return reset(task) };
            let building = world.vehicle(vehicle_id).building;
            let Some(pickup) = helpers::first_location_in_building(world, building) else {
                return reset(task);
            };
            if helpers::exit_vehicle(world, vehicle_id, agent, pickup).is_err() {
                return reset(task);
            }
            let qty = world.location(pickup).inventory_qty(CORPSE_GOOD);
            let cargo_capacity = world.vehicle(vehicle_id).cargo_capacity;
            let cargo_used = world.vehicle(vehicle_id).cargo_used(|_| 1.0);
            let take = qty.min((cargo_capacity - cargo_used).max(0.0).floor() as u32);
            if take > 0 {
                let _ = cs_econ::move_goods(
                    world,
                    config,
                    CORPSE_GOOD,
                    take,
                    cs_econ::GoodsHolder::Location(pickup),
                    cs_econ::GoodsHolder::Vehicle(vehicle_id),
                );
            }
            if helpers::board_vehicle(world, vehicle_id, agent, true).is_err() {
                return reset(task);
            }
            let Some(depot_loc) = depot else { return reset(task) };
            let depot_building = world.location(depot_loc).building;
            if world.vehicle(vehicle_id).building != depot_building
                && cs_travel::start_vehicle_travel(world, config, vehicle_id, depot_building).is_err()
            {
                return reset(task);
            }
            task.state = TaskState::CorpseCollection { phase: CorpsePhase::Returning, vehicle, depot };
        }

        CorpsePhase::Returning => {
            let (Some(vehicle_id), Some(depot_loc)) = (vehicle, depot) else { return reset(task) };
            let depot_building = world.location(depot_loc).building;
            if world.vehicle(vehicle_id).is_traveling() || world.vehicle(vehicle_id).building != depot_building {
                return;
            }
            if helpers::exit_vehicle(world, vehicle_id, agent, depot_loc).is_err() {
                return reset(task);
            }
            let qty = cs_econ::goods_qty(world, cs_econ::GoodsHolder::Vehicle(vehicle_id), CORPSE_GOOD);
            if qty > 0 {
                let _ = cs_econ::move_goods(
                    world,
                    config,
                    CORPSE_GOOD,
                    qty,
                    cs_econ::GoodsHolder::Vehicle(vehicle_id),
                    cs_econ::GoodsHolder::Location(depot_loc),
                );
            }
            task.state = TaskState::CorpseCollection { phase: CorpsePhase::Scanning, vehicle: None, depot: None };
        }
    }
}

fn reset(task: &mut Task) {
    task.state = TaskState::CorpseCollection { phase: CorpsePhase::Scanning, vehicle: None, depot: None };
}

//! `deliver_goods` (§4.3): the six-state delivery sub-machine, guarded by
//! an outer delivery-shift state staggered the same way as `work`.

use cs_core::{AgentRng, Config, Phase, StringInterner};
use cs_world::{
    helpers, AgentId, DeliveryPhase, LocationId, OrderId, OrderStatus, OrderType, Task, TaskState,
    VehicleId, VehicleOwner, World,
};

use crate::executor::Executor;

pub struct DeliverGoods;

impl Executor for DeliverGoods {
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
        let shift = &mut world.agent_mut(agent).delivery_shift;
        if !shift.offset_rolled {
            let half = (config.business.delivery_shift_duration / 2).max(1);
            shift.phases_worked = rng.gen_range(0..half);
            shift.shift_start_phase = Some(phase);
            shift.offset_rolled = true;
        } else {
            shift.phases_worked += 1;
        }
        let phases_worked = world.agent(agent).delivery_shift.phases_worked;

        if !matches!(task.state, TaskState::Delivery { .. }) {
            task.state = TaskState::Delivery {
                phase: DeliveryPhase::Assigning,
                order: None,
                vehicle: None,
                pickup: None,
                delivery: None,
            };
        }

        step_state_machine(world, config, agent, phase, task);

        let shift_over = phases_worked >= config.business.delivery_shift_duration
            && matches!(
                &task.state,
                TaskState::Delivery { phase: DeliveryPhase::Assigning, order: None, .. }
            );
        if shift_over {
            world.agent_mut(agent).delivery_shift.reset(phase);
            return true;
        }
        false
    }
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

fn oldest_pending_logistics(world: &World) -> Option<OrderId> {
    world
        .orders
        .iter()
        .filter(|o| o.order_type == OrderType::Logistics && o.status == OrderStatus::Pending)
        .min_by_key(|o| o.id)
        .map(|o| o.id)
}

fn fail(world: &mut World, task: &mut Task, logistics_order: Option<OrderId>) {
    if let Some(order) = logistics_order {
        cs_econ::fail_delivery_with_parent(world, order);
    }
    task.state = TaskState::Delivery {
        phase: DeliveryPhase::Assigning,
        order: None,
        vehicle: None,
        pickup: None,
        delivery: None,
    };
}

fn step_state_machine(world: &mut World, config: &Config, agent: AgentId, phase: Phase, task: &mut Task) {
    let TaskState::Delivery { phase: dphase, order, vehicle, pickup, delivery } = task.state.clone() else {
        return;
    };

    match dphase {
        DeliveryPhase::Assigning => {
            if let Some(v) = world.agent(agent).in_vehicle() {
                let building = world.vehicle(v).building;
                if let Some(dest) = helpers::first_location_in_building(world, building) {
                    let _ = helpers::exit_vehicle(world, v, agent, dest);
                }
            }
            let Some(org) = logistics_org_of(world, agent) else { return };
            let Some(order_id) = oldest_pending_logistics(world) else { return };
            let Some(vehicle_id) = idle_vehicle_of(world, org) else { return };

            world.order_mut(order_id).status = OrderStatus::Assigned;
            world.order_mut(order_id).driver = Some(agent);
            world.order_mut(order_id).vehicle = Some(vehicle_id);

            let pickup_loc = world.order(order_id).pickup_location;
            let delivery_loc = world.order(order_id).delivery_location;
            task.state = TaskState::Delivery {
                phase: DeliveryPhase::Boarding,
                order: Some(order_id),
                vehicle: Some(vehicle_id),
                pickup: Some(pickup_loc),
                delivery: Some(delivery_loc),
            };
        }

        DeliveryPhase::Boarding => {
            let (Some(order_id), Some(vehicle_id)) = (order, vehicle) else {
                return fail(world, task, order);
            };
            if helpers::board_vehicle(world, vehicle_id, agent, true).is_err() {
                return fail(world, task, Some(order_id));
            }
            let pickup_building = match pickup {
                Some(p) => world.location(p).building,
                None => return fail(world, task, Some(order_id)),
            };
            if world.vehicle(vehicle_id).building != pickup_building {
                if cs_travel::start_vehicle_travel(world, config, vehicle_id, pickup_building).is_err() {
                    return fail(world, task, Some(order_id));
                }
            }
            advance(task, DeliveryPhase::ToPickup, order, vehicle, pickup, delivery);
        }

        DeliveryPhase::ToPickup => {
            let (Some(order_id), Some(vehicle_id), Some(pickup_loc)) = (order, vehicle, pickup) else {
                return fail(world, task, order);
            };
            let pickup_building = world.location(pickup_loc).building;
            if world.vehicle(vehicle_id).is_traveling() || world.vehicle(vehicle_id).building != pickup_building {
                return; // vehicle tick sub-pass advances travel; just wait
            }
            let _ = order_id;
            advance(task, DeliveryPhase::Loading, order, vehicle, pickup, delivery);
        }

        DeliveryPhase::Loading => {
            let (Some(order_id), Some(vehicle_id), Some(pickup_loc), Some(delivery_loc)) =
                (order, vehicle, pickup, delivery)
            else {
                return fail(world, task, order);
            };
            if helpers::exit_vehicle(world, vehicle_id, agent, pickup_loc).is_err() {
                return fail(world, task, Some(order_id));
            }
            let good = world.order(order_id).good.clone();
            let qty = world.order(order_id).quantity;
            if cs_econ::move_goods(
                world,
                config,
                &good,
                qty,
                cs_econ::GoodsHolder::Location(pickup_loc),
                cs_econ::GoodsHolder::Vehicle(vehicle_id),
            )
            .is_err()
            {
                return fail(world, task, Some(order_id));
            }
            world.order_mut(order_id).status = OrderStatus::InTransit;
            if helpers::board_vehicle(world, vehicle_id, agent, true).is_err() {
                return fail(world, task, Some(order_id));
            }
            let delivery_building = world.location(delivery_loc).building;
            if world.vehicle(vehicle_id).building != delivery_building
                && cs_travel::start_vehicle_travel(world, config, vehicle_id, delivery_building).is_err()
            {
                return fail(world, task, Some(order_id));
            }
            advance(task, DeliveryPhase::ToDelivery, order, vehicle, pickup, delivery);
        }

        DeliveryPhase::ToDelivery => {
            let (Some(_order_id), Some(vehicle_id), Some(delivery_loc)) = (order, vehicle, delivery) else {
                return fail(world, task, order);
            };
            let delivery_building = world.location(delivery_loc).building;
            if world.vehicle(vehicle_id).is_traveling() || world.vehicle(vehicle_id).building != delivery_building {
                return;
            }
            advance(task, DeliveryPhase::Unloading, order, vehicle, pickup, delivery);
        }

        DeliveryPhase::Unloading => {
            let (Some(order_id), Some(vehicle_id), Some(delivery_loc)) = (order, vehicle, delivery) else {
                return fail(world, task, order);
            };
            if helpers::exit_vehicle(world, vehicle_id, agent, delivery_loc).is_err() {
                return fail(world, task, Some(order_id));
            }
            let good = world.order(order_id).good.clone();
            let qty = cs_econ::goods_qty(world, cs_econ::GoodsHolder::Vehicle(vehicle_id), &good);
            let _ = cs_econ::move_goods(
                world,
                config,
                &good,
                qty,
                cs_econ::GoodsHolder::Vehicle(vehicle_id),
                cs_econ::GoodsHolder::Location(delivery_loc),
            );
            world.order_mut(order_id).status = OrderStatus::Delivered;

            let payment = world.order(order_id).payment;
            let buyer_org = world.order(order_id).buyer_org;
            if let Some(logistics_org) = logistics_org_of(world, agent) {
                let _ = cs_econ::pay_delivery_fee(world, phase, buyer_org, logistics_org, payment);
            }

            if let Some(parent_id) = world.order(order_id).parent_order_id {
                let parent_good = world.order(parent_id).good.clone();
                let parent_total = world.order(parent_id).payment;
                let parent_buyer = world.order(parent_id).buyer_org;
                if let Some(parent_seller) = world.order(parent_id).seller_org {
                    let _ = cs_econ::settle_goods_order(
                        world,
                        phase,
                        parent_buyer,
                        parent_seller,
                        parent_total,
                        &parent_good,
                    );
                }
                world.order_mut(parent_id).status = OrderStatus::Delivered;
            }

            task.state = TaskState::Delivery {
                phase: DeliveryPhase::Assigning,
                order: None,
                vehicle: None,
                pickup: None,
                delivery: None,
            };
        }
    }
}

fn advance(
    task: &mut Task,
    next: DeliveryPhase,
    order: Option<OrderId>,
    vehicle: Option<VehicleId>,
    pickup: Option<LocationId>,
    delivery: Option<LocationId>,
) {
    task.state = TaskState::Delivery { phase: next, order, vehicle, pickup, delivery };
}

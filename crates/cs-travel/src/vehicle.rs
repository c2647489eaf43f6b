//! Vehicle travel (§4.5, §4.1 step 4): building-granularity distance, a
//! different speed config than agents, and explicit exit on arrival.

use cs_core::{manhattan_distance, Config};
use cs_world::{AgentId, BuildingId, VehicleId, VehicleTravel, World};

use crate::{TravelError, TravelResult};

/// Start `vehicle` traveling to `to_building`.
pub fn start_vehicle_travel(
    world: &mut World,
    config: &Config,
    vehicle: VehicleId,
    to_building: BuildingId,
) -> TravelResult<()> {
    if world.vehicle(vehicle).is_traveling() {
        return Err(TravelError::VehicleAlreadyTraveling(vehicle));
    }
    let from_grid = world.building(world.vehicle(vehicle).building).grid;
    let to_grid = world.building(to_building).grid;
    let distance = manhattan_distance(from_grid, to_grid);
    let phases = ((distance as f64) * config.transport.vehicle_phases_per_distance)
        .ceil()
        .max(1.0) as u32;

    world.vehicle_mut(vehicle).traveling = Some(VehicleTravel {
        to_building,
        phases_remaining: phases,
    });
    Ok(())
}

/// One arrival this phase: the vehicle and, if present, its operator (whose
/// task should be woken next phase per §4.1 step 4).
pub struct VehicleArrival {
    pub vehicle: VehicleId,
    pub operator: Option<AgentId>,
}

/// Advance every traveling vehicle by one phase (§4.1 step 4). On arrival
/// the vehicle is moved to its destination building; occupants are **not**
/// moved to any location — exit is always explicit (§4.5).
pub fn tick_all_vehicles(world: &mut World) -> Vec<VehicleArrival> {
    let mut arrivals = Vec::new();
    for vehicle in world.vehicles.iter_mut() {
        let Some(travel) = vehicle.traveling else { continue };
        if travel.phases_remaining <= 1 {
            vehicle.building = travel.to_building;
            vehicle.traveling = None;
            arrivals.push(VehicleArrival {
                vehicle: vehicle.id,
                operator: vehicle.operator,
            });
        } else {
            vehicle.traveling = Some(VehicleTravel {
                to_building: travel.to_building,
                phases_remaining: travel.phases_remaining - 1,
            });
        }
    }
    arrivals
}

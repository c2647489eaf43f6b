//! Agent travel (§4.5): method selection, per-phase decrement/arrival, and
//! nearest-location search.

use cs_core::{manhattan_distance, Config, TravelMethod};
use cs_world::agent::AgentLocation;
use cs_world::{helpers, AgentId, Location, LocationId, World};

use crate::{TravelError, TravelResult};

/// Distance (in grid units) between the buildings housing two locations.
pub fn location_distance(world: &World, a: LocationId, b: LocationId) -> u32 {
    let ba = world.building(world.location(a).building).grid;
    let bb = world.building(world.location(b).building).grid;
    manhattan_distance(ba, bb)
}

/// Start `agent` traveling from their current location to `destination`.
///
/// Same-building travel (distance `0`) completes instantly — the caller
/// should check `location_distance == 0` first and call
/// [`cs_world::helpers::set_location`] directly rather than calling this at
/// all, matching §4.3 `travel`'s "instant arrival" branch.
pub fn start_travel(
    world: &mut World,
    config: &Config,
    agent: AgentId,
    destination: LocationId,
) -> TravelResult<()> {
    if world.agent(agent).is_traveling() {
        return Err(TravelError::AlreadyTraveling(agent));
    }
    let from = world
        .agent(agent)
        .current_location()
        .ok_or(TravelError::LocationNotFound(destination))?;

    let distance = location_distance(world, from, destination);
    let method = config.transport.method_for_distance(distance);
    let phases = phases_for(config, method, distance);

    helpers::set_travel(world, agent, from, destination, method, phases);
    Ok(())
}

fn phases_for(config: &Config, method: TravelMethod, distance: u32) -> u32 {
    if !method.is_moving() {
        return 0;
    }
    let rate = config.transport.phases_per_distance(method);
    ((distance as f64) * rate).ceil().max(1.0) as u32
}

/// Redirect an in-progress journey to `new_destination`, replacing
/// `travelingTo` in place (§4.5) — used by `emergency_food` to pre-empt a
/// commute without first returning the agent to a resting state.
pub fn redirect_travel(
    world: &mut World,
    config: &Config,
    agent: AgentId,
    new_destination: LocationId,
) {
    let from = match &world.agent(agent).location {
        Some(AgentLocation::Traveling { from, .. }) => *from,
        _ => return,
    };
    let distance = location_distance(world, from, new_destination);
    let method = config.transport.method_for_distance(distance);
    let phases = phases_for(config, method, distance);
    helpers::set_travel(world, agent, from, new_destination, method, phases);
}

/// Advance `agent`'s in-progress journey by one phase (§4.2 step 2c).
///
/// Returns `true` if the agent arrived this call (and has been placed `At`
/// the destination); `false` if still en route or not traveling at all.
pub fn tick_agent_travel(world: &mut World, agent: AgentId) -> bool {
    let (from, to, method, remaining) = match &world.agent(agent).location {
        Some(AgentLocation::Traveling { from, to, method, phases_remaining }) => {
            (*from, *to, *method, *phases_remaining)
        }
        _ => return false,
    };
    if remaining <= 1 {
        helpers::set_location(world, agent, to);
        true
    } else {
        world.agent_mut(agent).location = Some(AgentLocation::Traveling {
            from,
            to,
            method,
            phases_remaining: remaining - 1,
        });
        false
    }
}

/// Find the location with the lowest Manhattan distance from `from` that
/// satisfies `predicate`; ties break toward the lowest `LocationId` (§4.5).
pub fn find_nearest_location(
    world: &World,
    from: LocationId,
    predicate: impl Fn(&Location) -> bool,
) -> Option<LocationId> {
    let from_building = world.location(from).building;
    let from_grid = world.building(from_building).grid;

    world
        .locations
        .iter()
        .filter(|l| predicate(l))
        .map(|l| {
            let grid = world.building(l.building).grid;
            (manhattan_distance(from_grid, grid), l.id)
        })
        .min_by_key(|&(dist, id)| (dist, id.0))
        .map(|(_, id)| id)
}

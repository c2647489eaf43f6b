//! `cs-travel` — agent and vehicle movement on the building grid (§4.5).
//!
//! Distance is always Manhattan distance between two buildings' grid
//! coordinates (`cs-core::grid`); there is no routing graph. Agent travel
//! method/duration comes from `TransportConfig`'s distance thresholds;
//! vehicle travel uses a separate, typically slower, per-distance rate.

pub mod error;
pub mod travel;
pub mod vehicle;

#[cfg(test)]
mod tests;

pub use error::{TravelError, TravelResult};
pub use travel::{find_nearest_location, location_distance, redirect_travel, start_travel, tick_agent_travel};
pub use vehicle::{start_vehicle_travel, tick_all_vehicles, VehicleArrival};

//! `cs-travel` error type.

use thiserror::Error;

use cs_world::{AgentId, LocationId, VehicleId};

#[derive(Debug, Error)]
pub enum TravelError {
    #[error("agent {0} is already traveling")]
    AlreadyTraveling(AgentId),

    #[error("location {0} not found")]
    LocationNotFound(LocationId),

    #[error("vehicle {0} is already traveling")]
    VehicleAlreadyTraveling(VehicleId),

    #[error("no location satisfies the search predicate")]
    NoMatch,
}

pub type TravelResult<T> = Result<T, TravelError>;

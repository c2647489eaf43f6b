//! `cs-world` error type.

use thiserror::Error;

use crate::{AgentId, LocationId, OrgId, VehicleId};

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("org {0} not found")]
    OrgNotFound(OrgId),

    #[error("location {0} not found")]
    LocationNotFound(LocationId),

    #[error("vehicle {0} not found")]
    VehicleNotFound(VehicleId),

    #[error("agent {0} is already boarded on a vehicle")]
    AlreadyBoarded(AgentId),

    #[error("agent {0} is not aboard vehicle {1}")]
    NotAboard(AgentId, VehicleId),

    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

pub type WorldResult<T> = Result<T, WorldError>;

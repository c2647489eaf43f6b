//! `cs-econ` error type.

use thiserror::Error;

use cs_world::{LocationId, OrgId};

#[derive(Debug, Error)]
pub enum EconError {
    #[error("insufficient funds: need {required}, have {available}")]
    InsufficientFunds { required: f64, available: f64 },

    #[error("insufficient stock of {good} at {location}: need {required}, have {available}")]
    InsufficientStock {
        good: String,
        location: LocationId,
        required: u32,
        available: u32,
    },

    #[error("capacity exceeded: {used} of {capacity}")]
    CapacityExceeded { used: f64, capacity: f64 },

    #[error("org {0} has no locations to place an order against")]
    NoSeller(OrgId),
}

pub type EconResult<T> = Result<T, EconError>;

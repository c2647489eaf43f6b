//! Framework error type.
//!
//! Sub-crates define their own narrower error enums and convert into
//! `CoreError` via `From` impls where it's useful to bubble a core-level
//! failure (missing entity, bad config) through a crate-specific type.

use thiserror::Error;

use crate::{AgentId, BuildingId, LocationId};

/// The top-level error type for `cs-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("location {0} not found")]
    LocationNotFound(LocationId),

    #[error("building {0} not found")]
    BuildingNotFound(BuildingId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `cs-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;

//! `cs-sim` error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch { expected: usize, got: usize, what: &'static str },

    /// A category-1/2 failure (§7): bad startup config, or a fatal
    /// per-phase invariant violation. Everything else the tick loop
    /// encounters is handled internally per the propagation policy.
    #[error("fatal: {0}")]
    Fatal(String),

    #[error(transparent)]
    World(#[from] cs_world::WorldError),
}

pub type SimResult<T> = Result<T, SimError>;

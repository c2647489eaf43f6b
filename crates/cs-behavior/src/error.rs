//! `cs-behavior` error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("behavior definition {0:?} has no \"executor\" field registered: {1:?}")]
    UnknownExecutor(String, String),

    #[error("behavior JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("behavior definition {0:?}: {1}")]
    InvalidDefinition(String, String),

    #[error("unknown condition clause {0:?}")]
    UnknownClause(String),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;

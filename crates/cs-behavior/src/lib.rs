//! `cs-behavior` — the declarative behavior scheduler and its executors
//! (§4.2, §4.3): loads JSON behavior definitions, evaluates their entry
//! and completion conditions against a live `cs_world::World`, and runs
//! the registered [`Executor`] implementations that actually move goods,
//! money, and agents.

pub mod condition;
pub mod definition;
pub mod error;
pub mod executor;
pub mod executors;
pub mod scheduler;

#[cfg(test)]
mod tests;

pub use condition::{eval, eval_all, Condition, LocationTarget, NeedKind};
pub use definition::{BehaviorDef, BehaviorRegistry};
pub use error::{BehaviorError, BehaviorResult};
pub use executor::{Executor, ExecutorRegistry};
pub use scheduler::dispatch_agent;

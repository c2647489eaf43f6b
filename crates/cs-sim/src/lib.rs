//! `cs-sim` — the tick loop orchestrator (§4.1).
//!
//! This crate owns no domain logic of its own: it sequences the seven
//! sub-passes of a phase (needs update, death check, agent dispatch,
//! vehicle tick, order sweep, weekly cycle, immigration & maintenance),
//! calling into `cs-behavior`, `cs-travel`, and `cs-econ` for each. The
//! only behavior that lives here directly is the handful of steps with no
//! natural home in those crates: the passive per-phase needs increment,
//! leader-death org dissolution, and the population-floor immigration
//! top-up.
//!
//! # Quick start
//!
//! ```ignore
//! let sim = SimBuilder::new(config, world, interner)
//!     .behaviors(behavior_registry)
//!     .seed(42)
//!     .build()?;
//! sim.run_ticks(100, &mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod rngs;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use rngs::AgentRngs;
pub use sim::Sim;

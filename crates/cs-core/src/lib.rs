//! `cs-core` — foundational types for the citysim framework.
//!
//! This crate is a dependency of every other `cs-*` crate. It intentionally
//! has no `cs-*` dependencies and minimal external ones (`rand`,
//! `thiserror`, `serde`/`serde_json`, plus optional `serde` derives on its
//! own types).
//!
//! # What lives here
//!
//! | Module        | Contents                                              |
//! |----------------|-------------------------------------------------------|
//! | [`ids`]        | `AgentId`, `OrgId`, `LocationId`, `BuildingId`, `VehicleId`, `OrderId`, `IdGenerator` |
//! | [`grid`]       | `GridPoint`, Manhattan distance                       |
//! | [`phase`]      | `Phase`, `PhaseClock`                                 |
//! | [`rng`]        | `AgentRng` (per-agent), `SimRng` (global)              |
//! | [`transport`]  | `TravelMethod` enum                                   |
//! | [`interner`]   | `Symbol`, `StringInterner`, `TagSet`                  |
//! | [`config`]     | `Config` and its nested sections                       |
//! | [`error`]      | `CoreError`, `CoreResult`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|-------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to the non-config public types. |

pub mod config;
pub mod error;
pub mod grid;
pub mod ids;
pub mod interner;
pub mod phase;
pub mod rng;
pub mod transport;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{Config, LocationTemplate, Range};
pub use error::{CoreError, CoreResult};
pub use grid::{manhattan_distance, GridPoint};
pub use ids::{AgentId, BuildingId, IdGenerator, LocationId, OrderId, OrgId, VehicleId};
pub use interner::{StringInterner, Symbol, TagSet};
pub use phase::{Phase, PhaseClock};
pub use rng::{AgentRng, SimRng};
pub use transport::TravelMethod;

//! `cs-world` — entity stores and the typed mutators that keep them
//! consistent (§3, §4.6).
//!
//! This crate owns the data model: every entity kind, the `World`
//! aggregate that stores them plus the process-wide ID allocator, the
//! invariant-preserving helper functions, and the per-phase invariant
//! validator. It depends only on `cs-core` — no behavior, travel, or
//! economy logic lives here, only the shapes those crates mutate.

pub mod agent;
pub mod building;
pub mod builder;
pub mod error;
pub mod helpers;
pub mod invariants;
pub mod location;
pub mod order;
pub mod org;
pub mod store;
pub mod task;
pub mod transaction;
pub mod vehicle;


pub use agent::{Agent, AgentLocation, AgentStatus, Employment, Needs, ShiftState, Stats};
pub use building::Building;
pub use builder::validate_initial_snapshot;
pub use cs_core::{AgentId, BuildingId, LocationId, OrderId, OrgId, VehicleId};
pub use error::{WorldError, WorldResult};
pub use location::{Location, Residency};
pub use order::{Order, OrderStatus, OrderType, Urgency};
pub use org::Org;
pub use store::World;
pub use task::{CorpsePhase, DeliveryPhase, ParamValue, Params, Priority, Task, TaskState};
pub use transaction::{EntityRef, Transaction, TransactionHistory, TransactionKind};
pub use vehicle::{Vehicle, VehicleOwner, VehicleTravel};

//! The `Vehicle` entity (§3).

use std::collections::HashMap;

use crate::{AgentId, BuildingId, OrgId, VehicleId};

/// Whoever holds title to a vehicle — almost always a logistics org, but
/// the data model allows a personal vehicle owned directly by an agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VehicleOwner {
    Org(OrgId),
    Agent(AgentId),
}

/// In-flight travel state for a vehicle (§4.5): building-granularity, same
/// distance metric as agent travel but a different speed config.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VehicleTravel {
    pub to_building: BuildingId,
    pub phases_remaining: u32,
}

/// A vehicle (§3): owned by an org or agent, parked at a building, with an
/// optional operator + passengers and a capacity-bounded cargo hold.
#[derive(Clone, Debug)]
pub struct Vehicle {
    pub id: VehicleId,
    pub owner: VehicleOwner,
    pub building: BuildingId,

    pub operator: Option<AgentId>,
    pub passengers: Vec<AgentId>,

    pub cargo: HashMap<String, u32>,
    pub cargo_capacity: f64,

    pub traveling: Option<VehicleTravel>,
}

impl Vehicle {
    pub fn cargo_qty(&self, good: &str) -> u32 {
        self.cargo.get(good).copied().unwrap_or(0)
    }

    pub fn cargo_used(&self, good_size: impl Fn(&str) -> f64) -> f64 {
        self.cargo
            .iter()
            .map(|(good, qty)| *qty as f64 * good_size(good))
            .sum()
    }

    pub fn is_traveling(&self) -> bool {
        self.traveling.is_some()
    }

    pub fn all_occupants(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.operator.into_iter().chain(self.passengers.iter().copied())
    }
}

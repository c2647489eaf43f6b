//! The `Location` entity (§3).

use std::collections::HashMap;

use cs_core::TagSet;

use crate::{AgentId, BuildingId, LocationId, OrgId};

/// Residential-only fields, `Some` only for `residential`-tagged locations.
#[derive(Clone, Debug)]
pub struct Residency {
    pub residents: Vec<AgentId>,
    pub rent_cost: f64,
    pub max_residents: u32,
}

/// A location (§3): a unit inside a building, owned (or orphaned) by an
/// org, holding inventory and — for workplaces — an employee roster.
#[derive(Clone, Debug)]
pub struct Location {
    pub id: LocationId,
    pub building: BuildingId,
    pub floor: Option<u32>,
    pub unit: Option<u32>,
    pub tags: TagSet,

    pub owner: Option<OrgId>,
    pub for_sale: bool,
    /// What founding this location cost its original owner — carried so an
    /// orphaned (`for_sale`) location still has a resale price once its org
    /// dissolves (§4.3 `purchase_orphaned`).
    pub opening_cost: f64,

    pub employees: Vec<AgentId>,
    pub employee_slots: u32,

    pub inventory: HashMap<String, u32>,
    pub inventory_capacity: f64,

    pub residency: Option<Residency>,
}

impl Location {
    pub fn inventory_qty(&self, good: &str) -> u32 {
        self.inventory.get(good).copied().unwrap_or(0)
    }

    pub fn has_open_slot(&self) -> bool {
        (self.employees.len() as u32) < self.employee_slots
    }

    pub fn inventory_used(&self, good_size: impl Fn(&str) -> f64) -> f64 {
        self.inventory
            .iter()
            .map(|(good, qty)| *qty as f64 * good_size(good))
            .sum()
    }

    pub fn has_vacancy(&self) -> bool {
        self.residency
            .as_ref()
            .is_some_and(|r| (r.residents.len() as u32) < r.max_residents)
    }
}

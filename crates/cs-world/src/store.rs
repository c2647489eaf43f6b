//! The `World` — owns every entity table plus the process-wide ID
//! generator (§3: "the ID generator is process-wide state owned by the
//! world; it is part of the reproducible snapshot").
//!
//! Entities are stored as one `Vec<T>` per kind, indexed directly by the
//! entity's `.index()` (AoS, not SoA — see `DESIGN.md` divergence #1: the
//! executors that mutate this state read and write several fields of the
//! same agent plus several other entities in one call, which is a natural
//! fit for whole-struct rows rather than column arrays).

use cs_core::IdGenerator;

use crate::{
    Agent, AgentId, Building, BuildingId, Location, LocationId, Order, OrderId, Org, OrgId,
    TransactionHistory, Vehicle, VehicleId,
};

/// The full simulation snapshot: every entity table plus the ID allocator.
pub struct World {
    pub id_gen: IdGenerator,

    pub agents: Vec<Agent>,
    pub orgs: Vec<Org>,
    pub buildings: Vec<Building>,
    pub locations: Vec<Location>,
    pub vehicles: Vec<Vehicle>,
    pub orders: Vec<Order>,

    pub transactions: TransactionHistory,
}

impl World {
    pub fn new() -> Self {
        Self {
            id_gen: IdGenerator::new(),
            agents: Vec::new(),
            orgs: Vec::new(),
            buildings: Vec::new(),
            locations: Vec::new(),
            vehicles: Vec::new(),
            orders: Vec::new(),
            transactions: TransactionHistory::new(),
        }
    }

    // ── Agents ──────────────────────────────────────────────────────────

    pub fn agent(&self, id: AgentId) -> &Agent {
        &self.agents[id.index()]
    }

    pub fn agent_mut(&mut self, id: AgentId) -> &mut Agent {
        &mut self.agents[id.index()]
    }

    pub fn push_agent(&mut self, build: impl FnOnce(AgentId) -> Agent) -> AgentId {
        let id = self.id_gen.next_agent();
        debug_assert_eq!(id.index(), self.agents.len());
        self.agents.push(build(id));
        id
    }

    pub fn live_agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agents
            .iter()
            .filter(|a| a.is_alive())
            .map(|a| a.id)
    }

    // ── Orgs ────────────────────────────────────────────────────────────

    pub fn org(&self, id: OrgId) -> &Org {
        &self.orgs[id.index()]
    }

    pub fn org_mut(&mut self, id: OrgId) -> &mut Org {
        &mut self.orgs[id.index()]
    }

    pub fn push_org(&mut self, build: impl FnOnce(OrgId) -> Org) -> OrgId {
        let id = self.id_gen.next_org();
        debug_assert_eq!(id.index(), self.orgs.len());
        self.orgs.push(build(id));
        id
    }

    // ── Buildings ───────────────────────────────────────────────────────

    pub fn building(&self, id: BuildingId) -> &Building {
        &self.buildings[id.index()]
    }

    pub fn push_building(&mut self, build: impl FnOnce(BuildingId) -> Building) -> BuildingId {
        let id = self.id_gen.next_building();
        debug_assert_eq!(id.index(), self.buildings.len());
        self.buildings.push(build(id));
        id
    }

    // ── Locations ───────────────────────────────────────────────────────

    pub fn location(&self, id: LocationId) -> &Location {
        &self.locations[id.index()]
    }

    pub fn location_mut(&mut self, id: LocationId) -> &mut Location {
        &mut self.locations[id.index()]
    }

    pub fn push_location(&mut self, build: impl FnOnce(LocationId) -> Location) -> LocationId {
        let id = self.id_gen.next_location();
        debug_assert_eq!(id.index(), self.locations.len());
        self.locations.push(build(id));
        id
    }

    // ── Vehicles ────────────────────────────────────────────────────────

    pub fn vehicle(&self, id: VehicleId) -> &Vehicle {
        &self.vehicles[id.index()]
    }

    pub fn vehicle_mut(&mut self, id: VehicleId) -> &mut Vehicle {
        &mut self.vehicles[id.index()]
    }

    pub fn push_vehicle(&mut self, build: impl FnOnce(VehicleId) -> Vehicle) -> VehicleId {
        let id = self.id_gen.next_vehicle();
        debug_assert_eq!(id.index(), self.vehicles.len());
        self.vehicles.push(build(id));
        id
    }

    // ── Orders ──────────────────────────────────────────────────────────

    pub fn order(&self, id: OrderId) -> &Order {
        &self.orders[id.index()]
    }

    pub fn order_mut(&mut self, id: OrderId) -> &mut Order {
        &mut self.orders[id.index()]
    }

    pub fn push_order(&mut self, build: impl FnOnce(OrderId) -> Order) -> OrderId {
        let id = self.id_gen.next_order();
        debug_assert_eq!(id.index(), self.orders.len());
        self.orders.push(build(id));
        id
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

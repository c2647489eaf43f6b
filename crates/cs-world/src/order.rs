//! The `Order` entity (§3): goods (B2B wholesale) and logistics (delivery)
//! orders, and their shared lifecycle.

use cs_core::Phase;

use crate::{AgentId, LocationId, OrderId, OrgId, VehicleId};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OrderType {
    Goods,
    Logistics,
}

/// Order lifecycle (§3): `pending → {assigned → in_transit} → delivered |
/// failed | cancelled`, with `ready` only meaningful for goods orders
/// (inserted between `pending` and the logistics hand-off).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Ready,
    Assigned,
    InTransit,
    Delivered,
    Failed,
    Cancelled,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Urgency {
    Low,
    Medium,
    High,
}

/// A business transaction entity — either a `goods` wholesale order placed
/// by a retail shop against a wholesaler, or a `logistics` delivery order
/// moving cargo between two locations. `parent_order_id` links a logistics
/// order back to the goods order that spawned it.
#[derive(Clone, Debug)]
pub struct Order {
    pub id: OrderId,
    pub order_type: OrderType,
    pub status: OrderStatus,
    pub good: String,
    pub quantity: u32,

    /// Goods orders: the shop buying. Logistics orders: the org paying the
    /// delivery fee (the goods order's buyer, carried down for convenience).
    pub buyer_org: OrgId,
    /// Goods orders: the wholesaler selling. Logistics orders: unused.
    pub seller_org: Option<OrgId>,

    pub pickup_location: LocationId,
    pub delivery_location: LocationId,

    /// Goods orders: total sale price, paid on delivery of the linked
    /// logistics order. Logistics orders: the delivery fee paid to the
    /// logistics company.
    pub payment: f64,
    pub urgency: Urgency,

    pub parent_order_id: Option<OrderId>,

    pub driver: Option<AgentId>,
    pub vehicle: Option<VehicleId>,

    pub created_phase: Phase,
}

impl Order {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.status,
            OrderStatus::Delivered | OrderStatus::Failed | OrderStatus::Cancelled
        )
    }
}

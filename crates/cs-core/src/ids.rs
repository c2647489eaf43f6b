//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony. The inner integer is `pub` to allow
//! direct indexing into AoS `Vec`s via `id.0 as usize`, but callers should
//! prefer the `.index()` helper for clarity.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// `true` unless this is the `INVALID` sentinel.
            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of an agent in the agent store.
    pub struct AgentId(u32);
}

typed_id! {
    /// Index of an organization in the org store.
    pub struct OrgId(u32);
}

typed_id! {
    /// Index of a location in the location store.
    pub struct LocationId(u32);
}

typed_id! {
    /// Index of a building in the building store.
    pub struct BuildingId(u32);
}

typed_id! {
    /// Index of a vehicle in the vehicle store.
    pub struct VehicleId(u32);
}

typed_id! {
    /// Index of an order (goods or logistics) in the order store.
    pub struct OrderId(u32);
}

/// Monotonic, per-kind ID allocator. Part of the process-wide reproducible
/// state: two runs started from the same initial snapshot allocate the same
/// IDs in the same order regardless of how many phases have elapsed.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdGenerator {
    next_agent: u32,
    next_org: u32,
    next_location: u32,
    next_building: u32,
    next_vehicle: u32,
    next_order: u32,
}

impl IdGenerator {
    /// A fresh generator with every counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a generator that continues after the given highest-allocated
    /// IDs, for constructing a generator consistent with a pre-populated
    /// initial snapshot.
    #[allow(clippy::too_many_arguments)]
    pub fn starting_after(
        max_agent: Option<AgentId>,
        max_org: Option<OrgId>,
        max_location: Option<LocationId>,
        max_building: Option<BuildingId>,
        max_vehicle: Option<VehicleId>,
        max_order: Option<OrderId>,
    ) -> Self {
        Self {
            next_agent: max_agent.map_or(0, |id| id.0 + 1),
            next_org: max_org.map_or(0, |id| id.0 + 1),
            next_location: max_location.map_or(0, |id| id.0 + 1),
            next_building: max_building.map_or(0, |id| id.0 + 1),
            next_vehicle: max_vehicle.map_or(0, |id| id.0 + 1),
            next_order: max_order.map_or(0, |id| id.0 + 1),
        }
    }

    pub fn next_agent(&mut self) -> AgentId {
        let id = AgentId(self.next_agent);
        self.next_agent += 1;
        id
    }

    pub fn next_org(&mut self) -> OrgId {
        let id = OrgId(self.next_org);
        self.next_org += 1;
        id
    }

    pub fn next_location(&mut self) -> LocationId {
        let id = LocationId(self.next_location);
        self.next_location += 1;
        id
    }

    pub fn next_building(&mut self) -> BuildingId {
        let id = BuildingId(self.next_building);
        self.next_building += 1;
        id
    }

    pub fn next_vehicle(&mut self) -> VehicleId {
        let id = VehicleId(self.next_vehicle);
        self.next_vehicle += 1;
        id
    }

    pub fn next_order(&mut self) -> OrderId {
        let id = OrderId(self.next_order);
        self.next_order += 1;
        id
    }
}

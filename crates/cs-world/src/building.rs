//! The `Building` entity (§3).

use cs_core::{GridPoint, TagSet};

use crate::BuildingId;

/// A building: a grid position plus the floor/unit layout that its
/// contained locations are placed within, and the set of location tags it
/// is allowed to host (used by the entrepreneurship/placement search,
/// §4.3 `entrepreneur`/`purchase_orphaned`).
#[derive(Clone, Debug)]
pub struct Building {
    pub id: BuildingId,
    pub grid: GridPoint,
    pub floors: u32,
    pub units_per_floor: u32,
    pub allowed_tags: TagSet,
}

impl Building {
    pub fn max_units(&self) -> u32 {
        self.floors * self.units_per_floor
    }
}

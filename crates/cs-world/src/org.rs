//! The `Organization` entity (§3).

use cs_core::TagSet;

use crate::{AgentId, LocationId, OrgId};

/// An organization: exactly one leader, a wallet, and a set of owned
/// locations (§3). `weekly_phase_offset` staggers the weekly cycle
/// (§4.1 step 6, §4.4) so payroll/rent load is spread across the week
/// rather than landing on every org on the same phase.
#[derive(Clone, Debug)]
pub struct Org {
    pub id: OrgId,
    pub leader: AgentId,
    pub wallet: f64,
    pub locations: Vec<LocationId>,
    pub weekly_phase_offset: u32,
    pub tags: TagSet,
}

impl Org {
    pub fn owns(&self, location: LocationId) -> bool {
        self.locations.contains(&location)
    }
}

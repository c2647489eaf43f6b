//! The `Agent` entity (§3).

use std::collections::HashMap;

use cs_core::{Phase, TagSet, TravelMethod};

use crate::{AgentId, LocationId, OrgId, Task, VehicleId};

/// The six base stats carried by every agent template (§3). Plain `f64`s —
/// the spec never gives them bespoke arithmetic beyond straight comparison
/// in eligibility checks (e.g. the business-opportunity service).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    pub force: f64,
    pub mobility: f64,
    pub tech: f64,
    pub social: f64,
    pub business: f64,
    pub engineering: f64,
}

/// The three bounded needs (§3), each clamped to `[0, max]` by the needs
/// update sub-pass (§4.1 step 1).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Needs {
    pub hunger: f64,
    pub fatigue: f64,
    pub leisure: f64,
}

/// Where an agent physically is right now. Exactly one variant applies to
/// any live agent (the XOR invariant of §3/§8); a dead agent has no
/// location at all (`Agent::location == None`).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentLocation {
    At(LocationId),
    Traveling {
        from: LocationId,
        to: LocationId,
        method: TravelMethod,
        phases_remaining: u32,
    },
    InVehicle(VehicleId),
}

impl AgentLocation {
    pub fn current(&self) -> Option<LocationId> {
        match self {
            AgentLocation::At(loc) => Some(*loc),
            _ => None,
        }
    }

    pub fn is_traveling(&self) -> bool {
        matches!(self, AgentLocation::Traveling { .. })
    }

    pub fn in_vehicle(&self) -> Option<VehicleId> {
        match self {
            AgentLocation::InVehicle(v) => Some(*v),
            _ => None,
        }
    }
}

/// Employment triple (§3): `employer`/`employed_at` are both `Some` or both
/// `None`; an owner who leads an org but does not occupy one of its
/// location's employee slots is `employed_at: None` while `employer: Some`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Employment {
    pub employer: Option<OrgId>,
    pub employed_at: Option<LocationId>,
    pub salary: f64,
}

impl Employment {
    #[inline]
    pub fn is_employed(&self) -> bool {
        self.employer.is_some()
    }
}

/// Per-kind shift sub-state (work / delivery / corpse-collection), each
/// tracked independently per §3.
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShiftState {
    pub phases_worked: u32,
    pub last_shift_end_phase: Option<Phase>,
    pub shift_start_phase: Option<Phase>,
    /// Set once the staggering random offset (§4.3 `work`) has been rolled
    /// for the current shift, so it is only drawn on first entry.
    pub offset_rolled: bool,
}

impl ShiftState {
    pub fn reset(&mut self, ended_at: Phase) {
        self.last_shift_end_phase = Some(ended_at);
        self.phases_worked = 0;
        self.shift_start_phase = None;
        self.offset_rolled = false;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgentStatus {
    Alive,
    Dead { destroyed_phase: Phase },
}

/// An agent (§3).
#[derive(Clone, Debug)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub age: f64,
    pub template: String,
    pub tags: TagSet,

    pub stats: Stats,
    pub needs: Needs,
    pub wallet: f64,
    pub inventory: HashMap<String, u32>,
    pub inventory_capacity: f64,

    pub employment: Employment,
    pub location: Option<AgentLocation>,
    pub residence: Option<LocationId>,
    pub current_task: Option<Task>,

    pub work_shift: ShiftState,
    pub delivery_shift: ShiftState,
    pub corpse_shift: ShiftState,

    pub status: AgentStatus,
}

impl Agent {
    #[inline]
    pub fn is_alive(&self) -> bool {
        matches!(self.status, AgentStatus::Alive)
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        !self.is_alive()
    }

    pub fn inventory_qty(&self, good: &str) -> u32 {
        self.inventory.get(good).copied().unwrap_or(0)
    }

    /// Total occupied capacity, weighted by each good's configured `size`.
    pub fn inventory_used(&self, good_size: impl Fn(&str) -> f64) -> f64 {
        self.inventory
            .iter()
            .map(|(good, qty)| *qty as f64 * good_size(good))
            .sum()
    }

    pub fn current_location(&self) -> Option<LocationId> {
        self.location.as_ref().and_then(AgentLocation::current)
    }

    pub fn is_traveling(&self) -> bool {
        self.location.as_ref().is_some_and(AgentLocation::is_traveling)
    }

    pub fn in_vehicle(&self) -> Option<VehicleId> {
        self.location.as_ref().and_then(AgentLocation::in_vehicle)
    }
}

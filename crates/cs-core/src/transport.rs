//! Travel method enum shared by the travel and behavior crates.
//!
//! Variants map onto the transport config's distance thresholds (§4.5,
//! §6): `cs-travel` picks a method from an agent's travel distance, and
//! the method's configured phases-per-distance rate sets
//! `travelPhasesRemaining`.

/// The means by which an agent is currently traveling (or not).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TravelMethod {
    /// Same building — travel completes within the same phase.
    #[default]
    None,
    /// On foot: shortest non-zero distances.
    Walk,
    /// Public transit: medium distances.
    Transit,
    /// Truck: used for vehicle travel and long agent trips.
    Truck,
}

impl TravelMethod {
    /// `true` for any mode that leaves the agent in transit for one or
    /// more phases.
    #[inline]
    pub fn is_moving(self) -> bool {
        !matches!(self, TravelMethod::None)
    }

    /// Human-readable label, used in activity-log messages.
    pub fn as_str(self) -> &'static str {
        match self {
            TravelMethod::None => "none",
            TravelMethod::Walk => "walk",
            TravelMethod::Transit => "transit",
            TravelMethod::Truck => "truck",
        }
    }
}

impl std::fmt::Display for TravelMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

//! The typed configuration bundle consumed by the simulation (§6).
//!
//! The simulation only ever consumes an already-typed `Config` value —
//! *how* that value reaches the process (file format, discovery, hot
//! reload) is out of scope per §1. What's in scope is parsing a JSON
//! document into this typed shape and rejecting malformed input as a
//! fatal startup error (§7, category 1), which is what [`Config::from_json`]
//! and [`Config::from_path`] below do.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Inclusive-ish `{min, max}` numeric range used for salary tiers and
/// similar configured bands.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn contains_roughly(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

/// `simulation` section: phase structure, need rates, population floor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub phases_per_day: u32,
    pub phases_per_week: u32,
    pub phases_per_month: u32,
    pub phases_per_year: u32,

    /// Minimum living population; immigration tops up to this floor during
    /// the per-tick maintenance pass.
    pub population_floor: u32,

    pub hunger_per_phase: f64,
    pub fatigue_per_phase: f64,
    pub leisure_per_phase: f64,
    pub hunger_max: f64,
    pub fatigue_max: f64,
    pub leisure_max: f64,

    /// Nominal phases in a full work/delivery/corpse-collection shift.
    pub shift_duration: u32,

    /// Default personal inventory capacity for newly created agents.
    pub default_inventory_capacity: u32,

    /// Starter credits granted to each immigrant injected by the
    /// population-floor top-up (§4.1 step 7), logged as an `External`
    /// inflow so money conservation accounts for it.
    pub immigrant_starting_credits: f64,
}

/// One good's retail/wholesale pricing and per-unit size.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct GoodConfig {
    pub retail_price: f64,
    pub wholesale_price: f64,
    pub size: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SalaryTiers {
    pub unskilled: Range,
    pub skilled: Range,
    pub professional: Range,
}

/// `economy` section.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EconomyConfig {
    pub goods: HashMap<String, GoodConfig>,
    pub default_goods_size: f64,
    pub resale_discount: f64,
    pub salary_tiers: SalaryTiers,
}

impl EconomyConfig {
    pub fn good(&self, name: &str) -> Option<&GoodConfig> {
        self.goods.get(name)
    }
}

/// `thresholds` section.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThresholdsConfig {
    pub entrepreneur_credit_floor: f64,
    pub emergency_hunger: f64,
    pub restock_trigger: f64,
    pub restock_target_qty: u32,
    pub dividend_amount: f64,
    pub insolvency_threshold: f64,
    pub order_expiration_phases: u32,
    pub housing_buffer_weeks: f64,
    pub goods_order_stock_floor: u32,
    pub goods_order_max_qty: u32,

    /// `purchase`'s per-visit cap (§4.3): `min(stock, credits/price, capacity, this)`.
    pub purchase_max_qty: u32,
    /// `rest` completes once fatigue drops below this.
    pub rest_complete_fatigue: f64,
    /// Fatigue floor `rest` resets to at the agent's own residence.
    pub home_rest_reset: f64,
    /// Fatigue floor `rest` resets to at a `shelter`-tagged location.
    pub shelter_rest_reset: f64,
    /// Fatigue floor `rest` resets to anywhere else (forced rest).
    pub forced_rest_reset: f64,
    /// `leisure` completes once leisure drops below this.
    pub leisure_complete: f64,
    /// Leisure reduction from one drink at a `leisure`-tagged (pub) location.
    pub pub_satisfaction: f64,
    /// Per-phase leisure reduction at a `public`-tagged (park) location.
    pub park_satisfaction_per_phase: f64,
    /// One-time cover charge `visit_pub` pays on arrival.
    pub pub_fee: f64,
    /// Phases `visit_pub` stays before its `phasesAtPub` completion clause fires.
    pub pub_visit_duration: u32,
}

/// `business`/`logistics` section.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BusinessConfig {
    pub entrepreneur_try_rate: f64,
    pub purchase_orphaned_try_rate: f64,
    pub fleet_size: u32,
    pub delivery_fee_min: f64,
    pub delivery_fee_distance_factor: f64,
    pub delivery_shift_duration: u32,
    pub corpse_shift_duration: u32,
}

/// `transport` section: distance thresholds and per-method speed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransportConfig {
    pub walk_max_distance: u32,
    pub transit_max_distance: u32,
    pub phases_per_distance_walk: f64,
    pub phases_per_distance_transit: f64,
    pub phases_per_distance_truck: f64,
    pub vehicle_phases_per_distance: f64,
}

impl TransportConfig {
    /// Pick a travel method for a agent-scale trip of `distance` grid
    /// units, per §4.5's threshold table.
    pub fn method_for_distance(&self, distance: u32) -> crate::TravelMethod {
        if distance == 0 {
            crate::TravelMethod::None
        } else if distance <= self.walk_max_distance {
            crate::TravelMethod::Walk
        } else if distance <= self.transit_max_distance {
            crate::TravelMethod::Transit
        } else {
            crate::TravelMethod::Truck
        }
    }

    pub fn phases_per_distance(&self, method: crate::TravelMethod) -> f64 {
        match method {
            crate::TravelMethod::None => 0.0,
            crate::TravelMethod::Walk => self.phases_per_distance_walk,
            crate::TravelMethod::Transit => self.phases_per_distance_transit,
            crate::TravelMethod::Truck => self.phases_per_distance_truck,
        }
    }
}

/// A location template's balance sheet and placement constraints.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocationTemplate {
    pub id: String,
    pub tags: Vec<String>,
    pub allowed_building_tags: Vec<String>,
    pub employee_slots: u32,
    pub starting_inventory: HashMap<String, f64>,
    pub inventory_capacity: f64,
    pub opening_cost: f64,
    pub rent: f64,
    /// Good this location's employees produce per phase worked, if any.
    pub production_recipe: Option<HashMap<String, f64>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrgTemplate {
    pub id: String,
    pub tags: Vec<String>,
    pub starting_wallet: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AgentTemplate {
    pub id: String,
    pub tags: Vec<String>,
    pub age_range: Range,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BuildingTemplate {
    pub id: String,
    pub floors: u32,
    pub units_per_floor: u32,
    pub allowed_tags: Vec<String>,
}

/// `templates` section, keyed by each template's string id.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Templates {
    #[serde(default)]
    pub locations: HashMap<String, LocationTemplate>,
    #[serde(default)]
    pub orgs: HashMap<String, OrgTemplate>,
    #[serde(default)]
    pub agents: HashMap<String, AgentTemplate>,
    #[serde(default)]
    pub buildings: HashMap<String, BuildingTemplate>,
}

/// The complete typed configuration bundle (§6).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub economy: EconomyConfig,
    pub thresholds: ThresholdsConfig,
    pub business: BusinessConfig,
    pub transport: TransportConfig,
    #[serde(default)]
    pub templates: Templates,
}

impl Config {
    /// Parse a configuration bundle from a JSON document. Any
    /// deserialization failure is a fatal startup error (§7 category 1).
    pub fn from_json(s: &str) -> CoreResult<Config> {
        serde_json::from_str(s).map_err(|e| CoreError::Config(e.to_string()))
    }

    pub fn from_path(path: &Path) -> CoreResult<Config> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Reject non-finite numeric fields a hand-authored JSON file could
    /// smuggle in (`NaN`/`Infinity` survive `serde_json`'s default f64
    /// parsing as long as they don't appear literally in the JSON text,
    /// but defensive validation still catches values computed upstream and
    /// serialized back out before reaching us).
    pub fn validate(&self) -> CoreResult<()> {
        let checks: &[(&str, f64)] = &[
            ("simulation.hunger_per_phase", self.simulation.hunger_per_phase),
            ("simulation.fatigue_per_phase", self.simulation.fatigue_per_phase),
            ("simulation.leisure_per_phase", self.simulation.leisure_per_phase),
            ("simulation.hunger_max", self.simulation.hunger_max),
            ("economy.resale_discount", self.economy.resale_discount),
            ("thresholds.dividend_amount", self.thresholds.dividend_amount),
        ];
        for (name, value) in checks {
            if !value.is_finite() {
                return Err(CoreError::Config(format!(
                    "non-finite configuration value at {name}: {value}"
                )));
            }
        }
        if self.simulation.phases_per_week == 0 {
            return Err(CoreError::Config(
                "simulation.phases_per_week must be nonzero".into(),
            ));
        }
        Ok(())
    }

    /// A fully populated, internally consistent `Config` for use in tests
    /// across the workspace, so every crate's test module isn't left to
    /// hand-roll its own copy of every section.
    pub fn test_fixture() -> Config {
        Config {
            simulation: SimulationConfig {
                phases_per_day: 24,
                phases_per_week: 168,
                phases_per_month: 720,
                phases_per_year: 8760,
                population_floor: 0,
                hunger_per_phase: 1.0,
                fatigue_per_phase: 1.0,
                leisure_per_phase: -1.0,
                hunger_max: 100.0,
                fatigue_max: 100.0,
                leisure_max: 100.0,
                shift_duration: 8,
                default_inventory_capacity: 10,
                immigrant_starting_credits: 50.0,
            },
            economy: EconomyConfig {
                goods: HashMap::new(),
                default_goods_size: 1.0,
                resale_discount: 0.5,
                salary_tiers: SalaryTiers {
                    unskilled: Range { min: 10.0, max: 20.0 },
                    skilled: Range { min: 20.0, max: 40.0 },
                    professional: Range { min: 40.0, max: 80.0 },
                },
            },
            thresholds: ThresholdsConfig {
                entrepreneur_credit_floor: 100.0,
                emergency_hunger: 80.0,
                restock_trigger: 15.0,
                restock_target_qty: 20,
                dividend_amount: 10.0,
                insolvency_threshold: 50.0,
                order_expiration_phases: 200,
                housing_buffer_weeks: 2.0,
                goods_order_stock_floor: 15,
                goods_order_max_qty: 30,
                purchase_max_qty: 5,
                rest_complete_fatigue: 70.0,
                home_rest_reset: 10.0,
                shelter_rest_reset: 30.0,
                forced_rest_reset: 60.0,
                leisure_complete: 30.0,
                pub_satisfaction: 40.0,
                park_satisfaction_per_phase: 5.0,
                pub_fee: 5.0,
                pub_visit_duration: 4,
            },
            business: BusinessConfig {
                entrepreneur_try_rate: 0.1,
                purchase_orphaned_try_rate: 0.1,
                fleet_size: 1,
                delivery_fee_min: 10.0,
                delivery_fee_distance_factor: 0.5,
                delivery_shift_duration: 64,
                corpse_shift_duration: 64,
            },
            transport: TransportConfig {
                walk_max_distance: 5,
                transit_max_distance: 25,
                phases_per_distance_walk: 1.0,
                phases_per_distance_transit: 0.3,
                phases_per_distance_truck: 0.2,
                vehicle_phases_per_distance: 0.2,
            },
            templates: Templates::default(),
        }
    }
}

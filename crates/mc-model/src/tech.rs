//! Technology rule tables.
//!
//! Resource names encode their technology as a substring (for example
//! `landbasedwind_class3_moderate_0`). Rules are matched in declared order and
//! a later match overrides an earlier one, so more specific patterns such as
//! `ccs` are listed after the broad ones they refine.

use serde::{Deserialize, Serialize};

/// Category assigned when no rule matches, and by rules for fleets that are
/// left out of comparisons (biomass, petroleum).
pub const OTHER: &str = "Other";

/// One `(substring pattern, category)` classification rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechRule {
    pub pattern: String,
    pub category: String,
}

impl TechRule {
    pub fn new(pattern: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            category: category.into(),
        }
    }

    pub fn matches(&self, resource_name: &str) -> bool {
        resource_name.contains(self.pattern.as_str())
    }
}

const DEFAULT_RULES: &[(&str, &str)] = &[
    ("batteries", "Battery"),
    ("biomass_", OTHER),
    ("conventional_hydroelectric", "Hydro"),
    ("conventional_steam_coal", "Coal"),
    ("geothermal", "Geothermal"),
    ("natural_gas_fired_combined_cycle", "Natural Gas CC"),
    ("natural_gas_fired_combustion_turbine", "Natural Gas CT"),
    ("natural_gas_internal_combustion_engine", "Natural Gas Other"),
    ("natural_gas_steam_turbine", "Natural Gas Other"),
    ("onshore_wind_turbine", "Wind"),
    ("petroleum_liquids", OTHER),
    ("small_hydroelectric", "Hydro"),
    ("solar_photovoltaic", "Solar"),
    ("hydroelectric_pumped_storage", "Hydro"),
    ("nuclear", "Nuclear"),
    ("offshore_wind_turbine", "Wind"),
    ("distributed_generation", "Distributed Solar"),
    ("naturalgas_ccavgcf", "Natural Gas CC"),
    ("naturalgas_ctavgcf", "Natural Gas CT"),
    ("battery", "Battery"),
    ("landbasedwind", "Wind"),
    ("utilitypv", "Solar"),
    ("naturalgas_ccccsavgcf", "CCS"),
    ("ccs", "CCS"),
    ("offshorewind", "Wind"),
    ("hydrogen", "Hydrogen"),
];

// EIA-860 technology names identify units in the existing fleet; the ATB-style
// names (landbasedwind, utilitypv, ...) are candidate new builds.
const DEFAULT_EXISTING_PATTERNS: &[&str] = &[
    "batteries",
    "biomass_",
    "conventional_hydroelectric",
    "conventional_steam_coal",
    "geothermal",
    "natural_gas_fired_combined_cycle",
    "natural_gas_fired_combustion_turbine",
    "natural_gas_internal_combustion_engine",
    "natural_gas_steam_turbine",
    "onshore_wind_turbine",
    "petroleum_liquids",
    "small_hydroelectric",
    "solar_photovoltaic",
    "hydroelectric_pumped_storage",
    "nuclear",
    "offshore_wind_turbine",
    "distributed_generation",
];

/// The built-in ordered rule list.
pub fn default_tech_rules() -> Vec<TechRule> {
    DEFAULT_RULES
        .iter()
        .map(|(pattern, category)| TechRule::new(*pattern, *category))
        .collect()
}

/// Patterns whose matches are flagged as existing-fleet resources.
pub fn default_existing_patterns() -> Vec<String> {
    DEFAULT_EXISTING_PATTERNS
        .iter()
        .map(|pattern| (*pattern).to_string())
        .collect()
}

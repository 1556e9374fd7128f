//! Column names shared by the model output schemas.
//!
//! Source columns come straight from the per-model CSV reports; derived
//! columns are added by the normalization transforms.

// Source columns
pub const MODEL: &str = "model";
pub const CASE: &str = "case";
pub const ZONE: &str = "zone";
pub const RESOURCE_NAME: &str = "resource_name";
pub const UNIT: &str = "unit";
pub const PLANNING_YEAR: &str = "planning_year";
pub const START_VALUE: &str = "start_value";
pub const END_VALUE: &str = "end_value";
pub const VALUE: &str = "value";
pub const HOUR: &str = "hour";
pub const LINE_NAME: &str = "line_name";

// Derived columns
pub const AGG_ZONE: &str = "agg_zone";
pub const TECH_TYPE: &str = "tech_type";
pub const EXISTING: &str = "existing";
pub const START_REGION: &str = "start_region";
pub const DEST_REGION: &str = "dest_region";
pub const ADDITIONS: &str = "additions";
pub const NET_CHANGE: &str = "net_change";
pub const GENERATION: &str = "generation";
pub const CAPACITY: &str = "capacity";
pub const CAPACITY_FACTOR: &str = "capacity_factor";

// Representative-period inputs
pub const TIME_INDEX: &str = "Time_Index";
pub const TIMESTEPS_PER_REP_PERIOD: &str = "Timesteps_per_Rep_Period";
pub const REP_PERIODS: &str = "Rep_Periods";
pub const REP_PERIOD: &str = "Rep_Period";
pub const REP_PERIOD_INDEX: &str = "Rep_Period_Index";
pub const PERIOD_INDEX: &str = "Period_Index";
pub const SLOT: &str = "slot";

/// Separator between the two endpoints of a transmission corridor name.
pub const LINE_SEPARATOR: &str = "_to_";

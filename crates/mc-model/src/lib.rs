//! Domain vocabulary for comparing capacity expansion model outputs.
//!
//! - [`columns`]: column names of the source reports and derived columns
//! - [`dataset`]: the fixed set of report tables and their schemas
//! - [`tech`]: ordered technology classification rules
//! - [`region`]: injective zone -> region lookup
//! - [`config`]: TOML configuration with built-in defaults

pub mod columns;
pub mod config;
pub mod dataset;
pub mod error;
pub mod region;
pub mod tech;

pub use config::ComparisonConfig;
pub use dataset::{DatasetKind, REPORT_TOTAL};
pub use error::{ModelError, Result};
pub use region::{RegionMap, default_region_groups};
pub use tech::{OTHER, TechRule, default_existing_patterns, default_tech_rules};

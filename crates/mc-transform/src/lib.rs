//! Normalization transforms for capacity-expansion model outputs.
//!
//! Every transform takes a Polars `DataFrame` and returns a new one:
//!
//! - **classify**: technology category and existing-fleet flag from resource names
//! - **regions**: aggregate region from detailed zone
//! - **lines**: one canonical name per transmission corridor
//! - **delta**: year-over-year additions from cumulative values
//! - **capacity_factor**: generation over available energy
//! - **capacity**, **emissions**, **transmission**, **dispatch**: report cleanup

pub mod capacity;
pub mod capacity_factor;
pub mod classify;
pub mod delta;
pub mod dispatch;
pub mod emissions;
mod error;
pub mod frame;
pub mod lines;
pub mod regions;
pub mod transmission;

pub use capacity::{capacity_additions, filter_unit};
pub use capacity_factor::{CapacityFactorCalculator, capacity_factor};
pub use classify::{Classification, TechnologyClassifier, drop_other};
pub use delta::compute_deltas;
pub use dispatch::densify_dispatch;
pub use emissions::normalize_emission_units;
pub use error::{Result, TransformError};
pub use lines::{canonicalize_lines, plan_reversals, reverse_line_name, split_endpoints};
pub use regions::RegionAggregator;
pub use transmission::transmission_baseline;

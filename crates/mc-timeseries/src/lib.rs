//! Representative-period to full-year expansion of GenX time series inputs.
//!
//! A reduced case stores a few representative blocks of hourly data and a
//! period map saying which block stands in for each calendar period. The
//! expander rebuilds the full-year series by concatenating blocks in calendar
//! order and renumbering `Time_Index`.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use mc_timeseries::convert_tree;
//!
//! for report in convert_tree(Path::new("case_settings"), false)? {
//!     println!("{}: {:?}", report.folder.display(), report.result);
//! }
//! ```

mod convert;
mod error;
mod expander;
mod layout;
mod period_map;

pub use convert::{
    FolderOutcome, FolderReport, LOAD_DATA_FILE, LOAD_OUTPUT_FILE, PERIOD_MAP_FILE,
    REPRESENTATIVE_PERIOD_FILE, VARIABILITY_FILE, VARIABILITY_OUTPUT_FILE, convert_folder,
    convert_tree, find_period_map_folders,
};
pub use error::{Result, TimeSeriesError};
pub use expander::PeriodExpander;
pub use layout::{RepPeriodLayout, parse_slot};
pub use period_map::PeriodMap;

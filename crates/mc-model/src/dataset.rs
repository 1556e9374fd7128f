//! The fixed set of per-model output tables the comparison understands.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::columns::{
    CASE, END_VALUE, HOUR, LINE_NAME, MODEL, PLANNING_YEAR, RESOURCE_NAME, START_VALUE, UNIT,
    VALUE, ZONE,
};

/// Total column of the GenX operations reports.
pub const REPORT_TOTAL: &str = "Total";

/// A logical table assembled from every matching file under an input root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    ResourceCapacity,
    Generation,
    Transmission,
    TransmissionExpansion,
    Emissions,
    Dispatch,
    /// GenX `costs.csv` operations report.
    OperationalCosts,
    /// GenX `nse.csv` operations report.
    NonServedEnergy,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 8] = [
        DatasetKind::ResourceCapacity,
        DatasetKind::Generation,
        DatasetKind::Transmission,
        DatasetKind::TransmissionExpansion,
        DatasetKind::Emissions,
        DatasetKind::Dispatch,
        DatasetKind::OperationalCosts,
        DatasetKind::NonServedEnergy,
    ];

    /// File name searched for under the input root.
    pub fn file_name(self) -> &'static str {
        match self {
            DatasetKind::ResourceCapacity => "resource_capacity.csv",
            DatasetKind::Generation => "generation.csv",
            DatasetKind::Transmission => "transmission.csv",
            DatasetKind::TransmissionExpansion => "transmission_expansion.csv",
            DatasetKind::Emissions => "emissions.csv",
            DatasetKind::Dispatch => "dispatch.csv",
            DatasetKind::OperationalCosts => "costs.csv",
            DatasetKind::NonServedEnergy => "nse.csv",
        }
    }

    /// Stable snake_case name, also used for normalized output files.
    pub fn as_str(self) -> &'static str {
        match self {
            DatasetKind::ResourceCapacity => "resource_capacity",
            DatasetKind::Generation => "generation",
            DatasetKind::Transmission => "transmission",
            DatasetKind::TransmissionExpansion => "transmission_expansion",
            DatasetKind::Emissions => "emissions",
            DatasetKind::Dispatch => "dispatch",
            DatasetKind::OperationalCosts => "operational_costs",
            DatasetKind::NonServedEnergy => "non_served_energy",
        }
    }

    /// Columns every file of this kind must carry.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            DatasetKind::ResourceCapacity => &[
                MODEL,
                CASE,
                ZONE,
                RESOURCE_NAME,
                UNIT,
                PLANNING_YEAR,
                START_VALUE,
                END_VALUE,
            ],
            DatasetKind::Generation => &[MODEL, CASE, ZONE, RESOURCE_NAME, PLANNING_YEAR, VALUE],
            DatasetKind::Transmission => &[MODEL, CASE, LINE_NAME, PLANNING_YEAR],
            DatasetKind::TransmissionExpansion => &[MODEL, CASE, LINE_NAME, PLANNING_YEAR, VALUE],
            DatasetKind::Emissions => &[MODEL, CASE, ZONE, PLANNING_YEAR, UNIT, VALUE],
            DatasetKind::Dispatch => &[MODEL, ZONE, RESOURCE_NAME, HOUR, VALUE],
            DatasetKind::OperationalCosts => &["Costs", REPORT_TOTAL],
            DatasetKind::NonServedEnergy => &["Segment", REPORT_TOTAL],
        }
    }

    /// Columns parsed as `Float64` when present. A cell that does not parse fails the file.
    pub fn float_columns(self) -> &'static [&'static str] {
        match self {
            DatasetKind::OperationalCosts | DatasetKind::NonServedEnergy => &[REPORT_TOTAL],
            _ => &[START_VALUE, END_VALUE, VALUE],
        }
    }

    /// Columns parsed as `Int64` when present.
    pub fn integer_columns(self) -> &'static [&'static str] {
        match self {
            DatasetKind::OperationalCosts | DatasetKind::NonServedEnergy => &[],
            _ => &[PLANNING_YEAR, HOUR],
        }
    }

    /// Operations reports carry no model column; the model comes from the file path.
    pub fn model_from_path(self) -> bool {
        matches!(
            self,
            DatasetKind::OperationalCosts | DatasetKind::NonServedEnergy
        )
    }

    pub fn has_resources(self) -> bool {
        matches!(
            self,
            DatasetKind::ResourceCapacity | DatasetKind::Generation | DatasetKind::Dispatch
        )
    }

    pub fn has_lines(self) -> bool {
        matches!(
            self,
            DatasetKind::Transmission | DatasetKind::TransmissionExpansion
        )
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        DatasetKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized || kind.file_name() == normalized)
            .ok_or_else(|| format!("unknown dataset '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_name_or_file() {
        assert_eq!(
            "generation".parse::<DatasetKind>().unwrap(),
            DatasetKind::Generation
        );
        assert_eq!(
            "nse.csv".parse::<DatasetKind>().unwrap(),
            DatasetKind::NonServedEnergy
        );
        assert!("capacity".parse::<DatasetKind>().is_err());
    }

    #[test]
    fn test_file_names_are_unique() {
        let mut names: Vec<&str> = DatasetKind::ALL.iter().map(|k| k.file_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), DatasetKind::ALL.len());
    }

    #[test]
    fn test_required_numeric_columns_are_cast() {
        for kind in DatasetKind::ALL {
            for column in kind.required_columns() {
                if *column == VALUE || *column == END_VALUE {
                    assert!(kind.float_columns().contains(column), "{kind}: {column}");
                }
            }
        }
    }
}

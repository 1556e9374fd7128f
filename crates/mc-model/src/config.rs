//! Comparison configuration.
//!
//! Every field has a built-in default, so a config file only needs the tables
//! it wants to replace:
//!
//! ```toml
//! hours_per_year = 8784
//!
//! [regions]
//! WEST = ["CASO", "CANO"]
//! EAST = ["PJME", "ISNE"]
//!
//! [[tech_rules]]
//! pattern = "landbasedwind"
//! category = "Wind"
//! ```
//!
//! A table that is present replaces the default table as a whole; rule order
//! in `tech_rules` is the classification priority (later rules win).

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::region::{RegionMap, default_region_groups};
use crate::tech::{TechRule, default_existing_patterns, default_tech_rules};

/// Settings shared by the normalization pipeline and the period expander.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComparisonConfig {
    /// Ordered classification rules.
    pub tech_rules: Vec<TechRule>,
    /// Patterns that mark a matched resource as part of the existing fleet.
    pub existing_patterns: Vec<String>,
    /// Aggregate region -> detailed zones.
    pub regions: BTreeMap<String, Vec<String>>,
    /// Hours in one planning-year snapshot, used for capacity factors.
    pub hours_per_year: f64,
    /// Year label given to the starting transmission snapshot.
    pub transmission_baseline_year: i64,
    /// Capacity rows in any other unit are dropped.
    pub capacity_unit: String,
    /// Files whose parent directory name contains one of these markers are skipped.
    pub exclude_dir_markers: Vec<String>,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            tech_rules: default_tech_rules(),
            existing_patterns: default_existing_patterns(),
            regions: default_region_groups(),
            hours_per_year: 8760.0,
            transmission_baseline_year: 2023,
            capacity_unit: "MW".to_string(),
            exclude_dir_markers: Vec::new(),
        }
    }
}

impl ComparisonConfig {
    /// Loads and validates a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ModelError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ModelError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::debug!(
            path = %path.display(),
            rules = config.tech_rules.len(),
            regions = config.regions.len(),
            "loaded comparison config"
        );
        Ok(config)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Checks invariants that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if let Some(index) = self
            .tech_rules
            .iter()
            .position(|rule| rule.pattern.is_empty())
        {
            return Err(ModelError::EmptyPattern { index });
        }
        if !(self.hours_per_year.is_finite() && self.hours_per_year > 0.0) {
            return Err(ModelError::InvalidConfig {
                field: "hours_per_year".to_string(),
                reason: format!("expected a positive number, got {}", self.hours_per_year),
            });
        }
        if self.capacity_unit.trim().is_empty() {
            return Err(ModelError::InvalidConfig {
                field: "capacity_unit".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        self.region_map().map(|_| ())
    }

    /// Builds the reverse region index.
    pub fn region_map(&self) -> Result<RegionMap> {
        RegionMap::from_groups(&self.regions)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn test_default_config_is_valid() {
        ComparisonConfig::default().validate().unwrap();
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let file = write_config(
            r#"
hours_per_year = 8784

[[tech_rules]]
pattern = "wind"
category = "Wind"

[[tech_rules]]
pattern = "offshore"
category = "Offshore Wind"
"#,
        );
        let config = ComparisonConfig::load(file.path()).unwrap();
        assert_eq!(config.hours_per_year, 8784.0);
        assert_eq!(config.tech_rules.len(), 2);
        assert_eq!(config.tech_rules[1].category, "Offshore Wind");
        assert_eq!(config.regions, default_region_groups());
        assert_eq!(config.capacity_unit, "MW");
    }

    #[test]
    fn test_duplicate_zone_fails_load() {
        let file = write_config(
            r#"
[regions]
EAST = ["A", "B"]
WEST = ["B"]
"#,
        );
        let err = ComparisonConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ModelError::DuplicateZone { .. }));
    }

    #[test]
    fn test_unknown_field_fails_parse() {
        let file = write_config("hours = 10\n");
        let err = ComparisonConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ModelError::ConfigParse { .. }));
    }

    #[test]
    fn test_rejects_non_positive_hours() {
        let config = ComparisonConfig {
            hours_per_year: 0.0,
            ..ComparisonConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ModelError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_pattern() {
        let mut config = ComparisonConfig::default();
        config.tech_rules.push(TechRule::new("", "Anything"));
        assert!(matches!(
            config.validate(),
            Err(ModelError::EmptyPattern { index: 26 })
        ));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = ComparisonConfig::load(Path::new("/nonexistent/comparison.toml")).unwrap_err();
        assert!(matches!(err, ModelError::ConfigRead { .. }));
    }
}

//! Technology classification of resource names.

use std::collections::BTreeSet;

use mc_common::text_values;
use mc_model::columns::{EXISTING, RESOURCE_NAME, TECH_TYPE};
use mc_model::{ComparisonConfig, OTHER, TechRule};
use polars::prelude::*;

use crate::error::Result;
use crate::frame::{filter_rows, require_columns};

/// Result of classifying one resource name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification<'a> {
    pub tech_type: &'a str,
    /// True when the winning pattern belongs to the existing fleet.
    pub existing: bool,
}

/// Maps resource names to technology categories with an ordered rule list.
///
/// Every rule whose pattern is a substring of the name overwrites the
/// current assignment, so the last matching rule wins.
#[derive(Debug, Clone)]
pub struct TechnologyClassifier {
    rules: Vec<TechRule>,
    existing_patterns: BTreeSet<String>,
}

impl TechnologyClassifier {
    pub fn new(rules: Vec<TechRule>, existing_patterns: impl IntoIterator<Item = String>) -> Self {
        Self {
            rules,
            existing_patterns: existing_patterns.into_iter().collect(),
        }
    }

    pub fn from_config(config: &ComparisonConfig) -> Self {
        Self::new(
            config.tech_rules.clone(),
            config.existing_patterns.iter().cloned(),
        )
    }

    pub fn rules(&self) -> &[TechRule] {
        &self.rules
    }

    /// The rule that decides `resource_name`, if any matches.
    pub fn winning_rule(&self, resource_name: &str) -> Option<&TechRule> {
        self.rules
            .iter()
            .rev()
            .find(|rule| rule.matches(resource_name))
    }

    /// Category for `resource_name`; [`OTHER`] when nothing matches.
    pub fn classify(&self, resource_name: &str) -> &str {
        self.classify_with_existing(resource_name).tech_type
    }

    pub fn classify_with_existing(&self, resource_name: &str) -> Classification<'_> {
        match self.winning_rule(resource_name) {
            Some(rule) => Classification {
                tech_type: &rule.category,
                existing: self.existing_patterns.contains(&rule.pattern),
            },
            None => Classification {
                tech_type: OTHER,
                existing: false,
            },
        }
    }

    /// Adds `tech_type` and `existing` columns derived from `resource_name`.
    ///
    /// A null resource name classifies as [`OTHER`].
    pub fn annotate(&self, df: &DataFrame) -> Result<DataFrame> {
        require_columns(df, "classify", &[RESOURCE_NAME])?;
        let names = text_values(df, RESOURCE_NAME)?;

        let mut tech_types = Vec::with_capacity(names.len());
        let mut existing = Vec::with_capacity(names.len());
        for name in &names {
            let class = self.classify_with_existing(name.as_deref().unwrap_or_default());
            tech_types.push(class.tech_type.to_string());
            existing.push(class.existing);
        }

        let mut out = df.clone();
        out.with_column(Series::new(TECH_TYPE.into(), tech_types))?;
        out.with_column(Series::new(EXISTING.into(), existing))?;

        let other = out
            .column(TECH_TYPE)?
            .str()?
            .into_iter()
            .filter(|value| *value == Some(OTHER))
            .count();
        tracing::debug!(rows = out.height(), other, "classified resources");
        Ok(out)
    }
}

/// Removes rows whose `tech_type` is exactly [`OTHER`].
pub fn drop_other(df: &DataFrame) -> Result<DataFrame> {
    require_columns(df, "drop_other", &[TECH_TYPE])?;
    let tech_types = text_values(df, TECH_TYPE)?;
    filter_rows(
        df,
        tech_types
            .iter()
            .map(|value| value.as_deref() != Some(OTHER)),
    )
}

#[cfg(test)]
mod tests {
    use mc_model::{default_existing_patterns, default_tech_rules};

    use super::*;

    fn classifier() -> TechnologyClassifier {
        TechnologyClassifier::new(default_tech_rules(), default_existing_patterns())
    }

    #[test]
    fn test_substring_match() {
        assert_eq!(classifier().classify("solar_photovoltaic_2_moderate"), "Solar");
        assert_eq!(classifier().classify("landbasedwind_class3_moderate_0"), "Wind");
    }

    #[test]
    fn test_later_rule_wins() {
        let cls = classifier();
        let class = cls.classify_with_existing("natural_gas_fired_combined_cycle_ccs");
        assert_eq!(class.tech_type, "CCS");
        assert!(!class.existing);
    }

    #[test]
    fn test_existing_flag_follows_winning_pattern() {
        let cls = classifier();
        let class = cls.classify_with_existing("natural_gas_fired_combined_cycle_1");
        assert_eq!(class.tech_type, "Natural Gas CC");
        assert!(class.existing);

        let class = cls.classify_with_existing("naturalgas_ccavgcf_moderate_0");
        assert_eq!(class.tech_type, "Natural Gas CC");
        assert!(!class.existing);
    }

    #[test]
    fn test_unmatched_is_other() {
        let cls = classifier();
        let class = cls.classify_with_existing("fusion_demo");
        assert_eq!(class.tech_type, OTHER);
        assert!(!class.existing);
    }

    #[test]
    fn test_annotate_and_drop_other() {
        let df = DataFrame::new(vec![
            Series::new(
                RESOURCE_NAME.into(),
                vec![
                    Some("utilitypv_class1"),
                    Some("biomass_1"),
                    None,
                    Some("natural_gas_steam_turbine_2"),
                ],
            )
            .into_column(),
        ])
        .unwrap();

        let annotated = classifier().annotate(&df).unwrap();
        let tech = annotated.column(TECH_TYPE).unwrap().str().unwrap();
        assert_eq!(tech.get(0), Some("Solar"));
        assert_eq!(tech.get(1), Some(OTHER));
        assert_eq!(tech.get(2), Some(OTHER));
        assert_eq!(tech.get(3), Some("Natural Gas Other"));

        let kept = drop_other(&annotated).unwrap();
        let tech = kept.column(TECH_TYPE).unwrap().str().unwrap();
        assert_eq!(kept.height(), 2);
        assert_eq!(tech.get(1), Some("Natural Gas Other"));
    }
}

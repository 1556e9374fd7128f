//! Tests for mc-model types.

use mc_model::{ComparisonConfig, DatasetKind, RegionMap, TechRule};

#[test]
fn config_round_trips_through_toml() {
    let config = ComparisonConfig::default();
    let text = toml::to_string(&config).expect("serialize config");
    let parsed: ComparisonConfig = toml::from_str(&text).expect("parse config");
    assert_eq!(parsed, config);
}

#[test]
fn config_region_map_matches_groups() {
    let config = ComparisonConfig::default();
    let map = config.region_map().expect("region map");
    for (region, zones) in &config.regions {
        for zone in zones {
            assert_eq!(map.region_for(zone), Some(region.as_str()));
        }
    }
}

#[test]
fn dataset_kind_serializes_snake_case() {
    let json = serde_json::to_string(&DatasetKind::TransmissionExpansion).expect("serialize");
    assert_eq!(json, "\"transmission_expansion\"");
}

#[test]
fn empty_region_map_maps_nothing() {
    let groups = std::collections::BTreeMap::new();
    let map = RegionMap::from_groups(&groups).expect("empty map");
    assert!(map.is_empty());
    assert_eq!(map.region_for("CASO"), None);
}

#[test]
fn tech_rule_serializes_fields() {
    let rule = TechRule::new("utilitypv", "Solar");
    let json = serde_json::to_value(&rule).expect("serialize rule");
    assert_eq!(json["pattern"], "utilitypv");
    assert_eq!(json["category"], "Solar");
}

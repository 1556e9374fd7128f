//! Property tests for the normalization transforms.

use mc_common::{float_column, int_column, text_column};
use mc_model::{OTHER, TechRule, default_existing_patterns, default_tech_rules};
use mc_transform::{TechnologyClassifier, compute_deltas, plan_reversals};
use polars::prelude::*;
use proptest::prelude::*;

fn classifier() -> TechnologyClassifier {
    TechnologyClassifier::new(default_tech_rules(), default_existing_patterns())
}

proptest! {
    #[test]
    fn classification_is_last_matching_rule(name in "[a-z_]{0,40}") {
        let rules = default_tech_rules();
        let expected = rules
            .iter()
            .filter(|rule| name.contains(rule.pattern.as_str()))
            .map(|rule| rule.category.as_str())
            .next_back()
            .unwrap_or(OTHER);
        let classifier = classifier();
        prop_assert_eq!(classifier.classify(&name), expected);
    }

    #[test]
    fn appended_rule_overrides(prefix in "[a-z]{0,8}", suffix in "[a-z]{0,8}") {
        let mut rules = default_tech_rules();
        rules.push(TechRule::new("zz_marker", "Marker"));
        let classifier = TechnologyClassifier::new(rules, Vec::new());
        let name = format!("{prefix}utilitypv_zz_marker{suffix}");
        prop_assert_eq!(classifier.classify(&name), "Marker");
    }

    #[test]
    fn additions_are_never_negative(values in prop::collection::vec(-1000.0f64..1000.0, 1..12)) {
        let n = values.len();
        let df = DataFrame::new(vec![
            text_column("zone", vec![Some("CASO".to_string()); n]),
            int_column("planning_year", (0..n).map(|i| Some(2030 + 5 * i as i64)).collect()),
            float_column("end_value", values.iter().copied().map(Some).collect()),
        ])
        .unwrap();

        let out = compute_deltas(&df, &["zone"], "end_value").unwrap();
        prop_assert_eq!(out.height(), n);
        let additions = out.column("end_value").unwrap().f64().unwrap();
        prop_assert!(additions.into_iter().all(|v| v.is_some_and(|v| v >= 0.0)));

        // net changes telescope back to the last cumulative value
        let net: f64 = out.column("net_change").unwrap().f64().unwrap().into_iter().flatten().sum();
        prop_assert!((net - values[n - 1]).abs() < 1e-6);
    }

    #[test]
    fn majority_spelling_is_never_reversed(minority in 1usize..5, extra in 1usize..5) {
        let majority = minority + extra;
        let mut rows = Vec::new();
        for i in 0..minority {
            rows.push(("A_to_B".to_string(), format!("m{i}")));
        }
        for i in 0..majority {
            rows.push(("B_to_A".to_string(), format!("n{i}")));
        }
        let plan = plan_reversals(rows.iter().map(|(l, m)| (l.as_str(), Some(m.as_str()))));
        prop_assert!(!plan.contains_key("B_to_A"));
        prop_assert_eq!(plan.get("A_to_B").map(String::as_str), Some("B_to_A"));
    }
}

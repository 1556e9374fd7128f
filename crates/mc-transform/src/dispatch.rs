//! Hourly dispatch densification.

use std::collections::{BTreeMap, BTreeSet};

use mc_common::{float_column, float_values, has_column, int_column, int_values, text_values};
use mc_model::columns::{
    AGG_ZONE, CASE, HOUR, MODEL, PLANNING_YEAR, RESOURCE_NAME, TECH_TYPE, VALUE, ZONE,
};
use polars::prelude::*;

use crate::error::Result;
use crate::frame::{GroupKey, require_columns, row_keys, take_rows};

const GROUP_COLUMNS: [&str; 6] = [PLANNING_YEAR, MODEL, CASE, AGG_ZONE, ZONE, TECH_TYPE];

#[derive(Debug, Default)]
struct DispatchGroup {
    first_row: usize,
    /// resource -> hour -> summed value
    values: BTreeMap<String, BTreeMap<i64, f64>>,
}

/// Fills in hours where a resource did not dispatch.
///
/// Rows are grouped by whichever of `planning_year`, `model`, `case`,
/// `agg_zone`, `zone` and `tech_type` the table has. Within each group every
/// resource gets one row for every hour seen anywhere in the table; hours
/// the source omits are 0. Rows without a resource name or hour are dropped.
///
/// The result holds the group columns, `resource_name`, `hour` and `value`.
pub fn densify_dispatch(df: &DataFrame) -> Result<DataFrame> {
    require_columns(df, "densify_dispatch", &[RESOURCE_NAME, HOUR, VALUE])?;
    let group_columns: Vec<&str> = GROUP_COLUMNS
        .into_iter()
        .filter(|column| has_column(df, column))
        .collect();

    let keys: Vec<GroupKey> = if group_columns.is_empty() {
        vec![Vec::new(); df.height()]
    } else {
        row_keys(df, &group_columns)?
    };
    let resources = text_values(df, RESOURCE_NAME)?;
    let hours = int_values(df, HOUR)?;
    let values = float_values(df, VALUE)?;

    let mut all_hours = BTreeSet::new();
    let mut groups: BTreeMap<GroupKey, DispatchGroup> = BTreeMap::new();
    for (row, key) in keys.into_iter().enumerate() {
        let (Some(resource), Some(hour)) = (&resources[row], hours[row]) else {
            continue;
        };
        all_hours.insert(hour);
        let group = groups.entry(key).or_insert_with(|| DispatchGroup {
            first_row: row,
            values: BTreeMap::new(),
        });
        *group
            .values
            .entry(resource.clone())
            .or_default()
            .entry(hour)
            .or_insert(0.0) += values[row].unwrap_or(0.0);
    }

    let mut rows = Vec::new();
    let mut out_resources = Vec::new();
    let mut out_hours = Vec::new();
    let mut out_values = Vec::new();
    for group in groups.values() {
        for (resource, by_hour) in &group.values {
            for hour in &all_hours {
                rows.push(group.first_row);
                out_resources.push(Some(resource.clone()));
                out_hours.push(Some(*hour));
                out_values.push(Some(by_hour.get(hour).copied().unwrap_or(0.0)));
            }
        }
    }

    let filled = out_values.len();
    let series = [
        Series::new(RESOURCE_NAME.into(), out_resources).into_column(),
        int_column(HOUR, out_hours),
        float_column(VALUE, out_values),
    ];
    let out = if group_columns.is_empty() {
        DataFrame::new(series.into())?
    } else {
        let mut out = take_rows(df, &group_columns, &rows)?;
        for column in series {
            out.with_column(column)?;
        }
        out
    };
    tracing::debug!(
        groups = groups.len(),
        hours = all_hours.len(),
        source_rows = df.height(),
        rows = filled,
        "densified dispatch"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_hours_become_zero() {
        let df = df! {
            MODEL => ["GenX", "GenX", "GenX"],
            ZONE => ["CASO", "CASO", "CASO"],
            RESOURCE_NAME => ["pv", "pv", "wind"],
            HOUR => [1i64, 2, 3],
            VALUE => [5.0, 6.0, 7.0],
        }
        .unwrap();

        let out = densify_dispatch(&df).unwrap();

        // 2 resources x 3 hours
        assert_eq!(out.height(), 6);
        let names = out.column(RESOURCE_NAME).unwrap().str().unwrap();
        let hours = out.column(HOUR).unwrap().i64().unwrap();
        let values = out.column(VALUE).unwrap().f64().unwrap();
        assert_eq!(names.get(2), Some("pv"));
        assert_eq!(hours.get(2), Some(3));
        assert_eq!(values.get(2), Some(0.0));
        assert_eq!(names.get(3), Some("wind"));
        assert_eq!(values.get(3), Some(0.0));
        assert_eq!(values.get(5), Some(7.0));
        let zones = out.column(ZONE).unwrap().str().unwrap();
        assert!(zones.into_iter().all(|z| z == Some("CASO")));
    }

    #[test]
    fn test_resources_stay_within_their_group() {
        let df = df! {
            ZONE => ["CASO", "PJME"],
            RESOURCE_NAME => ["pv", "nuclear"],
            HOUR => [1i64, 2],
            VALUE => [5.0, 9.0],
        }
        .unwrap();

        let out = densify_dispatch(&df).unwrap();
        // each zone keeps its own resource over both hours
        assert_eq!(out.height(), 4);
        let zones = out.column(ZONE).unwrap().str().unwrap();
        let names = out.column(RESOURCE_NAME).unwrap().str().unwrap();
        assert_eq!(zones.get(0), Some("CASO"));
        assert_eq!(names.get(0), Some("pv"));
        assert_eq!(zones.get(3), Some("PJME"));
        assert_eq!(names.get(3), Some("nuclear"));
    }
}

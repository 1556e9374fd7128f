//! Year-over-year changes of cumulative quantities.

use std::collections::{BTreeMap, BTreeSet};

use mc_common::{float_column, float_values, int_column, int_values};
use mc_model::columns::{NET_CHANGE, PLANNING_YEAR};
use polars::prelude::*;

use crate::error::{Result, TransformError};
use crate::frame::{GroupKey, require_columns, row_keys, take_rows};

/// Cumulative value per group and planning year, summed over duplicate rows.
#[derive(Debug, Default)]
struct Snapshot {
    values: BTreeMap<GroupKey, BTreeMap<i64, f64>>,
    /// First source row of each group, used to rebuild typed key columns.
    first_row: BTreeMap<GroupKey, usize>,
    years: BTreeSet<i64>,
}

impl Snapshot {
    fn build(keys: Vec<GroupKey>, years: &[Option<i64>], values: &[Option<f64>]) -> Self {
        let mut snapshot = Self::default();
        let mut skipped = 0usize;
        for (row, key) in keys.into_iter().enumerate() {
            let Some(year) = years[row] else {
                skipped += 1;
                continue;
            };
            snapshot.years.insert(year);
            snapshot.first_row.entry(key.clone()).or_insert(row);
            *snapshot
                .values
                .entry(key)
                .or_default()
                .entry(year)
                .or_insert(0.0) += values[row].unwrap_or(0.0);
        }
        if skipped > 0 {
            tracing::warn!(rows = skipped, "rows without a planning year ignored");
        }
        snapshot
    }
}

/// Per-group change since the preceding planning year.
///
/// Rows are grouped by `keys` and summed per planning year. For each group
/// and year, the value of the same group in the immediately preceding
/// planning year of the whole table is subtracted (0 when the group is absent
/// there). The earliest year keeps its cumulative value. A group absent from
/// a year produces no row for that year.
///
/// The result holds `keys`, `planning_year`, `value_column` floored at zero
/// (new additions), and the signed `net_change`, ordered by year.
pub fn compute_deltas(df: &DataFrame, keys: &[&str], value_column: &str) -> Result<DataFrame> {
    if keys.is_empty() {
        return Err(TransformError::EmptyKeys {
            operation: "compute_deltas",
        });
    }
    require_columns(df, "compute_deltas", keys)?;
    require_columns(df, "compute_deltas", &[PLANNING_YEAR, value_column])?;

    let snapshot = Snapshot::build(
        row_keys(df, keys)?,
        &int_values(df, PLANNING_YEAR)?,
        &float_values(df, value_column)?,
    );

    let years: Vec<i64> = snapshot.years.iter().copied().collect();
    let mut rows = Vec::new();
    let mut out_years = Vec::new();
    let mut net = Vec::new();
    for (position, year) in years.iter().enumerate() {
        let previous = position.checked_sub(1).map(|p| years[p]);
        for (key, by_year) in &snapshot.values {
            let Some(current) = by_year.get(year) else {
                continue;
            };
            let before = previous
                .and_then(|p| by_year.get(&p).copied())
                .unwrap_or(0.0);
            rows.push(snapshot.first_row[key]);
            out_years.push(Some(*year));
            net.push(current - before);
        }
    }

    let additions: Vec<Option<f64>> = net.iter().map(|n| Some(n.max(0.0))).collect();
    let net: Vec<Option<f64>> = net.into_iter().map(Some).collect();

    let mut out = take_rows(df, keys, &rows)?;
    out.with_column(int_column(PLANNING_YEAR, out_years))?;
    out.with_column(float_column(value_column, additions))?;
    out.with_column(float_column(NET_CHANGE, net))?;
    tracing::debug!(
        groups = snapshot.values.len(),
        years = years.len(),
        rows = out.height(),
        "computed deltas"
    );
    Ok(out)
}

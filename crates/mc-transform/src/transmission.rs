//! Starting transmission capacity.

use mc_common::{float_column, float_values, int_column, int_values};
use mc_model::columns::{PLANNING_YEAR, START_VALUE, VALUE};
use polars::prelude::*;

use crate::error::Result;
use crate::frame::{filter_rows, require_columns};

/// Rows of the earliest planning year with `start_value` as `value`,
/// relabelled to `baseline_year`.
///
/// The result is the corridor capacity before any model builds, so it can be
/// charted next to the planning years.
pub fn transmission_baseline(df: &DataFrame, baseline_year: i64) -> Result<DataFrame> {
    require_columns(df, "transmission_baseline", &[PLANNING_YEAR, START_VALUE])?;
    let years = int_values(df, PLANNING_YEAR)?;
    let Some(first) = years.iter().flatten().min().copied() else {
        return Ok(df.clear());
    };

    let mut out = filter_rows(df, years.iter().map(|y| *y == Some(first)))?;
    let start = float_values(&out, START_VALUE)?;
    let height = out.height();
    out.with_column(float_column(VALUE, start))?;
    out.with_column(int_column(PLANNING_YEAR, vec![Some(baseline_year); height]))?;
    tracing::debug!(from = first, to = baseline_year, rows = height, "built transmission baseline");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_uses_first_year_start_values() {
        let df = df! {
            "line_name" => ["A_to_B", "A_to_B", "C_to_D"],
            PLANNING_YEAR => [2040i64, 2030, 2030],
            START_VALUE => [900.0, 500.0, 200.0],
            "end_value" => [1000.0, 900.0, 300.0],
        }
        .unwrap();

        let out = transmission_baseline(&df, 2023).unwrap();
        assert_eq!(out.height(), 2);
        let years = out.column(PLANNING_YEAR).unwrap().i64().unwrap();
        let values = out.column(VALUE).unwrap().f64().unwrap();
        assert!(years.into_iter().all(|y| y == Some(2023)));
        assert_eq!(values.get(0), Some(500.0));
        assert_eq!(values.get(1), Some(200.0));
    }

    #[test]
    fn test_empty_table() {
        let df = df! {
            PLANNING_YEAR => Vec::<i64>::new(),
            START_VALUE => Vec::<f64>::new(),
        }
        .unwrap();
        assert_eq!(transmission_baseline(&df, 2023).unwrap().height(), 0);
    }
}

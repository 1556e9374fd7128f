//! Resource capacity cleanup.

use mc_common::{float_column, float_values, text_values};
use mc_model::columns::{ADDITIONS, END_VALUE, START_VALUE, UNIT};
use polars::prelude::*;

use crate::error::Result;
use crate::frame::{filter_rows, require_columns};

/// Keeps rows reported in `unit` (exact match).
pub fn filter_unit(df: &DataFrame, unit: &str) -> Result<DataFrame> {
    require_columns(df, "filter_unit", &[UNIT])?;
    let units = text_values(df, UNIT)?;
    let out = filter_rows(df, units.iter().map(|u| u.as_deref() == Some(unit)))?;
    if out.height() < df.height() {
        tracing::debug!(
            unit,
            dropped = df.height() - out.height(),
            "dropped capacity rows in other units"
        );
    }
    Ok(out)
}

/// Adds `additions = end_value - start_value` per row. Missing values count as 0.
pub fn capacity_additions(df: &DataFrame) -> Result<DataFrame> {
    require_columns(df, "capacity_additions", &[START_VALUE, END_VALUE])?;
    let start = float_values(df, START_VALUE)?;
    let end = float_values(df, END_VALUE)?;
    let additions = start
        .iter()
        .zip(&end)
        .map(|(s, e)| Some(e.unwrap_or(0.0) - s.unwrap_or(0.0)))
        .collect();

    let mut out = df.clone();
    out.with_column(float_column(ADDITIONS, additions))?;
    Ok(out)
}

//! Row-grouping helpers shared by the transforms.
//!
//! Grouping keys are compared as text so any key column type works; output
//! key columns are rebuilt with [`take_rows`] from a representative source
//! row, which keeps their original types.

use mc_common::{has_column, text_values};
use polars::prelude::*;

use crate::error::{Result, TransformError};

/// One row's values for a set of key columns.
pub type GroupKey = Vec<Option<String>>;

/// Fails with [`TransformError::MissingColumn`] unless every column exists.
pub fn require_columns(df: &DataFrame, operation: &'static str, columns: &[&str]) -> Result<()> {
    for column in columns {
        if !has_column(df, column) {
            return Err(TransformError::MissingColumn {
                operation,
                column: (*column).to_string(),
            });
        }
    }
    Ok(())
}

/// Row-wise keys over `columns`.
pub fn row_keys(df: &DataFrame, columns: &[&str]) -> Result<Vec<GroupKey>> {
    let by_column = columns
        .iter()
        .map(|name| text_values(df, name))
        .collect::<PolarsResult<Vec<_>>>()?;
    let keys = (0..df.height())
        .map(|row| by_column.iter().map(|values| values[row].clone()).collect())
        .collect();
    Ok(keys)
}

/// Selects `columns` and gathers `rows` in the given order.
pub fn take_rows(df: &DataFrame, columns: &[&str], rows: &[usize]) -> Result<DataFrame> {
    let indices: Vec<IdxSize> = rows.iter().map(|&row| row as IdxSize).collect();
    let indices = IdxCa::from_vec("idx".into(), indices);
    Ok(df.select(columns.iter().copied())?.take(&indices)?)
}

/// Keeps the rows where `keep` is true.
pub fn filter_rows(df: &DataFrame, keep: impl IntoIterator<Item = bool>) -> Result<DataFrame> {
    let mask: BooleanChunked = keep.into_iter().collect();
    Ok(df.filter(&mask)?)
}

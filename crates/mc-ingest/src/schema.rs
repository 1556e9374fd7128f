//! Typed view of a raw report table.

use std::path::Path;

use mc_model::DatasetKind;
use polars::prelude::*;

use crate::error::{IngestError, Result};

/// Checks required columns, then casts the typed columns of `kind`.
///
/// Casts are strict: one unparseable cell rejects the whole file rather
/// than turning into a silent null. Empty cells stay null.
pub fn apply_schema(mut df: DataFrame, kind: DatasetKind, path: &Path) -> Result<DataFrame> {
    for column in kind.required_columns() {
        if df.get_column_index(column).is_none() {
            return Err(IngestError::MissingColumn {
                column: (*column).to_string(),
                path: path.to_path_buf(),
            });
        }
    }

    let casts = kind
        .float_columns()
        .iter()
        .map(|name| (*name, DataType::Float64))
        .chain(
            kind.integer_columns()
                .iter()
                .map(|name| (*name, DataType::Int64)),
        );
    for (name, dtype) in casts {
        let Some(column) = df.column(name).ok() else {
            continue;
        };
        if column.dtype() == &dtype {
            continue;
        }
        let typed = column
            .as_materialized_series()
            .strict_cast(&dtype)
            .map_err(|e| IngestError::InvalidNumber {
                column: name.to_string(),
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        df.with_column(typed)?;
    }
    Ok(df)
}

/// A zero-row table carrying the required columns of `kind` with their types.
pub fn empty_table(kind: DatasetKind) -> Result<DataFrame> {
    let columns = kind
        .required_columns()
        .iter()
        .map(|name| {
            let dtype = column_dtype(kind, name);
            Series::new_empty((*name).into(), &dtype).into_column()
        })
        .collect();
    Ok(DataFrame::new(columns)?)
}

fn column_dtype(kind: DatasetKind, name: &str) -> DataType {
    if kind.float_columns().contains(&name) {
        DataType::Float64
    } else if kind.integer_columns().contains(&name) {
        DataType::Int64
    } else {
        DataType::String
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(columns: &[(&str, &[Option<&str>])]) -> DataFrame {
        let columns = columns
            .iter()
            .map(|(name, values)| Series::new((*name).into(), values.to_vec()).into_column())
            .collect();
        DataFrame::new(columns).unwrap()
    }

    fn generation_frame(value: Option<&str>) -> DataFrame {
        raw(&[
            ("model", &[Some("GenX")]),
            ("case", &[Some("base")]),
            ("zone", &[Some("CASO")]),
            ("resource_name", &[Some("utilitypv_1")]),
            ("planning_year", &[Some("2030")]),
            ("value", &[value]),
        ])
    }

    #[test]
    fn test_casts_numeric_columns() {
        let df = apply_schema(
            generation_frame(Some("12.5")),
            DatasetKind::Generation,
            Path::new("generation.csv"),
        )
        .unwrap();
        assert_eq!(df.column("value").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("planning_year").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("zone").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("value").unwrap().f64().unwrap().get(0), Some(12.5));
    }

    #[test]
    fn test_empty_cell_stays_null() {
        let df = apply_schema(
            generation_frame(None),
            DatasetKind::Generation,
            Path::new("generation.csv"),
        )
        .unwrap();
        assert_eq!(df.column("value").unwrap().f64().unwrap().get(0), None);
    }

    #[test]
    fn test_malformed_number_rejects_file() {
        let err = apply_schema(
            generation_frame(Some("twelve")),
            DatasetKind::Generation,
            Path::new("generation.csv"),
        )
        .unwrap_err();
        match err {
            IngestError::InvalidNumber { column, .. } => assert_eq!(column, "value"),
            other => panic!("expected InvalidNumber, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_required_column() {
        let df = raw(&[("model", &[Some("GenX")])]);
        let err = apply_schema(df, DatasetKind::Emissions, Path::new("emissions.csv")).unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn { column, .. } if column == "case"));
    }

    #[test]
    fn test_empty_table_has_typed_columns() {
        let df = empty_table(DatasetKind::ResourceCapacity).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.column("end_value").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("planning_year").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("resource_name").unwrap().dtype(), &DataType::String);
    }
}

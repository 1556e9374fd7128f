//! Assembles one logical table per dataset from every matching file.

use std::path::{Path, PathBuf};

use mc_model::DatasetKind;
use mc_model::columns::MODEL;
use polars::prelude::*;
use rayon::prelude::*;

use crate::csv::read_text_table;
use crate::discovery::{find_files, model_from_path};
use crate::error::Result;
use crate::schema::{apply_schema, empty_table};

/// Where and how to look for report files.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Parent directory markers that exclude a file.
    pub exclude_dir_markers: Vec<String>,
    /// Directories skipped entirely, such as a previous run's output.
    pub exclude_dirs: Vec<PathBuf>,
}

/// A dataset assembled from zero or more report files.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub kind: DatasetKind,
    pub frame: DataFrame,
    /// Contributing files in concatenation order.
    pub files: Vec<PathBuf>,
}

impl LoadedDataset {
    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }
}

/// Reads and types a single report file.
pub fn load_file(path: &Path, kind: DatasetKind) -> Result<DataFrame> {
    let mut df = read_text_table(path)?;
    if kind.model_from_path() {
        let model = model_from_path(path)?;
        let height = df.height();
        df.with_column(Series::new(MODEL.into(), vec![model; height]))?;
    }
    apply_schema(df, kind, path)
}

/// Loads every `kind` file under `root`.
///
/// Files are parsed in parallel and concatenated in sorted path order. A
/// dataset with no files is an empty table with the required columns.
pub fn load_dataset(root: &Path, kind: DatasetKind, options: &LoadOptions) -> Result<LoadedDataset> {
    let files = find_files(
        root,
        kind.file_name(),
        &options.exclude_dir_markers,
        &options.exclude_dirs,
    )?;
    if files.is_empty() {
        tracing::warn!(dataset = %kind, root = %root.display(), "no files found; dataset is empty");
        return Ok(LoadedDataset {
            kind,
            frame: empty_table(kind)?,
            files,
        });
    }

    let frames = files
        .par_iter()
        .map(|path| load_file(path, kind))
        .collect::<Result<Vec<_>>>()?;
    let frame = concat_aligned(frames)?;

    tracing::info!(
        dataset = %kind,
        files = files.len(),
        rows = frame.height(),
        "loaded dataset"
    );
    Ok(LoadedDataset { kind, frame, files })
}

/// Stacks frames whose column sets may differ.
///
/// The result has the union of columns in first-seen order; a column missing
/// from one frame is null for that frame's rows.
pub fn concat_aligned(frames: Vec<DataFrame>) -> Result<DataFrame> {
    let mut schema: Vec<(PlSmallStr, DataType)> = Vec::new();
    for df in &frames {
        for column in df.get_columns() {
            if !schema.iter().any(|(name, _)| name == column.name()) {
                schema.push((column.name().clone(), column.dtype().clone()));
            }
        }
    }

    let mut combined: Option<DataFrame> = None;
    for df in frames {
        let height = df.height();
        let mut columns = Vec::with_capacity(schema.len());
        for (name, dtype) in &schema {
            let column = match df.column(name.as_str()) {
                Ok(column) if column.dtype() == dtype => column.clone(),
                Ok(column) => column.cast(dtype)?,
                Err(_) => Series::full_null(name.clone(), height, dtype).into_column(),
            };
            columns.push(column);
        }
        let aligned = DataFrame::new(columns)?;
        match combined.as_mut() {
            Some(acc) => {
                acc.vstack_mut(&aligned)?;
            }
            None => combined = Some(aligned),
        }
    }

    Ok(combined.unwrap_or_else(DataFrame::empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_aligned_fills_missing_columns() {
        let a = df! { "zone" => ["CASO"], "value" => [1.0] }.unwrap();
        let b = df! { "zone" => ["PJME"], "case" => ["base"] }.unwrap();

        let df = concat_aligned(vec![a, b]).unwrap();
        assert_eq!(df.height(), 2);
        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["zone", "value", "case"]);
        let value = df.column("value").unwrap().f64().unwrap();
        assert_eq!(value.get(1), None);
        let case = df.column("case").unwrap().str().unwrap();
        assert_eq!(case.get(0), None);
        assert_eq!(case.get(1), Some("base"));
    }

    #[test]
    fn test_concat_aligned_empty_input() {
        let df = concat_aligned(Vec::new()).unwrap();
        assert_eq!(df.height(), 0);
    }
}

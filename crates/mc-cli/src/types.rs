use std::path::PathBuf;

use serde::Serialize;

/// Outcome of `normalize`, also written as `summary.json`.
#[derive(Debug, Serialize)]
pub struct NormalizeResult {
    pub input_root: PathBuf,
    /// `None` on a dry run.
    pub output_dir: Option<PathBuf>,
    pub tables: Vec<TableSummary>,
}

/// One normalized or derived table.
#[derive(Debug, Clone, Serialize)]
pub struct TableSummary {
    pub name: String,
    pub rows: usize,
    /// Report files that fed the table; 0 for derived tables.
    pub source_files: usize,
    pub derived: bool,
    /// Where the table was written, if it was.
    pub output: Option<PathBuf>,
}

/// Outcome of `expand`.
#[derive(Debug)]
pub struct ExpandResult {
    pub root: PathBuf,
    pub folders: Vec<FolderSummary>,
    pub has_errors: bool,
}

#[derive(Debug)]
pub struct FolderSummary {
    pub folder: PathBuf,
    pub status: FolderStatus,
}

#[derive(Debug)]
pub enum FolderStatus {
    Converted { hours: usize, variability: bool },
    Skipped,
    Failed(String),
}

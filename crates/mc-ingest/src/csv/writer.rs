//! CSV output.

use std::fs::File;
use std::path::Path;

use polars::prelude::*;

use crate::error::{IngestError, Result};

/// Writes `df` with a header row, creating parent directories as needed.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let write_error = |message: String| IngestError::FileWrite {
        path: path.to_path_buf(),
        message,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;
    }
    let mut file = File::create(path).map_err(|e| write_error(e.to_string()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .map_err(|e| write_error(e.to_string()))?;

    tracing::debug!(path = %path.display(), rows = df.height(), "wrote CSV");
    Ok(())
}

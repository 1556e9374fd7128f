//! CSV file reading with every column kept as text.
//!
//! Model reports mix labels that look numeric (years, zone ids) with real
//! measures, so nothing is inferred at read time. Typed columns are cast
//! afterwards by [`crate::schema`], which knows what each report carries.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use polars::prelude::*;

use crate::error::{IngestError, Result};

fn open_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

/// Detect encoding and validate it's supported (UTF-8 only).
///
/// Checks for UTF-16 BOM markers which are not supported. Returns the number
/// of bytes in the file prefix that was inspected, so an empty file reads as 0.
pub fn validate_encoding(path: &Path) -> Result<usize> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;

    let mut buffer = [0u8; 4];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read >= 2 {
        // UTF-16 LE BOM
        if buffer[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        // UTF-16 BE BOM
        if buffer[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    Ok(bytes_read)
}

/// Reads a CSV file with a single header row. All columns are `String`;
/// empty cells are null.
pub fn read_text_table(path: &Path) -> Result<DataFrame> {
    if validate_encoding(path)? == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    for name in df.get_column_names() {
        if name.trim().is_empty() {
            return Err(IngestError::CsvParse {
                path: path.to_path_buf(),
                message: "header contains an empty column name".to_string(),
            });
        }
    }

    tracing::trace!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read CSV"
    );
    Ok(df)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn test_read_keeps_every_column_as_text() {
        let file = create_temp_csv("zone,planning_year,value\nCASO,2030,12.5\nPJME,2035,\n");
        let df = read_text_table(file.path()).unwrap();

        assert_eq!(df.height(), 2);
        for column in df.get_columns() {
            assert_eq!(column.dtype(), &DataType::String, "{}", column.name());
        }
        let years = df.column("planning_year").unwrap().str().unwrap();
        assert_eq!(years.get(0), Some("2030"));
        let values = df.column("value").unwrap().str().unwrap();
        assert_eq!(values.get(1), None);
    }

    #[test]
    fn test_header_only_file_has_no_rows() {
        let file = create_temp_csv("zone,value\n");
        let df = read_text_table(file.path()).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 2);
    }

    #[test]
    fn test_empty_file_is_rejected() {
        let file = create_temp_csv("");
        let err = read_text_table(file.path()).unwrap_err();
        assert!(matches!(err, IngestError::EmptyCsv { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = read_text_table(Path::new("/nonexistent/generation.csv")).unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }

    #[test]
    fn test_utf16_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xFF, 0xFE, b'a', 0x00]).unwrap();
        let err = validate_encoding(file.path()).unwrap_err();
        assert!(matches!(
            err,
            IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            }
        ));
    }
}

//! Model output ingestion.
//!
//! Every report kind is assembled into one table from all matching files
//! under an explicit input root:
//!
//! - **Discovery**: recursive search by file name, with directory exclusion markers
//! - **CSV Loading**: text-only reads followed by strict casts of numeric columns
//! - **Assembly**: parallel per-file parsing and column-aligned concatenation
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use mc_ingest::{LoadOptions, load_dataset};
//! use mc_model::DatasetKind;
//!
//! let loaded = load_dataset(Path::new("runs"), DatasetKind::Generation, &LoadOptions::default())?;
//! println!("{} rows from {} files", loaded.frame.height(), loaded.files.len());
//! ```

mod csv;
mod discovery;
mod error;
mod loader;
mod schema;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading and Writing ===
pub use csv::{read_text_table, validate_encoding, write_csv};

// === File Discovery ===
pub use discovery::{find_files, model_from_path};

// === Dataset Assembly ===
pub use loader::{LoadOptions, LoadedDataset, concat_aligned, load_dataset, load_file};
pub use schema::{apply_schema, empty_table};

//! Full-year conversion of GenX input folders.

use std::path::{Path, PathBuf};

use mc_ingest::{find_files, read_text_table, write_csv};
use polars::prelude::*;

use crate::error::{Result, TimeSeriesError};
use crate::expander::PeriodExpander;
use crate::layout::RepPeriodLayout;
use crate::period_map::PeriodMap;

pub const PERIOD_MAP_FILE: &str = "Period_map.csv";
pub const LOAD_DATA_FILE: &str = "Load_data.csv";
pub const VARIABILITY_FILE: &str = "Generators_variability.csv";
pub const REPRESENTATIVE_PERIOD_FILE: &str = "Representative_Period.csv";
pub const LOAD_OUTPUT_FILE: &str = "Load_data_full_year.csv";
pub const VARIABILITY_OUTPUT_FILE: &str = "Generators_variability_full_year.csv";

/// What happened to one input folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderOutcome {
    Converted {
        /// Rows in each expanded series.
        hours: usize,
        /// Whether a variability table was expanded alongside the load data.
        variability: bool,
    },
    /// Outputs were already present.
    Skipped,
}

/// The result of converting one folder.
#[derive(Debug)]
pub struct FolderReport {
    pub folder: PathBuf,
    pub result: Result<FolderOutcome>,
}

/// Every directory under `root` that holds a `Period_map.csv`.
pub fn find_period_map_folders(root: &Path) -> Result<Vec<PathBuf>> {
    let maps = find_files(root, PERIOD_MAP_FILE, &[], &[])?;
    Ok(maps
        .into_iter()
        .filter_map(|path| path.parent().map(Path::to_path_buf))
        .collect())
}

fn read_required(folder: &Path, file: &str) -> Result<DataFrame> {
    let path = folder.join(file);
    if !path.is_file() {
        return Err(TimeSeriesError::MissingFile { path });
    }
    Ok(read_text_table(&path)?)
}

fn read_optional(folder: &Path, file: &str) -> Result<Option<DataFrame>> {
    let path = folder.join(file);
    if !path.is_file() {
        return Ok(None);
    }
    Ok(Some(read_text_table(&path)?))
}

/// Writes full-year load and variability tables next to the folder's inputs.
///
/// Existing outputs are left alone unless `overwrite` is set. An unknown
/// representative period or a length mismatch fails the folder without
/// writing anything.
pub fn convert_folder(folder: &Path, overwrite: bool) -> Result<FolderOutcome> {
    let has_variability = folder.join(VARIABILITY_FILE).is_file();
    let outputs_exist = folder.join(LOAD_OUTPUT_FILE).is_file()
        && (!has_variability || folder.join(VARIABILITY_OUTPUT_FILE).is_file());
    if outputs_exist && !overwrite {
        tracing::info!(folder = %folder.display(), "full-year outputs exist; skipping");
        return Ok(FolderOutcome::Skipped);
    }

    let period_map = read_required(folder, PERIOD_MAP_FILE)?;
    let load = read_required(folder, LOAD_DATA_FILE)?;
    let slots = read_optional(folder, REPRESENTATIVE_PERIOD_FILE)?;
    let variability = read_optional(folder, VARIABILITY_FILE)?;

    let layout = RepPeriodLayout::from_load_data(&load, slots.as_ref())?;
    let map = PeriodMap::from_frame(&period_map, slots.is_some())?;
    let expander = PeriodExpander::new(layout, &map)?;

    // Expand everything before writing so a bad table leaves no partial output.
    let mut full_load = expander.expand_load_data(&load)?;
    let mut full_variability = variability
        .as_ref()
        .map(|df| expander.expand("Generators_variability", df))
        .transpose()?;

    write_csv(&mut full_load, &folder.join(LOAD_OUTPUT_FILE))?;
    if let Some(df) = full_variability.as_mut() {
        write_csv(df, &folder.join(VARIABILITY_OUTPUT_FILE))?;
    } else {
        tracing::warn!(folder = %folder.display(), "no {VARIABILITY_FILE}; only load data expanded");
    }

    tracing::info!(
        folder = %folder.display(),
        periods = map.len(),
        timesteps = expander.layout().timesteps(),
        hours = expander.len(),
        "expanded representative periods"
    );
    Ok(FolderOutcome::Converted {
        hours: expander.len(),
        variability: full_variability.is_some(),
    })
}

/// Converts every period-map folder under `root`.
///
/// A failing folder is reported and does not stop the others.
pub fn convert_tree(root: &Path, overwrite: bool) -> Result<Vec<FolderReport>> {
    let folders = find_period_map_folders(root)?;
    if folders.is_empty() {
        tracing::warn!(root = %root.display(), "no {PERIOD_MAP_FILE} found");
    }
    Ok(folders
        .into_iter()
        .map(|folder| {
            let result = convert_folder(&folder, overwrite);
            if let Err(error) = &result {
                tracing::error!(folder = %folder.display(), %error, "conversion failed");
            }
            FolderReport { folder, result }
        })
        .collect())
}

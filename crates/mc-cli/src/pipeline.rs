//! Normalization pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Ingest**: Discover and load every report kind under the input root
//! 2. **Normalize**: Classify, aggregate, and canonicalize each table
//! 3. **Derive**: Additions, generation deltas, capacity factors, baselines
//! 4. **Output**: Write CSV tables and `summary.json`
//!
//! Each stage takes the output of the previous stage and returns typed results.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span};

use mc_ingest::{LoadOptions, LoadedDataset, load_dataset, write_csv};
use mc_model::columns::{AGG_ZONE, CASE, END_VALUE, MODEL, START_VALUE, TECH_TYPE, VALUE, ZONE};
use mc_model::{ComparisonConfig, DatasetKind};
use mc_transform::{
    CapacityFactorCalculator, RegionAggregator, TechnologyClassifier, canonicalize_lines,
    capacity_additions, compute_deltas, densify_dispatch, drop_other, filter_unit,
    normalize_emission_units, split_endpoints, transmission_baseline,
};

use crate::types::{NormalizeResult, TableSummary};

const ZONE_KEYS: [&str; 5] = [MODEL, CASE, AGG_ZONE, ZONE, TECH_TYPE];
const REGION_KEYS: [&str; 4] = [MODEL, CASE, AGG_ZONE, TECH_TYPE];

/// A named table headed for the output directory.
#[derive(Debug, Clone)]
pub struct Table {
    pub name: String,
    pub frame: DataFrame,
    pub source_files: usize,
    pub derived: bool,
}

impl Table {
    fn derived(name: &str, frame: DataFrame) -> Self {
        Self {
            name: name.to_string(),
            frame,
            source_files: 0,
            derived: true,
        }
    }

    fn skipped(name: &str, reason: &str) -> Self {
        info!(table = name, reason, "skipping derived table");
        Self::derived(name, DataFrame::empty())
    }

    pub fn rows(&self) -> usize {
        self.frame.height()
    }

    pub fn file_name(&self) -> String {
        format!("{}.csv", self.name)
    }
}

// ============================================================================
// Stage 1: Ingest
// ============================================================================

/// Every report kind, loaded.
#[derive(Debug)]
pub struct IngestResult {
    pub datasets: BTreeMap<DatasetKind, LoadedDataset>,
}

/// Loads every dataset kind under `root`. A kind without files is empty.
///
/// Nothing below `output_dir` is read, so tables written by an earlier run
/// into a directory inside `root` are not loaded again.
pub fn ingest(
    root: &Path,
    config: &ComparisonConfig,
    output_dir: Option<&Path>,
) -> Result<IngestResult> {
    let span = info_span!("ingest", root = %root.display());
    let _guard = span.enter();

    let options = LoadOptions {
        exclude_dir_markers: config.exclude_dir_markers.clone(),
        exclude_dirs: output_dir.map(Path::to_path_buf).into_iter().collect(),
    };
    let mut datasets = BTreeMap::new();
    for kind in DatasetKind::ALL {
        let loaded = load_dataset(root, kind, &options)
            .with_context(|| format!("load {kind} from {}", root.display()))?;
        datasets.insert(kind, loaded);
    }
    Ok(IngestResult { datasets })
}

// ============================================================================
// Stage 2: Normalize
// ============================================================================

/// Rule tables built once from the configuration.
#[derive(Debug, Clone)]
pub struct Normalizer {
    classifier: TechnologyClassifier,
    regions: RegionAggregator,
    capacity_unit: String,
}

impl Normalizer {
    pub fn from_config(config: &ComparisonConfig) -> Result<Self> {
        Ok(Self {
            classifier: TechnologyClassifier::from_config(config),
            regions: RegionAggregator::from_config(config).context("build region map")?,
            capacity_unit: config.capacity_unit.clone(),
        })
    }

    /// Classifies, drops `Other`, and adds the aggregate region.
    fn resources(&self, df: &DataFrame) -> Result<DataFrame> {
        let classified = self.classifier.annotate(df)?;
        let kept = drop_other(&classified)?;
        Ok(self.regions.annotate(&kept)?)
    }

    /// Applies the transforms that belong to one report kind.
    pub fn normalize(&self, kind: DatasetKind, df: &DataFrame) -> Result<DataFrame> {
        let out = match kind {
            DatasetKind::ResourceCapacity => {
                let in_unit = filter_unit(df, &self.capacity_unit)?;
                capacity_additions(&self.resources(&in_unit)?)?
            }
            DatasetKind::Generation => self.resources(df)?,
            DatasetKind::Dispatch => densify_dispatch(&self.resources(df)?)?,
            DatasetKind::Transmission | DatasetKind::TransmissionExpansion => {
                split_endpoints(&canonicalize_lines(df)?)?
            }
            DatasetKind::Emissions => self.regions.annotate(&normalize_emission_units(df)?)?,
            DatasetKind::OperationalCosts | DatasetKind::NonServedEnergy => df.clone(),
        };
        Ok(out)
    }
}

/// Normalized source tables keyed by kind.
pub fn normalize(
    ingested: IngestResult,
    normalizer: &Normalizer,
) -> Result<BTreeMap<DatasetKind, Table>> {
    let span = info_span!("normalize");
    let _guard = span.enter();

    let mut tables = BTreeMap::new();
    for (kind, loaded) in ingested.datasets {
        let frame = normalizer
            .normalize(kind, &loaded.frame)
            .with_context(|| format!("normalize {kind}"))?;
        debug!(dataset = %kind, rows_in = loaded.frame.height(), rows_out = frame.height(), "normalized");
        tables.insert(
            kind,
            Table {
                name: kind.as_str().to_string(),
                frame,
                source_files: loaded.files.len(),
                derived: false,
            },
        );
    }
    Ok(tables)
}

// ============================================================================
// Stage 3: Derive
// ============================================================================

/// Derived tables, in output order:
/// `capacity_additions_zone`, `capacity_additions_region`,
/// `generation_delta_zone`, `capacity_factor`, `transmission_baseline`.
pub fn derive(
    normalized: &BTreeMap<DatasetKind, Table>,
    config: &ComparisonConfig,
) -> Result<Vec<Table>> {
    let span = info_span!("derive");
    let _guard = span.enter();

    let capacity = non_empty(normalized, DatasetKind::ResourceCapacity);
    let generation = non_empty(normalized, DatasetKind::Generation);
    let transmission = non_empty(normalized, DatasetKind::Transmission);

    let mut derived = Vec::new();
    match capacity {
        Some(capacity) => {
            derived.push(Table::derived(
                "capacity_additions_zone",
                compute_deltas(capacity, &ZONE_KEYS, END_VALUE).context("capacity additions by zone")?,
            ));
            derived.push(Table::derived(
                "capacity_additions_region",
                compute_deltas(capacity, &REGION_KEYS, END_VALUE)
                    .context("capacity additions by region")?,
            ));
        }
        None => {
            derived.push(Table::skipped("capacity_additions_zone", "no capacity rows"));
            derived.push(Table::skipped("capacity_additions_region", "no capacity rows"));
        }
    }

    match generation {
        Some(generation) => {
            derived.push(Table::derived(
                "generation_delta_zone",
                compute_deltas(generation, &ZONE_KEYS, VALUE).context("generation deltas")?,
            ));
            let capacity = normalized
                .get(&DatasetKind::ResourceCapacity)
                .map(|table| &table.frame)
                .context("capacity table missing from normalized set")?;
            derived.push(Table::derived(
                "capacity_factor",
                CapacityFactorCalculator::new(config.hours_per_year)
                    .compute(generation, capacity)
                    .context("capacity factors")?,
            ));
        }
        None => {
            derived.push(Table::skipped("generation_delta_zone", "no generation rows"));
            derived.push(Table::skipped("capacity_factor", "no generation rows"));
        }
    }

    match transmission {
        Some(lines) if lines.get_column_index(START_VALUE).is_some() => {
            derived.push(Table::derived(
                "transmission_baseline",
                transmission_baseline(lines, config.transmission_baseline_year)
                    .context("transmission baseline")?,
            ));
        }
        Some(_) => derived.push(Table::skipped(
            "transmission_baseline",
            "transmission has no start_value column",
        )),
        None => derived.push(Table::skipped("transmission_baseline", "no transmission rows")),
    }

    Ok(derived)
}

fn non_empty(tables: &BTreeMap<DatasetKind, Table>, kind: DatasetKind) -> Option<&DataFrame> {
    tables
        .get(&kind)
        .map(|table| &table.frame)
        .filter(|frame| frame.height() > 0)
}

/// Interleaves normalized and derived tables in output order.
pub fn assemble(mut normalized: BTreeMap<DatasetKind, Table>, derived: Vec<Table>) -> Vec<Table> {
    let mut derived: BTreeMap<String, Table> = derived
        .into_iter()
        .map(|table| (table.name.clone(), table))
        .collect();
    let mut take_source = |kind| normalized.remove(&kind);
    let mut take_derived = |name: &str| derived.remove(name);

    let mut tables = Vec::new();
    tables.extend(take_source(DatasetKind::ResourceCapacity));
    tables.extend(take_derived("capacity_additions_zone"));
    tables.extend(take_derived("capacity_additions_region"));
    tables.extend(take_source(DatasetKind::Generation));
    tables.extend(take_derived("generation_delta_zone"));
    tables.extend(take_derived("capacity_factor"));
    tables.extend(take_source(DatasetKind::Transmission));
    tables.extend(take_derived("transmission_baseline"));
    tables.extend(take_source(DatasetKind::TransmissionExpansion));
    tables.extend(take_source(DatasetKind::Emissions));
    tables.extend(take_source(DatasetKind::Dispatch));
    tables.extend(take_source(DatasetKind::OperationalCosts));
    tables.extend(take_source(DatasetKind::NonServedEnergy));
    tables
}

// ============================================================================
// Stage 4: Output
// ============================================================================

/// Writes every non-empty table into `output_dir` (nothing when `None`).
pub fn output(tables: &mut [Table], output_dir: Option<&Path>) -> Result<Vec<TableSummary>> {
    let span = info_span!("output");
    let _guard = span.enter();

    let mut summaries = Vec::with_capacity(tables.len());
    for table in tables.iter_mut() {
        let written = match output_dir {
            Some(dir) if table.rows() > 0 => {
                let path = dir.join(table.file_name());
                write_csv(&mut table.frame, &path)
                    .with_context(|| format!("write {}", path.display()))?;
                Some(path)
            }
            _ => None,
        };
        summaries.push(TableSummary {
            name: table.name.clone(),
            rows: table.rows(),
            source_files: table.source_files,
            derived: table.derived,
            output: written,
        });
    }
    Ok(summaries)
}

/// Writes the run summary as pretty JSON.
pub fn write_summary_json(result: &NormalizeResult, path: &Path) -> Result<PathBuf> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    serde_json::to_writer_pretty(file, result)
        .with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), "wrote run summary");
    Ok(path.to_path_buf())
}

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use tracing::{info, info_span};

use mc_cli::pipeline::{Normalizer, assemble, derive, ingest, normalize, output, write_summary_json};
use mc_cli::types::{ExpandResult, FolderStatus, FolderSummary, NormalizeResult};
use mc_model::ComparisonConfig;
use mc_timeseries::{FolderOutcome, convert_tree};

use crate::cli::{ConfigArgs, ExpandArgs, NormalizeArgs};
use crate::summary::apply_table_style;

fn load_config(args: &ConfigArgs) -> Result<ComparisonConfig> {
    let config = ComparisonConfig::load_or_default(args.config.as_deref())
        .context("load comparison config")?;
    if let Some(path) = &args.config {
        info!(path = %path.display(), "using config file");
    }
    Ok(config)
}

pub fn run_normalize(args: &NormalizeArgs) -> Result<NormalizeResult> {
    let root = &args.root;
    if !root.is_dir() {
        bail!("input root {} is not a directory", root.display());
    }
    let span = info_span!("normalize_run", root = %root.display());
    let _guard = span.enter();
    let start = Instant::now();

    let config = load_config(&args.config)?;
    let normalizer = Normalizer::from_config(&config)?;

    let target_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| root.join("normalized"));

    let ingested = ingest(root, &config, Some(&target_dir))?;
    let normalized = normalize(ingested, &normalizer)?;
    let derived = derive(&normalized, &config)?;
    let mut tables = assemble(normalized, derived);

    let output_dir: Option<PathBuf> = if args.dry_run {
        None
    } else {
        std::fs::create_dir_all(&target_dir)
            .with_context(|| format!("create output directory {}", target_dir.display()))?;
        Some(target_dir)
    };
    let summaries = output(&mut tables, output_dir.as_deref())?;

    let result = NormalizeResult {
        input_root: root.clone(),
        output_dir,
        tables: summaries,
    };
    if let Some(dir) = &result.output_dir {
        write_summary_json(&result, &dir.join("summary.json"))?;
    }
    info!(
        tables = result.tables.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "normalization complete"
    );
    Ok(result)
}

pub fn run_expand(args: &ExpandArgs) -> Result<ExpandResult> {
    let span = info_span!("expand_run", root = %args.root.display());
    let _guard = span.enter();

    let reports = convert_tree(&args.root, args.overwrite)
        .with_context(|| format!("search {} for period maps", args.root.display()))?;

    let mut has_errors = false;
    let folders = reports
        .into_iter()
        .map(|report| {
            let status = match report.result {
                Ok(FolderOutcome::Converted { hours, variability }) => {
                    FolderStatus::Converted { hours, variability }
                }
                Ok(FolderOutcome::Skipped) => FolderStatus::Skipped,
                Err(error) => {
                    has_errors = true;
                    FolderStatus::Failed(error.to_string())
                }
            };
            FolderSummary {
                folder: report.folder,
                status,
            }
        })
        .collect();

    Ok(ExpandResult {
        root: args.root.clone(),
        folders,
        has_errors,
    })
}

pub fn run_tech_rules(args: &ConfigArgs) -> Result<()> {
    let config = load_config(args)?;
    let mut table = Table::new();
    table.set_header(vec!["Priority", "Pattern", "Category", "Existing fleet"]);
    apply_table_style(&mut table);
    for (index, rule) in config.tech_rules.iter().enumerate() {
        let existing = if config.existing_patterns.contains(&rule.pattern) {
            "yes"
        } else {
            "-"
        };
        table.add_row(vec![
            (index + 1).to_string(),
            rule.pattern.clone(),
            rule.category.clone(),
            existing.to_string(),
        ]);
    }
    println!("{table}");
    println!("Later rules override earlier matches.");
    Ok(())
}

pub fn run_regions(args: &ConfigArgs) -> Result<()> {
    let config = load_config(args)?;
    let map = config.region_map().context("build region map")?;
    let mut table = Table::new();
    table.set_header(vec!["Region", "Zones"]);
    apply_table_style(&mut table);
    for region in map.regions() {
        table.add_row(vec![region.to_string(), map.zones_in(region).join(", ")]);
    }
    println!("{table}");
    Ok(())
}

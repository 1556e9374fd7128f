//! Transmission line identity canonicalization.
//!
//! Models name the same corridor in either direction (`A_to_B` vs `B_to_A`).
//! The minority spelling is flipped so each corridor ends up with one name.

use std::collections::{BTreeMap, BTreeSet};

use mc_common::text_values;
use mc_model::columns::{DEST_REGION, LINE_NAME, LINE_SEPARATOR, MODEL, START_REGION};
use polars::prelude::*;

use crate::error::Result;
use crate::frame::require_columns;

/// Swaps the two endpoints of `A_to_B`. `None` when the name has no separator.
pub fn reverse_line_name(name: &str) -> Option<String> {
    let (start, dest) = name.split_once(LINE_SEPARATOR)?;
    Some(format!("{dest}{LINE_SEPARATOR}{start}"))
}

/// Splits `A_to_B` into its endpoints.
pub fn line_endpoints(name: &str) -> Option<(&str, &str)> {
    name.split_once(LINE_SEPARATOR)
}

/// Median of distinct-model counts; the mean of the two middle values when
/// the count is even.
fn median(counts: &[usize]) -> Option<f64> {
    if counts.is_empty() {
        return None;
    }
    let mut sorted = counts.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    Some(if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
    } else {
        sorted[mid] as f64
    })
}

/// Decides which literal line names are rewritten.
///
/// Each name is scored by how many distinct models report it. Names scoring
/// strictly below the median across names are mapped to their reversed
/// spelling; names at or above the median are kept.
pub fn plan_reversals<'a>(
    rows: impl IntoIterator<Item = (&'a str, Option<&'a str>)>,
) -> BTreeMap<String, String> {
    let mut models_by_name: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for (name, model) in rows {
        let models = models_by_name.entry(name).or_default();
        if let Some(model) = model {
            models.insert(model);
        }
    }

    let counts: Vec<usize> = models_by_name.values().map(BTreeSet::len).collect();
    let Some(threshold) = median(&counts) else {
        return BTreeMap::new();
    };

    let mut plan = BTreeMap::new();
    for (name, models) in &models_by_name {
        if (models.len() as f64) >= threshold {
            continue;
        }
        match reverse_line_name(name) {
            Some(reversed) => {
                plan.insert((*name).to_string(), reversed);
            }
            None => {
                tracing::warn!(line_name = %name, "line name has no '_to_' separator; left as is");
            }
        }
    }
    plan
}

/// Rewrites minority line spellings so one corridor has one name.
///
/// Only exact literal matches are rewritten; null names stay null.
pub fn canonicalize_lines(df: &DataFrame) -> Result<DataFrame> {
    require_columns(df, "canonicalize_lines", &[LINE_NAME, MODEL])?;
    let names = text_values(df, LINE_NAME)?;
    let models = text_values(df, MODEL)?;

    let plan = plan_reversals(
        names
            .iter()
            .zip(&models)
            .filter_map(|(name, model)| Some((name.as_deref()?, model.as_deref()))),
    );
    if plan.is_empty() {
        return Ok(df.clone());
    }
    for (from, to) in &plan {
        tracing::debug!(from = %from, to = %to, "reversing line name");
    }

    let canonical: Vec<Option<&str>> = names
        .iter()
        .map(|name| {
            name.as_deref()
                .map(|name| plan.get(name).map_or(name, String::as_str))
        })
        .collect();

    let mut out = df.clone();
    out.with_column(Series::new(LINE_NAME.into(), canonical))?;
    tracing::info!(reversed = plan.len(), "canonicalized line names");
    Ok(out)
}

/// Adds `start_region` and `dest_region` from `line_name`.
pub fn split_endpoints(df: &DataFrame) -> Result<DataFrame> {
    require_columns(df, "split_endpoints", &[LINE_NAME])?;
    let names = text_values(df, LINE_NAME)?;

    let endpoints: Vec<Option<(&str, &str)>> = names
        .iter()
        .map(|name| line_endpoints(name.as_deref()?))
        .collect();
    let starts: Vec<Option<&str>> = endpoints.iter().map(|e| e.map(|(s, _)| s)).collect();
    let dests: Vec<Option<&str>> = endpoints.iter().map(|e| e.map(|(_, d)| d)).collect();

    let mut out = df.clone();
    out.with_column(Series::new(START_REGION.into(), starts))?;
    out.with_column(Series::new(DEST_REGION.into(), dests))?;
    Ok(out)
}

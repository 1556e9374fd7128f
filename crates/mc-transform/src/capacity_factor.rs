//! Capacity factors from generation and installed capacity.

use std::collections::BTreeMap;

use mc_common::{float_column, float_values, has_column};
use mc_model::columns::{
    CAPACITY, CAPACITY_FACTOR, CASE, END_VALUE, GENERATION, MODEL, PLANNING_YEAR, RESOURCE_NAME,
    TECH_TYPE, VALUE,
};
use polars::prelude::*;

use crate::error::{Result, TransformError};
use crate::frame::{GroupKey, require_columns, row_keys, take_rows};

const DEFAULT_KEYS: [&str; 4] = [TECH_TYPE, RESOURCE_NAME, MODEL, PLANNING_YEAR];

/// Joins generation (MWh, `value`) with capacity (MW, `end_value`).
#[derive(Debug, Clone)]
pub struct CapacityFactorCalculator {
    keys: Option<Vec<String>>,
    hours: f64,
}

impl Default for CapacityFactorCalculator {
    fn default() -> Self {
        Self {
            keys: None,
            hours: 8760.0,
        }
    }
}

impl CapacityFactorCalculator {
    pub fn new(hours: f64) -> Self {
        Self { keys: None, hours }
    }

    /// Replaces the default join keys.
    pub fn with_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Join keys for this pair of tables. `case` joins the defaults when both
    /// tables carry it.
    pub fn join_keys(&self, generation: &DataFrame, capacity: &DataFrame) -> Vec<String> {
        if let Some(keys) = &self.keys {
            return keys.clone();
        }
        let mut keys: Vec<String> = DEFAULT_KEYS.iter().map(|k| (*k).to_string()).collect();
        if has_column(generation, CASE) && has_column(capacity, CASE) {
            keys.push(CASE.to_string());
        }
        keys
    }

    /// `generation / (capacity * hours)` per key group, clamped to at most 1.
    ///
    /// Every generation group yields a row. Groups without capacity, or with
    /// capacity of zero or less, get a capacity factor of 0.
    pub fn compute(&self, generation: &DataFrame, capacity: &DataFrame) -> Result<DataFrame> {
        let keys = self.join_keys(generation, capacity);
        if keys.is_empty() {
            return Err(TransformError::EmptyKeys {
                operation: "capacity_factor",
            });
        }
        let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
        require_columns(generation, "capacity_factor", &keys)?;
        require_columns(generation, "capacity_factor", &[VALUE])?;
        require_columns(capacity, "capacity_factor", &keys)?;
        require_columns(capacity, "capacity_factor", &[END_VALUE])?;

        let mut generated: BTreeMap<GroupKey, (f64, usize)> = BTreeMap::new();
        let gen_values = float_values(generation, VALUE)?;
        for (row, key) in row_keys(generation, &keys)?.into_iter().enumerate() {
            let entry = generated.entry(key).or_insert((0.0, row));
            entry.0 += gen_values[row].unwrap_or(0.0);
        }

        let mut installed: BTreeMap<GroupKey, f64> = BTreeMap::new();
        let cap_values = float_values(capacity, END_VALUE)?;
        for (row, key) in row_keys(capacity, &keys)?.into_iter().enumerate() {
            *installed.entry(key).or_insert(0.0) += cap_values[row].unwrap_or(0.0);
        }

        let mut rows = Vec::with_capacity(generated.len());
        let mut gen_out = Vec::with_capacity(generated.len());
        let mut cap_out = Vec::with_capacity(generated.len());
        let mut cf_out = Vec::with_capacity(generated.len());
        let mut missing = 0usize;
        for (key, (energy, row)) in &generated {
            let cap = installed.get(key).copied().unwrap_or_else(|| {
                missing += 1;
                0.0
            });
            rows.push(*row);
            gen_out.push(Some(*energy));
            cap_out.push(Some(cap));
            cf_out.push(Some(capacity_factor(*energy, cap, self.hours)));
        }
        if missing > 0 {
            tracing::debug!(groups = missing, "generation without matching capacity");
        }

        let mut out = take_rows(generation, &keys, &rows)?;
        out.with_column(float_column(GENERATION, gen_out))?;
        out.with_column(float_column(CAPACITY, cap_out))?;
        out.with_column(float_column(CAPACITY_FACTOR, cf_out))?;
        Ok(out)
    }
}

/// Capacity factor of one group; 0 for non-positive capacity, at most 1.
pub fn capacity_factor(generation: f64, capacity: f64, hours: f64) -> f64 {
    let available = capacity * hours;
    if available <= 0.0 || !available.is_finite() {
        return 0.0;
    }
    (generation / available).min(1.0)
}

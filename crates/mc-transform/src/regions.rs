//! Detailed zone to aggregate region annotation.

use std::collections::BTreeSet;

use mc_common::text_values;
use mc_model::columns::{AGG_ZONE, ZONE};
use mc_model::{ComparisonConfig, RegionMap};
use polars::prelude::*;

use crate::error::Result;
use crate::frame::require_columns;

#[derive(Debug, Clone)]
pub struct RegionAggregator {
    map: RegionMap,
}

impl RegionAggregator {
    pub fn new(map: RegionMap) -> Self {
        Self { map }
    }

    pub fn from_config(config: &ComparisonConfig) -> mc_model::Result<Self> {
        Ok(Self::new(config.region_map()?))
    }

    pub fn region_for(&self, zone: &str) -> Option<&str> {
        self.map.region_for(zone)
    }

    /// Adds `agg_zone` from `zone`. Unmapped zones get a null region.
    pub fn annotate(&self, df: &DataFrame) -> Result<DataFrame> {
        require_columns(df, "aggregate_regions", &[ZONE])?;
        let zones = text_values(df, ZONE)?;

        let mut unmapped = BTreeSet::new();
        let regions: Vec<Option<&str>> = zones
            .iter()
            .map(|zone| {
                let zone = zone.as_deref()?;
                let region = self.map.region_for(zone);
                if region.is_none() {
                    unmapped.insert(zone);
                }
                region
            })
            .collect();
        if !unmapped.is_empty() {
            tracing::warn!(zones = ?unmapped, "zones without a region mapping");
        }

        let mut out = df.clone();
        out.with_column(Series::new(AGG_ZONE.into(), regions))?;
        Ok(out)
    }
}

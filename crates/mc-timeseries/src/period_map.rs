//! Calendar period to representative period assignment.

use mc_model::columns::{PERIOD_INDEX, REP_PERIOD, REP_PERIOD_INDEX};
use polars::prelude::*;

use crate::error::Result;
use crate::layout::integer_column;

/// Representative period id for each calendar period, in calendar order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodMap {
    ids: Vec<i64>,
}

impl PeriodMap {
    pub fn new(ids: Vec<i64>) -> Self {
        Self { ids }
    }

    /// Reads a `Period_map.csv` table.
    ///
    /// With slot ids the map is keyed by `Rep_Period`; with positional blocks
    /// `Rep_Period_Index` is preferred when present. Rows are put in calendar
    /// order by `Period_Index` when that column exists.
    pub fn from_frame(df: &DataFrame, slot_ids: bool) -> Result<Self> {
        let key = if !slot_ids && df.get_column_index(REP_PERIOD_INDEX).is_some() {
            REP_PERIOD_INDEX
        } else {
            REP_PERIOD
        };
        let ids = integer_column(df, "Period_map", key)?;

        if df.get_column_index(PERIOD_INDEX).is_none() {
            return Ok(Self::new(ids));
        }
        let order = integer_column(df, "Period_map", PERIOD_INDEX)?;
        let mut rows: Vec<(i64, i64)> = order.into_iter().zip(ids).collect();
        rows.sort_by_key(|(calendar, _)| *calendar);
        Ok(Self::new(rows.into_iter().map(|(_, id)| id).collect()))
    }

    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

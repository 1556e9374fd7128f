//! Representative-period layout of the reduced time series.

use std::collections::BTreeMap;

use mc_common::{parse_f64, parse_i64, text_values};
use mc_model::columns::{REP_PERIODS, SLOT, TIMESTEPS_PER_REP_PERIOD};
use polars::prelude::*;

use crate::error::{Result, TimeSeriesError};

/// Parses an integer cell, accepting whole floats such as `168.0`.
pub(crate) fn parse_integer(value: &str) -> Option<i64> {
    parse_i64(value).or_else(|| {
        let float = parse_f64(value)?;
        (float.fract() == 0.0 && float.is_finite()).then_some(float as i64)
    })
}

/// Every cell of `column` as an integer; nulls and non-integers fail.
pub(crate) fn integer_column(df: &DataFrame, table: &'static str, column: &str) -> Result<Vec<i64>> {
    if df.get_column_index(column).is_none() {
        return Err(TimeSeriesError::MissingColumn {
            table,
            column: column.to_string(),
        });
    }
    text_values(df, column)?
        .into_iter()
        .map(|value| {
            value
                .as_deref()
                .and_then(parse_integer)
                .ok_or_else(|| TimeSeriesError::InvalidInteger {
                    table,
                    column: column.to_string(),
                    value: value.clone(),
                })
        })
        .collect()
}

fn first_integer(df: &DataFrame, table: &'static str, column: &str) -> Result<i64> {
    if df.get_column_index(column).is_none() {
        return Err(TimeSeriesError::MissingColumn {
            table,
            column: column.to_string(),
        });
    }
    let value = text_values(df, column)?.into_iter().next().flatten();
    value
        .as_deref()
        .and_then(parse_integer)
        .ok_or_else(|| TimeSeriesError::InvalidInteger {
            table,
            column: column.to_string(),
            value,
        })
}

fn positive(value: i64, table: &'static str, column: &str) -> Result<usize> {
    usize::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| TimeSeriesError::InvalidInteger {
            table,
            column: column.to_string(),
            value: Some(value.to_string()),
        })
}

/// Numeric id of a slot label such as `p5`.
pub fn parse_slot(slot: &str) -> Result<i64> {
    let digits = slot
        .trim()
        .trim_start_matches(|c: char| c.is_ascii_alphabetic());
    parse_i64(digits).ok_or_else(|| TimeSeriesError::InvalidSlot {
        slot: slot.to_string(),
    })
}

/// How the reduced series is cut into representative blocks.
///
/// Block `k` covers rows `k * timesteps .. (k + 1) * timesteps` and carries
/// id `block_ids[k]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepPeriodLayout {
    timesteps: usize,
    block_ids: Vec<i64>,
    block_of_id: BTreeMap<i64, usize>,
}

impl RepPeriodLayout {
    /// Fails with [`TimeSeriesError::DuplicateSlot`] when an id repeats.
    pub fn new(timesteps: usize, block_ids: Vec<i64>) -> Result<Self> {
        let mut block_of_id = BTreeMap::new();
        for (block, id) in block_ids.iter().enumerate() {
            if block_of_id.insert(*id, block).is_some() {
                return Err(TimeSeriesError::DuplicateSlot { id: *id });
            }
        }
        Ok(Self {
            timesteps,
            block_ids,
            block_of_id,
        })
    }

    /// Blocks numbered `1..=periods` in file order.
    pub fn positional(timesteps: usize, periods: usize) -> Self {
        let block_ids: Vec<i64> = (1..=periods as i64).collect();
        let block_of_id = block_ids
            .iter()
            .enumerate()
            .map(|(block, id)| (*id, block))
            .collect();
        Self {
            timesteps,
            block_ids,
            block_of_id,
        }
    }

    /// Reads `Timesteps_per_Rep_Period` and `Rep_Periods` from the first row
    /// of the load data. Block ids come from the `slot` column of `slots`
    /// when given, otherwise they are positional.
    pub fn from_load_data(load: &DataFrame, slots: Option<&DataFrame>) -> Result<Self> {
        let timesteps = positive(
            first_integer(load, "Load_data", TIMESTEPS_PER_REP_PERIOD)?,
            "Load_data",
            TIMESTEPS_PER_REP_PERIOD,
        )?;
        let periods = positive(
            first_integer(load, "Load_data", REP_PERIODS)?,
            "Load_data",
            REP_PERIODS,
        )?;

        let Some(slots) = slots else {
            return Ok(Self::positional(timesteps, periods));
        };
        if slots.get_column_index(SLOT).is_none() {
            return Err(TimeSeriesError::MissingColumn {
                table: "Representative_Period",
                column: SLOT.to_string(),
            });
        }
        let ids = text_values(slots, SLOT)?
            .into_iter()
            .map(|slot| parse_slot(slot.as_deref().unwrap_or_default()))
            .collect::<Result<Vec<_>>>()?;
        if ids.len() != periods {
            return Err(TimeSeriesError::SlotCountMismatch {
                expected: periods,
                actual: ids.len(),
            });
        }
        Self::new(timesteps, ids)
    }

    pub fn timesteps(&self) -> usize {
        self.timesteps
    }

    pub fn periods(&self) -> usize {
        self.block_ids.len()
    }

    pub fn block_ids(&self) -> &[i64] {
        &self.block_ids
    }

    /// Rows a reduced series must have.
    pub fn rows(&self) -> usize {
        self.timesteps * self.periods()
    }

    /// Block position of a representative period id.
    pub fn block_of(&self, id: i64) -> Option<usize> {
        self.block_of_id.get(&id).copied()
    }

    /// Fails unless `height` equals `timesteps x periods`.
    pub fn check_height(&self, table: &'static str, height: usize) -> Result<()> {
        if height != self.rows() {
            return Err(TimeSeriesError::LengthMismatch {
                table,
                timesteps: self.timesteps,
                periods: self.periods(),
                expected: self.rows(),
                actual: height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_df(timesteps: &str, periods: &str) -> DataFrame {
        df! {
            "Voll" => [Some("50000"), None],
            REP_PERIODS => [Some(periods), None],
            TIMESTEPS_PER_REP_PERIOD => [Some(timesteps), None],
            "Time_Index" => ["1", "2"],
        }
        .unwrap()
    }

    #[test]
    fn test_parse_slot() {
        assert_eq!(parse_slot("p5").unwrap(), 5);
        assert_eq!(parse_slot("p12").unwrap(), 12);
        assert_eq!(parse_slot("7").unwrap(), 7);
        assert!(matches!(
            parse_slot("peak"),
            Err(TimeSeriesError::InvalidSlot { .. })
        ));
    }

    #[test]
    fn test_parse_integer_accepts_whole_floats() {
        assert_eq!(parse_integer("168"), Some(168));
        assert_eq!(parse_integer("168.0"), Some(168));
        assert_eq!(parse_integer("1.5"), None);
    }

    #[test]
    fn test_positional_layout() {
        let layout = RepPeriodLayout::from_load_data(&load_df("168", "10"), None).unwrap();
        assert_eq!(layout.timesteps(), 168);
        assert_eq!(layout.periods(), 10);
        assert_eq!(layout.rows(), 1680);
        assert_eq!(layout.block_of(1), Some(0));
        assert_eq!(layout.block_of(10), Some(9));
        assert_eq!(layout.block_of(11), None);
    }

    #[test]
    fn test_slot_ids() {
        let slots = df! { SLOT => ["p4", "p9"] }.unwrap();
        let layout = RepPeriodLayout::from_load_data(&load_df("1", "2"), Some(&slots)).unwrap();
        assert_eq!(layout.block_ids(), &[4, 9]);
        assert_eq!(layout.block_of(9), Some(1));
    }

    #[test]
    fn test_slot_count_must_match_periods() {
        let slots = df! { SLOT => ["p4"] }.unwrap();
        let err = RepPeriodLayout::from_load_data(&load_df("1", "2"), Some(&slots)).unwrap_err();
        assert!(matches!(
            err,
            TimeSeriesError::SlotCountMismatch {
                expected: 2,
                actual: 1
            }
        ));
        assert_eq!(
            err.to_string(),
            "Representative_Period lists 1 slots but Rep_Periods is 2"
        );
    }

    #[test]
    fn test_duplicate_slot() {
        let err = RepPeriodLayout::new(24, vec![3, 5, 3]).unwrap_err();
        assert!(matches!(err, TimeSeriesError::DuplicateSlot { id: 3 }));
    }

    #[test]
    fn test_missing_timesteps_value() {
        let err = RepPeriodLayout::from_load_data(&load_df("", "2"), None).unwrap_err();
        assert!(matches!(err, TimeSeriesError::InvalidInteger { .. }));
    }

    #[test]
    fn test_zero_timesteps_rejected() {
        let err = RepPeriodLayout::from_load_data(&load_df("0", "2"), None).unwrap_err();
        assert!(matches!(err, TimeSeriesError::InvalidInteger { .. }));
    }
}

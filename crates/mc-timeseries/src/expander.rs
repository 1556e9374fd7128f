//! Representative-period expansion.

use mc_model::columns::TIME_INDEX;
use polars::prelude::*;

use crate::error::{Result, TimeSeriesError};
use crate::layout::RepPeriodLayout;
use crate::period_map::PeriodMap;

/// Rebuilds a full-year series from representative blocks.
///
/// Each period map entry, in calendar order, contributes a copy of its
/// representative block's rows. `Time_Index` is renumbered from 1.
#[derive(Debug, Clone)]
pub struct PeriodExpander {
    layout: RepPeriodLayout,
    /// Source row for each output row.
    selection: Vec<usize>,
}

impl PeriodExpander {
    /// Fails with [`TimeSeriesError::UnknownRepPeriod`] when the map names a
    /// period the layout does not have.
    pub fn new(layout: RepPeriodLayout, map: &PeriodMap) -> Result<Self> {
        let timesteps = layout.timesteps();
        let mut selection = Vec::with_capacity(map.len() * timesteps);
        for &id in map.ids() {
            let block = layout
                .block_of(id)
                .ok_or(TimeSeriesError::UnknownRepPeriod { id })?;
            let start = block * timesteps;
            selection.extend(start..start + timesteps);
        }
        Ok(Self { layout, selection })
    }

    pub fn layout(&self) -> &RepPeriodLayout {
        &self.layout
    }

    /// Length of every expanded series.
    pub fn len(&self) -> usize {
        self.selection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    /// Expands a series whose rows are all time-indexed.
    pub fn expand(&self, table: &'static str, series: &DataFrame) -> Result<DataFrame> {
        self.layout.check_height(table, series.height())?;
        let rows: Vec<Option<usize>> = self.selection.iter().copied().map(Some).collect();
        let mut out = gather(series, &rows)?;
        renumber_time_index(&mut out)?;
        Ok(out)
    }

    /// Expands load data, whose leading columns are not time-indexed.
    ///
    /// Columns before `Time_Index` hold scalar settings on their first rows;
    /// they are carried row for row and are null past the input height.
    /// `Time_Index` and the columns after it are expanded. The output always
    /// has exactly [`Self::len`] rows; settings that would not fit fail with
    /// [`TimeSeriesError::SettingsOverflow`].
    pub fn expand_load_data(&self, load: &DataFrame) -> Result<DataFrame> {
        let Some(split) = load.get_column_index(TIME_INDEX) else {
            return Err(TimeSeriesError::MissingColumn {
                table: "Load_data",
                column: TIME_INDEX.to_string(),
            });
        };
        self.layout.check_height("Load_data", load.height())?;

        let names: Vec<PlSmallStr> = load.get_column_names_owned();
        let (settings, series) = names.split_at(split);
        let height = self.len();

        let expanded: Vec<Option<usize>> = self.selection.iter().copied().map(Some).collect();
        let mut series = gather(&load.select(series.iter().cloned())?, &expanded)?;
        renumber_time_index(&mut series)?;
        if settings.is_empty() {
            return Ok(series);
        }

        let settings = load.select(settings.iter().cloned())?;
        let used = settings_rows(&settings);
        if used > height {
            return Err(TimeSeriesError::SettingsOverflow {
                rows: used,
                available: height,
            });
        }
        let carried: Vec<Option<usize>> = (0..height)
            .map(|row| (row < load.height()).then_some(row))
            .collect();
        let settings = gather(&settings, &carried)?;
        Ok(settings.hstack(series.get_columns())?)
    }
}

/// Rows up to and including the last non-null settings cell.
fn settings_rows(settings: &DataFrame) -> usize {
    let mut used = 0;
    for column in settings.get_columns() {
        let present: Vec<bool> = column
            .is_not_null()
            .into_iter()
            .map(|value| value == Some(true))
            .collect();
        if let Some(last) = present.iter().rposition(|&value| value) {
            used = used.max(last + 1);
        }
    }
    used
}

/// Output row `i` is source row `rows[i]`, or all nulls for `None`.
fn gather(df: &DataFrame, rows: &[Option<usize>]) -> Result<DataFrame> {
    let indices: Vec<Option<IdxSize>> = rows
        .iter()
        .map(|row| row.map(|r| r as IdxSize))
        .collect();
    let indices = IdxCa::new("idx".into(), indices);
    Ok(df.take(&indices)?)
}

/// Sets `Time_Index` to `1..=height`.
fn renumber_time_index(df: &mut DataFrame) -> Result<()> {
    if df.get_column_index(TIME_INDEX).is_none() {
        return Ok(());
    }
    let index: Vec<i64> = (1..=df.height() as i64).collect();
    df.with_column(Series::new(TIME_INDEX.into(), index))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expander(timesteps: usize, periods: usize, map: &[i64]) -> PeriodExpander {
        PeriodExpander::new(
            RepPeriodLayout::positional(timesteps, periods),
            &PeriodMap::new(map.to_vec()),
        )
        .unwrap()
    }

    fn strings(df: &DataFrame, name: &str) -> Vec<Option<String>> {
        df.column(name)
            .unwrap()
            .cast(&DataType::String)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect()
    }

    #[test]
    fn test_expand_repeats_blocks_in_map_order() {
        let series = df! {
            TIME_INDEX => ["1", "2", "3", "4"],
            "value" => ["a", "b", "c", "d"],
        }
        .unwrap();

        let out = expander(2, 2, &[1, 2, 1]).expand("series", &series).unwrap();

        assert_eq!(out.height(), 6);
        let values: Vec<Option<String>> = strings(&out, "value");
        let expected: Vec<Option<String>> = ["a", "b", "c", "d", "a", "b"]
            .iter()
            .map(|v| Some((*v).to_string()))
            .collect();
        assert_eq!(values, expected);
        let index = out.column(TIME_INDEX).unwrap().i64().unwrap();
        assert_eq!(
            index.into_iter().collect::<Vec<_>>(),
            (1..=6).map(Some).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_unknown_rep_period() {
        let err = PeriodExpander::new(
            RepPeriodLayout::positional(2, 2),
            &PeriodMap::new(vec![1, 3]),
        )
        .unwrap_err();
        assert!(matches!(err, TimeSeriesError::UnknownRepPeriod { id: 3 }));
    }

    #[test]
    fn test_length_mismatch() {
        let series = df! { "value" => ["a", "b", "c"] }.unwrap();
        let err = expander(2, 2, &[1]).expand("series", &series).unwrap_err();
        assert!(matches!(
            err,
            TimeSeriesError::LengthMismatch {
                expected: 4,
                actual: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_load_data_settings_are_carried() {
        let load = df! {
            "Voll" => [Some("50000"), None],
            "Sub_Weights" => [Some("4380"), Some("4380")],
            TIME_INDEX => ["1", "2"],
            "Load_MW_z1" => ["10", "20"],
        }
        .unwrap();

        let out = expander(1, 2, &[2, 2, 1]).expand_load_data(&load).unwrap();

        assert_eq!(out.height(), 3);
        assert_eq!(
            strings(&out, "Voll"),
            vec![Some("50000".to_string()), None, None]
        );
        assert_eq!(
            strings(&out, "Sub_Weights"),
            vec![Some("4380".to_string()), Some("4380".to_string()), None]
        );
        assert_eq!(
            strings(&out, "Load_MW_z1"),
            vec![Some("20".to_string()), Some("20".to_string()), Some("10".to_string())]
        );
        let names: Vec<String> = out
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(names, vec!["Voll", "Sub_Weights", TIME_INDEX, "Load_MW_z1"]);
    }

    #[test]
    fn test_load_data_is_trimmed_to_the_map() {
        let load = df! {
            "Voll" => [Some("50000"), None, None, None],
            TIME_INDEX => ["1", "2", "3", "4"],
            "Load_MW_z1" => ["10", "20", "30", "40"],
        }
        .unwrap();

        let out = expander(2, 2, &[1]).expand_load_data(&load).unwrap();

        assert_eq!(out.height(), 2);
        assert_eq!(strings(&out, "Voll"), vec![Some("50000".to_string()), None]);
        let index = out.column(TIME_INDEX).unwrap().i64().unwrap();
        assert_eq!(index.into_iter().collect::<Vec<_>>(), vec![Some(1), Some(2)]);
    }

    #[test]
    fn test_load_data_settings_past_the_output_fail() {
        let load = df! {
            "Voll" => [Some("50000"), None, Some("1"), None],
            TIME_INDEX => ["1", "2", "3", "4"],
            "Load_MW_z1" => ["10", "20", "30", "40"],
        }
        .unwrap();

        let err = expander(2, 2, &[2]).expand_load_data(&load).unwrap_err();

        assert!(matches!(
            err,
            TimeSeriesError::SettingsOverflow {
                rows: 3,
                available: 2
            }
        ));
    }

    #[test]
    fn test_load_data_requires_time_index() {
        let load = df! { "Voll" => ["1"] }.unwrap();
        let err = expander(1, 1, &[1]).expand_load_data(&load).unwrap_err();
        assert!(matches!(err, TimeSeriesError::MissingColumn { .. }));
    }
}

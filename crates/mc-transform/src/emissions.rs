//! Emission unit normalization.

use mc_common::{float_values, text_values};
use mc_model::columns::{UNIT, VALUE};
use polars::prelude::*;

use crate::error::Result;
use crate::frame::require_columns;

pub const KILOGRAM: &str = "kg";
pub const TONNE: &str = "tonne";

/// Converts rows reported in kilograms to tonnes and relabels their unit.
///
/// Other units pass through unchanged.
pub fn normalize_emission_units(df: &DataFrame) -> Result<DataFrame> {
    require_columns(df, "normalize_emission_units", &[UNIT, VALUE])?;
    let units = text_values(df, UNIT)?;
    let values = float_values(df, VALUE)?;

    let mut converted = 0usize;
    let mut new_units = Vec::with_capacity(units.len());
    let mut new_values = Vec::with_capacity(values.len());
    for (unit, value) in units.into_iter().zip(values) {
        if unit
            .as_deref()
            .is_some_and(|u| u.eq_ignore_ascii_case(KILOGRAM))
        {
            converted += 1;
            new_units.push(Some(TONNE.to_string()));
            new_values.push(value.map(|v| v / 1000.0));
        } else {
            new_units.push(unit);
            new_values.push(value);
        }
    }

    let mut out = df.clone();
    out.with_column(Series::new(UNIT.into(), new_units))?;
    out.with_column(Series::new(VALUE.into(), new_values))?;
    tracing::debug!(rows = converted, "converted emissions from kg to tonne");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kg_becomes_tonne() {
        let df = df! {
            UNIT => ["kg", "tonne", "KG"],
            VALUE => [Some(2500.0), Some(3.0), None],
        }
        .unwrap();
        let out = normalize_emission_units(&df).unwrap();

        let units = out.column(UNIT).unwrap().str().unwrap();
        let values = out.column(VALUE).unwrap().f64().unwrap();
        assert_eq!(units.get(0), Some(TONNE));
        assert_eq!(values.get(0), Some(2.5));
        assert_eq!(values.get(1), Some(3.0));
        assert_eq!(units.get(2), Some(TONNE));
        assert_eq!(values.get(2), None);
    }
}

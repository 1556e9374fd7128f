//! Shared utilities for the model comparison crates.
//!
//! This crate provides the Polars helpers every other crate leans on:
//! scalar conversions and whole-column extraction into plain Rust vectors.

pub mod polars;

pub use self::polars::{
    any_to_f64, any_to_string, column_names, float_column, float_values, format_numeric,
    has_column, int_column, int_values, parse_f64, parse_i64, text_column, text_values,
};

//! Library components of the model comparison CLI.

pub mod logging;
pub mod pipeline;
pub mod types;

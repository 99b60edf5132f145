//! Results transformer for decoded HY3 meets
//!
//! Projects the entity graph into polars frames and applies a fixed
//! post-processing pipeline.
//!
//! # Architecture
//!
//! - [`table`] - Flattens results into string-typed frames
//! - [`enrichment`] - Stroke names and meet columns
//! - [`normalization`] - Time strings to seconds, display columns
//! - [`ranking`] - Seed ranks within each event
//! - [`pipeline`] - Stage ordering and export column order
//!
//! # Processing Pipeline
//!
//! 1. **Stroke names**: `stroke` from `stroke_code`
//! 2. **Time normalization**: raw times to Float64 seconds, sentinels to null
//! 3. **Seed ranks**: competition ranking of seed times per event
//! 4. **Export shape**: meet columns and column order
//!
//! Ranking requires numeric seed times. Running it on raw time strings fails
//! with [`Error::RankPrecondition`](crate::Error::RankPrecondition).
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use hy3_processor::app::services::hy3_parser::Hy3File;
//! use hy3_processor::config::ParseConfig;
//!
//! # fn example() -> hy3_processor::Result<()> {
//! let file = Hy3File::open("meet.hy3", ParseConfig::default())?;
//! let results = file.individual_results_table()?;
//! println!("{}", results.head(Some(5)));
//! # Ok(())
//! # }
//! ```

pub mod enrichment;
pub mod normalization;
pub mod pipeline;
pub mod ranking;
pub mod table;

#[cfg(test)]
pub mod tests;

use polars::prelude::{Column, DataFrame, DataType};

use crate::error::{Error, Result};

// Re-export main types for easy access
pub use pipeline::{ResultsPipeline, individual_results_table, relay_results_table};
pub use ranking::compute_seed_ranks;
pub use table::{individual_results_frame, relay_results_frame};

/// Whether a frame has a column with this name
pub(crate) fn has_column(df: &DataFrame, name: &str) -> bool {
    df.column(name).is_ok()
}

/// A column by name, or [`Error::ColumnNotFound`]
pub(crate) fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name).map_err(|_| Error::column_not_found(name))
}

/// Numeric dtypes accepted for time values and seed ranking
pub(crate) fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt32
            | DataType::UInt64
    )
}

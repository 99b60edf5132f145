//! Time normalization
//!
//! Converts raw time strings to Float64 seconds through the time codec and
//! derives the formatted display columns from the numeric values.

use polars::prelude::*;
use tracing::debug;

use super::{has_column, is_numeric_dtype, require_column};
use crate::Result;
use crate::app::services::time_codec;
use crate::constants::{DISPLAY_PREFIX, columns, is_time_sentinel};

/// Convert each present time column from strings to Float64 seconds.
/// Blank values and sentinels become null; a malformed value is an error
/// carrying its column and row.
///
/// # Arguments
///
/// * `df` - Frame whose time columns are replaced in place
/// * `time_columns` - Columns to convert; absent ones are skipped
///
/// # Returns
///
/// `Ok(())` when every present column converted, or `Error::TimeParse` for
/// the first value that is neither a time, a sentinel nor blank
pub fn normalize_times(df: &mut DataFrame, time_columns: &[&str]) -> Result<()> {
    for &name in time_columns {
        if !has_column(df, name) {
            continue;
        }
        let column = require_column(df, name)?;
        if is_numeric_dtype(column.dtype()) {
            debug!("Column {} is already numeric", name);
            continue;
        }

        let raw = column.cast(&DataType::String)?;
        let seconds = raw
            .str()?
            .into_iter()
            .enumerate()
            .map(|(row, value)| match value {
                Some(value) => time_codec::parse(value).map_err(|e| e.at_cell(name, row)),
                None => Ok(None),
            })
            .collect::<Result<Vec<Option<f64>>>>()?;

        df.with_column(Column::new(name.into(), seconds))?;
    }
    Ok(())
}

/// Null the `time` of rows whose time code marks the swim as not counting
/// (DQ, NS, SCR, ...)
pub fn apply_time_codes(df: &mut DataFrame) -> Result<()> {
    if !has_column(df, columns::TIME) || !has_column(df, columns::TIME_CODE) {
        return Ok(());
    }

    let codes = require_column(df, columns::TIME_CODE)?.cast(&DataType::String)?;
    let times = require_column(df, columns::TIME)?.cast(&DataType::Float64)?;

    let mut cleared = 0usize;
    let masked: Vec<Option<f64>> = codes
        .str()?
        .into_iter()
        .zip(times.f64()?.into_iter())
        .map(|(code, time)| match code {
            Some(code) if is_time_sentinel(code) => {
                cleared += usize::from(time.is_some());
                None
            }
            _ => time,
        })
        .collect();

    df.with_column(Column::new(columns::TIME.into(), masked))?;
    debug!("Cleared {} times with a non-counting time code", cleared);
    Ok(())
}

/// Add a `display_<name>` string column for each present numeric time column
pub fn add_display_columns(df: &mut DataFrame, time_columns: &[&str]) -> Result<()> {
    for &name in time_columns {
        if !has_column(df, name) {
            continue;
        }
        let seconds = require_column(df, name)?.cast(&DataType::Float64)?;
        let display = seconds
            .f64()?
            .into_iter()
            .map(|value| value.map(time_codec::display).transpose())
            .collect::<Result<Vec<Option<String>>>>()?;

        let display_name = format!("{}{}", DISPLAY_PREFIX, name);
        df.with_column(Column::new(display_name.as_str().into(), display))?;
    }
    Ok(())
}

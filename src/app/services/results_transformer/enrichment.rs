//! Derived descriptive columns
//!
//! Adds the readable stroke name and the meet-level columns to a results
//! frame.

use polars::prelude::*;
use tracing::debug;

use super::require_column;
use crate::Result;
use crate::app::models::MeetInfo;
use crate::constants::{columns, stroke_name};

/// Add a `stroke` column derived from `stroke_code`. Unknown and missing
/// codes map to "Unknown".
pub fn add_stroke_names(df: &mut DataFrame) -> Result<()> {
    let codes = require_column(df, columns::STROKE_CODE)?.cast(&DataType::String)?;
    let names: Vec<&str> = codes
        .str()?
        .into_iter()
        .map(|code| stroke_name(code.unwrap_or_default()))
        .collect();

    df.with_column(Column::new(columns::STROKE.into(), names))?;
    debug!("Added stroke names for {} rows", df.height());
    Ok(())
}

/// Add the meet name, facility and dates as constant columns. Without meet
/// information the columns are null.
pub fn add_meet_columns(df: &mut DataFrame, meet: Option<&MeetInfo>) -> Result<()> {
    let height = df.height();
    let values = [
        (columns::MEET_NAME, meet.map(|m| m.name.clone())),
        (columns::FACILITY_NAME, meet.map(|m| m.facility.clone())),
        (columns::MEET_START_DATE, meet.map(MeetInfo::start_date_display)),
        (columns::MEET_END_DATE, meet.map(MeetInfo::end_date_display)),
    ];

    for (name, value) in values {
        let value = value.filter(|v| !v.is_empty());
        df.with_column(Column::new(name.into(), vec![value; height]))?;
    }
    Ok(())
}

//! Tests for the results transformer
//!
//! Frame builders shared by the stage and pipeline tests.

use polars::prelude::*;

mod pipeline_tests;

/// Build a frame of nullable string columns
pub fn string_columns(columns: &[(&str, Vec<Option<&str>>)]) -> DataFrame {
    let columns = columns
        .iter()
        .map(|(name, values)| Column::new((*name).into(), values.clone()))
        .collect();
    DataFrame::new(columns).unwrap()
}

/// Build a ranking frame: event numbers, athlete ids and numeric seeds
pub fn seed_frame(events: &[Option<&str>], athletes: &[&str], seeds: &[Option<f64>]) -> DataFrame {
    DataFrame::new(vec![
        Column::new("event_no".into(), events.to_vec()),
        Column::new("mm_athlete_id".into(), athletes.to_vec()),
        Column::new("seed_time".into(), seeds.to_vec()),
    ])
    .unwrap()
}

/// Values of the seed rank column
pub fn seed_ranks(df: &DataFrame) -> Vec<u32> {
    df.column("seed_rank")
        .unwrap()
        .u32()
        .unwrap()
        .into_no_null_iter()
        .collect()
}

/// Values of a Float64 column
pub fn f64_values(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
    df.column(name).unwrap().f64().unwrap().into_iter().collect()
}

/// Values of a string column
pub fn str_values(df: &DataFrame, name: &str) -> Vec<Option<String>> {
    df.column(name)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect()
}

//! Tests for the full results pipeline

use super::*;
use crate::app::models::MeetGraph;
use crate::app::services::hy3_parser::tests::{parse, sample_meet};
use crate::app::services::results_transformer::{
    ResultsPipeline, compute_seed_ranks, individual_results_frame, individual_results_table,
    relay_results_table,
};
use crate::constants::{INDIVIDUAL_COLUMN_ORDER, RELAY_LEG_COUNT};
use crate::error::Error;

fn sample_graph() -> MeetGraph {
    parse(&sample_meet()).unwrap().graph().clone()
}

#[test]
fn test_individual_table_shape() {
    let df = individual_results_table(&sample_graph()).unwrap();

    assert_eq!(df.height(), 5);
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(names, INDIVIDUAL_COLUMN_ORDER);
}

#[test]
fn test_individual_table_values() {
    let df = individual_results_table(&sample_graph()).unwrap();

    assert_eq!(
        f64_values(&df, "time"),
        vec![Some(268.1), Some(265.5), Some(57.9), Some(21.2), None]
    );
    assert_eq!(
        f64_values(&df, "seed_time"),
        vec![Some(270.0), Some(270.0), Some(58.0), Some(21.5), None]
    );
    assert_eq!(
        str_values(&df, "display_time"),
        vec![
            Some("4:28.10".to_string()),
            Some("4:25.50".to_string()),
            Some("57.90".to_string()),
            Some("21.20".to_string()),
            None,
        ]
    );
    assert_eq!(str_values(&df, "time_code")[4], Some("DQ".to_string()));
    assert_eq!(str_values(&df, "stroke")[2], Some("Back".to_string()));
    assert_eq!(str_values(&df, "team")[3], Some("SUN".to_string()));
    assert_eq!(
        str_values(&df, "meet_start_date")[0],
        Some("2025-11-01".to_string())
    );
}

#[test]
fn test_prelim_and_final_share_seed_rank() {
    let df = individual_results_table(&sample_graph()).unwrap();
    assert_eq!(seed_ranks(&df), vec![1, 1, 1, 1, 2]);
}

#[test]
fn test_relay_table_values() {
    let df = relay_results_table(&sample_graph()).unwrap();

    assert_eq!(df.height(), 1);
    assert_eq!(str_values(&df, "team_abbr"), vec![Some("NCAP".to_string())]);
    assert_eq!(str_values(&df, "relay_team"), vec![Some("A".to_string())]);
    assert_eq!(f64_values(&df, "time"), vec![Some(104.1)]);
    assert_eq!(f64_values(&df, "seed_time"), vec![Some(105.0)]);
    assert_eq!(str_values(&df, "swimmer_1_mm_id"), vec![Some("101".to_string())]);
    assert_eq!(str_values(&df, "swimmer_2_mm_id"), vec![Some("102".to_string())]);
    assert_eq!(str_values(&df, "swimmer_3_mm_id"), vec![None]);
    assert_eq!(str_values(&df, "reaction_time_1"), vec![Some("0.65".to_string())]);
    assert_eq!(seed_ranks(&df), vec![1]);
}

#[test]
fn test_relay_leg_columns_interleave() {
    let df = relay_results_table(&sample_graph()).unwrap();
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let first_leg = names.iter().position(|name| name == "swimmer_1_mm_id").unwrap();
    for leg in 0..RELAY_LEG_COUNT {
        assert_eq!(names[first_leg + 2 * leg], format!("swimmer_{}_mm_id", leg + 1));
        assert_eq!(names[first_leg + 2 * leg + 1], format!("reaction_time_{}", leg + 1));
    }
    assert_eq!(names.last().map(String::as_str), Some("display_seed_time"));
}

#[test]
fn test_ranking_before_normalization_fails() {
    let mut df = individual_results_frame(&sample_graph()).unwrap();

    let err = compute_seed_ranks(&mut df, "event_no", "seed_time", &["mm_athlete_id"]).unwrap_err();
    assert!(matches!(err, Error::RankPrecondition { ref column, .. } if column == "seed_time"));
}

#[test]
fn test_empty_graph_gives_empty_tables() {
    let graph = MeetGraph::new();

    let individual = individual_results_table(&graph).unwrap();
    assert_eq!(individual.height(), 0);
    assert_eq!(individual.width(), INDIVIDUAL_COLUMN_ORDER.len());

    let relay = relay_results_table(&graph).unwrap();
    assert_eq!(relay.height(), 0);
    assert!(relay.column("seed_rank").is_ok());
}

#[test]
fn test_pipeline_tolerates_missing_optional_columns() {
    let df = string_columns(&[
        ("mm_athlete_id", vec![Some("1"), Some("2")]),
        ("event_no", vec![Some("1"), Some("1")]),
        ("stroke_code", vec![Some("A"), Some("A")]),
        ("seed_time", vec![Some("25.00"), Some("24.00")]),
    ]);

    let out = ResultsPipeline::individual().run(df, None).unwrap();

    assert_eq!(seed_ranks(&out), vec![2, 1]);
    assert!(out.column("time").is_err());
    assert_eq!(
        str_values(&out, "display_seed_time"),
        vec![Some("25.00".to_string()), Some("24.00".to_string())]
    );
}

#[test]
fn test_export_to_csv() {
    let mut df = individual_results_table(&sample_graph()).unwrap();
    let mut buffer = Vec::new();

    CsvWriter::new(&mut buffer).finish(&mut df).unwrap();

    let csv = String::from_utf8(buffer).unwrap();
    let mut lines = csv.lines();
    assert!(lines.next().unwrap().starts_with("meet_name,facility_name,"));
    assert_eq!(lines.count(), 5);
    assert!(csv.contains("Fall Classic"));
    assert!(csv.contains("4:28.10"));
}

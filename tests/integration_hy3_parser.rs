//! Integration tests for the HY3 parser and results tables
//!
//! These tests decode a complete meet export from the fixtures directory and
//! check the entity graph and the transformed tables end to end.

use hy3_processor::app::services::hy3_parser::checksum;
use hy3_processor::{Error, Hy3File, ParseConfig, parse_files};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Route parser logs to the test output; set RUST_LOG to see them
fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hy3_processor=warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_test_writer())
        .try_init();
}

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("sample_meet.hy3")
}

fn fixture_text() -> String {
    std::fs::read_to_string(fixture_path()).expect("Failed to read sample meet fixture")
}

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Test decoding the complete sample meet
///
/// Purpose: Validate the graph built from a realistic multi-team export
/// Benefit: Catches offset or context regressions across every record type
#[test]
fn test_parse_sample_meet_graph() {
    init_logging();
    let file = Hy3File::open(fixture_path(), ParseConfig::strict())
        .expect("Sample meet should parse in strict mode");

    let header = file.file_header().expect("File header");
    assert_eq!(header.software_version, "MM 8.0Gc");

    let meet = file.meet_info().expect("Meet info");
    assert_eq!(meet.name, "Winter Invitational");
    assert_eq!(meet.facility, "Natatorium");
    assert_eq!(meet.start_date_display(), "2025-12-05");
    assert_eq!(meet.course.as_deref(), Some("L"));

    assert_eq!(file.teams().len(), 2);
    assert_eq!(file.athletes().len(), 6);
    assert_eq!(file.individual_results().len(), 7);
    assert_eq!(file.relay_results().len(), 2);

    let stats = file.stats();
    assert_eq!(stats.total_lines, 32);
    assert_eq!(stats.records_ignored, 2);
    assert_eq!(stats.records_skipped, 0);
    assert!(stats.warnings.is_empty(), "{:?}", stats.warnings);
    assert!(stats.is_successful());
}

/// Test that every reference in the graph resolves
#[test]
fn test_sample_meet_references_resolve() {
    let file = Hy3File::open(fixture_path(), ParseConfig::default()).unwrap();
    let graph = file.graph();

    for athlete in file.athletes() {
        assert!(graph.team(&athlete.team).is_some(), "{}", athlete.mm_id);
    }
    for result in file.individual_results() {
        let athlete = graph.athlete(&result.athlete_id).expect("Result athlete");
        assert_eq!(athlete.team, result.team);
    }
    for relay in file.relay_results() {
        assert!(graph.team(&relay.team).is_some());
        for leg in &relay.legs {
            assert!(graph.athlete(leg).is_some(), "{}", leg);
        }
    }

    let sun: Vec<_> = file
        .athletes()
        .iter()
        .filter(|athlete| athlete.team == "SUN")
        .map(|athlete| athlete.mm_id.as_str())
        .collect();
    assert_eq!(sun, vec!["201", "202"]);
}

/// Test relay legs keep their swim order
#[test]
fn test_relay_legs_in_order() {
    let file = Hy3File::open(fixture_path(), ParseConfig::default()).unwrap();
    let relays = file.relay_results();

    assert_eq!(relays[0].team, "NCAP");
    assert_eq!(relays[0].legs, vec!["101", "102", "103", "104"]);
    assert_eq!(relays[0].time, "3:48.50");
    assert_eq!(relays[1].team, "SUN");
    assert_eq!(relays[1].legs, vec!["201", "202"]);
}

/// Test the transformed tables from the fixture
#[test]
fn test_sample_meet_tables() {
    let file = Hy3File::open(fixture_path(), ParseConfig::default()).unwrap();

    let individual = file.individual_results_table().unwrap();
    assert_eq!(individual.height(), 7);
    let ranks: Vec<u32> = individual
        .column("seed_rank")
        .unwrap()
        .u32()
        .unwrap()
        .into_no_null_iter()
        .collect();
    assert_eq!(ranks, vec![1, 1, 1, 2, 1, 1, 2]);

    let times: Vec<Option<f64>> = individual
        .column("time")
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(times[1], Some(241.1));
    assert_eq!(times[6], None);

    let relay = file.relay_results_table().unwrap();
    assert_eq!(relay.height(), 2);
    let relay_ranks: Vec<u32> = relay
        .column("seed_rank")
        .unwrap()
        .u32()
        .unwrap()
        .into_no_null_iter()
        .collect();
    assert_eq!(relay_ranks, vec![1, 2]);
}

/// Test strict and forgiving modes on a corrupted line
///
/// Purpose: A bad checksum aborts a strict parse and is skipped otherwise
/// Benefit: Confirms the strict switch only affects recoverable errors
#[test]
fn test_corrupted_checksum_strict_and_non_strict() {
    init_logging();
    let text = fixture_text();
    let corrupted: Vec<String> = text
        .lines()
        .map(|line| {
            if line.contains("Weyant") {
                let (content, _) = checksum::split(line);
                let expected = checksum::compute(content);
                let wrong = if expected == "00" { "11" } else { "00" };
                format!("{}{}", content, wrong)
            } else {
                line.to_string()
            }
        })
        .collect();
    let corrupted = corrupted.join("\r\n");

    let err = Hy3File::parse_str("corrupt.hy3", &corrupted, ParseConfig::strict()).unwrap_err();
    assert!(matches!(err, Error::Checksum { line: 13, .. }), "{}", err);

    let file = Hy3File::parse_str("corrupt.hy3", &corrupted, ParseConfig::default()).unwrap();
    assert_eq!(file.athletes().len(), 5);
    assert_eq!(file.stats().records_skipped, 3);
    assert!(file.individual_results().iter().all(|r| r.athlete_id != "103"));
    // The leg record names the skipped athlete, so it is skipped too
    assert!(file.relay_results()[0].legs.is_empty());
}

/// Test that checksum verification can be turned off
#[test]
fn test_checksums_disabled() {
    let text = fixture_text().replace("\r\n", "XX\r\n");
    let strict = ParseConfig::strict();

    assert!(Hy3File::parse_str("bad.hy3", &text, strict.clone()).is_err());

    // Extra characters sit after the last field, so slicing is unaffected
    let file = Hy3File::parse_str("bad.hy3", &text, strict.without_checksums()).unwrap();
    assert_eq!(file.athletes().len(), 6);
}

/// Test concurrent parsing of several files
///
/// Purpose: Validate batch parsing keeps input order and isolates failures
/// Benefit: One unreadable file does not abort the others
#[tokio::test]
async fn test_parse_files_concurrently() {
    init_logging();
    let text = fixture_text();
    let second = write_temp(&text);
    let missing = PathBuf::from("/nonexistent/meet.hy3");

    let paths = vec![
        fixture_path(),
        missing.clone(),
        second.path().to_path_buf(),
    ];
    let results = parse_files(paths, ParseConfig::default().with_workers(2)).await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().athletes().len(), 6);
    assert!(matches!(&results[1], Err(Error::Io { path, .. }) if path == &missing));
    let second_file = results[2].as_ref().unwrap();
    assert_eq!(second_file.name(), second.path().display().to_string());
    assert_eq!(second_file.relay_results().len(), 2);
}

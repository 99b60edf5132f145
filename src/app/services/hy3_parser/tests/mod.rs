//! Test utilities for HY3 parser testing
//!
//! Helpers that build fixed-width record lines with valid checksums, and a
//! small sample meet used across the test modules.

use std::io::Write;
use tempfile::NamedTempFile;

use super::checksum;
use super::parser::Hy3File;
use crate::config::ParseConfig;
use crate::Result;


/// Record content width before the checksum
pub const LINE_WIDTH: usize = 128;

/// Build a record line with values placed at their start columns
pub fn record_line(type_code: &str, fields: &[(usize, &str)]) -> String {
    let mut columns = vec![' '; LINE_WIDTH];
    for (index, ch) in type_code.chars().enumerate() {
        columns[index] = ch;
    }
    for (start, value) in fields {
        for (offset, ch) in value.chars().enumerate() {
            columns[start + offset] = ch;
        }
    }
    let content: String = columns.into_iter().collect();
    checksum::with_checksum(&content)
}

pub fn a1() -> String {
    record_line("A1", &[(2, "02"), (44, "MM 8.0Gc"), (58, "11032025")])
}

pub fn b1(name: &str, facility: &str) -> String {
    record_line(
        "B1",
        &[(2, name), (47, facility), (92, "11012025"), (100, "11022025")],
    )
}

pub fn b2(course: &str) -> String {
    record_line("B2", &[(98, course)])
}

pub fn c1(abbreviation: &str, full_name: &str) -> String {
    record_line("C1", &[(2, abbreviation), (7, full_name), (53, "PV")])
}

pub fn d1(gender: &str, mm_id: &str, last_name: &str, first_name: &str) -> String {
    record_line(
        "D1",
        &[
            (2, gender),
            (3, mm_id),
            (8, last_name),
            (28, first_name),
            (69, "031797KATLEDE"),
            (88, "03171997"),
            (97, "27"),
        ],
    )
}

pub fn e1(mm_id: &str, distance: &str, stroke: &str, event_no: &str, seed: &str) -> String {
    record_line(
        "E1",
        &[
            (3, mm_id),
            (15, distance),
            (21, stroke),
            (38, event_no),
            (42, seed),
            (50, "Y"),
        ],
    )
}

pub fn e2(round: &str, time: &str, time_code: &str) -> String {
    record_line(
        "E2",
        &[
            (2, round),
            (3, time),
            (11, "Y"),
            (12, time_code),
            (21, "1"),
            (25, "4"),
            (28, "2"),
            (31, "3"),
            (36, time),
            (83, "0.71"),
        ],
    )
}

pub fn f1(team: &str, letter: &str, event_no: &str, seed: &str) -> String {
    record_line(
        "F1",
        &[
            (2, team),
            (7, letter),
            (12, "F"),
            (17, "200"),
            (21, "A"),
            (38, event_no),
            (43, seed),
        ],
    )
}

pub fn f2(round: &str, time: &str) -> String {
    record_line(
        "F2",
        &[
            (2, round),
            (3, time),
            (11, "Y"),
            (21, "2"),
            (25, "5"),
            (28, "1"),
            (31, "1"),
            (83, "0.65"),
            (87, "0.21"),
            (92, "0.30"),
            (97, "0.18"),
        ],
    )
}

pub fn f3(ids: &[&str]) -> String {
    let starts = [3, 16, 29, 42];
    let fields: Vec<(usize, &str)> = starts.iter().copied().zip(ids.iter().copied()).collect();
    record_line("F3", &fields)
}

/// Join record lines into file text
pub fn meet_text(lines: &[String]) -> String {
    let mut text = lines.join("\r\n");
    text.push_str("\r\n");
    text
}

/// A two-team meet with individual results and one relay
pub fn sample_meet() -> String {
    meet_text(&[
        a1(),
        b1("Fall Classic", "Aquatic Center"),
        b2("Y"),
        c1("NCAP", "Nation's Capital Swim Club"),
        d1("F", "101", "Ledecky", "Katie"),
        e1("101", "500", "A", "1", "4:30.00"),
        e2("P", "4:28.10", ""),
        e2("F", "4:25.50", ""),
        d1("F", "102", "Smith", "Regan"),
        e1("102", "100", "B", "2", "58.00"),
        e2("F", "57.90", ""),
        f1("NCAP", "A", "10", "1:45.00"),
        f2("F", "1:44.10"),
        f3(&["101", "102"]),
        c1("SUN", "Sun Devils"),
        d1("M", "201", "Dressel", "Caeleb"),
        e1("201", "50", "A", "3", "21.50"),
        e2("F", "21.20", ""),
        d1("M", "202", "Adrian", "Nathan"),
        e1("202", "50", "A", "3", ""),
        e2("F", "", "DQ"),
    ])
}

/// Parse text with the default configuration
pub fn parse(text: &str) -> Result<Hy3File> {
    Hy3File::parse_str("test.hy3", text, ParseConfig::default())
}

/// Parse text in strict mode
pub fn parse_strict(text: &str) -> Result<Hy3File> {
    Hy3File::parse_str("test.hy3", text, ParseConfig::strict())
}

/// Helper to create a temporary file with content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

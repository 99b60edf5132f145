//! Application constants for HY3 processing
//!
//! Code tables from the HY-TEK HY3 export format, the time sentinel tokens,
//! and the column names and orders of the exported result tables.

// =============================================================================
// Record Type Codes
// =============================================================================

/// Record type codes with a field layout
pub mod record_types {
    /// File header (software version, creation date)
    pub const FILE_HEADER: &str = "A1";
    /// Meet information (name, facility, dates)
    pub const MEET_INFO: &str = "B1";
    /// Additional meet information (course)
    pub const MEET_COURSE: &str = "B2";
    /// Team information
    pub const TEAM: &str = "C1";
    /// Athlete information
    pub const ATHLETE: &str = "D1";
    /// Individual event entry
    pub const INDIVIDUAL_ENTRY: &str = "E1";
    /// Individual event result
    pub const INDIVIDUAL_RESULT: &str = "E2";
    /// Relay event entry
    pub const RELAY_ENTRY: &str = "F1";
    /// Relay event result
    pub const RELAY_RESULT: &str = "F2";
    /// Relay swimmers
    pub const RELAY_LEGS: &str = "F3";
}

/// Width of the leading type code slice
pub const TYPE_CODE_WIDTH: usize = 2;

/// Width of the trailing checksum slice
pub const CHECKSUM_WIDTH: usize = 2;

// =============================================================================
// Code Tables
// =============================================================================

/// Stroke name used when a stroke code is not in the table
pub const UNKNOWN_STROKE: &str = "Unknown";

/// Readable stroke name for a stroke code
pub fn stroke_name(code: &str) -> &'static str {
    match code {
        "A" => "Free",
        "B" => "Back",
        "C" => "Breast",
        "D" => "Fly",
        "E" => "Medley",
        // Diving boards
        "F" => "1m",
        "G" => "3m",
        "H" => "10m",
        _ => UNKNOWN_STROKE,
    }
}

/// Description of a course code
pub fn course_description(code: &str) -> Option<&'static str> {
    match code {
        "Y" => Some("SCY (Short Course Yards)"),
        "S" => Some("SCM (Short Course Meters)"),
        "L" => Some("LCM (Long Course Meters)"),
        _ => None,
    }
}

// =============================================================================
// Time Sentinels
// =============================================================================

/// Tokens that occupy a time or time-code field in place of a numeric time.
/// Compared case-insensitively.
pub const TIME_SENTINELS: &[&str] = &["DQ", "DNF", "NS", "DNS", "NT", "SCR", "DFS", "NP"];

/// Whether a trimmed value is a time sentinel token
pub fn is_time_sentinel(value: &str) -> bool {
    TIME_SENTINELS
        .iter()
        .any(|token| token.eq_ignore_ascii_case(value))
}

// =============================================================================
// Result Table Columns
// =============================================================================

/// Column names shared by the individual and relay result tables
pub mod columns {
    pub const MM_ATHLETE_ID: &str = "mm_athlete_id";
    pub const USAS_ID: &str = "usas_id";
    pub const FIRST_NAME: &str = "first_name";
    pub const LAST_NAME: &str = "last_name";
    pub const GENDER: &str = "gender";
    pub const TEAM: &str = "team";
    pub const TEAM_ABBR: &str = "team_abbr";
    pub const RELAY_TEAM: &str = "relay_team";
    pub const EVENT_NO: &str = "event_no";
    pub const STROKE_CODE: &str = "stroke_code";
    pub const STROKE: &str = "stroke";
    pub const DISTANCE: &str = "distance";
    pub const SEED_TIME: &str = "seed_time";
    pub const ROUND: &str = "round";
    pub const TIME: &str = "time";
    pub const COURSE: &str = "course";
    pub const TIME_CODE: &str = "time_code";
    pub const HEAT: &str = "heat";
    pub const LANE: &str = "lane";
    pub const HEAT_PLACE: &str = "heat_place";
    pub const OVERALL_PLACE: &str = "overall_place";
    pub const POINTS: &str = "points";
    pub const BACKUP_TIME_1: &str = "backup_time_1";
    pub const BACKUP_TIME_2: &str = "backup_time_2";
    pub const BACKUP_TIME_3: &str = "backup_time_3";
    pub const TOUCHPAD_TIME: &str = "touchpad_time";
    pub const REACTION_TIME: &str = "reaction_time";
    pub const SEED_RANK: &str = "seed_rank";
    pub const MEET_NAME: &str = "meet_name";
    pub const FACILITY_NAME: &str = "facility_name";
    pub const MEET_START_DATE: &str = "meet_start_date";
    pub const MEET_END_DATE: &str = "meet_end_date";
}

/// Prefix of the formatted display column derived from a numeric time column
pub const DISPLAY_PREFIX: &str = "display_";

/// Raw time columns converted to seconds by time normalization
pub const TIME_COLUMNS: &[&str] = &[
    columns::SEED_TIME,
    columns::TIME,
    columns::BACKUP_TIME_1,
    columns::BACKUP_TIME_2,
    columns::BACKUP_TIME_3,
    columns::TOUCHPAD_TIME,
];

/// Maximum number of swimmers on a relay
pub const RELAY_LEG_COUNT: usize = 4;

/// Column name for the athlete id of a relay leg (1-based)
pub fn relay_swimmer_column(leg: usize) -> String {
    format!("swimmer_{}_mm_id", leg)
}

/// Column name for the reaction time of a relay leg (1-based)
pub fn relay_reaction_column(leg: usize) -> String {
    format!("reaction_time_{}", leg)
}

/// Export order of the individual results table
pub const INDIVIDUAL_COLUMN_ORDER: &[&str] = &[
    columns::MEET_NAME,
    columns::FACILITY_NAME,
    columns::MEET_START_DATE,
    columns::MEET_END_DATE,
    columns::MM_ATHLETE_ID,
    columns::USAS_ID,
    columns::FIRST_NAME,
    columns::LAST_NAME,
    columns::GENDER,
    columns::TEAM,
    columns::EVENT_NO,
    columns::STROKE,
    columns::DISTANCE,
    columns::SEED_TIME,
    columns::ROUND,
    columns::TIME,
    columns::COURSE,
    columns::HEAT,
    columns::LANE,
    columns::HEAT_PLACE,
    columns::OVERALL_PLACE,
    columns::POINTS,
    columns::TIME_CODE,
    columns::BACKUP_TIME_1,
    columns::BACKUP_TIME_2,
    columns::REACTION_TIME,
    columns::SEED_RANK,
    "display_time",
    "display_seed_time",
    "display_backup_time_1",
    "display_backup_time_2",
];

/// Export order of the relay results table, before the per-leg columns
pub const RELAY_BASE_COLUMN_ORDER: &[&str] = &[
    columns::MEET_NAME,
    columns::FACILITY_NAME,
    columns::MEET_START_DATE,
    columns::MEET_END_DATE,
    columns::GENDER,
    columns::TEAM_ABBR,
    columns::RELAY_TEAM,
    columns::EVENT_NO,
    columns::STROKE,
    columns::DISTANCE,
    columns::SEED_TIME,
    columns::ROUND,
    columns::TIME,
    columns::TIME_CODE,
    columns::COURSE,
    columns::HEAT,
    columns::LANE,
    columns::HEAT_PLACE,
    columns::OVERALL_PLACE,
    columns::POINTS,
    columns::BACKUP_TIME_1,
    columns::BACKUP_TIME_2,
    columns::BACKUP_TIME_3,
    columns::TOUCHPAD_TIME,
];

/// Export columns of the relay results table after the per-leg columns
pub const RELAY_TRAILING_COLUMNS: &[&str] =
    &[columns::SEED_RANK, "display_time", "display_seed_time"];

//! Fixed column layouts of the HY3 record types
//!
//! Each supported type code maps to a static table of field slots. Offsets
//! are zero-based, end-exclusive character columns. A line must be at least
//! `min_width` columns wide to decode; slots past the end of a long-enough
//! line decode as empty strings.

use crate::constants::record_types;

/// One fixed slot of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub start: usize,
    pub end: usize,
}

/// Layout of one record type
#[derive(Debug, PartialEq, Eq)]
pub struct LineSpec {
    pub type_code: &'static str,
    pub description: &'static str,
    pub min_width: usize,
    pub fields: &'static [FieldSpec],
}

impl LineSpec {
    /// Look up a slot by field name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }
}

const fn slot(name: &'static str, start: usize, end: usize) -> FieldSpec {
    FieldSpec { name, start, end }
}

pub static FILE_HEADER: LineSpec = LineSpec {
    type_code: record_types::FILE_HEADER,
    description: "File header",
    min_width: 4,
    fields: &[
        slot("result_type", 2, 4),
        slot("mm_version", 44, 58),
        slot("date_file_created", 58, 68),
    ],
};

pub static MEET_INFO: LineSpec = LineSpec {
    type_code: record_types::MEET_INFO,
    description: "Meet information",
    min_width: 47,
    fields: &[
        slot("meet_name", 2, 47),
        slot("facility_name", 47, 92),
        slot("meet_start_date", 92, 100),
        slot("meet_end_date", 100, 108),
        slot("elevation", 116, 121),
    ],
};

pub static MEET_COURSE: LineSpec = LineSpec {
    type_code: record_types::MEET_COURSE,
    description: "Additional meet information",
    min_width: 99,
    fields: &[slot("course", 98, 99)],
};

pub static TEAM: LineSpec = LineSpec {
    type_code: record_types::TEAM,
    description: "Team information",
    min_width: 7,
    fields: &[
        slot("team_abbreviation", 2, 7),
        slot("full_team_name", 7, 37),
        slot("team_short_name", 37, 53),
        slot("team_lsc", 53, 55),
    ],
};

pub static ATHLETE: LineSpec = LineSpec {
    type_code: record_types::ATHLETE,
    description: "Athlete information",
    min_width: 48,
    fields: &[
        slot("gender", 2, 3),
        slot("mm_id", 3, 8),
        slot("last_name", 8, 28),
        slot("first_name", 28, 48),
        slot("nick_name", 48, 68),
        slot("usas_id", 69, 86),
        slot("birth_date", 88, 96),
        slot("age", 97, 99),
    ],
};

pub static INDIVIDUAL_ENTRY: LineSpec = LineSpec {
    type_code: record_types::INDIVIDUAL_ENTRY,
    description: "Individual event entry",
    min_width: 50,
    fields: &[
        slot("mm_athlete_id", 3, 8),
        slot("distance", 15, 21),
        slot("stroke_code", 21, 22),
        slot("event_no", 38, 42),
        slot("seed_time", 42, 50),
        slot("seed_course", 50, 51),
        slot("points", 61, 68),
    ],
};

pub static INDIVIDUAL_RESULT: LineSpec = LineSpec {
    type_code: record_types::INDIVIDUAL_RESULT,
    description: "Individual event result",
    min_width: 15,
    fields: &[
        slot("round", 2, 3),
        slot("time", 3, 11),
        slot("course", 11, 12),
        slot("time_code", 12, 15),
        slot("heat", 20, 24),
        slot("lane", 25, 27),
        slot("heat_place", 26, 29),
        slot("overall_place", 29, 33),
        slot("points", 33, 36),
        slot("backup_time_1", 36, 44),
        slot("backup_time_2", 45, 52),
        slot("reaction_time", 83, 87),
    ],
};

pub static RELAY_ENTRY: LineSpec = LineSpec {
    type_code: record_types::RELAY_ENTRY,
    description: "Relay event entry",
    min_width: 50,
    fields: &[
        slot("team_abbr", 2, 7),
        slot("relay_team", 7, 8),
        slot("gender", 12, 13),
        slot("distance", 17, 21),
        slot("stroke_code", 21, 22),
        slot("event_no", 38, 42),
        slot("seed_time", 43, 50),
        slot("points", 61, 68),
    ],
};

pub static RELAY_RESULT: LineSpec = LineSpec {
    type_code: record_types::RELAY_RESULT,
    description: "Relay event result",
    min_width: 15,
    fields: &[
        slot("round", 2, 3),
        slot("time", 3, 11),
        slot("course", 11, 12),
        slot("time_code", 12, 15),
        slot("heat", 20, 24),
        slot("lane", 25, 27),
        slot("heat_place", 26, 29),
        slot("overall_place", 29, 33),
        slot("points", 33, 36),
        slot("backup_time_1", 36, 44),
        slot("backup_time_2", 44, 52),
        slot("backup_time_3", 52, 60),
        slot("touchpad_time", 65, 73),
        slot("reaction_time_1", 83, 87),
        slot("reaction_time_2", 87, 92),
        slot("reaction_time_3", 92, 97),
        slot("reaction_time_4", 97, 102),
    ],
};

pub static RELAY_LEGS: LineSpec = LineSpec {
    type_code: record_types::RELAY_LEGS,
    description: "Relay swimmers",
    min_width: 8,
    fields: &[
        slot("athlete_1_mm_id", 3, 8),
        slot("athlete_2_mm_id", 16, 21),
        slot("athlete_3_mm_id", 29, 34),
        slot("athlete_4_mm_id", 42, 47),
    ],
};

/// All record layouts, in file order of their type codes
pub static LINE_SPECS: &[&LineSpec] = &[
    &FILE_HEADER,
    &MEET_INFO,
    &MEET_COURSE,
    &TEAM,
    &ATHLETE,
    &INDIVIDUAL_ENTRY,
    &INDIVIDUAL_RESULT,
    &RELAY_ENTRY,
    &RELAY_RESULT,
    &RELAY_LEGS,
];

/// Layout for a type code, if the code is supported
pub fn line_spec(type_code: &str) -> Option<&'static LineSpec> {
    LINE_SPECS
        .iter()
        .copied()
        .find(|spec| spec.type_code == type_code)
}

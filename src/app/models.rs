//! Data models for HY3 meet results
//!
//! This module contains the entity graph decoded from a HY3 file: the file
//! header, meet information, teams, athletes, and the individual and relay
//! results that reference them. All field values are kept as the trimmed
//! strings found in the file; an empty string means the slot was blank.

use crate::constants::course_description;
use crate::error::{Error, KeyKind, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Date layouts found in HY3 date slots, tried in order
const DATE_FORMATS: &[&str] = &["%m%d%Y", "%Y%m%d"];

/// Parse a HY3 date slot (`MMDDYYYY`, or `YYYYMMDD` in some exports)
pub fn parse_hy3_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.len() != 8 {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

// =============================================================================
// File and Meet Level
// =============================================================================

/// A1 record: who produced the file and when
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileHeader {
    /// Result type code (e.g. "02" for meet results)
    pub result_type: String,
    /// Meet-management software version string
    pub software_version: String,
    /// File creation date as written in the file
    pub date_created: String,
}

/// Meet information from the B1 record, with the course from B2
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetInfo {
    pub name: String,
    pub facility: String,
    /// Course code (Y, S or L) when a B2 record is present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    /// Start date as written in the file
    pub start_date_raw: String,
    /// End date as written in the file
    pub end_date_raw: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation: Option<String>,
}

impl MeetInfo {
    /// Create meet information, parsing the raw date slots
    pub fn new(
        name: impl Into<String>,
        facility: impl Into<String>,
        start_date_raw: impl Into<String>,
        end_date_raw: impl Into<String>,
        elevation: &str,
    ) -> Self {
        let start_date_raw = start_date_raw.into();
        let end_date_raw = end_date_raw.into();
        Self {
            name: name.into(),
            facility: facility.into(),
            course: None,
            start_date: parse_hy3_date(&start_date_raw),
            end_date: parse_hy3_date(&end_date_raw),
            start_date_raw,
            end_date_raw,
            elevation: non_blank(elevation),
        }
    }

    /// Start date in ISO form when it parsed, otherwise the raw slot
    pub fn start_date_display(&self) -> String {
        self.start_date
            .map(|date| date.to_string())
            .unwrap_or_else(|| self.start_date_raw.clone())
    }

    /// End date in ISO form when it parsed, otherwise the raw slot
    pub fn end_date_display(&self) -> String {
        self.end_date
            .map(|date| date.to_string())
            .unwrap_or_else(|| self.end_date_raw.clone())
    }

    /// Plain key/value view of the meet information
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert("meet_name".to_string(), self.name.clone());
        map.insert("facility_name".to_string(), self.facility.clone());
        map.insert("meet_start_date".to_string(), self.start_date_display());
        map.insert("meet_end_date".to_string(), self.end_date_display());
        if let Some(course) = &self.course {
            map.insert("course".to_string(), course.clone());
            if let Some(description) = course_description(course) {
                map.insert("course_description".to_string(), description.to_string());
            }
        }
        if let Some(elevation) = &self.elevation {
            map.insert("elevation".to_string(), elevation.clone());
        }
        map
    }
}

// =============================================================================
// Teams and Athletes
// =============================================================================

/// C1 record, keyed by abbreviation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub abbreviation: String,
    pub full_name: String,
    pub short_name: String,
    /// Local swim committee (region) code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lsc: Option<String>,
}

impl Team {
    pub fn new(
        abbreviation: impl Into<String>,
        full_name: impl Into<String>,
        short_name: impl Into<String>,
        lsc: &str,
    ) -> Self {
        Self {
            abbreviation: abbreviation.into(),
            full_name: full_name.into(),
            short_name: short_name.into(),
            lsc: non_blank(lsc),
        }
    }
}

/// D1 record, keyed by meet-management id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Athlete {
    /// Meet-management athlete id
    pub mm_id: String,
    pub gender: String,
    pub last_name: String,
    pub first_name: String,
    pub nick_name: String,
    /// Registration id
    pub usas_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Abbreviation of the team the athlete was listed under
    pub team: String,
}

// =============================================================================
// Events and Results
// =============================================================================

/// Whether an event is swum individually or as a relay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Individual,
    Relay,
}

/// Event entry (E1 or F1). Scopes the result records that follow it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDescriptor {
    pub kind: EventKind,
    pub event_no: String,
    pub stroke_code: String,
    pub distance: String,
    /// Entry seed time as written in the file
    pub seed_time: String,
    pub seed_course: String,
    /// Entry points
    pub points: String,
}

impl EventDescriptor {
    pub fn is_relay(&self) -> bool {
        self.kind == EventKind::Relay
    }
}

/// E2 record under its E1 entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualResult {
    /// Athlete mm id, resolves in the athlete map
    pub athlete_id: String,
    /// Team abbreviation, resolves in the team map
    pub team: String,
    pub event: EventDescriptor,
    pub round: String,
    pub time: String,
    pub course: String,
    pub time_code: String,
    pub heat: String,
    pub lane: String,
    pub heat_place: String,
    pub overall_place: String,
    pub points: String,
    pub backup_time_1: String,
    pub backup_time_2: String,
    pub reaction_time: String,
}

/// F1 entry with its F2 result and F3 swimmers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayResult {
    /// Team abbreviation, resolves in the team map
    pub team: String,
    /// Relay letter (A, B, ...)
    pub relay_team: String,
    pub gender: String,
    pub event: EventDescriptor,
    pub round: String,
    pub time: String,
    pub time_code: String,
    pub course: String,
    pub heat: String,
    pub lane: String,
    pub heat_place: String,
    pub overall_place: String,
    pub points: String,
    pub backup_time_1: String,
    pub backup_time_2: String,
    pub backup_time_3: String,
    pub touchpad_time: String,
    /// Swimmer mm ids in leg order
    pub legs: Vec<String>,
    /// Reaction times in leg order
    pub leg_reaction_times: Vec<String>,
    /// Set once a relay result record has been applied, even a blank one
    #[serde(skip)]
    pub filled: bool,
}

impl RelayResult {
    /// Open a relay from its entry record, before any result fields are known
    pub fn from_entry(
        team: impl Into<String>,
        relay_team: impl Into<String>,
        gender: impl Into<String>,
        event: EventDescriptor,
    ) -> Self {
        Self {
            team: team.into(),
            relay_team: relay_team.into(),
            gender: gender.into(),
            event,
            round: String::new(),
            time: String::new(),
            time_code: String::new(),
            course: String::new(),
            heat: String::new(),
            lane: String::new(),
            heat_place: String::new(),
            overall_place: String::new(),
            points: String::new(),
            backup_time_1: String::new(),
            backup_time_2: String::new(),
            backup_time_3: String::new(),
            touchpad_time: String::new(),
            legs: Vec::new(),
            leg_reaction_times: Vec::new(),
            filled: false,
        }
    }

    /// Whether a relay result record has been applied
    pub fn has_result(&self) -> bool {
        self.filled
    }

    /// A copy of the entry part of this relay, for a further round
    pub fn reopen(&self) -> Self {
        Self::from_entry(
            self.team.clone(),
            self.relay_team.clone(),
            self.gender.clone(),
            self.event.clone(),
        )
    }
}

// =============================================================================
// Entity Graph
// =============================================================================

/// Everything decoded from one file. Teams and athletes keep file order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MeetGraph {
    pub file_header: Option<FileHeader>,
    pub meet_info: Option<MeetInfo>,
    teams: Vec<Team>,
    athletes: Vec<Athlete>,
    #[serde(skip)]
    team_index: HashMap<String, usize>,
    #[serde(skip)]
    athlete_index: HashMap<String, usize>,
    pub individual_results: Vec<IndividualResult>,
    pub relay_results: Vec<RelayResult>,
}

impl MeetGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the file header; a second header is a duplicate key
    pub fn set_file_header(&mut self, header: FileHeader, line: usize) -> Result<()> {
        if self.file_header.is_some() {
            return Err(Error::duplicate_key(
                line,
                KeyKind::FileHeader,
                header.result_type,
            ));
        }
        self.file_header = Some(header);
        Ok(())
    }

    /// Set the meet information; a second meet record is a duplicate key
    pub fn set_meet_info(&mut self, meet: MeetInfo, line: usize) -> Result<()> {
        if self.meet_info.is_some() {
            return Err(Error::duplicate_key(line, KeyKind::MeetInfo, meet.name));
        }
        self.meet_info = Some(meet);
        Ok(())
    }

    /// Insert a team; an abbreviation already present is a duplicate key
    pub fn insert_team(&mut self, team: Team, line: usize) -> Result<()> {
        if self.team_index.contains_key(&team.abbreviation) {
            return Err(Error::duplicate_key(line, KeyKind::Team, team.abbreviation));
        }
        self.team_index
            .insert(team.abbreviation.clone(), self.teams.len());
        self.teams.push(team);
        Ok(())
    }

    /// Insert an athlete; an mm id already present is a duplicate key
    pub fn insert_athlete(&mut self, athlete: Athlete, line: usize) -> Result<()> {
        if self.athlete_index.contains_key(&athlete.mm_id) {
            return Err(Error::duplicate_key(line, KeyKind::Athlete, athlete.mm_id));
        }
        self.athlete_index
            .insert(athlete.mm_id.clone(), self.athletes.len());
        self.athletes.push(athlete);
        Ok(())
    }

    pub fn team(&self, abbreviation: &str) -> Option<&Team> {
        self.team_index
            .get(abbreviation)
            .and_then(|&index| self.teams.get(index))
    }

    pub fn athlete(&self, mm_id: &str) -> Option<&Athlete> {
        self.athlete_index
            .get(mm_id)
            .and_then(|&index| self.athletes.get(index))
    }

    /// Teams in file order
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Athletes in file order
    pub fn athletes(&self) -> &[Athlete] {
        &self.athletes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_athlete(mm_id: &str) -> Athlete {
        Athlete {
            mm_id: mm_id.to_string(),
            gender: "F".to_string(),
            last_name: "Ledecky".to_string(),
            first_name: "Katie".to_string(),
            nick_name: String::new(),
            usas_id: "031797KATLEDE".to_string(),
            birth_date: parse_hy3_date("03171997"),
            age: Some(27),
            team: "NCAP".to_string(),
        }
    }

    #[test]
    fn test_parse_hy3_date_formats() {
        assert_eq!(
            parse_hy3_date("11012025"),
            NaiveDate::from_ymd_opt(2025, 11, 1)
        );
        assert_eq!(
            parse_hy3_date("20251101"),
            NaiveDate::from_ymd_opt(2025, 11, 1)
        );
        assert_eq!(parse_hy3_date(""), None);
        assert_eq!(parse_hy3_date("1101"), None);
        assert_eq!(parse_hy3_date("99999999"), None);
    }

    #[test]
    fn test_meet_info_to_map() {
        let mut meet = MeetInfo::new("Fall Classic", "Aquatic Center", "11012025", "11022025", "");
        meet.course = Some("Y".to_string());

        let map = meet.to_map();
        assert_eq!(map["meet_name"], "Fall Classic");
        assert_eq!(map["meet_start_date"], "2025-11-01");
        assert_eq!(map["meet_end_date"], "2025-11-02");
        assert_eq!(map["course"], "Y");
        assert_eq!(map["course_description"], "SCY (Short Course Yards)");
        assert!(!map.contains_key("elevation"));
    }

    #[test]
    fn test_meet_info_to_map_unknown_course() {
        let mut meet = MeetInfo::new("Meet", "Pool", "", "", "");
        meet.course = Some("Q".to_string());

        let map = meet.to_map();
        assert_eq!(map["course"], "Q");
        assert!(!map.contains_key("course_description"));
    }

    #[test]
    fn test_meet_info_keeps_unparsed_date() {
        let meet = MeetInfo::new("Meet", "Pool", "TBD", "", "100");
        assert_eq!(meet.start_date, None);
        assert_eq!(meet.start_date_display(), "TBD");
        assert_eq!(meet.elevation.as_deref(), Some("100"));
    }

    #[test]
    fn test_duplicate_team_is_rejected() {
        let mut graph = MeetGraph::new();
        graph
            .insert_team(Team::new("NCAP", "Nation's Capital", "NCAP", "PV"), 3)
            .unwrap();

        let err = graph
            .insert_team(Team::new("NCAP", "Other", "Other", ""), 9)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::DuplicateKey { line: 9, kind: KeyKind::Team, .. }
        ));
        assert_eq!(graph.teams().len(), 1);
        assert_eq!(graph.team("NCAP").unwrap().full_name, "Nation's Capital");
    }

    #[test]
    fn test_duplicate_athlete_is_rejected() {
        let mut graph = MeetGraph::new();
        graph.insert_athlete(sample_athlete("101"), 4).unwrap();
        graph.insert_athlete(sample_athlete("102"), 5).unwrap();

        let err = graph.insert_athlete(sample_athlete("101"), 6).unwrap_err();
        assert!(matches!(err, Error::DuplicateKey { kind: KeyKind::Athlete, .. }));
        assert_eq!(graph.athletes().len(), 2);
        assert_eq!(graph.athletes()[1].mm_id, "102");
        assert!(graph.athlete("101").is_some());
        assert!(graph.athlete("999").is_none());
    }

    #[test]
    fn test_relay_reopen_drops_result_fields() {
        let event = EventDescriptor {
            kind: EventKind::Relay,
            event_no: "12".to_string(),
            stroke_code: "A".to_string(),
            distance: "200".to_string(),
            seed_time: "1:40.00".to_string(),
            seed_course: "Y".to_string(),
            points: String::new(),
        };
        let mut relay = RelayResult::from_entry("NCAP", "A", "F", event);
        assert!(!relay.has_result());

        relay.round = "F".to_string();
        relay.time = "1:38.21".to_string();
        relay.legs.push("101".to_string());
        assert!(!relay.has_result());

        relay.filled = true;
        assert!(relay.has_result());

        let next = relay.reopen();
        assert!(!next.has_result());
        assert!(next.legs.is_empty());
        assert_eq!(next.event.event_no, "12");
        assert_eq!(next.relay_team, "A");
    }
}

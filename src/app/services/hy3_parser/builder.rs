//! Entity graph construction
//!
//! HY3 records carry no explicit parent keys: an athlete belongs to the team
//! record above it, a result to the athlete and event records above it. The
//! builder tracks those parents in a [`Context`] and advances it with
//! [`transition`], a pure function of the current context and one decoded
//! record. The resulting [`Emission`] is applied to the graph, where key
//! uniqueness and relay swimmer resolution are checked, and only then is
//! the next context committed.
//!
//! In non-strict mode a record that fails with a recoverable error is
//! skipped, and the context slots it would have set are cleared so later
//! records cannot attach to a stale parent.

use tracing::{debug, warn};

use super::checksum;
use super::classifier::ClassifiedLine;
use super::decoder::{DecodedRecord, decode};
use super::line_specs::line_spec;
use super::stats::ParseStats;
use crate::app::models::{
    Athlete, EventDescriptor, EventKind, FileHeader, IndividualResult, MeetGraph, MeetInfo,
    RelayResult, Team, parse_hy3_date,
};
use crate::config::ParseConfig;
use crate::constants::{RELAY_LEG_COUNT, record_types};
use crate::error::{Error, Result};

/// The athlete whose records are currently being read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentAthlete {
    pub mm_id: String,
    pub team: String,
}

/// Parents implied by record order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    pub current_team: Option<String>,
    pub current_athlete: Option<CurrentAthlete>,
    pub current_event: Option<EventDescriptor>,
    /// Index of the relay in the graph that result and swimmer records fill
    pub open_relay: Option<usize>,
}

impl Context {
    fn individual_event(&self) -> Option<&EventDescriptor> {
        self.current_event.as_ref().filter(|event| !event.is_relay())
    }

    fn relay_event(&self) -> Option<&EventDescriptor> {
        self.current_event.as_ref().filter(|event| event.is_relay())
    }
}

/// Result fields of a relay result record
#[derive(Debug, Clone, PartialEq)]
pub struct RelayOutcome {
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
    pub backup_time_3: String,
    pub touchpad_time: String,
    pub reaction_times: Vec<String>,
}

impl RelayOutcome {
    fn fill(self, relay: &mut RelayResult) {
        relay.round = self.round;
        relay.time = self.time;
        relay.course = self.course;
        relay.time_code = self.time_code;
        relay.heat = self.heat;
        relay.lane = self.lane;
        relay.heat_place = self.heat_place;
        relay.overall_place = self.overall_place;
        relay.points = self.points;
        relay.backup_time_1 = self.backup_time_1;
        relay.backup_time_2 = self.backup_time_2;
        relay.backup_time_3 = self.backup_time_3;
        relay.touchpad_time = self.touchpad_time;
        relay.leg_reaction_times = self.reaction_times;
        relay.filled = true;
    }
}

/// What one record contributes to the graph
#[derive(Debug, Clone, PartialEq)]
pub enum Emission {
    FileHeader(FileHeader),
    MeetInfo(MeetInfo),
    MeetCourse(String),
    Team(Team),
    Athlete(Athlete),
    IndividualResult(IndividualResult),
    /// Append a relay and make it the open relay
    RelayOpened(RelayResult),
    /// Fill the open relay, or a fresh copy of its entry if already filled
    RelayOutcome { relay: usize, outcome: RelayOutcome },
    /// Append swimmers to the open relay
    RelayLegs { relay: usize, legs: Vec<String> },
    /// Only the context changes
    Nothing,
}

/// Advance the context by one record
pub fn transition(context: &Context, record: &DecodedRecord) -> Result<(Context, Emission)> {
    let line = record.line_number;
    let type_code = record.type_code();

    match type_code {
        record_types::FILE_HEADER => Ok((
            context.clone(),
            Emission::FileHeader(FileHeader {
                result_type: record.get("result_type").to_string(),
                software_version: record.get("mm_version").to_string(),
                date_created: record.get("date_file_created").to_string(),
            }),
        )),

        record_types::MEET_INFO => Ok((
            context.clone(),
            Emission::MeetInfo(MeetInfo::new(
                record.get("meet_name"),
                record.get("facility_name"),
                record.get("meet_start_date"),
                record.get("meet_end_date"),
                record.get("elevation"),
            )),
        )),

        record_types::MEET_COURSE => Ok((
            context.clone(),
            Emission::MeetCourse(record.get("course").to_string()),
        )),

        record_types::TEAM => {
            let abbreviation = required(record, "team_abbreviation")?;
            let next = Context {
                current_team: Some(abbreviation.to_string()),
                ..Context::default()
            };
            let team = Team::new(
                abbreviation,
                record.get("full_team_name"),
                record.get("team_short_name"),
                record.get("team_lsc"),
            );
            Ok((next, Emission::Team(team)))
        }

        record_types::ATHLETE => {
            let team = context.current_team.clone().ok_or_else(|| {
                Error::context(line, type_code, "athlete record without a preceding team record")
            })?;
            let mm_id = required(record, "mm_id")?.to_string();

            let athlete = Athlete {
                mm_id: mm_id.clone(),
                gender: record.get("gender").to_string(),
                last_name: record.get("last_name").to_string(),
                first_name: record.get("first_name").to_string(),
                nick_name: record.get("nick_name").to_string(),
                usas_id: record.get("usas_id").to_string(),
                birth_date: parse_hy3_date(record.get("birth_date")),
                age: record.get("age").parse().ok(),
                team: team.clone(),
            };
            let next = Context {
                current_team: Some(team.clone()),
                current_athlete: Some(CurrentAthlete { mm_id, team }),
                current_event: None,
                open_relay: None,
            };
            Ok((next, Emission::Athlete(athlete)))
        }

        record_types::INDIVIDUAL_ENTRY => {
            let event = EventDescriptor {
                kind: EventKind::Individual,
                event_no: record.get("event_no").to_string(),
                stroke_code: record.get("stroke_code").to_string(),
                distance: record.get("distance").to_string(),
                seed_time: record.get("seed_time").to_string(),
                seed_course: record.get("seed_course").to_string(),
                points: record.get("points").to_string(),
            };
            let next = Context {
                current_event: Some(event),
                open_relay: None,
                ..context.clone()
            };
            Ok((next, Emission::Nothing))
        }

        record_types::INDIVIDUAL_RESULT => {
            let athlete = context.current_athlete.as_ref().ok_or_else(|| {
                Error::context(line, type_code, "result record without a preceding athlete record")
            })?;
            let event = context.individual_event().ok_or_else(|| {
                Error::context(
                    line,
                    type_code,
                    "result record without a preceding individual event record",
                )
            })?;

            let result = IndividualResult {
                athlete_id: athlete.mm_id.clone(),
                team: athlete.team.clone(),
                event: event.clone(),
                round: record.get("round").to_string(),
                time: record.get("time").to_string(),
                course: record.get("course").to_string(),
                time_code: record.get("time_code").to_string(),
                heat: record.get("heat").to_string(),
                lane: record.get("lane").to_string(),
                heat_place: record.get("heat_place").to_string(),
                overall_place: record.get("overall_place").to_string(),
                points: record.get("points").to_string(),
                backup_time_1: record.get("backup_time_1").to_string(),
                backup_time_2: record.get("backup_time_2").to_string(),
                reaction_time: record.get("reaction_time").to_string(),
            };
            Ok((context.clone(), Emission::IndividualResult(result)))
        }

        record_types::RELAY_ENTRY => {
            let team = context.current_team.clone().ok_or_else(|| {
                Error::context(line, type_code, "relay entry without a preceding team record")
            })?;
            let event = EventDescriptor {
                kind: EventKind::Relay,
                event_no: record.get("event_no").to_string(),
                stroke_code: record.get("stroke_code").to_string(),
                distance: record.get("distance").to_string(),
                seed_time: record.get("seed_time").to_string(),
                seed_course: String::new(),
                points: record.get("points").to_string(),
            };
            let relay = RelayResult::from_entry(
                team,
                record.get("relay_team"),
                record.get("gender"),
                event.clone(),
            );
            let next = Context {
                current_event: Some(event),
                open_relay: None,
                ..context.clone()
            };
            Ok((next, Emission::RelayOpened(relay)))
        }

        record_types::RELAY_RESULT => {
            let relay = open_relay(context, record)?;
            let outcome = RelayOutcome {
                round: record.get("round").to_string(),
                time: record.get("time").to_string(),
                course: record.get("course").to_string(),
                time_code: record.get("time_code").to_string(),
                heat: record.get("heat").to_string(),
                lane: record.get("lane").to_string(),
                heat_place: record.get("heat_place").to_string(),
                overall_place: record.get("overall_place").to_string(),
                points: record.get("points").to_string(),
                backup_time_1: record.get("backup_time_1").to_string(),
                backup_time_2: record.get("backup_time_2").to_string(),
                backup_time_3: record.get("backup_time_3").to_string(),
                touchpad_time: record.get("touchpad_time").to_string(),
                reaction_times: (1..=RELAY_LEG_COUNT)
                    .map(|leg| record.get(&format!("reaction_time_{}", leg)).to_string())
                    .collect(),
            };
            Ok((context.clone(), Emission::RelayOutcome { relay, outcome }))
        }

        record_types::RELAY_LEGS => {
            let relay = open_relay(context, record)?;
            let legs = (1..=RELAY_LEG_COUNT)
                .map(|leg| record.get(&format!("athlete_{}_mm_id", leg)))
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect();
            Ok((context.clone(), Emission::RelayLegs { relay, legs }))
        }

        _ => Ok((context.clone(), Emission::Nothing)),
    }
}

/// Context after skipping a record: the slots it would have set are cleared
pub fn clear_on_skip(context: &Context, type_code: &str) -> Context {
    match type_code {
        record_types::TEAM => Context::default(),
        record_types::ATHLETE => Context {
            current_team: context.current_team.clone(),
            ..Context::default()
        },
        record_types::INDIVIDUAL_ENTRY | record_types::RELAY_ENTRY => Context {
            current_event: None,
            open_relay: None,
            ..context.clone()
        },
        record_types::RELAY_RESULT => Context {
            open_relay: None,
            ..context.clone()
        },
        _ => context.clone(),
    }
}

/// Disagreement between an entry's own id and the context it appears under
pub fn consistency_warning(context: &Context, record: &DecodedRecord) -> Option<String> {
    match record.type_code() {
        record_types::INDIVIDUAL_ENTRY => {
            let listed = record.get("mm_athlete_id");
            let current = context.current_athlete.as_ref()?;
            (!listed.is_empty() && listed != current.mm_id).then(|| {
                format!(
                    "Line {}: entry for athlete '{}' listed under athlete '{}'",
                    record.line_number, listed, current.mm_id
                )
            })
        }
        record_types::RELAY_ENTRY => {
            let listed = record.get("team_abbr");
            let current = context.current_team.as_ref()?;
            (!listed.is_empty() && listed != current).then(|| {
                format!(
                    "Line {}: relay entry for team '{}' listed under team '{}'",
                    record.line_number, listed, current
                )
            })
        }
        _ => None,
    }
}

fn required<'r>(record: &'r DecodedRecord, field: &str) -> Result<&'r str> {
    let value = record.get(field);
    if value.is_empty() {
        Err(Error::context(
            record.line_number,
            record.type_code(),
            format!("record has a blank {}", field),
        ))
    } else {
        Ok(value)
    }
}

fn open_relay(context: &Context, record: &DecodedRecord) -> Result<usize> {
    let line = record.line_number;
    let type_code = record.type_code();
    if context.current_team.is_none() {
        return Err(Error::context(line, type_code, "relay record without a preceding team record"));
    }
    if context.relay_event().is_none() {
        return Err(Error::context(line, type_code, "relay record without a preceding relay entry"));
    }
    context
        .open_relay
        .ok_or_else(|| Error::context(line, type_code, "relay record without an open relay"))
}

/// Builds a [`MeetGraph`] one classified line at a time
#[derive(Debug)]
pub struct GraphBuilder {
    config: ParseConfig,
    graph: MeetGraph,
    context: Context,
    stats: ParseStats,
    first_type_code: Option<String>,
}

impl GraphBuilder {
    pub fn new(config: ParseConfig) -> Self {
        Self {
            config,
            graph: MeetGraph::new(),
            context: Context::default(),
            stats: ParseStats::new(),
            first_type_code: None,
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn graph(&self) -> &MeetGraph {
        &self.graph
    }

    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    pub(crate) fn stats_mut(&mut self) -> &mut ParseStats {
        &mut self.stats
    }

    /// Verify, decode and apply one line. Returns an error only when the
    /// parse must stop.
    pub fn feed(&mut self, line: &ClassifiedLine<'_>) -> Result<()> {
        self.stats.records_classified += 1;
        if self.first_type_code.is_none() {
            self.first_type_code = Some(line.type_code.to_string());
        }

        let Some(spec) = line_spec(line.type_code) else {
            self.stats.records_ignored += 1;
            debug!(
                "Line {}: ignoring record type {}",
                line.line_number, line.type_code
            );
            return Ok(());
        };

        let outcome = self
            .verify(line)
            .and_then(|()| decode(line))
            .and_then(|record| self.apply_record(&record));

        match outcome {
            Ok(()) => {
                self.stats.records_decoded += 1;
                Ok(())
            }
            Err(e) if e.is_recoverable() && !self.config.strict_mode => {
                let message = format!("{} record skipped: {}", spec.description, e);
                warn!("{}", message);
                self.context = clear_on_skip(&self.context, line.type_code);
                self.stats.record_skip(message);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Apply a decoded record: transition, update the graph, commit the context
    pub fn apply_record(&mut self, record: &DecodedRecord) -> Result<()> {
        let warning = consistency_warning(&self.context, record);
        let (mut next, emission) = transition(&self.context, record)?;
        self.apply(emission, record, &mut next)?;
        self.context = next;

        if let Some(warning) = warning {
            warn!("{}", warning);
            self.stats.record_warning(warning);
        }
        Ok(())
    }

    fn verify(&self, line: &ClassifiedLine<'_>) -> Result<()> {
        if self.config.validate_checksums {
            checksum::verify(line.line_number, line.raw)
        } else {
            Ok(())
        }
    }

    fn apply(&mut self, emission: Emission, record: &DecodedRecord, next: &mut Context) -> Result<()> {
        let line = record.line_number;
        match emission {
            Emission::FileHeader(header) => self.graph.set_file_header(header, line),
            Emission::MeetInfo(meet) => self.graph.set_meet_info(meet, line),
            Emission::MeetCourse(course) => match self.graph.meet_info.as_mut() {
                Some(meet) => {
                    meet.course = (!course.is_empty()).then_some(course);
                    Ok(())
                }
                None => Err(Error::context(
                    line,
                    record.type_code(),
                    "meet course record without a preceding meet record",
                )),
            },
            Emission::Team(team) => self.graph.insert_team(team, line),
            Emission::Athlete(athlete) => self.graph.insert_athlete(athlete, line),
            Emission::IndividualResult(result) => {
                self.graph.individual_results.push(result);
                Ok(())
            }
            Emission::RelayOpened(relay) => {
                next.open_relay = Some(self.graph.relay_results.len());
                self.graph.relay_results.push(relay);
                Ok(())
            }
            Emission::RelayOutcome { relay, outcome } => {
                let open = self.graph.relay_results.get_mut(relay).ok_or_else(|| {
                    Error::context(line, record.type_code(), "relay result for a missing relay")
                })?;
                if open.has_result() {
                    // Another round of the same entry
                    let mut fresh = open.reopen();
                    outcome.fill(&mut fresh);
                    next.open_relay = Some(self.graph.relay_results.len());
                    self.graph.relay_results.push(fresh);
                } else {
                    outcome.fill(open);
                }
                Ok(())
            }
            Emission::RelayLegs { relay, legs } => {
                if let Some(unknown) = legs.iter().find(|id| self.graph.athlete(id.as_str()).is_none()) {
                    return Err(Error::context(
                        line,
                        record.type_code(),
                        format!("relay swimmer '{}' is not a known athlete", unknown),
                    ));
                }
                let open = self.graph.relay_results.get_mut(relay).ok_or_else(|| {
                    Error::context(line, record.type_code(), "relay swimmers for a missing relay")
                })?;
                open.legs.extend(legs);
                Ok(())
            }
            Emission::Nothing => Ok(()),
        }
    }

    /// Finish the parse, adding structure warnings when enabled
    pub fn finish(mut self) -> (MeetGraph, ParseStats) {
        if self.config.check_structure {
            if self.first_type_code.as_deref() != Some(record_types::FILE_HEADER) {
                let warning = "file does not start with a file header (A1) record".to_string();
                warn!("{}", warning);
                self.stats.record_warning(warning);
            }
            if self.graph.meet_info.is_none() {
                let warning = "file has no meet information (B1) record".to_string();
                warn!("{}", warning);
                self.stats.record_warning(warning);
            }
        }
        (self.graph, self.stats)
    }
}

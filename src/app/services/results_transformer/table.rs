//! Tabular projection of the entity graph
//!
//! Flattens individual and relay results into string-typed polars frames,
//! one row per result. Athlete details are joined in from the athlete map.
//! Blank slots become nulls.

use polars::prelude::*;

use crate::Result;
use crate::app::models::{Athlete, IndividualResult, MeetGraph, RelayResult};
use crate::constants::{RELAY_LEG_COUNT, columns, relay_reaction_column, relay_swimmer_column};

/// Columns of the raw individual results frame
pub const INDIVIDUAL_FRAME_COLUMNS: &[&str] = &[
    columns::MM_ATHLETE_ID,
    columns::USAS_ID,
    columns::FIRST_NAME,
    columns::LAST_NAME,
    columns::GENDER,
    columns::TEAM,
    columns::EVENT_NO,
    columns::STROKE_CODE,
    columns::DISTANCE,
    columns::SEED_TIME,
    columns::ROUND,
    columns::TIME,
    columns::COURSE,
    columns::TIME_CODE,
    columns::HEAT,
    columns::LANE,
    columns::HEAT_PLACE,
    columns::OVERALL_PLACE,
    columns::POINTS,
    columns::BACKUP_TIME_1,
    columns::BACKUP_TIME_2,
    columns::REACTION_TIME,
];

/// Columns of the raw relay results frame, before the per-leg columns
pub const RELAY_FRAME_COLUMNS: &[&str] = &[
    columns::GENDER,
    columns::TEAM_ABBR,
    columns::RELAY_TEAM,
    columns::EVENT_NO,
    columns::STROKE_CODE,
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

/// Per-leg relay columns in export order: swimmer then reaction time, per leg
pub fn relay_leg_columns() -> Vec<String> {
    (1..=RELAY_LEG_COUNT)
        .flat_map(|leg| [relay_swimmer_column(leg), relay_reaction_column(leg)])
        .collect()
}

/// One row per individual result
pub fn individual_results_frame(graph: &MeetGraph) -> Result<DataFrame> {
    let names: Vec<String> = INDIVIDUAL_FRAME_COLUMNS
        .iter()
        .map(|name| name.to_string())
        .collect();
    let rows = graph
        .individual_results
        .iter()
        .map(|result| individual_row(graph, result))
        .collect();
    string_frame(&names, rows)
}

/// One row per relay result, with swimmers and reaction times flattened
pub fn relay_results_frame(graph: &MeetGraph) -> Result<DataFrame> {
    let names: Vec<String> = RELAY_FRAME_COLUMNS
        .iter()
        .map(|name| name.to_string())
        .chain(relay_leg_columns())
        .collect();
    let rows = graph.relay_results.iter().map(relay_row).collect();
    string_frame(&names, rows)
}

fn individual_row(graph: &MeetGraph, result: &IndividualResult) -> Vec<String> {
    let athlete = graph.athlete(&result.athlete_id);
    let athlete_field =
        |field: fn(&Athlete) -> &str| athlete.map(field).unwrap_or_default().to_string();

    vec![
        result.athlete_id.clone(),
        athlete_field(|a| a.usas_id.as_str()),
        athlete_field(|a| a.first_name.as_str()),
        athlete_field(|a| a.last_name.as_str()),
        athlete_field(|a| a.gender.as_str()),
        result.team.clone(),
        result.event.event_no.clone(),
        result.event.stroke_code.clone(),
        result.event.distance.clone(),
        result.event.seed_time.clone(),
        result.round.clone(),
        result.time.clone(),
        result.course.clone(),
        result.time_code.clone(),
        result.heat.clone(),
        result.lane.clone(),
        result.heat_place.clone(),
        result.overall_place.clone(),
        result.points.clone(),
        result.backup_time_1.clone(),
        result.backup_time_2.clone(),
        result.reaction_time.clone(),
    ]
}

fn relay_row(relay: &RelayResult) -> Vec<String> {
    let mut row = vec![
        relay.gender.clone(),
        relay.team.clone(),
        relay.relay_team.clone(),
        relay.event.event_no.clone(),
        relay.event.stroke_code.clone(),
        relay.event.distance.clone(),
        relay.event.seed_time.clone(),
        relay.round.clone(),
        relay.time.clone(),
        relay.time_code.clone(),
        relay.course.clone(),
        relay.heat.clone(),
        relay.lane.clone(),
        relay.heat_place.clone(),
        relay.overall_place.clone(),
        relay.points.clone(),
        relay.backup_time_1.clone(),
        relay.backup_time_2.clone(),
        relay.backup_time_3.clone(),
        relay.touchpad_time.clone(),
    ];
    for leg in 0..RELAY_LEG_COUNT {
        row.push(relay.legs.get(leg).cloned().unwrap_or_default());
        row.push(relay.leg_reaction_times.get(leg).cloned().unwrap_or_default());
    }
    row
}

/// Build a frame of nullable string columns from rows in column order
pub fn string_frame(names: &[String], rows: Vec<Vec<String>>) -> Result<DataFrame> {
    let columns = names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let values: Vec<Option<&str>> = rows
                .iter()
                .map(|row| {
                    row.get(index)
                        .map(String::as_str)
                        .filter(|value| !value.is_empty())
                })
                .collect();
            Column::new(name.as_str().into(), values)
        })
        .collect();
    Ok(DataFrame::new(columns)?)
}

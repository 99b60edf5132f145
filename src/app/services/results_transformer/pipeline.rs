//! Results pipeline orchestration
//!
//! Runs the transformer stages over a results frame in their required order:
//! stroke names, time normalization, time codes, display columns, seed ranks,
//! meet columns, and finally the export column order. Ranking reads numeric
//! seconds, so normalization must always run before it.

use polars::prelude::*;
use tracing::{debug, info};

use super::enrichment::{add_meet_columns, add_stroke_names};
use super::has_column;
use super::normalization::{add_display_columns, apply_time_codes, normalize_times};
use super::ranking::compute_seed_ranks;
use super::table::{individual_results_frame, relay_leg_columns, relay_results_frame};
use crate::Result;
use crate::app::models::{MeetGraph, MeetInfo};
use crate::constants::{
    INDIVIDUAL_COLUMN_ORDER, RELAY_BASE_COLUMN_ORDER, RELAY_TRAILING_COLUMNS, TIME_COLUMNS,
    columns,
};

/// Stage configuration for one kind of results table
#[derive(Debug, Clone)]
pub struct ResultsPipeline {
    /// Columns that identify one entry for ranking, besides the event number
    entry_columns: Vec<&'static str>,
    /// Export column order; absent columns are left out
    column_order: Vec<String>,
}

impl ResultsPipeline {
    /// Pipeline for individual results, entries keyed by athlete
    pub fn individual() -> Self {
        Self {
            entry_columns: vec![columns::MM_ATHLETE_ID],
            column_order: INDIVIDUAL_COLUMN_ORDER
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }

    /// Pipeline for relay results, entries keyed by team and relay letter
    pub fn relay() -> Self {
        let column_order = RELAY_BASE_COLUMN_ORDER
            .iter()
            .map(|name| name.to_string())
            .chain(relay_leg_columns())
            .chain(RELAY_TRAILING_COLUMNS.iter().map(|name| name.to_string()))
            .collect();
        Self {
            entry_columns: vec![columns::TEAM_ABBR, columns::RELAY_TEAM],
            column_order,
        }
    }

    /// Run every stage over a raw results frame
    pub fn run(&self, mut df: DataFrame, meet: Option<&MeetInfo>) -> Result<DataFrame> {
        info!("Starting results pipeline for {} rows", df.height());

        add_stroke_names(&mut df)?;
        normalize_times(&mut df, TIME_COLUMNS)?;
        apply_time_codes(&mut df)?;
        add_display_columns(&mut df, TIME_COLUMNS)?;
        compute_seed_ranks(
            &mut df,
            columns::EVENT_NO,
            columns::SEED_TIME,
            &self.entry_columns,
        )?;
        add_meet_columns(&mut df, meet)?;

        let ordered = self.order_columns(&df)?;
        info!(
            "Results pipeline complete: {} rows, {} columns",
            ordered.height(),
            ordered.width()
        );
        Ok(ordered)
    }

    fn order_columns(&self, df: &DataFrame) -> Result<DataFrame> {
        let present: Vec<&str> = self
            .column_order
            .iter()
            .map(String::as_str)
            .filter(|name| has_column(df, name))
            .collect();
        debug!(
            "Selecting {} of {} export columns",
            present.len(),
            self.column_order.len()
        );
        Ok(df.select(present)?)
    }
}

/// Individual results table after the full pipeline
pub fn individual_results_table(graph: &MeetGraph) -> Result<DataFrame> {
    let df = individual_results_frame(graph)?;
    ResultsPipeline::individual().run(df, graph.meet_info.as_ref())
}

/// Relay results table after the full pipeline
pub fn relay_results_table(graph: &MeetGraph) -> Result<DataFrame> {
    let df = relay_results_frame(graph)?;
    ResultsPipeline::relay().run(df, graph.meet_info.as_ref())
}

//! Parsed HY3 files
//!
//! [`Hy3File`] runs the classifier, decoder and graph builder over a whole
//! file and owns the resulting entity graph. [`parse_files`] does the same
//! for many files at once on blocking worker threads.

use futures::stream::{self, StreamExt};
use polars::prelude::DataFrame;
use std::path::{Path, PathBuf};
use tokio::task;
use tracing::{debug, info};

use super::builder::GraphBuilder;
use super::classifier::LineClassifier;
use super::stats::ParseStats;
use crate::app::models::{
    Athlete, FileHeader, IndividualResult, MeetGraph, MeetInfo, RelayResult, Team,
};
use crate::app::services::results_transformer;
use crate::config::ParseConfig;
use crate::error::{Error, Result};

/// A decoded HY3 file and its entity graph
#[derive(Debug, Clone)]
pub struct Hy3File {
    name: String,
    graph: MeetGraph,
    stats: ParseStats,
}

impl Hy3File {
    /// Read and parse a file from disk
    ///
    /// # Arguments
    ///
    /// * `path` - HY3 file to read; decoded one byte per character
    /// * `config` - Strictness and checksum settings for the parse
    ///
    /// # Returns
    ///
    /// The parsed file, `Error::Io` when it cannot be read, or the first
    /// fatal parse error
    pub fn open(path: impl AsRef<Path>, config: ParseConfig) -> Result<Self> {
        let path = path.as_ref();
        info!("Parsing HY3 file: {}", path.display());

        let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
        let text = decode_latin1(&bytes);
        Self::parse_str(path.display().to_string(), &text, config)
    }

    /// Parse file content that is already in memory
    pub fn parse_str(name: impl Into<String>, text: &str, config: ParseConfig) -> Result<Self> {
        let name = name.into();
        let mut builder = GraphBuilder::new(config);
        builder.stats_mut().total_lines = text.lines().count();

        for line in LineClassifier::new(text).iter() {
            builder.feed(&line)?;
        }

        let (graph, stats) = builder.finish();
        info!(
            "Parsed {}: {} teams, {} athletes, {} individual results, {} relay results ({} records skipped)",
            name,
            graph.teams().len(),
            graph.athletes().len(),
            graph.individual_results.len(),
            graph.relay_results.len(),
            stats.records_skipped
        );

        Ok(Self { name, graph, stats })
    }

    /// Path or label the file was parsed from
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn graph(&self) -> &MeetGraph {
        &self.graph
    }

    pub fn file_header(&self) -> Option<&FileHeader> {
        self.graph.file_header.as_ref()
    }

    pub fn meet_info(&self) -> Option<&MeetInfo> {
        self.graph.meet_info.as_ref()
    }

    pub fn teams(&self) -> &[Team] {
        self.graph.teams()
    }

    pub fn athletes(&self) -> &[Athlete] {
        self.graph.athletes()
    }

    pub fn individual_results(&self) -> &[IndividualResult] {
        &self.graph.individual_results
    }

    pub fn relay_results(&self) -> &[RelayResult] {
        &self.graph.relay_results
    }

    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    /// Individual results after the full transformer pipeline
    pub fn individual_results_table(&self) -> Result<DataFrame> {
        results_transformer::individual_results_table(&self.graph)
    }

    /// Relay results after the full transformer pipeline
    pub fn relay_results_table(&self) -> Result<DataFrame> {
        results_transformer::relay_results_table(&self.graph)
    }
}

/// Decode file bytes one byte per character so column offsets hold for any
/// single-byte export encoding
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&byte| char::from(byte)).collect()
}

/// Parse several files concurrently, one file per blocking worker.
/// Results come back in the order of `paths`.
///
/// # Arguments
///
/// * `paths` - Files to parse
/// * `config` - Shared parse settings; `workers` caps the concurrency
///
/// # Returns
///
/// One result per path. A failed file does not stop the others.
pub async fn parse_files(paths: Vec<PathBuf>, config: ParseConfig) -> Vec<Result<Hy3File>> {
    let workers = config.workers.max(1);
    info!("Parsing {} HY3 files with {} workers", paths.len(), workers);

    let mut indexed = stream::iter(paths.into_iter().enumerate())
        .map(|(index, path)| {
            let config = config.clone();
            async move {
                let path_for_task = path.clone();
                let result = task::spawn_blocking(move || Hy3File::open(&path_for_task, config))
                    .await
                    .unwrap_or_else(|e| Err(Error::worker(path, e.to_string())));
                (index, result)
            }
        })
        .buffer_unordered(workers)
        .collect::<Vec<_>>()
        .await;

    indexed.sort_by_key(|(index, _)| *index);
    debug!("Batch parse finished for {} files", indexed.len());
    indexed.into_iter().map(|(_, result)| result).collect()
}

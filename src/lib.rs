//! HY3 Processor Library
//!
//! A Rust library for decoding Hy-Tek HY3 swim-meet exports into an entity
//! graph of teams, athletes and results, and projecting those results into
//! analysis-ready polars DataFrames.
//!
//! This library provides tools for:
//! - Classifying and slicing fixed-column HY3 record lines
//! - Verifying per-line checksums
//! - Building the meet graph with strict or forgiving error handling
//! - Parsing and formatting swim times in exact decimal arithmetic
//! - Normalizing, enriching and seed-ranking results tables
//! - Parsing batches of files concurrently
//!
//! # Example
//!
//! ```rust,no_run
//! use hy3_processor::{Hy3File, ParseConfig};
//!
//! # fn example() -> hy3_processor::Result<()> {
//! let file = Hy3File::open("meet.hy3", ParseConfig::default())?;
//! println!("{} athletes", file.athletes().len());
//!
//! let results = file.individual_results_table()?;
//! println!("{}", results.head(Some(10)));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod hy3_parser;
        pub mod results_transformer;
        pub mod time_codec;
    }
}

// Re-export commonly used types
pub use app::models::{Athlete, MeetGraph, MeetInfo, Team};
pub use app::services::hy3_parser::{Hy3File, ParseStats, parse_files};
pub use config::ParseConfig;
pub use error::{Error, Result};

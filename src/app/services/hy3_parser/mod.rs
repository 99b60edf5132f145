//! HY3 parser for swim meet result files
//!
//! HY3 files are line-oriented exports from meet-management software. Every
//! line starts with a two-character record type code, holds fixed-column
//! fields, and ends with a two-digit checksum. Records carry no parent keys:
//! which team, athlete or event a record belongs to is implied by the records
//! above it.
//!
//! ## Architecture
//!
//! - [`classifier`] - Splits text into lines tagged with their type code
//! - [`line_specs`] - Fixed column layouts per record type
//! - [`decoder`] - Slices a line into named string fields
//! - [`checksum`] - Line checksum computation and verification
//! - [`builder`] - Context reducer that assembles the entity graph
//! - [`parser`] - File level entry points and batch parsing
//! - [`stats`] - Parsing statistics
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hy3_processor::app::services::hy3_parser::Hy3File;
//! use hy3_processor::config::ParseConfig;
//!
//! # fn example() -> hy3_processor::Result<()> {
//! let file = Hy3File::open("meet.hy3", ParseConfig::default())?;
//!
//! println!("{} athletes, {} results",
//!          file.athletes().len(),
//!          file.individual_results().len());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod checksum;
pub mod classifier;
pub mod decoder;
pub mod line_specs;
pub mod parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use builder::{Context, Emission, GraphBuilder, transition};
pub use classifier::{ClassifiedLine, LineClassifier};
pub use decoder::{DecodedRecord, decode};
pub use parser::{Hy3File, parse_files};
pub use stats::ParseStats;

//! Parsing statistics for HY3 processing
//!
//! Counts what happened to each line of a file and keeps the messages of
//! records that were skipped in non-strict mode.

use serde::{Deserialize, Serialize};

/// Per-file parsing statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Total number of lines in the file, blank lines included
    pub total_lines: usize,

    /// Lines that carried a well-formed type code
    pub records_classified: usize,

    /// Records decoded and applied to the entity graph
    pub records_decoded: usize,

    /// Records dropped after a decode, context or checksum error
    pub records_skipped: usize,

    /// Records with a type code that has no layout
    pub records_ignored: usize,

    /// Messages of the skipped records
    pub errors: Vec<String>,

    /// Structural and consistency warnings
    pub warnings: Vec<String>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            total_lines: 0,
            records_classified: 0,
            records_decoded: 0,
            records_skipped: 0,
            records_ignored: 0,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Decoded records as a percentage of records with a layout
    pub fn success_rate(&self) -> f64 {
        let attempted = self.records_decoded + self.records_skipped;
        if attempted == 0 {
            0.0
        } else {
            (self.records_decoded as f64 / attempted as f64) * 100.0
        }
    }

    /// Check if parsing was mostly successful (>90% success rate)
    pub fn is_successful(&self) -> bool {
        self.success_rate() > 90.0
    }

    pub(crate) fn record_skip(&mut self, message: String) {
        self.records_skipped += 1;
        self.errors.push(message);
    }

    pub(crate) fn record_warning(&mut self, message: String) {
        self.warnings.push(message);
    }
}

impl Default for ParseStats {
    fn default() -> Self {
        Self::new()
    }
}

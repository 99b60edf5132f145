//! Configuration for HY3 parsing.
//!
//! Provides the options that control how strictly a file is decoded and how
//! many files are parsed concurrently by the batch API.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Parse options for a single file or a batch of files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseConfig {
    /// Abort on the first decode, context or checksum error instead of
    /// skipping the offending record
    pub strict_mode: bool,

    /// Verify the two-character checksum at the end of each record
    pub validate_checksums: bool,

    /// Warn when the file does not start with A1 or has no B1 record
    pub check_structure: bool,

    /// Number of files parsed concurrently by `parse_files`
    pub workers: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            strict_mode: false,
            validate_checksums: true,
            check_structure: true,
            workers: num_cpus::get(),
        }
    }
}

impl ParseConfig {
    /// Create configuration that aborts on the first recoverable error
    pub fn strict() -> Self {
        Self::default().with_strict_mode(true)
    }

    /// Set strict mode
    pub fn with_strict_mode(mut self, strict_mode: bool) -> Self {
        self.strict_mode = strict_mode;
        self
    }

    /// Disable checksum verification
    pub fn without_checksums(mut self) -> Self {
        self.validate_checksums = false;
        self
    }

    /// Disable file structure warnings
    pub fn without_structure_checks(mut self) -> Self {
        self.check_structure = false;
        self
    }

    /// Create configuration with custom worker count (minimum 1)
    pub fn with_workers(mut self, workers: usize) -> Self {
        if workers == 0 {
            debug!("Worker count 0 requested, using 1");
        }
        self.workers = workers.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParseConfig::default();
        assert!(!config.strict_mode);
        assert!(config.validate_checksums);
        assert!(config.check_structure);
        assert!(config.workers >= 1);
    }

    #[test]
    fn test_builders() {
        let config = ParseConfig::strict()
            .without_checksums()
            .without_structure_checks()
            .with_workers(0);
        assert!(config.strict_mode);
        assert!(!config.validate_checksums);
        assert!(!config.check_structure);
        assert_eq!(config.workers, 1);
    }
}

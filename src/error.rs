//! Error handling for HY3 decoding and results processing.
//!
//! One error type covers the whole crate. The variants fall into three groups:
//! record-level problems the graph builder may skip in non-strict mode
//! ([`Error::Decode`], [`Error::Context`], [`Error::Checksum`]), data-integrity
//! problems that always abort a parse ([`Error::DuplicateKey`]), and
//! programmer-facing failures from the transformer pipeline
//! ([`Error::RankPrecondition`], [`Error::ColumnNotFound`], [`Error::Polars`]).

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for HY3 processing
pub type Result<T> = std::result::Result<T, Error>;

/// Why a line could not be sliced into its fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeFailure {
    /// Line is shorter than the minimum width for its record type
    TooShort { width: usize, required: usize },
    /// No field layout exists for the type code
    UnsupportedType,
}

impl fmt::Display for DecodeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeFailure::TooShort { width, required } => {
                write!(f, "line is {} columns wide, at least {} required", width, required)
            }
            DecodeFailure::UnsupportedType => write!(f, "no field layout for this record type"),
        }
    }
}

/// Kind of keyed entity involved in a duplicate-key collision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    FileHeader,
    MeetInfo,
    Team,
    Athlete,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyKind::FileHeader => "file header",
            KeyKind::MeetInfo => "meet info",
            KeyKind::Team => "team",
            KeyKind::Athlete => "athlete",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Line {line} ({type_code}): cannot decode record: {reason} [{raw_line}]")]
    Decode {
        line: usize,
        type_code: String,
        raw_line: String,
        reason: DecodeFailure,
    },

    #[error("Line {line} ({type_code}): {message}")]
    Context {
        line: usize,
        type_code: String,
        message: String,
    },

    #[error("Line {line}: duplicate {kind} key '{key}'")]
    DuplicateKey {
        line: usize,
        kind: KeyKind,
        key: String,
    },

    #[error("Line {line}: checksum mismatch, expected {expected}, found {actual}")]
    Checksum {
        line: usize,
        expected: String,
        actual: String,
    },

    #[error("Unrecognized time value '{value}'{}", location_suffix(.column, .row))]
    TimeParse {
        value: String,
        column: Option<String>,
        row: Option<usize>,
    },

    #[error("Cannot format time value {value}: {reason}")]
    TimeFormat { value: f64, reason: String },

    #[error("Failed to rank column '{column}': column has dtype {dtype}, a numeric column is required")]
    RankPrecondition { column: String, dtype: String },

    #[error("Column '{column}' not found in results table")]
    ColumnNotFound { column: String },

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Worker failed while parsing {path}: {message}")]
    Worker { path: PathBuf, message: String },
}

fn location_suffix(column: &Option<String>, row: &Option<usize>) -> String {
    match (column, row) {
        (Some(column), Some(row)) => format!(" in column '{}' at row {}", column, row),
        (Some(column), None) => format!(" in column '{}'", column),
        (None, Some(row)) => format!(" at row {}", row),
        (None, None) => String::new(),
    }
}

impl Error {
    /// Create an I/O error for a file path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a decode error for a raw line
    pub fn decode(
        line: usize,
        type_code: impl Into<String>,
        raw_line: impl Into<String>,
        reason: DecodeFailure,
    ) -> Self {
        Self::Decode {
            line,
            type_code: type_code.into(),
            raw_line: raw_line.into(),
            reason,
        }
    }

    /// Create a context error for a record seen without its parent
    pub fn context(line: usize, type_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Context {
            line,
            type_code: type_code.into(),
            message: message.into(),
        }
    }

    /// Create a duplicate-key error
    pub fn duplicate_key(line: usize, kind: KeyKind, key: impl Into<String>) -> Self {
        Self::DuplicateKey {
            line,
            kind,
            key: key.into(),
        }
    }

    /// Create a checksum mismatch error
    pub fn checksum(line: usize, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::Checksum {
            line,
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a time parse error without table location
    pub fn time_parse(value: impl Into<String>) -> Self {
        Self::TimeParse {
            value: value.into(),
            column: None,
            row: None,
        }
    }

    /// Create a time formatting error
    pub fn time_format(value: f64, reason: impl Into<String>) -> Self {
        Self::TimeFormat {
            value,
            reason: reason.into(),
        }
    }

    /// Create a ranking precondition error
    pub fn rank_precondition(column: impl Into<String>, dtype: impl fmt::Display) -> Self {
        Self::RankPrecondition {
            column: column.into(),
            dtype: dtype.to_string(),
        }
    }

    /// Create a missing column error
    pub fn column_not_found(column: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
        }
    }

    /// Create a worker failure error
    pub fn worker(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Worker {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Attach table location to a time parse error
    pub fn at_cell(self, column: &str, row: usize) -> Self {
        match self {
            Self::TimeParse { value, .. } => Self::TimeParse {
                value,
                column: Some(column.to_string()),
                row: Some(row),
            },
            other => other,
        }
    }

    /// Whether non-strict parsing may skip the offending record and continue
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Decode { .. } | Self::Context { .. } | Self::Checksum { .. }
        )
    }
}

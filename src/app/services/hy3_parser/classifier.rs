//! Line classification
//!
//! Splits file text into lines and tags each with its two-character type
//! code. Blank lines and lines that do not start with an uppercase letter
//! followed by a digit are skipped.

use crate::constants::TYPE_CODE_WIDTH;

/// A line tagged with its type code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedLine<'a> {
    /// 1-based line number in the file
    pub line_number: usize,
    pub type_code: &'a str,
    /// Full line without the line terminator
    pub raw: &'a str,
}

/// Restartable classifier over borrowed file text
#[derive(Debug, Clone, Copy)]
pub struct LineClassifier<'a> {
    text: &'a str,
}

impl<'a> LineClassifier<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Lazily classify the text from the first line. Each call starts over.
    pub fn iter(&self) -> impl Iterator<Item = ClassifiedLine<'a>> + 'a {
        self.text
            .lines()
            .enumerate()
            .filter_map(|(index, line)| {
                let raw = line.trim_end_matches('\r');
                type_code(raw).map(|type_code| ClassifiedLine {
                    line_number: index + 1,
                    type_code,
                    raw,
                })
            })
    }
}

/// The type code of a line, if it starts with a well-formed one
pub fn type_code(line: &str) -> Option<&str> {
    let bytes = line.as_bytes();
    if bytes.len() < TYPE_CODE_WIDTH {
        return None;
    }
    if bytes[0].is_ascii_uppercase() && bytes[1].is_ascii_digit() {
        Some(&line[..TYPE_CODE_WIDTH])
    } else {
        None
    }
}

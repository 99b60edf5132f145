//! Record decoding
//!
//! Slices a classified line into the named, trimmed string fields of its
//! layout. No numeric conversion happens here.

use super::classifier::ClassifiedLine;
use super::line_specs::{LineSpec, line_spec};
use crate::error::{DecodeFailure, Error, Result};

/// A line sliced into its fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRecord {
    pub line_number: usize,
    pub spec: &'static LineSpec,
    values: Vec<String>,
}

impl DecodedRecord {
    pub fn type_code(&self) -> &'static str {
        self.spec.type_code
    }

    /// Trimmed value of a field. Blank slots and names outside the layout give "".
    pub fn get(&self, name: &str) -> &str {
        self.spec
            .fields
            .iter()
            .position(|field| field.name == name)
            .and_then(|index| self.values.get(index))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Field names with their values, in layout order
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.spec
            .fields
            .iter()
            .zip(&self.values)
            .map(|(field, value)| (field.name, value.as_str()))
    }
}

/// Decode a classified line with the layout of its type code
pub fn decode(line: &ClassifiedLine<'_>) -> Result<DecodedRecord> {
    decode_raw(line.line_number, line.type_code, line.raw)
}

/// Decode a raw line for a given type code
pub fn decode_raw(line_number: usize, type_code: &str, raw_line: &str) -> Result<DecodedRecord> {
    let spec = line_spec(type_code).ok_or_else(|| {
        Error::decode(line_number, type_code, raw_line, DecodeFailure::UnsupportedType)
    })?;

    let width = raw_line.chars().count();
    if width < spec.min_width {
        return Err(Error::decode(
            line_number,
            type_code,
            raw_line,
            DecodeFailure::TooShort {
                width,
                required: spec.min_width,
            },
        ));
    }

    let values = spec
        .fields
        .iter()
        .map(|field| column_slice(raw_line, field.start, field.end).trim().to_string())
        .collect();

    Ok(DecodedRecord {
        line_number,
        spec,
        values,
    })
}

/// Character columns `[start, end)` of a line, clamped to its width
fn column_slice(line: &str, start: usize, end: usize) -> &str {
    if line.is_ascii() {
        let end = end.min(line.len());
        return if start >= end { "" } else { &line[start..end] };
    }

    let byte_offset = |column: usize| {
        line.char_indices()
            .nth(column)
            .map(|(offset, _)| offset)
            .unwrap_or(line.len())
    };
    let (start, end) = (byte_offset(start), byte_offset(end));
    if start >= end { "" } else { &line[start..end] }
}

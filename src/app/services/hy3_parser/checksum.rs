//! HY3 line checksums
//!
//! The last two characters of every record are a checksum over the rest of
//! the line: characters at even positions count once, characters at odd
//! positions twice. The sum is divided by 21 and offset by 205; the checksum
//! is the last digit of that value followed by the digit before it.

use crate::constants::CHECKSUM_WIDTH;
use crate::error::{Error, Result};

/// Checksum of record content (the line without its checksum characters)
pub fn compute(content: &str) -> String {
    let sum: u64 = content
        .chars()
        .enumerate()
        .map(|(index, ch)| {
            let weight = if index % 2 == 1 { 2 } else { 1 };
            u64::from(u32::from(ch)) * weight
        })
        .sum();

    let value = (sum / 21 + 205).to_string();
    value.chars().rev().take(CHECKSUM_WIDTH).collect()
}

/// Split a line into its content and trailing checksum characters
pub fn split(line: &str) -> (&str, &str) {
    let width = line.chars().count();
    let boundary = line
        .char_indices()
        .nth(width.saturating_sub(CHECKSUM_WIDTH))
        .map(|(offset, _)| offset)
        .unwrap_or(line.len());
    line.split_at(boundary)
}

/// Check the trailing checksum of a line
pub fn verify(line_number: usize, line: &str) -> Result<()> {
    let (content, actual) = split(line);
    let expected = compute(content);
    if expected == actual {
        Ok(())
    } else {
        Err(Error::checksum(line_number, expected, actual))
    }
}

/// Append the checksum for a line of record content
pub fn with_checksum(content: &str) -> String {
    format!("{}{}", content, compute(content))
}

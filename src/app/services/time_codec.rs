//! Swim time parsing and formatting
//!
//! Times appear in HY3 files as `M:SS.hh`, `SS.hh`, or plain seconds with
//! extra decimals (`48.5000`), and time slots may hold a sentinel token such
//! as `DQ` or `NT` instead of a time. Parsing is done in exact decimal
//! arithmetic and converted to the nearest `f64` at the end.
//!
//! Formatting rounds the exact binary value of the `f64` to hundredths, with
//! exact halves going to the even digit. `59.995` is stored just below the
//! half and gives `59.99`; `0.375` is an exact half and gives `0.38`.

use regex::Regex;
use rust_decimal::prelude::*;
use std::sync::LazyLock;

use crate::constants::is_time_sentinel;
use crate::error::{Error, Result};

static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?P<minutes>\d+):)?(?P<seconds>\d+(?:\.\d+)?)$").expect("valid time regex")
});

const SECONDS_PER_MINUTE: i64 = 60;
const HUNDREDTHS_PER_MINUTE: i128 = 6000;

/// Parse a time string into seconds. Blank values and sentinels give `None`.
pub fn parse(raw: &str) -> Result<Option<f64>> {
    let value = raw.trim();
    if value.is_empty() || is_time_sentinel(value) {
        return Ok(None);
    }

    let captures = TIME_RE
        .captures(value)
        .ok_or_else(|| Error::time_parse(value))?;

    let seconds =
        Decimal::from_str_exact(&captures["seconds"]).map_err(|_| Error::time_parse(value))?;

    let total = match captures.name("minutes") {
        Some(minutes) => {
            if seconds >= Decimal::from(SECONDS_PER_MINUTE) {
                return Err(Error::time_parse(value));
            }
            let minutes =
                Decimal::from_str_exact(minutes.as_str()).map_err(|_| Error::time_parse(value))?;
            minutes
                .checked_mul(Decimal::from(SECONDS_PER_MINUTE))
                .and_then(|whole| whole.checked_add(seconds))
                .ok_or_else(|| Error::time_parse(value))?
        }
        None => seconds,
    };

    total
        .to_string()
        .parse::<f64>()
        .map(Some)
        .map_err(|_| Error::time_parse(value))
}

/// Format seconds with exactly two decimals, e.g. `"60.00"`
pub fn format(seconds: f64) -> Result<String> {
    Ok(hundredths(seconds)?.to_string())
}

/// Format seconds the way results are shown: `"45.67"`, `"1:23.45"`
pub fn display(seconds: f64) -> Result<String> {
    let total = hundredths(seconds)?.mantissa();
    let minutes = total / HUNDREDTHS_PER_MINUTE;
    let remainder = total % HUNDREDTHS_PER_MINUTE;

    if minutes > 0 {
        Ok(format!(
            "{}:{:02}.{:02}",
            minutes,
            remainder / 100,
            remainder % 100
        ))
    } else {
        Ok(format!("{}.{:02}", remainder / 100, remainder % 100))
    }
}

/// Seconds rounded to hundredths, at a fixed scale of 2
fn hundredths(seconds: f64) -> Result<Decimal> {
    if !seconds.is_finite() {
        return Err(Error::time_format(seconds, "value is not finite"));
    }
    if seconds < 0.0 {
        return Err(Error::time_format(seconds, "value is negative"));
    }

    let exact = Decimal::from_f64_retain(seconds)
        .ok_or_else(|| Error::time_format(seconds, "value is out of range"))?;
    let mut rounded = exact.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(2);
    Ok(rounded)
}

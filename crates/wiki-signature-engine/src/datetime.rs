//! Date parsing and "time ago" formatting used by signatures.
//!
//! Timestamps are ISO-8601. Values that carry no offset are read in the
//! requester's timezone.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use regex::{Captures, Regex};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateParseError {
    #[error("No date given")]
    Empty,

    #[error(
        "\"{input}\" is an invalid date, or the date format is not known. \
         Try \"YYYY-MM-DDThh:mm:ss±hh:mm\" instead."
    )]
    Invalid { input: String },
}

/// How much of the time of day a timestamp spelled out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimePrecision {
    Hours,
    Minutes,
    Seconds,
}

impl TimePrecision {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hours => "hours",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
        }
    }
}

static ISO8601: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        ^(?P<year>\d{4})-(?P<month>\d{2})-(?P<day>\d{2})
        (?:[T\x20]
            (?P<hour>\d{2})
            (?::(?P<minute>\d{2})
                (?::(?P<second>\d{2})
                    (?:[.,](?P<fraction>\d+))?
                )?
            )?
        )?
        \s*
        (?P<offset>[Zz]|[+-]\d{2}(?::?\d{2})?)?$
        ",
    )
    .expect("ISO-8601 pattern is valid")
});

/// Parses an ISO-8601 timestamp.
///
/// Accepts a bare date, a date with hours, minutes, seconds and fractional
/// seconds, `T` or a space between date and time, and an optional `Z`,
/// `±hh:mm`, `±hhmm` or `±hh` offset. Without an offset the value is taken
/// to be in `tz`.
pub fn parse_date(text: &str, tz: FixedOffset) -> Result<DateTime<FixedOffset>, DateParseError> {
    parse_date_with_precision(text, tz).map(|(moment, _)| moment)
}

/// Like [`parse_date`], also reporting how precise the time of day was.
/// A bare date has no precision.
pub fn parse_date_with_precision(
    text: &str,
    tz: FixedOffset,
) -> Result<(DateTime<FixedOffset>, Option<TimePrecision>), DateParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DateParseError::Empty);
    }
    let invalid = || DateParseError::Invalid {
        input: text.to_string(),
    };

    let caps = ISO8601.captures(text).ok_or_else(invalid)?;
    let date = NaiveDate::from_ymd_opt(
        number(&caps, "year").ok_or_else(invalid)? as i32,
        number(&caps, "month").ok_or_else(invalid)?,
        number(&caps, "day").ok_or_else(invalid)?,
    )
    .ok_or_else(invalid)?;

    let precision = if caps.name("second").is_some() {
        Some(TimePrecision::Seconds)
    } else if caps.name("minute").is_some() {
        Some(TimePrecision::Minutes)
    } else if caps.name("hour").is_some() {
        Some(TimePrecision::Hours)
    } else {
        None
    };
    let time = NaiveTime::from_hms_nano_opt(
        number(&caps, "hour").unwrap_or(0),
        number(&caps, "minute").unwrap_or(0),
        number(&caps, "second").unwrap_or(0),
        caps.name("fraction").map_or(0, |f| nanos(f.as_str())),
    )
    .ok_or_else(invalid)?;

    let offset = match caps.name("offset") {
        Some(m) => parse_offset(m.as_str()).ok_or_else(invalid)?,
        None => tz,
    };
    let moment = date
        .and_time(time)
        .and_local_timezone(offset)
        .single()
        .ok_or_else(invalid)?;
    Ok((moment, precision))
}

fn number(caps: &Captures<'_>, name: &str) -> Option<u32> {
    caps.name(name)?.as_str().parse().ok()
}

/// Right-pads or truncates a decimal fraction to nanoseconds.
fn nanos(fraction: &str) -> u32 {
    let digits: String = fraction.chars().chain(std::iter::repeat('0')).take(9).collect();
    digits.parse().unwrap_or(0)
}

/// Parses `Z`, `±hh`, `±hhmm` or `±hh:mm`.
pub fn parse_offset(text: &str) -> Option<FixedOffset> {
    if text.eq_ignore_ascii_case("z") {
        return FixedOffset::east_opt(0);
    }
    let (sign, rest) = match text.as_bytes().first()? {
        b'+' => (1, &text[1..]),
        b'-' => (-1, &text[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Formats a moment as ISO-8601 with seconds and a numeric offset,
/// e.g. `2024-01-01T00:00:00+00:00`.
pub fn format_iso8601(moment: &DateTime<FixedOffset>) -> String {
    moment.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

const UNITS: [(i64, &str, &str); 6] = [
    (365 * DAY, "year", "years"),
    (30 * DAY, "month", "months"),
    (7 * DAY, "week", "weeks"),
    (DAY, "day", "days"),
    (HOUR, "hour", "hours"),
    (MINUTE, "minute", "minutes"),
];

/// Threshold ratio before a unit is used, so 100 seconds stays "100 seconds"
/// rather than "2 minutes".
const UNIT_THRESHOLD: f64 = 1.9;

/// Imprecise, human-friendly distance between two moments, e.g. `3 months`.
///
/// The order of the arguments does not matter.
pub fn pretty_timedelta(a: &DateTime<FixedOffset>, b: &DateTime<FixedOffset>) -> String {
    let age = (*a - *b).num_seconds().abs();
    if (age as f64) <= MINUTE as f64 * UNIT_THRESHOLD {
        return plural(age, "second", "seconds");
    }
    for (unit, one, many) in UNITS {
        let ratio = age as f64 / unit as f64;
        if ratio >= UNIT_THRESHOLD {
            return plural(ratio.round() as i64, one, many);
        }
    }
    String::new()
}

fn plural(n: i64, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// `"<distance> ago"` for a moment at or before `now`, otherwise
/// `"<distance> in the future"`.
pub fn relative_label(moment: &DateTime<FixedOffset>, now: &DateTime<FixedOffset>) -> String {
    let suffix = if moment <= now { "ago" } else { "in the future" };
    format!("{} {suffix}", pretty_timedelta(moment, now))
}

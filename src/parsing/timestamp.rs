//! Timestamp parsing strategies.
//!
//! Exports write dates in two very different ways:
//!
//! - HTML pages show human-readable, locale-dependent text such as
//!   `Friday, January 1, 2021 at 3:00 PM UTC+01`.
//! - JSON files use ISO-8601 strings, `YYYY-MM-DD HH:MM:SS+ZZZZ` strings or
//!   Unix seconds.
//!
//! Each entry point tries an ordered list of layouts. A layout either
//! produces a typed value or declines; the first success wins.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use regex::{Captures, Regex};

use crate::post::Timestamp;

/// Format used by JSON entries whose timestamp has no `T` separator.
pub const OFFSET_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%z";

/// One way of reading a timestamp string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    /// Full date-time with a UTC offset in the text.
    Zoned(&'static str),
    /// Full date-time without offset.
    Naive(&'static str),
    /// Date only; the time is midnight.
    Date(&'static str),
}

impl Layout {
    fn apply(self, input: &str) -> Option<Timestamp> {
        match self {
            Layout::Zoned(fmt) => DateTime::parse_from_str(input, fmt)
                .ok()
                .map(Timestamp::Zoned),
            Layout::Naive(fmt) => NaiveDateTime::parse_from_str(input, fmt)
                .ok()
                .map(Timestamp::Naive),
            Layout::Date(fmt) => NaiveDate::parse_from_str(input, fmt)
                .ok()
                .map(|date| Timestamp::Naive(date.and_time(chrono::NaiveTime::MIN))),
        }
    }
}

fn first_match(layouts: &[Layout], input: &str) -> Option<Timestamp> {
    layouts.iter().find_map(|layout| layout.apply(input))
}

// ============================================================================
// HTML link text
// ============================================================================

/// Layouts for normalized link text: no commas, single spaces, upper-case
/// `AM`/`PM` separated from the time, zone suffix removed.
const DISPLAY_LAYOUTS: &[Layout] = &[
    // January 1 2021 3:00 PM
    Layout::Naive("%B %d %Y %I:%M:%S %p"),
    Layout::Naive("%B %d %Y %I:%M %p"),
    Layout::Naive("%B %d %Y %H:%M:%S"),
    Layout::Naive("%B %d %Y %H:%M"),
    // 1 January 2021 15:00
    Layout::Naive("%d %B %Y %I:%M:%S %p"),
    Layout::Naive("%d %B %Y %I:%M %p"),
    Layout::Naive("%d %B %Y %H:%M:%S"),
    Layout::Naive("%d %B %Y %H:%M"),
    // 2021-01-01 15:00:00
    Layout::Naive("%Y-%m-%d %H:%M:%S%.f"),
    Layout::Naive("%Y-%m-%d %H:%M"),
    Layout::Naive("%Y-%m-%dT%H:%M:%S%.f"),
    Layout::Naive("%Y-%m-%dT%H:%M"),
    // 01/01/2021 3:00 PM (month first)
    Layout::Naive("%m/%d/%Y %I:%M:%S %p"),
    Layout::Naive("%m/%d/%Y %I:%M %p"),
    Layout::Naive("%m/%d/%Y %H:%M:%S"),
    Layout::Naive("%m/%d/%Y %H:%M"),
    Layout::Date("%B %d %Y"),
    Layout::Date("%d %B %Y"),
    Layout::Date("%Y-%m-%d"),
    Layout::Date("%m/%d/%Y"),
];

static LEADING_WEEKDAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:mon|tue|wed|thu|fri|sat|sun)[a-z]*\.?,?\s+").expect("valid regex")
});

static AT_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bat\b").expect("valid regex"));

static DAY_ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)\b").expect("valid regex"));

static SEPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bsept\b\.?").expect("valid regex"));

static MERIDIEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d)\s*([AaPp])\.?[Mm]\.?(\s|$)").expect("valid regex")
});

static ZONE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(.*?)\s*(?:UTC|GMT)(?:([+-])(\d{1,2})(?::?(\d{2}))?)?$").expect("valid regex")
});

/// Parses the visible text of a timeline link.
///
/// Accepts the layouts exports have used over the years, with or without a
/// weekday, the word "at", commas, seconds, a 12-hour clock, ordinal days
/// (`1st`), and a trailing `UTC±HH[:MM]` zone. Other trailing zone abbreviations (`PDT`, `CET`) are
/// ignored and produce a naive timestamp.
///
/// Returns `None` when no layout matches.
///
/// # Example
///
/// ```
/// use postpack::parsing::parse_display_timestamp;
///
/// let ts = parse_display_timestamp("January 1, 2021 at 3:00 PM").unwrap();
/// assert_eq!(ts.to_iso_string(), "2021-01-01T15:00:00");
///
/// let ts = parse_display_timestamp("Friday, January 1, 2021 at 3:00 PM UTC+01").unwrap();
/// assert_eq!(ts.to_iso_string(), "2021-01-01T15:00:00+01:00");
///
/// assert!(parse_display_timestamp("yesterday").is_none());
/// ```
pub fn parse_display_timestamp(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(Timestamp::Zoned(dt));
    }

    let normalized = normalize_display_text(raw);

    if let Some(caps) = ZONE_SUFFIX.captures(&normalized) {
        let offset = zone_offset(&caps)?;
        let body = caps.get(1).map_or("", |m| m.as_str());
        return match first_match(DISPLAY_LAYOUTS, body)? {
            Timestamp::Naive(naive) => offset
                .from_local_datetime(&naive)
                .single()
                .map(Timestamp::Zoned),
            zoned @ Timestamp::Zoned(_) => Some(zoned),
        };
    }

    first_match(DISPLAY_LAYOUTS, strip_zone_abbreviation(&normalized))
}

fn normalize_display_text(raw: &str) -> String {
    let text = LEADING_WEEKDAY.replace(raw, "");
    let text = AT_WORD.replace_all(&text, " ");
    let text = DAY_ORDINAL.replace_all(&text, "${1}");
    let text = SEPT.replace_all(&text, "Sep");
    let text = text.replace(',', " ");
    let text = MERIDIEM.replace_all(&text, |caps: &Captures| {
        format!("{} {}M{}", &caps[1], caps[2].to_ascii_uppercase(), &caps[3])
    });
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn zone_offset(caps: &Captures) -> Option<FixedOffset> {
    let Some(sign) = caps.get(2) else {
        return FixedOffset::east_opt(0);
    };
    let hours: i32 = caps.get(3)?.as_str().parse().ok()?;
    let minutes: i32 = caps
        .get(4)
        .map_or(Ok(0), |m| m.as_str().parse())
        .ok()?;
    let seconds = hours * 3600 + minutes * 60;
    if sign.as_str() == "-" {
        FixedOffset::west_opt(seconds)
    } else {
        FixedOffset::east_opt(seconds)
    }
}

/// Drops a trailing all-caps zone name such as `PDT` (but not `AM`/`PM`).
fn strip_zone_abbreviation(text: &str) -> &str {
    match text.rsplit_once(' ') {
        Some((body, last))
            if (2..=5).contains(&last.len())
                && last.chars().all(|c| c.is_ascii_uppercase())
                && last != "AM"
                && last != "PM" =>
        {
            body
        }
        _ => text,
    }
}

// ============================================================================
// JSON entries
// ============================================================================

const ISO_LAYOUTS: &[Layout] = &[
    Layout::Zoned("%Y-%m-%dT%H:%M:%S%.f%z"),
    Layout::Zoned("%Y-%m-%dT%H:%M%z"),
    Layout::Naive("%Y-%m-%dT%H:%M:%S%.f"),
    Layout::Naive("%Y-%m-%dT%H:%M"),
];

/// Parses an ISO-8601 date-time (`T` separator).
///
/// A `Z` or numeric offset produces a zoned timestamp; no offset produces a
/// naive one. Seconds and fractional seconds are optional.
pub fn parse_iso_timestamp(raw: &str) -> Option<Timestamp> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(Timestamp::Zoned(dt));
    }
    first_match(ISO_LAYOUTS, raw)
}

/// Parses `YYYY-MM-DD HH:MM:SS±ZZZZ`.
///
/// A trailing `Z` stands for `+0000`.
pub fn parse_offset_timestamp(raw: &str) -> Option<Timestamp> {
    let layout = Layout::Zoned(OFFSET_TIMESTAMP_FORMAT);
    match raw.strip_suffix('Z') {
        Some(utc) => layout.apply(&format!("{utc}+0000")),
        None => layout.apply(raw),
    }
}

/// Converts Unix seconds to a zoned timestamp at UTC.
pub fn parse_unix_timestamp(secs: i64) -> Option<Timestamp> {
    DateTime::from_timestamp(secs, 0).map(|dt| Timestamp::Zoned(dt.fixed_offset()))
}

//! Filename date shapes and the calendar format table.
//!
//! Extraction and parsing are separate steps. A shape only
//! promises that a substring *looks* like a date, the format table decides
//! whether it is one.

use chrono::{NaiveDateTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// `YYYY-MM-DD HH?mm?ss`, any single character between the time fields.
static DASHED_DATE_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}.[0-9]{2}.[0-9]{2}").expect("valid regex")
});

/// `YYYYMMDD?HHmmss`, any single character between date and time.
static COMPACT_DATE_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9]{4}[0-9]{2}[0-9]{2}.[0-9]{2}[0-9]{2}[0-9]{2}").expect("valid regex")
});

/// `YYYY_MM_DD_HH_MM_SS`.
static UNDERSCORE_DATE_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9]{4}_[0-9]{2}_[0-9]{2}_[0-9]{2}_[0-9]{2}_[0-9]{2}").expect("valid regex")
});

/// A calendar format tried against an extracted candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeFormat {
    /// chrono strftime pattern
    pub pattern: &'static str,
    /// The same layout written as a field template
    pub template: &'static str,
}

/// Format table, tried in order until one matches the whole candidate.
///
/// The first and third entries are identical. First match wins, so the
/// duplicate never changes the result.
pub const DATE_TIME_FORMATS: &[DateTimeFormat] = &[
    DateTimeFormat {
        pattern: "%Y-%m-%d %H-%M-%S",
        template: "yyyy-MM-dd HH-mm-ss",
    },
    DateTimeFormat {
        pattern: "%Y-%m-%d %H.%M.%S",
        template: "yyyy-MM-dd HH.mm.ss",
    },
    DateTimeFormat {
        pattern: "%Y-%m-%d %H-%M-%S",
        template: "yyyy-MM-dd HH-mm-ss",
    },
    DateTimeFormat {
        pattern: "%Y%m%d-%H%M%S",
        template: "yyyyMMdd-HHmmss",
    },
    DateTimeFormat {
        pattern: "%Y%m%d_%H%M%S",
        template: "yyyyMMdd_HHmmss",
    },
    DateTimeFormat {
        pattern: "%Y_%m_%d_%H_%M_%S",
        template: "yyyy_MM_dd_HH_mm_ss",
    },
];

/// Find the date-shaped substring of a file name.
///
/// Shapes are tried in priority order and the first one that matches
/// anywhere wins; later shapes are never consulted, even if they would match
/// a different part of the name.
pub fn extract(name: &str) -> Option<&str> {
    [&*DASHED_DATE_TIME, &*COMPACT_DATE_TIME, &*UNDERSCORE_DATE_TIME]
        .into_iter()
        .find_map(|shape| shape.find(name))
        .map(|m| m.as_str())
}

/// Parse a candidate against the format table.
pub fn parse(candidate: &str) -> Option<NaiveDateTime> {
    parse_with_format(candidate).map(|(ts, _)| ts)
}

/// Parse a candidate and report which format matched.
pub fn parse_with_format(candidate: &str) -> Option<(NaiveDateTime, &'static DateTimeFormat)> {
    DATE_TIME_FORMATS.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(candidate, format.pattern)
            .ok()
            .filter(|ts| !is_leap_second(ts))
            .map(|ts| (ts, format))
    })
}

/// Extract then parse.
pub fn date_from_name(name: &str) -> Option<NaiveDateTime> {
    extract(name).and_then(parse)
}

/// Base name without the final extension.
///
/// Used for real paths and for operator input alike, so `photo.jpg`,
/// `dir/photo.jpg` and `photo` all yield `photo`.
pub fn file_stem(input: &str) -> String {
    Path::new(input)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// chrono reads `60` seconds as a leap second; calendar fields here are literal.
fn is_leap_second(ts: &NaiveDateTime) -> bool {
    ts.nanosecond() >= 1_000_000_000
}

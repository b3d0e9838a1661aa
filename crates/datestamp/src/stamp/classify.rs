//! Per-file date decision.

use super::patterns;
use chrono::{Local, NaiveDateTime};
use std::path::Path;

/// What a file name says about its date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Parsed and not after now
    Success(NaiveDateTime),
    /// Parsed but strictly after now
    FutureDated(NaiveDateTime),
    /// No shape matched, or the candidate did not parse
    NoDate,
}

impl Classification {
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Success(ts) | Self::FutureDated(ts) => Some(*ts),
            Self::NoDate => None,
        }
    }
}

/// Local wall-clock time, the reference for future-dated checks.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Classify a file by its base name, against the current local time.
pub fn classify(path: &Path) -> Classification {
    classify_at(path, now())
}

/// Classify a file by its base name, against a given "now".
pub fn classify_at(path: &Path, now: NaiveDateTime) -> Classification {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    classify_stem(&stem, now)
}

/// Classify a free-form name (e.g. operator input) by its base name.
pub fn classify_name(name: &str, now: NaiveDateTime) -> Classification {
    classify_stem(&patterns::file_stem(name), now)
}

fn classify_stem(stem: &str, now: NaiveDateTime) -> Classification {
    match patterns::date_from_name(stem) {
        None => Classification::NoDate,
        Some(ts) if ts > now => Classification::FutureDated(ts),
        Some(ts) => Classification::Success(ts),
    }
}

//! Outcome ledger: every file whose processing ended without a write.

use indexmap::IndexMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Why a file was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileOutcome {
    /// Parsed date lies after the moment it was checked
    FutureDated,
    /// No date in the name and the operator declined to supply one
    UserSkippedUndated,
    /// The timestamp could not be written
    WriteFailed,
    /// No date in the name, skipped without asking
    SkippedUndated,
}

impl FileOutcome {
    pub const ALL: [FileOutcome; 4] = [
        FileOutcome::FutureDated,
        FileOutcome::UserSkippedUndated,
        FileOutcome::WriteFailed,
        FileOutcome::SkippedUndated,
    ];

    /// Stable numeric code.
    pub fn code(&self) -> u8 {
        match self {
            Self::FutureDated => 1,
            Self::UserSkippedUndated => 2,
            Self::WriteFailed => 3,
            Self::SkippedUndated => 4,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::FutureDated),
            2 => Some(Self::UserSkippedUndated),
            3 => Some(Self::WriteFailed),
            4 => Some(Self::SkippedUndated),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FutureDated => "future_dated",
            Self::UserSkippedUndated => "user_skipped_undated",
            Self::WriteFailed => "write_failed",
            Self::SkippedUndated => "skipped_undated",
        }
    }

    /// Report line for a ledgered path.
    pub fn describe(&self, path: &Path) -> String {
        let path = path.display();
        match self {
            Self::FutureDated => format!("File {} is in the future, skipped!", path),
            Self::UserSkippedUndated => {
                format!("File {} does not contain date, user skipped it!", path)
            }
            Self::WriteFailed => format!("Error setting date for file {}, skipped!", path),
            Self::SkippedUndated => format!("File {} does not contain date, skipped!", path),
        }
    }
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Insertion-ordered map from path to outcome, append only.
#[derive(Debug, Default, Clone)]
pub struct OutcomeLedger {
    entries: IndexMap<PathBuf, FileOutcome>,
}

impl OutcomeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an outcome for a path.
    ///
    /// A path is recorded once. A second outcome for the same path is
    /// rejected and the first one kept; returns `false` in that case.
    pub fn record(&mut self, path: impl Into<PathBuf>, outcome: FileOutcome) -> bool {
        let path = path.into();
        if let Some(existing) = self.entries.get(&path) {
            warn!(
                path = %path.display(),
                existing = %existing,
                rejected = %outcome,
                "path already recorded, keeping first outcome"
            );
            return false;
        }
        self.entries.insert(path, outcome);
        true
    }

    pub fn get(&self, path: &Path) -> Option<FileOutcome> {
        self.entries.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in the order they were recorded.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, FileOutcome)> {
        self.entries.iter().map(|(p, o)| (p.as_path(), *o))
    }

    pub fn count(&self, outcome: FileOutcome) -> usize {
        self.entries.values().filter(|o| **o == outcome).count()
    }
}

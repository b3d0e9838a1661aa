//! Depth-first walk that classifies and stamps every file under a root.
//!
//! Within each directory, subdirectories (and their whole subtrees) are
//! visited before the directory's own files. Entries are sorted by name so the
//! trace and the ledger come out in the same order on every run.

use super::classify::{self, classify_at, Classification};
use super::config::StampConfig;
use super::error::{Result, StampError};
use super::ledger::{FileOutcome, OutcomeLedger};
use super::prompt::{indent, resolve, Operator, Resolution};
use super::writer::TimestampWriter;
use chrono::NaiveDateTime;
use std::cmp::Ordering;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Counters for one walk.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WalkStats {
    pub directories: usize,
    pub files: usize,
    pub stamped: usize,
    /// Entries the walk could not read (permissions, vanished paths)
    pub unreadable: usize,
}

/// Everything a walk produced besides the writes themselves.
#[derive(Debug, Default)]
pub struct WalkReport {
    pub stats: WalkStats,
    pub ledger: OutcomeLedger,
}

/// Walks a tree and stamps files from their names.
pub struct Stamper<W, O> {
    config: StampConfig,
    writer: W,
    operator: O,
    clock: fn() -> NaiveDateTime,
}

impl<W: TimestampWriter, O: Operator> Stamper<W, O> {
    pub fn new(config: StampConfig, writer: W, operator: O) -> Self {
        Self {
            config,
            writer,
            operator,
            clock: classify::now,
        }
    }

    /// Replace the wall clock used for future-dated checks.
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &StampConfig {
        &self.config
    }

    pub fn operator(&self) -> &O {
        &self.operator
    }

    /// Walk `root`, writing the trace to `out`.
    ///
    /// Only an invalid root is fatal. Per-file problems land in the returned
    /// ledger and the walk moves on.
    pub fn walk(&mut self, root: &Path, out: &mut dyn Write) -> Result<WalkReport> {
        if !root.is_dir() {
            return Err(StampError::InvalidRoot(root.to_path_buf()));
        }

        info!(
            root = %root.display(),
            verbose = self.config.verbose,
            skip_undated = self.config.skip_undated,
            "starting walk"
        );

        let mut report = WalkReport::default();
        // Links are followed; a directory link back to an ancestor comes out
        // of the walker as a loop error and is counted as unreadable.
        let walker = WalkDir::new(root)
            .follow_links(true)
            .sort_by(directories_first);

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(
                        path = %err.path().map(|p| p.display().to_string()).unwrap_or_default(),
                        error = %err,
                        "skipping unreadable entry"
                    );
                    report.stats.unreadable += 1;
                    continue;
                }
            };

            let depth = entry.depth();
            let file_type = entry.file_type();
            if file_type.is_dir() {
                report.stats.directories += 1;
                writeln!(
                    out,
                    "{}Processing directory: {}",
                    indent(depth),
                    entry.path().display()
                )?;
            } else {
                if entry.path_is_symlink() {
                    debug!(path = %entry.path().display(), "following file link");
                }
                report.stats.files += 1;
                self.process_file(entry.path(), depth, out, &mut report)?;
            }
        }

        info!(
            directories = report.stats.directories,
            files = report.stats.files,
            stamped = report.stats.stamped,
            skipped = report.ledger.len(),
            "walk finished"
        );
        Ok(report)
    }

    fn process_file(
        &mut self,
        path: &Path,
        depth: usize,
        out: &mut dyn Write,
        report: &mut WalkReport,
    ) -> Result<()> {
        let classification = classify_at(path, (self.clock)());
        debug!(path = %path.display(), ?classification, "classified");

        match classification {
            Classification::Success(ts) => self.stamp(path, ts, depth, out, report)?,
            Classification::FutureDated(ts) => {
                writeln!(
                    out,
                    "{}Date for file {} is in the future ({}), skipping!",
                    indent(depth),
                    display_name(path),
                    ts
                )?;
                report.ledger.record(path, FileOutcome::FutureDated);
            }
            Classification::NoDate if self.config.skip_undated => {
                report.ledger.record(path, FileOutcome::SkippedUndated);
            }
            Classification::NoDate => match resolve(path, depth, &mut self.operator, &self.clock) {
                Resolution::Dated(ts) => self.stamp(path, ts, depth, out, report)?,
                Resolution::Abstained => {
                    report.ledger.record(path, FileOutcome::UserSkippedUndated);
                }
            },
        }
        Ok(())
    }

    fn stamp(
        &self,
        path: &Path,
        ts: NaiveDateTime,
        depth: usize,
        out: &mut dyn Write,
        report: &mut WalkReport,
    ) -> Result<()> {
        if self.config.verbose {
            writeln!(
                out,
                "{}File: {}, setting date to: {}",
                indent(depth),
                display_name(path),
                ts
            )?;
        }

        match self.writer.apply(path, ts) {
            Ok(()) => report.stats.stamped += 1,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to set timestamps");
                writeln!(
                    out,
                    "{}Error setting date for file {} ({})",
                    indent(depth),
                    display_name(path),
                    ts
                )?;
                report.ledger.record(path, FileOutcome::WriteFailed);
            }
        }
        Ok(())
    }
}

fn directories_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    b.file_type()
        .is_dir()
        .cmp(&a.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

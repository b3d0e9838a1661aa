//! Operator fallback for files whose names carry no date.
//!
//! The loop keeps asking until the operator supplies a string whose base name
//! parses to a non-future date, or abstains with an empty answer. There is no
//! retry limit. Closed input counts as abstaining so a detached stdin cannot
//! spin forever.

use super::classify::{classify_name, Classification};
use chrono::NaiveDateTime;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Source of replacement names, asked once per attempt.
pub trait Operator {
    /// Ask for a replacement for `file_name`.
    ///
    /// Returns `Ok(None)` when no more input will ever arrive.
    fn ask(&mut self, file_name: &str, depth: usize) -> io::Result<Option<String>>;
}

/// Interactive operator on a line-oriented terminal.
pub struct ConsoleOperator<R, W> {
    input: R,
    output: W,
}

impl ConsoleOperator<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleOperator<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Operator for ConsoleOperator<R, W> {
    fn ask(&mut self, file_name: &str, depth: usize) -> io::Result<Option<String>> {
        write!(
            self.output,
            "{}File {} does not contain date. To which date should I set it to?(To skip, press Enter): ",
            indent(depth),
            file_name
        )?;
        self.output.flush()?;

        // Bytes, not read_line: undecodable input is still an answer.
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&line);
        let answer = line.trim_end_matches(['\n', '\r']);
        Ok(Some(answer.to_string()))
    }
}

/// Replays canned answers; for tests and unattended runs.
#[derive(Debug, Default)]
pub struct ScriptedOperator {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedOperator {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// File names asked about, one entry per attempt.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Operator for ScriptedOperator {
    fn ask(&mut self, file_name: &str, _depth: usize) -> io::Result<Option<String>> {
        self.asked.push(file_name.to_string());
        Ok(self.answers.pop_front())
    }
}

/// How the operator settled an undated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// A usable date was supplied
    Dated(NaiveDateTime),
    /// Empty answer, or no more input can be read
    Abstained,
}

/// Ask until a usable date is supplied or the operator abstains.
pub fn resolve(
    path: &Path,
    depth: usize,
    operator: &mut dyn Operator,
    now: &dyn Fn() -> NaiveDateTime,
) -> Resolution {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    loop {
        let answer = match operator.ask(&file_name, depth) {
            Ok(Some(answer)) => answer,
            Ok(None) => {
                debug!(path = %path.display(), "operator input closed");
                return Resolution::Abstained;
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to read operator input");
                return Resolution::Abstained;
            }
        };

        if answer.is_empty() {
            return Resolution::Abstained;
        }

        match classify_name(&answer, now()) {
            Classification::Success(ts) => return Resolution::Dated(ts),
            Classification::FutureDated(ts) => {
                warn!(answer = %answer, %ts, "supplied date is in the future, asking again");
            }
            Classification::NoDate => {
                debug!(answer = %answer, "no date in supplied name, asking again");
            }
        }
    }
}

pub(crate) fn indent(depth: usize) -> String {
    "\t".repeat(depth)
}

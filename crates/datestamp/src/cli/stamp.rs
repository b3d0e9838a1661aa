//! Stamp command - rewrite timestamps under a directory from file names

use crate::cli::error::HelpfulError;
use crate::cli::output::print_report;
use datestamp::stamp::{
    ConsoleOperator, FsTimestampWriter, Operator, StampConfig, StampError, Stamper, WalkReport,
};
use std::io::{self, Write};
use std::path::PathBuf;

/// Arguments for the stamp command
#[derive(Debug)]
pub struct StampArgs {
    pub directory: Option<PathBuf>,
    pub verbose: bool,
    pub no_skip: bool,
}

/// Execute the stamp command against the real filesystem and terminal
pub fn run(args: StampArgs) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_with(args, ConsoleOperator::stdio(), &mut out)?;
    Ok(())
}

/// Execute with an injected operator and output sink
pub fn run_with<O: Operator>(
    args: StampArgs,
    operator: O,
    out: &mut dyn Write,
) -> anyhow::Result<WalkReport> {
    let directory = args.directory.ok_or_else(HelpfulError::missing_directory)?;

    // Validate path exists
    if !directory.exists() {
        return Err(HelpfulError::path_not_found(&directory).into());
    }

    // Validate path is a directory
    if !directory.is_dir() {
        return Err(HelpfulError::not_a_directory(&directory).into());
    }

    let config = StampConfig::from_flags(args.verbose, args.no_skip);
    let mut stamper = Stamper::new(config, FsTimestampWriter, operator);

    let report = match stamper.walk(&directory, out) {
        Ok(report) => report,
        // Raced with a removal between the check above and the walk
        Err(StampError::InvalidRoot(path)) => {
            return Err(HelpfulError::not_a_directory(&path).into())
        }
        Err(err) => return Err(err.into()),
    };

    print_report(&report, out)?;
    out.flush()?;
    Ok(report)
}

//! datestamp launcher
//!
//! Walks a directory tree and sets each file's created/accessed/modified
//! timestamps from the date embedded in its name.

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use datestamp_logging::{init_logging, LogConfig};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

mod cli;

#[derive(Parser, Debug)]
#[command(
    name = "datestamp",
    version,
    about = "Set file timestamps from dates embedded in file names",
    after_help = "Recognized name shapes:\n  2018-09-21 20-31-26, 2018-04-04 14.10.34\n  20210422-161921, 20210422_161921\n  2017_12_26_18_01_39"
)]
struct Cli {
    /// Directory to process recursively
    directory: Option<PathBuf>,

    /// Verbose mode. Print each timestamp before it is applied
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Do NOT skip files whose name does not include a date; ask for one instead
    #[arg(short = 's', long = "no-skip")]
    no_skip: bool,
}

fn main() -> ExitCode {
    // Help wins over every other argument, valid or not.
    if wants_help(std::env::args_os().skip(1)) {
        return match Cli::command().print_help() {
            Ok(()) => ExitCode::SUCCESS,
            Err(_) => ExitCode::from(1),
        };
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return exit_for_parse_error(err),
    };

    if let Err(err) = init_logging(LogConfig {
        app_name: "datestamp",
        verbose: cli.verbose,
    }) {
        eprintln!("Warning: {}", err);
    }

    let result = cli::stamp::run(cli::stamp::StampArgs {
        directory: cli.directory,
        verbose: cli.verbose,
        no_skip: cli.no_skip,
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{:?}", err);
            ExitCode::from(1)
        }
    }
}

/// Help and version exit 0; every other argument problem exits 1.
fn exit_for_parse_error(err: clap::Error) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            ExitCode::SUCCESS
        }
        _ => {
            let details = err.render().to_string();
            eprintln!("{}", cli::error::HelpfulError::invalid_arguments(&details));
            ExitCode::from(1)
        }
    }
}

/// True when `-h`/`--help` appears before any `--` terminator.
fn wants_help(args: impl IntoIterator<Item = OsString>) -> bool {
    args.into_iter()
        .take_while(|arg| arg != "--")
        .any(|arg| arg == "-h" || arg == "--help")
}

//! Error types for the stamping run

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors; per-file problems are ledgered instead.
#[derive(Error, Debug)]
pub enum StampError {
    #[error("Directory does not exist or is not correct: {}", .0.display())]
    InvalidRoot(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, StampError>;

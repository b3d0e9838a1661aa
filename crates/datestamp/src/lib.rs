//! Datestamp - Core Library
//!
//! Walks a directory tree and rewrites each file's timestamps from the date
//! embedded in its name.

pub mod stamp;

pub use stamp::{
    Classification, FileOutcome, OutcomeLedger, StampConfig, StampError, Stamper, WalkReport,
};

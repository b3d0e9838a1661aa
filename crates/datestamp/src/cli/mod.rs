//! CLI module for datestamp
//!
//! The binary has a single command: walk a directory and stamp what it finds.

pub mod error;
pub mod output;
pub mod stamp;

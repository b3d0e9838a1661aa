//! Stamp - filename dates to file timestamps
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Walker    │────▶│ Classifier  │────▶│   Writer    │
//! │(dirs first) │     │(name → date)│     │(c/a/m times)│
//! └─────────────┘     └──────┬──────┘     └──────┬──────┘
//!                            │ no date           │ failure
//!                            ▼                   ▼
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │  Operator   │────▶│   Ledger    │
//!                     │ (-s only)   │     │(problem set)│
//!                     └─────────────┘     └─────────────┘
//! ```

pub mod classify;
pub mod config;
pub mod error;
pub mod ledger;
pub mod patterns;
pub mod prompt;
pub mod walker;
pub mod writer;

// Re-exports for CLI usage
pub use classify::{classify, classify_at, classify_name, Classification};
pub use config::StampConfig;
pub use error::{Result, StampError};
pub use ledger::{FileOutcome, OutcomeLedger};
pub use patterns::{date_from_name, extract, parse, DATE_TIME_FORMATS};
pub use prompt::{resolve, ConsoleOperator, Operator, Resolution, ScriptedOperator};
pub use walker::{Stamper, WalkReport, WalkStats};
pub use writer::{FsTimestampWriter, TimestampWriter, WriteError};

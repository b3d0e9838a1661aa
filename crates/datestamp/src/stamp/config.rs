//! Run configuration for a stamping walk

/// Mode switches for one run, fixed before the walk starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StampConfig {
    /// Print each timestamp before it is applied
    pub verbose: bool,

    /// Record undated files without asking the operator
    pub skip_undated: bool,
}

impl Default for StampConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            skip_undated: true,
        }
    }
}

impl StampConfig {
    /// Configuration from the two CLI switches (`-v`, `-s`).
    pub fn from_flags(verbose: bool, no_skip: bool) -> Self {
        Self {
            verbose,
            skip_undated: !no_skip,
        }
    }

    pub fn is_interactive(&self) -> bool {
        !self.skip_undated
    }
}

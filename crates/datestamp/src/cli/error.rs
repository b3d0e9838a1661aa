//! Helpful error types for the CLI
//!
//! Every error includes:
//! - What went wrong
//! - Context about the situation
//! - Suggestions for how to fix it

use std::fmt;
use std::path::Path;

/// An error with helpful context and suggestions
#[derive(Debug)]
pub struct HelpfulError {
    /// The main error message
    pub message: String,
    /// Additional context about what was happening
    pub context: Option<String>,
    /// Suggestions for how to fix the error
    pub suggestions: Vec<String>,
}

impl HelpfulError {
    /// Bare error with just a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
        }
    }

    /// Attach what the run was doing when it failed
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add one TRY line
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add several TRY lines at once
    pub fn with_suggestions(mut self, suggestions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.suggestions.extend(suggestions.into_iter().map(|s| s.into()));
        self
    }

    // === Common error constructors ===

    /// No directory argument was given
    pub fn missing_directory() -> Self {
        Self::new("First argument must be a directory!")
            .with_context("Usage: datestamp <DIRECTORY> [-v] [-s]")
            .with_suggestions([
                "TRY: datestamp ~/Pictures".to_string(),
                "TRY: datestamp -h for all options".to_string(),
            ])
    }

    /// Path does not exist
    pub fn path_not_found(path: &Path) -> Self {
        Self::new(format!("Directory does not exist: {}", path.display()))
            .with_context("The specified path does not exist on the filesystem")
            .with_suggestions([
                format!("TRY: Check that the path exists: ls -la {}", path.display()),
                "TRY: Check for typos in the path".to_string(),
            ])
    }

    /// Path exists but is not a directory
    pub fn not_a_directory(path: &Path) -> Self {
        Self::new(format!("Not a directory: {}", path.display()))
            .with_context("datestamp walks a directory tree, not a single file")
            .with_suggestions([format!(
                "TRY: Process the parent directory: datestamp {}",
                path.parent()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| ".".to_string())
            )])
    }

    /// Flags could not be parsed
    pub fn invalid_arguments(details: &str) -> Self {
        Self::new("Invalid arguments")
            .with_context(details.trim_end().to_string())
            .with_suggestion("TRY: datestamp -h for all options")
    }
}

impl fmt::Display for HelpfulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ERROR: {}", self.message)?;

        if let Some(ctx) = &self.context {
            writeln!(f, "CONTEXT: {}", ctx)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            for suggestion in &self.suggestions {
                writeln!(f, "  {}", suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for HelpfulError {}

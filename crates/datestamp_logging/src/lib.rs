//! Shared logging utilities for datestamp binaries.

use anyhow::{anyhow, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str = "datestamp=warn,datestamp_logging=warn";
const VERBOSE_LOG_FILTER: &str = "datestamp=debug,datestamp_logging=debug";

/// Logging configuration shared by datestamp binaries.
pub struct LogConfig<'a> {
    pub app_name: &'a str,
    pub verbose: bool,
}

/// Initialize tracing with a single stderr layer.
///
/// Stdout is reserved for the directory trace, prompts and the final report,
/// so diagnostics never interleave with it. `RUST_LOG` overrides the default
/// filter in both modes.
pub fn init_logging(config: LogConfig<'_>) -> Result<()> {
    let filter = resolve_filter(config.verbose);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(config.verbose)
                .with_filter(filter),
        )
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging for {}: {}", config.app_name, e))?;

    Ok(())
}

/// Build the filter for the console layer.
pub fn resolve_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    }
}

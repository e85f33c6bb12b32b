//! Diagnostic logging.
//!
//! Diagnostics go to stderr through a `tracing` fmt layer so they never mix
//! with command output on stdout. The filter starts from a default directive
//! set and is extended by comma-separated directives in `ASTRO_GALLERY_LOG`:
//!
//! ```text
//! ASTRO_GALLERY_LOG=debug astro-gallery thumbnails
//! ASTRO_GALLERY_LOG=astro_gallery::thumbnails=trace astro-gallery thumbnails
//! ```
//!
//! An unparseable directive is reported and skipped.

use std::io;
use thiserror::Error;
use tracing_subscriber::Layer;
use tracing_subscriber::filter::{EnvFilter, ParseError};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Environment variable holding extra filter directives.
pub const LOG_ENV: &str = "ASTRO_GALLERY_LOG";

/// Directives used when nothing else is asked for.
pub const DEFAULT_DIRECTIVES: &str = "warn";

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("invalid default log directives {directives:?}: {source}")]
    Directives {
        directives: String,
        source: ParseError,
    },
    #[error("failed to install the global log subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Install the global subscriber. Call once, early in `main`.
pub fn init(default_directives: &str) -> Result<(), LoggingError> {
    let filter = env_filter(default_directives, std::env::var(LOG_ENV).ok().as_deref())?;
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_filter(filter);

    tracing_subscriber::registry().with(fmt_layer).try_init()?;
    Ok(())
}

/// Build the filter from defaults plus optional extra directives.
fn env_filter(default_directives: &str, extra: Option<&str>) -> Result<EnvFilter, LoggingError> {
    let mut filter = EnvFilter::builder()
        .parse(default_directives)
        .map_err(|source| LoggingError::Directives {
            directives: default_directives.to_string(),
            source,
        })?;

    if let Some(extra) = extra {
        for directive in extra.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            match directive.parse() {
                Ok(directive) => filter = filter.add_directive(directive),
                Err(err) => eprintln!("WARN ignoring log directive: {directive:?}: {err}"),
            }
        }
    }

    Ok(filter)
}

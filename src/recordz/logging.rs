//! Logging setup on top of `tracing` and `tracing-subscriber`.
//!
//! The library only emits events; a client installs the subscriber once at
//! startup. Log lines go to stderr so they never mix with command output.
//!
//! - `warn`: data files that could not be read (default)
//! - `info`: saves and loads
//! - `debug`: individual mutations
//! - `trace`: everything else

use std::io;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Maps the `-v` count to a level: none is warn, then info, debug, trace.
pub fn level_for_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the verbosity.
///
/// Fails if a subscriber is already installed.
pub fn init_logging(verbosity: u8) -> io::Result<()> {
    let layer = fmt::layer()
        .compact()
        .with_writer(io::stderr)
        .with_target(false)
        .without_time();

    tracing_subscriber::registry()
        .with(build_env_filter(level_for_verbosity(verbosity)))
        .with(layer)
        .try_init()
        .map_err(io::Error::other)
}

fn build_env_filter(level: Level) -> EnvFilter {
    let level = level.as_str().to_lowercase();
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,recordz={level}")))
}

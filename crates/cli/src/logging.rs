//! Logging configuration using tracing
//!
//! Logs go to stderr so they never mix with report output on stdout.
//! `SRCSTAT_LOG` overrides the level picked from `-v`.
//!
//! ```bash
//! SRCSTAT_LOG=srcstat_engine=debug srcstat src/
//! ```

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "SRCSTAT_LOG";

/// Default filter directive for a `-v` count.
#[must_use]
pub const fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(verbose: u8) {
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level_for(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(verbose > 1)
        .try_init();
}

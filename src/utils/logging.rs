//! Logging setup using tracing-subscriber

use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter directive for a given `-v` count
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global subscriber; `RUST_LOG` wins over `-v` when set.
///
/// Logs go to stderr so they never mix with the styled report on stdout.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let installed = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    if installed.is_err() {
        debug!("global subscriber already installed, keeping it");
    }
}

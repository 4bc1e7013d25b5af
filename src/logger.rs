//! Logging setup for the copycode binary

use std::io;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for a `-v` count
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Initialize the logging system.
///
/// `RUST_LOG` wins over the verbosity flag. Everything goes to stderr so the
/// document can be piped from stdout.
pub fn init_logger(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    // A second init (e.g. from an embedding front end) is not an error here
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .without_time()
                .compact(),
        )
        .try_init();
}

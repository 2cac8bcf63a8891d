//! Diagnostic logging to stderr.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Maps `-v` occurrences to a log level.
pub fn level_for(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

/// Installs the global subscriber.
///
/// Directives in `RUST_LOG` take precedence over the verbosity flag.
pub fn init(verbose: u8) {
    let filter = EnvFilter::builder()
        .with_default_directive(level_for(verbose).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

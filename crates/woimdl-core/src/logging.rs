//! Logging init: stderr only, since stdout carries the generated download scripts.

use tracing_subscriber::EnvFilter;

/// Initialize structured logging to stderr.
///
/// Honors `RUST_LOG`; defaults to `info` globally and `debug` for our own crates.
/// ANSI is disabled so redirected stderr stays readable.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,woimdl=debug,woimdl_core=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

//! Log filter used by the host binary.

use tracing_subscriber::filter::{EnvFilter, LevelFilter};

/// Filter built from `RUST_LOG`-style directives. Missing or empty
/// directives fall back to `info`; invalid ones are skipped.
pub fn env_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives.unwrap_or_default())
}

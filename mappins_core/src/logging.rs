//! Installs the process-wide `tracing` subscriber.

use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

/// Sets up formatted log output. `RUST_LOG` takes precedence over
/// `default_level`. Calling this again, or after another subscriber was
/// installed, only logs a warning.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if let Err(e) = fmt().with_env_filter(filter).try_init() {
        warn!(error = %e, "tracing init failed");
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn init_twice_does_not_panic() {
        init("debug");
        init("not a valid directive ===");
    }
}

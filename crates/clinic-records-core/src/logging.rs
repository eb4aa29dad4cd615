//! Tracing subscriber bootstrap.

use tracing_subscriber::EnvFilter;

use crate::config;

/// Install a formatted tracing subscriber for the process.
///
/// Honors `RUST_LOG`, otherwise uses [`config::default_log_filter`].
/// Returns `false` when a global subscriber was already installed.
pub fn init_tracing() -> bool {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("{} core v{} logging initialized", config::APP_NAME, config::APP_VERSION);
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_tracing();
        assert!(!init_tracing());
    }
}

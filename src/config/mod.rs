//! Configuration Layer
//!
//! TOML settings with environment overrides, plus logging bootstrap.

pub mod loader;

pub use loader::{
    load_settings, ConfigError, LaunchpadsSection, LoggingSection, Settings, SolanaSection,
};

use tracing_subscriber::EnvFilter;

/// Initialize tracing output. `RUST_LOG` wins over the configured level;
/// repeated calls are no-ops so tests can call this freely.
pub fn init_logging(logging: &LoggingSection) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.clone()));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

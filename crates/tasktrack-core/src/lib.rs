pub mod config;
pub mod error;
pub mod status;

pub use config::{ApiConfig, Config, UngroupedConfig, ValidationResult};
pub use error::{AppError, ConfigError, NetworkError, ReqwestErrorExt, ValidationError};
pub use status::FetchStatus;

use anyhow::Result;

/// Initialize tracing/logging for the process.
///
/// Honors `RUST_LOG`; defaults to `info`.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    tracing::info!("TaskTrack core initialized");
    Ok(())
}

//! Logging configuration and setup
//!
//! This module provides logging initialization for applications embedding
//! the RollCall data layer.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration
///
/// Installs a stdout layer and, when a file path is configured, a daily
/// rolling file layer. The returned guard must be held for the lifetime of
/// the process to keep the background writer alive.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::new(&config.level);

    match &config.file_path {
        Some(path) => {
            let file_appender = tracing_appender::rolling::daily(path, "rollcall.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
                .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
                .init();

            info!("Logging initialized with level: {}", config.level);
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
                .init();

            info!("Logging initialized with level: {}", config.level);
            Ok(None)
        }
    }
}

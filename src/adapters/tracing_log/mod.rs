// Tracing log adapter - Structured logging using tracing crate

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::domain::model::{Notification, NotificationLevel};
use crate::error::{ClipChunkError, ClipChunkResult};
use crate::ports::*;

/// Install the global subscriber
///
/// `RUST_LOG` wins over `level` when set. Calling this twice is harmless:
/// the second subscriber is simply not installed.
pub fn init_logging(level: &str, json: bool) -> ClipChunkResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level).map_err(|e| ClipChunkError::LoggingError {
            message: format!("Invalid log level '{}': {}", level, e),
        })?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if installed.is_err() {
        tracing::debug!("Global subscriber already installed");
    }
    Ok(())
}

/// Mirrors user-facing notifications into the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl NotifyPort for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        match notification.level {
            NotificationLevel::Info => info!(kind = "info", "{}", notification.message),
            NotificationLevel::Success => info!(kind = "success", "{}", notification.message),
            NotificationLevel::Warning => warn!("{}", notification.message),
            NotificationLevel::Error => error!("{}", notification.message),
        }
    }
}

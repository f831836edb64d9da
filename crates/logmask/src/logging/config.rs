//! Configuration for [`Logger`](super::Logger).

use super::types::LogLevel;
use crate::masking::MaskingConfig;

/// Default logger name.
pub const DEFAULT_LOGGER_NAME: &str = "app";

/// Configuration for a logger instance.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Logger name stamped on every entry.
    pub name: String,
    /// Minimum level; entries below it are dropped before masking.
    pub level: LogLevel,
    /// Masking applied to every entry before dispatch.
    pub masking: MaskingConfig,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_LOGGER_NAME.to_string(),
            level: LogLevel::Info,
            masking: MaskingConfig::default(),
        }
    }
}

impl LoggerConfig {
    /// Creates a logger configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the logger name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the minimum level.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Sets the masking configuration.
    pub fn with_masking(mut self, masking: MaskingConfig) -> Self {
        self.masking = masking;
        self
    }

    /// Turns masking off for this logger.
    pub fn without_masking(mut self) -> Self {
        self.masking.enabled = false;
        self
    }
}

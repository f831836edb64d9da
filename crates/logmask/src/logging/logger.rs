use futures::future::join_all;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use tokio::sync::RwLock;

use super::config::LoggerConfig;
use super::transport::Transport;
use super::types::{ErrorInfo, LogEntry, LogLevel};
use crate::masking::{DataMasker, MaskingConfig, MaskingRule};

/// A logger that masks every entry before handing it to its transports.
///
/// The logger can be shared behind an `Arc`; masking configuration changes
/// go through an async `RwLock` so they never interleave with a mask pass.
///
/// # Example
///
/// ```rust,ignore
/// use logmask::prelude::*;
/// use serde_json::json;
///
/// let logger = Logger::new(LoggerConfig::new().with_name("checkout"))
///     .with_transport(Arc::new(TracingTransport));
///
/// logger
///     .info("payment accepted", Some(json!({ "cardNumber": "4532123456789012" })))
///     .await;
/// ```
pub struct Logger {
    name: String,
    level: AtomicU8,
    masker: RwLock<DataMasker>,
    transports: Vec<Arc<dyn Transport>>,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field(
                "transports",
                &self.transports.iter().map(|t| t.name()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LoggerConfig::default())
    }
}

impl Logger {
    /// Creates a logger with no transports.
    pub fn new(config: LoggerConfig) -> Self {
        Self {
            name: config.name,
            level: AtomicU8::new(level_to_u8(config.level)),
            masker: RwLock::new(DataMasker::new(config.masking)),
            transports: Vec::new(),
        }
    }

    /// Adds a transport.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transports.push(transport);
        self
    }

    /// Returns the logger name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the current minimum level.
    pub fn level(&self) -> LogLevel {
        level_from_u8(self.level.load(Ordering::Relaxed))
    }

    /// Changes the minimum level.
    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level_to_u8(level), Ordering::Relaxed);
    }

    /// Masks and dispatches one entry.
    ///
    /// Entries below the minimum level are dropped before any masking work.
    pub async fn log(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        context: Option<Value>,
        error: Option<ErrorInfo>,
    ) {
        if level == LogLevel::Off || !self.level().should_log(level) {
            return;
        }

        let mut entry = LogEntry::new(level, message).with_logger(self.name.clone());
        entry.context = context;
        entry.error = error;

        let masked = self.masker.read().await.mask_entry(&entry);
        self.dispatch(&masked).await;
    }

    /// Logs at trace level.
    pub async fn trace(&self, message: impl Into<String>, context: Option<Value>) {
        self.log(LogLevel::Trace, message, context, None).await;
    }

    /// Logs at debug level.
    pub async fn debug(&self, message: impl Into<String>, context: Option<Value>) {
        self.log(LogLevel::Debug, message, context, None).await;
    }

    /// Logs at info level.
    pub async fn info(&self, message: impl Into<String>, context: Option<Value>) {
        self.log(LogLevel::Info, message, context, None).await;
    }

    /// Logs at warn level.
    pub async fn warn(&self, message: impl Into<String>, context: Option<Value>) {
        self.log(LogLevel::Warn, message, context, None).await;
    }

    /// Logs at error level.
    pub async fn error(&self, message: impl Into<String>, context: Option<Value>) {
        self.log(LogLevel::Error, message, context, None).await;
    }

    /// Logs at error level with the details of `error` attached.
    pub async fn error_with(
        &self,
        message: impl Into<String>,
        error: &(dyn std::error::Error + 'static),
        context: Option<Value>,
    ) {
        self.log(
            LogLevel::Error,
            message,
            context,
            Some(ErrorInfo::from_error(error)),
        )
        .await;
    }

    async fn dispatch(&self, entry: &LogEntry) {
        let results = join_all(self.transports.iter().map(|t| t.send(entry))).await;

        for (transport, result) in self.transports.iter().zip(results) {
            if let Err(e) = result {
                tracing::warn!(
                    logger = %self.name,
                    transport = %transport.name(),
                    entry_id = %entry.id,
                    error = %e,
                    "Failed to deliver log entry"
                );
            }
        }
    }

    // -------------------------------------------------------------------------
    // Masking configuration
    // -------------------------------------------------------------------------

    /// Adds a sensitive field name.
    pub async fn add_sensitive_field(&self, field: impl Into<String>) {
        self.masker.write().await.add_sensitive_field(field);
    }

    /// Removes a sensitive field name.
    pub async fn remove_sensitive_field(&self, field: &str) {
        self.masker.write().await.remove_sensitive_field(field);
    }

    /// Appends a masking rule.
    pub async fn add_masking_rule(&self, rule: MaskingRule) {
        self.masker.write().await.add_rule(rule);
    }

    /// Installs or replaces the custom masker.
    pub async fn set_custom_masker<F>(&self, masker: F)
    where
        F: Fn(&str, &Value) -> Value + Send + Sync + 'static,
    {
        self.masker.write().await.set_custom_masker(masker);
    }

    /// Returns a snapshot of the masking configuration.
    pub async fn masking_config(&self) -> MaskingConfig {
        self.masker.read().await.config()
    }

    /// Masks an arbitrary value with this logger's configuration.
    pub async fn mask(&self, value: &Value) -> Value {
        self.masker.read().await.mask(value)
    }
}

fn level_to_u8(level: LogLevel) -> u8 {
    match level {
        LogLevel::Trace => 0,
        LogLevel::Debug => 1,
        LogLevel::Info => 2,
        LogLevel::Warn => 3,
        LogLevel::Error => 4,
        LogLevel::Off => 5,
    }
}

fn level_from_u8(value: u8) -> LogLevel {
    match value {
        0 => LogLevel::Trace,
        1 => LogLevel::Debug,
        2 => LogLevel::Info,
        3 => LogLevel::Warn,
        4 => LogLevel::Error,
        _ => LogLevel::Off,
    }
}

//! Log transports: where masked entries go after the [`Logger`](super::Logger)
//! is done with them.
//!
//! [`TracingTransport`] and [`JsonTransport`] forward to `tracing`;
//! [`MemoryTransport`] keeps a bounded buffer for inspection in tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::sync::Mutex;

use super::types::{LogEntry, LogLevel};
use crate::error::TransportError;

// =============================================================================
// Transport Trait
// =============================================================================

/// A sink that receives already-masked log entries.
///
/// Transports never see unmasked data: the [`Logger`](super::Logger) masks
/// every entry before dispatch. Delivery is best effort; a failing transport
/// is reported and skipped, never retried.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    /// Delivers one entry.
    async fn send(&self, entry: &LogEntry) -> Result<(), TransportError>;
}

// =============================================================================
// TracingTransport
// =============================================================================

/// Re-emits entries through the tracing crate with structured fields.
#[derive(Debug, Clone, Default)]
pub struct TracingTransport;

#[async_trait]
impl Transport for TracingTransport {
    fn name(&self) -> &str {
        "tracing"
    }

    async fn send(&self, entry: &LogEntry) -> Result<(), TransportError> {
        let entry_id = entry.id.short();
        let logger = &entry.logger;
        let message = &entry.message;
        let context = entry
            .context
            .as_ref()
            .map(|context| context.to_string())
            .unwrap_or_default();
        let error = entry
            .error
            .as_ref()
            .map(|error| error.message.as_str())
            .unwrap_or("");

        match entry.level {
            LogLevel::Trace => {
                tracing::trace!(entry_id = %entry_id, logger = %logger, context = %context, "{}", message);
            }
            LogLevel::Debug => {
                tracing::debug!(entry_id = %entry_id, logger = %logger, context = %context, "{}", message);
            }
            LogLevel::Info => {
                tracing::info!(entry_id = %entry_id, logger = %logger, context = %context, "{}", message);
            }
            LogLevel::Warn => {
                tracing::warn!(
                    entry_id = %entry_id,
                    logger = %logger,
                    context = %context,
                    error = %error,
                    "{}",
                    message
                );
            }
            LogLevel::Error => {
                tracing::error!(
                    entry_id = %entry_id,
                    logger = %logger,
                    context = %context,
                    error = %error,
                    "{}",
                    message
                );
            }
            LogLevel::Off => {}
        }

        Ok(())
    }
}

// =============================================================================
// JsonTransport
// =============================================================================

/// Serializes each entry to JSON and emits it on the `logmask_json` target.
///
/// Useful for log aggregation systems that expect one JSON document per line.
#[derive(Debug, Clone, Default)]
pub struct JsonTransport;

#[async_trait]
impl Transport for JsonTransport {
    fn name(&self) -> &str {
        "json"
    }

    async fn send(&self, entry: &LogEntry) -> Result<(), TransportError> {
        let json = serde_json::to_string(entry)?;
        match entry.level {
            LogLevel::Error => tracing::error!(target: "logmask_json", "{}", json),
            LogLevel::Warn => tracing::warn!(target: "logmask_json", "{}", json),
            _ => tracing::info!(target: "logmask_json", "{}", json),
        }
        Ok(())
    }
}

// =============================================================================
// MemoryTransport
// =============================================================================

/// Default number of entries a [`MemoryTransport`] retains.
pub const DEFAULT_MEMORY_CAPACITY: usize = 1000;

/// Keeps delivered entries in memory.
///
/// Holds at most `capacity` entries; the oldest entry is dropped first.
/// Useful for tests and in-app log viewers.
#[derive(Debug)]
pub struct MemoryTransport {
    entries: Mutex<VecDeque<LogEntry>>,
    capacity: usize,
}

impl Default for MemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTransport {
    /// Creates a memory transport with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MEMORY_CAPACITY)
    }

    /// Creates a memory transport retaining at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::new()),
            capacity,
        }
    }

    /// Returns a copy of all retained entries, oldest first.
    pub async fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().await.iter().cloned().collect()
    }

    /// Returns the number of retained entries.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Returns true if no entries are retained.
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Drops all retained entries.
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    fn name(&self) -> &str {
        "memory"
    }

    async fn send(&self, entry: &LogEntry) -> Result<(), TransportError> {
        if self.capacity == 0 {
            return Ok(());
        }

        let mut entries = self.entries.lock().await;
        while entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry.clone());
        Ok(())
    }
}

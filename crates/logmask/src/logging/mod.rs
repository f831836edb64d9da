//! Structured Logging with Masking
//!
//! A small logger that masks every entry before it reaches a transport.
//!
//! # Features
//!
//! - **Entry IDs**: UUID v7 based identifiers for correlation
//! - **Level Filtering**: entries below the minimum level are dropped before masking
//! - **Masking**: message, context and error message go through [`DataMasker`](crate::masking::DataMasker)
//! - **Pluggable Transports**: tracing, JSON, and in-memory sinks
//!
//! # Architecture
//!
//! - **types**: Core types (EntryId, LogLevel, ErrorInfo, LogEntry)
//! - **config**: LoggerConfig with builder pattern
//! - **transport**: Transport trait and implementations
//! - **logger**: Logger, which filters, masks and dispatches
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use logmask::logging::{Logger, LoggerConfig, LogLevel, MemoryTransport};
//! use logmask::masking::MaskingRule;
//!
//! let memory = Arc::new(MemoryTransport::new());
//! let logger = Logger::new(LoggerConfig::new().with_level(LogLevel::Debug))
//!     .with_transport(memory.clone());
//!
//! logger.add_masking_rule(MaskingRule::field("sessionId").partial()).await;
//! logger.info("signed in", Some(json!({ "sessionId": "abcdef123456" }))).await;
//! ```

mod config;
mod logger;
mod transport;
mod types;

pub use types::{EntryId, ErrorInfo, LogEntry, LogLevel, ParseLogLevelError, SHORT_ID_LENGTH};

pub use config::{DEFAULT_LOGGER_NAME, LoggerConfig};

pub use transport::{
    DEFAULT_MEMORY_CAPACITY, JsonTransport, MemoryTransport, TracingTransport, Transport,
};

pub use logger::Logger;

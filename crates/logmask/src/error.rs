//! Error types for masking configuration and log delivery.
//!
//! Masking itself never fails: every input shape degrades to a pass-through or
//! a full mask. Errors only surface while building a configuration (for
//! example an invalid field pattern) or when a transport cannot deliver an
//! entry.
//!
//! # Example
//! ```rust,ignore
//! use logmask::{MaskingError, MaskingRule};
//!
//! match MaskingRule::pattern("([unclosed") {
//!     Err(MaskingError::InvalidPattern { pattern, .. }) => eprintln!("bad pattern {pattern}"),
//!     _ => unreachable!(),
//! }
//! ```

use thiserror::Error;

/// Errors raised while building or loading a masking configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MaskingError {
    /// A rule's field pattern is not a valid regular expression.
    #[error("invalid field pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// The pattern as supplied by the caller
        pattern: String,
        /// The underlying regex compilation error
        #[source]
        source: regex::Error,
    },

    /// A rule definition is structurally invalid (e.g. no field matcher).
    #[error("invalid masking rule: {0}")]
    InvalidRule(String),

    /// A serialized configuration could not be parsed.
    #[error("invalid masking configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

/// Errors raised by a [`Transport`](crate::logging::Transport) while delivering an entry.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// The transport rejected or failed to deliver the entry.
    #[error("transport `{transport}` failed: {message}")]
    Delivery {
        /// Name of the failing transport
        transport: String,
        /// Human-readable failure description
        message: String,
    },

    /// The entry could not be serialized for the transport.
    #[error("failed to serialize log entry: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TransportError {
    /// Creates a delivery error for the named transport.
    pub fn delivery(transport: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Delivery {
            transport: transport.into(),
            message: message.into(),
        }
    }
}

/// Result type for configuration operations.
pub type MaskingResult<T> = Result<T, MaskingError>;

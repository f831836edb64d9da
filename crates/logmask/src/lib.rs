#![warn(missing_docs)]
//! # logmask
//!
//! A client-side structured logger whose core is a recursive masking engine
//! that scrubs sensitive values out of log payloads before they leave the
//! process.
//!
//! ## Overview
//!
//! - **Masking engine** over `serde_json::Value`: custom masker, ordered
//!   rules, case-insensitive sensitive fields, and text patterns for emails,
//!   phone numbers, credit cards and SSNs
//! - **Logger** that filters by level, masks each entry and fans it out to
//!   transports
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use logmask::prelude::*;
//! use serde_json::json;
//!
//! let masker = DataMasker::new(
//!     MaskingConfig::new().rule(MaskingRule::field("email").with_mask("*").partial()),
//! );
//!
//! let masked = masker.mask(&json!({
//!     "email": "jane@example.com",
//!     "password": "hunter2",
//!     "note": "call 555-123-4567",
//! }));
//!
//! assert_eq!(masked["password"], "***");
//! assert_eq!(masked["note"], "call ***");
//! ```
//!
//! ## Module Structure
//!
//! - [`masking`] - Masking engine, rules and configuration
//! - [`logging`] - Logger, entries and transports
//! - [`MaskingError`] / [`TransportError`] - Error types

mod error;
pub mod logging;
pub mod masking;

#[cfg(test)]
mod tests;

// Public API
pub use error::{MaskingError, MaskingResult, TransportError};
pub use logging::{
    EntryId, ErrorInfo, JsonTransport, LogEntry, LogLevel, Logger, LoggerConfig, MemoryTransport,
    TracingTransport, Transport,
};
pub use masking::{
    CustomMasker, DataMasker, FieldMatcher, MaskingConfig, MaskingRule, mask_value,
};

/// Prelude for convenient imports
///
/// ```rust,ignore
/// use logmask::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Masking
        CustomMasker,
        DataMasker,
        // Logging
        EntryId,
        ErrorInfo,
        FieldMatcher,
        JsonTransport,
        LogEntry,
        LogLevel,
        Logger,
        LoggerConfig,
        // Errors
        MaskingError,
        MaskingConfig,
        MaskingResult,
        MaskingRule,
        MemoryTransport,
        TracingTransport,
        Transport,
        TransportError,
        mask_value,
    };
    pub use std::sync::Arc;
}

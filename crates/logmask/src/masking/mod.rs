//! Sensitive Data Masking
//!
//! Scrubs sensitive values out of arbitrary log payloads before they leave
//! the process.
//!
//! # Decision Layers
//!
//! For every key of every mapping, in priority order:
//!
//! 1. **Custom masker**: if configured, its return value is final
//! 2. **Rules**: the first rule whose matcher (exact name or regex) accepts
//!    the key decides the mask, with optional partial or length-preserving
//!    output
//! 3. **Sensitive fields**: case-insensitive exact name match; strings get a
//!    length-preserving mask, everything else the mask token
//! 4. **Recursion**: nested mappings and arrays are scanned the same way
//!
//! Any string not intercepted by the layers above is scanned for emails,
//! phone numbers, credit-card numbers and SSNs.
//!
//! # Architecture
//!
//! - **constants**: default mask, default sensitive fields, limits
//! - **rule**: `FieldMatcher` and `MaskingRule`
//! - **config**: `MaskingConfig` with builder pattern and JSON loading
//! - **strategies**: pure masking algorithms (partial, length-preserving, email, card)
//! - **patterns**: compiled text patterns and `redact_patterns`
//! - **engine**: `DataMasker`, the recursive traversal
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use logmask::masking::{DataMasker, MaskingConfig, MaskingRule};
//! use serde_json::json;
//!
//! let config = MaskingConfig::new()
//!     .with_default_mask("*")
//!     .rule(MaskingRule::field("email").partial().preserve_length())
//!     .sensitive_field("sessionId");
//!
//! let masker = DataMasker::new(config);
//! let masked = masker.mask(&json!({
//!     "user": { "email": "jane@example.com", "password": "hunter2" }
//! }));
//! ```

mod config;
mod constants;
mod engine;
mod patterns;
mod rule;
mod strategies;

pub use constants::{
    CARD_VISIBLE_DIGITS, DEFAULT_MASK, DEFAULT_MAX_DEPTH, DEFAULT_SENSITIVE_FIELDS,
    MIN_CARD_DIGITS, PARTIAL_VISIBLE_PREFIX, PARTIAL_VISIBLE_SUFFIX,
};

pub use config::{CustomMasker, MaskingConfig};

pub use rule::{FieldMatcher, MaskingRule};

pub use strategies::{
    apply_masking_rule, mask_credit_card, mask_email, mask_sensitive_value, partial_mask,
    preserve_length_mask,
};

pub use patterns::{
    CREDIT_CARD_PATTERN, EMAIL_PATTERN, PHONE_PATTERN, SSN_PATTERN, redact_patterns,
};

pub use engine::{DataMasker, mask_value};

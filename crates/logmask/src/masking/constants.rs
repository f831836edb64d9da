//! Constants and default values for the masking engine.
//!
//! The default sensitive-field table is an immutable constant that each
//! [`MaskingConfig`](super::MaskingConfig) copies at construction, so
//! per-instance changes never leak into other loggers.

/// Default mask token used when a rule does not provide its own.
pub const DEFAULT_MASK: &str = "***";

/// Default maximum nesting depth the engine will descend into.
///
/// Matches serde_json's parser recursion limit, so any parsed document is
/// masked in full. Containers nested deeper are replaced by the mask token.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Number of leading characters kept visible by partial masking.
pub const PARTIAL_VISIBLE_PREFIX: usize = 2;

/// Number of trailing characters kept visible by partial masking.
pub const PARTIAL_VISIBLE_SUFFIX: usize = 2;

/// Minimum number of digits a credit-card match needs before its last four
/// digits are shown.
pub const MIN_CARD_DIGITS: usize = 8;

/// Number of trailing credit-card digits kept visible.
pub const CARD_VISIBLE_DIGITS: usize = 4;

/// Default list of sensitive field names.
///
/// Matching is case-insensitive and exact: `Password` matches `password`,
/// but `user_password` does not.
pub const DEFAULT_SENSITIVE_FIELDS: &[&str] = &[
    "password",
    "passwd",
    "pwd",
    "secret",
    "token",
    "apiKey",
    "api_key",
    "accessToken",
    "access_token",
    "refreshToken",
    "refresh_token",
    "authorization",
    "privateKey",
    "private_key",
    "creditCard",
    "credit_card",
    "cardNumber",
    "card_number",
    "cvv",
    "pin",
    "ssn",
    "socialSecurityNumber",
    "email",
    "phone",
    "phoneNumber",
    "address",
    "streetAddress",
    "zipCode",
    "postalCode",
    "dateOfBirth",
];

//! Configuration for the masking engine.
//!
//! [`MaskingConfig`] uses the builder pattern and is plain owned data apart
//! from the optional custom masker, which is a shared immutable function.
//! Cloning a config therefore yields an independent snapshot.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use super::constants::{DEFAULT_MASK, DEFAULT_MAX_DEPTH, DEFAULT_SENSITIVE_FIELDS};
use super::rule::MaskingRule;
use crate::error::MaskingResult;

/// Custom override called with `(key, value)` for every mapping key.
///
/// Its return value replaces the value verbatim; no rule, sensitivity check
/// or recursion is applied to that key afterwards.
pub type CustomMasker = Arc<dyn Fn(&str, &Value) -> Value + Send + Sync>;

/// Returns the default set of sensitive field names.
fn default_sensitive_fields() -> HashSet<String> {
    DEFAULT_SENSITIVE_FIELDS
        .iter()
        .map(|field| field.to_string())
        .collect()
}

/// Configuration for the masking engine.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaskingConfig {
    /// Whether masking is applied at all.
    pub enabled: bool,
    /// Mask token used for sensitive fields, patterns, and rules without their own token.
    pub default_mask: String,
    /// Ordered rules; the first matching rule wins.
    pub rules: Vec<MaskingRule>,
    /// Sensitive field names, matched case-insensitively.
    pub sensitive_fields: HashSet<String>,
    /// Optional override consulted before rules and sensitive fields.
    #[serde(skip)]
    pub custom_masker: Option<CustomMasker>,
    /// Containers nested deeper than this are replaced by the default mask.
    pub max_depth: usize,
}

impl Default for MaskingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_mask: DEFAULT_MASK.to_string(),
            rules: Vec::new(),
            sensitive_fields: default_sensitive_fields(),
            custom_masker: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl fmt::Debug for MaskingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaskingConfig")
            .field("enabled", &self.enabled)
            .field("default_mask", &self.default_mask)
            .field("rules", &self.rules)
            .field("sensitive_fields", &self.sensitive_fields)
            .field(
                "custom_masker",
                &self.custom_masker.as_ref().map(|_| "<custom masker>"),
            )
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

impl MaskingConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration with masking turned off.
    pub fn disabled() -> Self {
        Self::default().with_enabled(false)
    }

    /// Parses a configuration from JSON.
    ///
    /// Options use camelCase names (`enabled`, `defaultMask`, `rules`,
    /// `sensitiveFields`, `maxDepth`); missing options take their defaults.
    /// Rule patterns are compiled here, so an invalid regex fails at load time.
    ///
    /// ```rust,ignore
    /// let config = MaskingConfig::from_json(r##"{
    ///     "defaultMask": "#",
    ///     "rules": [{ "pattern": "^card_", "partial": true }]
    /// }"##)?;
    /// ```
    pub fn from_json(json: &str) -> MaskingResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets whether masking is applied.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the default mask token.
    pub fn with_default_mask(mut self, mask: impl Into<String>) -> Self {
        self.default_mask = mask.into();
        self
    }

    /// Appends a masking rule.
    pub fn rule(mut self, rule: MaskingRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Appends multiple masking rules, preserving their order.
    pub fn rules(mut self, rules: impl IntoIterator<Item = MaskingRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Adds a sensitive field name.
    pub fn sensitive_field(mut self, field: impl Into<String>) -> Self {
        self.sensitive_fields.insert(field.into());
        self
    }

    /// Adds multiple sensitive field names.
    pub fn sensitive_fields(mut self, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for field in fields {
            self.sensitive_fields.insert(field.into());
        }
        self
    }

    /// Clears all sensitive field names (removes the defaults).
    pub fn clear_sensitive_fields(mut self) -> Self {
        self.sensitive_fields.clear();
        self
    }

    /// Installs a custom masker.
    pub fn with_custom_masker<F>(mut self, masker: F) -> Self
    where
        F: Fn(&str, &Value) -> Value + Send + Sync + 'static,
    {
        self.custom_masker = Some(Arc::new(masker));
        self
    }

    /// Sets the maximum nesting depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Returns true if `field` is a sensitive field name (case-insensitive).
    pub fn is_sensitive_field(&self, field: &str) -> bool {
        let field = field.to_lowercase();
        self.sensitive_fields
            .iter()
            .any(|candidate| candidate.to_lowercase() == field)
    }
}

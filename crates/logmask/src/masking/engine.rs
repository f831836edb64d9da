//! The recursive masking engine.
//!
//! [`DataMasker`] walks a `serde_json::Value` once, dispatching on its shape:
//!
//! - **Strings** go through pattern redaction
//! - **Arrays** are masked element by element, keeping order and length
//! - **Objects** keep their key set; each key goes through the custom masker,
//!   the first matching rule, or the sensitive-field check before the engine
//!   recurses into the value
//! - **Other scalars** pass through unchanged
//!
//! Internally every pass returns `None` when nothing changed, so unchanged
//! subtrees are cloned once at the end instead of being rebuilt.

use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::debug;

use super::config::{CustomMasker, MaskingConfig};
use super::patterns::redact_patterns;
use super::rule::MaskingRule;
use super::strategies::{apply_masking_rule, mask_sensitive_value};
use crate::logging::{ErrorInfo, LogEntry};

/// Masking engine owning its configuration.
///
/// `mask` takes `&self` and never mutates state, so a masker can be shared
/// between threads. Configuration changes require `&mut self`.
#[derive(Debug, Clone)]
pub struct DataMasker {
    config: MaskingConfig,
    /// Lowercase sensitive field names, rebuilt whenever the raw set changes
    sensitive_fields_lower: HashSet<String>,
}

impl Default for DataMasker {
    fn default() -> Self {
        Self::new(MaskingConfig::default())
    }
}

impl DataMasker {
    /// Creates a masker from a configuration.
    pub fn new(config: MaskingConfig) -> Self {
        let sensitive_fields_lower = lowercase_fields(&config.sensitive_fields);
        Self {
            config,
            sensitive_fields_lower,
        }
    }

    /// Masks a value, returning a transformed copy.
    ///
    /// Returns an equal copy when masking is disabled.
    pub fn mask(&self, value: &Value) -> Value {
        if !self.config.enabled {
            return value.clone();
        }
        self.mask_internal(value, 0)
            .unwrap_or_else(|| value.clone())
    }

    /// Applies string-pattern redaction to free text such as a log message.
    pub fn mask_text(&self, text: &str) -> String {
        if !self.config.enabled {
            return text.to_string();
        }
        redact_patterns(text, &self.config.default_mask).into_owned()
    }

    /// Returns a masked copy of a log entry.
    ///
    /// The message and error message get pattern redaction, the context goes
    /// through the full engine. The original entry is left untouched.
    pub fn mask_entry(&self, entry: &LogEntry) -> LogEntry {
        if !self.config.enabled {
            return entry.clone();
        }

        LogEntry {
            message: self.mask_text(&entry.message),
            context: entry.context.as_ref().map(|context| self.mask(context)),
            error: entry.error.as_ref().map(|error| ErrorInfo {
                message: self.mask_text(&error.message),
                kind: error.kind.clone(),
            }),
            ..entry.clone()
        }
    }

    /// Adds a sensitive field name. No-op if the exact name is already present.
    pub fn add_sensitive_field(&mut self, field: impl Into<String>) {
        let field = field.into();
        if self.config.sensitive_fields.contains(&field) {
            return;
        }
        debug!(field = %field, "Adding sensitive field");
        self.sensitive_fields_lower.insert(field.to_lowercase());
        self.config.sensitive_fields.insert(field);
    }

    /// Removes a sensitive field name (exact match on the stored name).
    pub fn remove_sensitive_field(&mut self, field: &str) {
        if self.config.sensitive_fields.remove(field) {
            debug!(field = %field, "Removed sensitive field");
            self.sensitive_fields_lower = lowercase_fields(&self.config.sensitive_fields);
        }
    }

    /// Appends a masking rule; it is consulted after every existing rule.
    pub fn add_rule(&mut self, rule: MaskingRule) {
        debug!(field = ?rule.field, rules = self.config.rules.len() + 1, "Adding masking rule");
        self.config.rules.push(rule);
    }

    /// Installs or replaces the custom masker.
    pub fn set_custom_masker<F>(&mut self, masker: F)
    where
        F: Fn(&str, &Value) -> Value + Send + Sync + 'static,
    {
        self.set_custom_masker_arc(std::sync::Arc::new(masker));
    }

    /// Installs or replaces the custom masker from a shared function.
    pub fn set_custom_masker_arc(&mut self, masker: CustomMasker) {
        debug!("Installing custom masker");
        self.config.custom_masker = Some(masker);
    }

    /// Removes the custom masker, restoring rule and sensitive-field handling.
    pub fn clear_custom_masker(&mut self) {
        self.config.custom_masker = None;
    }

    /// Returns a snapshot of the current configuration.
    ///
    /// The snapshot is an independent copy; changing it does not affect the masker.
    pub fn config(&self) -> MaskingConfig {
        self.config.clone()
    }

    /// Returns true if `key` names a sensitive field (case-insensitive).
    pub fn is_sensitive(&self, key: &str) -> bool {
        self.sensitive_fields_lower.contains(&key.to_lowercase())
    }

    fn mask_internal(&self, value: &Value, depth: usize) -> Option<Value> {
        match value {
            Value::String(text) => match redact_patterns(text, &self.config.default_mask) {
                std::borrow::Cow::Owned(masked) => Some(Value::String(masked)),
                std::borrow::Cow::Borrowed(_) => None,
            },
            Value::Array(_) | Value::Object(_) if depth >= self.config.max_depth => {
                debug!(
                    max_depth = self.config.max_depth,
                    "Masking subtree beyond maximum depth"
                );
                Some(Value::String(self.config.default_mask.clone()))
            }
            Value::Array(items) => self.mask_array(items, depth),
            Value::Object(map) => self.mask_object(map, depth),
            _ => None,
        }
    }

    fn mask_array(&self, items: &[Value], depth: usize) -> Option<Value> {
        let masked: Vec<Option<Value>> = items
            .iter()
            .map(|item| self.mask_internal(item, depth + 1))
            .collect();

        if masked.iter().all(Option::is_none) {
            return None;
        }

        Some(Value::Array(
            masked
                .into_iter()
                .zip(items)
                .map(|(masked, original)| masked.unwrap_or_else(|| original.clone()))
                .collect(),
        ))
    }

    fn mask_object(&self, map: &Map<String, Value>, depth: usize) -> Option<Value> {
        let mut masked = Map::new();
        let mut any_changed = false;

        for (key, val) in map {
            match self.mask_field(key, val, depth) {
                Some(masked_val) => {
                    masked.insert(key.clone(), masked_val);
                    any_changed = true;
                }
                None => {
                    masked.insert(key.clone(), val.clone());
                }
            }
        }

        any_changed.then_some(Value::Object(masked))
    }

    /// Per-key decision: custom masker, first matching rule, sensitive field, recursion.
    fn mask_field(&self, key: &str, value: &Value, depth: usize) -> Option<Value> {
        if let Some(custom) = &self.config.custom_masker {
            return Some(custom(key, value));
        }

        let key_lower = key.to_lowercase();

        if let Some(rule) = self
            .config
            .rules
            .iter()
            .find(|rule| rule.matches(key, &key_lower))
        {
            return Some(apply_masking_rule(value, rule, &self.config.default_mask));
        }

        if self.sensitive_fields_lower.contains(&key_lower) {
            return Some(mask_sensitive_value(value, &self.config.default_mask));
        }

        self.mask_internal(value, depth + 1)
    }
}

fn lowercase_fields(fields: &HashSet<String>) -> HashSet<String> {
    fields.iter().map(|field| field.to_lowercase()).collect()
}

/// Masks a value with a one-off masker built from `config`.
///
/// Prefer a long-lived [`DataMasker`] when masking repeatedly.
pub fn mask_value(value: &Value, config: &MaskingConfig) -> Value {
    DataMasker::new(config.clone()).mask(value)
}

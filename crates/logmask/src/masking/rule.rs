//! Masking rules: per-key overrides matched by exact name or pattern.

use regex::Regex;
use serde::Deserialize;

use crate::error::{MaskingError, MaskingResult};

/// How a rule selects the keys it applies to.
#[derive(Debug, Clone)]
pub enum FieldMatcher {
    /// Case-insensitive exact key name.
    Name {
        /// The name as configured.
        name: String,
        /// Lowercase form, compared against each key's lowercase form.
        lowercase: String,
    },
    /// Regular expression tested against the raw key, used as-is.
    Pattern(Regex),
}

impl FieldMatcher {
    /// Creates a case-insensitive name matcher.
    pub fn name(name: impl Into<String>) -> Self {
        let name = name.into();
        let lowercase = name.to_lowercase();
        Self::Name { name, lowercase }
    }

    /// Compiles a pattern matcher.
    pub fn pattern(pattern: &str) -> MaskingResult<Self> {
        Regex::new(pattern)
            .map(Self::Pattern)
            .map_err(|source| MaskingError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    /// Returns true if this matcher selects `key`.
    ///
    /// `key_lower` must be the lowercase form of `key`; callers compute it once
    /// per key and reuse it across rules.
    pub fn matches(&self, key: &str, key_lower: &str) -> bool {
        match self {
            Self::Name { lowercase, .. } => lowercase == key_lower,
            Self::Pattern(regex) => regex.is_match(key),
        }
    }
}

impl From<&str> for FieldMatcher {
    fn from(name: &str) -> Self {
        Self::name(name)
    }
}

impl From<String> for FieldMatcher {
    fn from(name: String) -> Self {
        Self::name(name)
    }
}

impl From<Regex> for FieldMatcher {
    fn from(regex: Regex) -> Self {
        Self::Pattern(regex)
    }
}

/// A configured override for keys matched by [`FieldMatcher`].
///
/// # Example
/// ```rust,ignore
/// use logmask::MaskingRule;
///
/// let rule = MaskingRule::field("email").with_mask("*").partial().preserve_length();
/// let cards = MaskingRule::pattern("^card_")?.with_mask("#");
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawRule")]
pub struct MaskingRule {
    /// Which keys the rule applies to.
    pub field: FieldMatcher,
    /// Mask token; falls back to the config's default mask when absent.
    pub mask: Option<String>,
    /// Keep a visible prefix and suffix and mask only the middle.
    pub partial: bool,
    /// Keep the original character count when the mask is a single character.
    pub preserve_length: bool,
}

impl MaskingRule {
    /// Creates a rule for the given matcher with full replacement.
    pub fn new(field: impl Into<FieldMatcher>) -> Self {
        Self {
            field: field.into(),
            mask: None,
            partial: false,
            preserve_length: false,
        }
    }

    /// Creates a rule matching a key by case-insensitive exact name.
    pub fn field(name: impl Into<String>) -> Self {
        Self::new(FieldMatcher::name(name))
    }

    /// Creates a rule matching keys against a regular expression.
    ///
    /// Fails with [`MaskingError::InvalidPattern`] if the pattern does not compile.
    pub fn pattern(pattern: &str) -> MaskingResult<Self> {
        FieldMatcher::pattern(pattern).map(Self::new)
    }

    /// Sets the rule's mask token.
    pub fn with_mask(mut self, mask: impl Into<String>) -> Self {
        self.mask = Some(mask.into());
        self
    }

    /// Enables partial masking.
    pub fn partial(mut self) -> Self {
        self.partial = true;
        self
    }

    /// Enables length preservation.
    pub fn preserve_length(mut self) -> Self {
        self.preserve_length = true;
        self
    }

    /// Returns true if this rule applies to `key` (see [`FieldMatcher::matches`]).
    pub fn matches(&self, key: &str, key_lower: &str) -> bool {
        self.field.matches(key, key_lower)
    }

    /// Resolves the mask token against the config's default.
    pub fn mask_or<'a>(&'a self, default_mask: &'a str) -> &'a str {
        self.mask.as_deref().unwrap_or(default_mask)
    }
}

/// Serialized rule form: exactly one of `field` or `pattern`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawRule {
    field: Option<String>,
    pattern: Option<String>,
    mask: Option<String>,
    #[serde(default)]
    partial: bool,
    #[serde(default)]
    preserve_length: bool,
}

impl TryFrom<RawRule> for MaskingRule {
    type Error = MaskingError;

    fn try_from(raw: RawRule) -> Result<Self, Self::Error> {
        let field = match (raw.field, raw.pattern) {
            (Some(name), None) => FieldMatcher::name(name),
            (None, Some(pattern)) => FieldMatcher::pattern(&pattern)?,
            (Some(_), Some(_)) => {
                return Err(MaskingError::InvalidRule(
                    "rule must set either `field` or `pattern`, not both".to_string(),
                ));
            }
            (None, None) => {
                return Err(MaskingError::InvalidRule(
                    "rule must set `field` or `pattern`".to_string(),
                ));
            }
        };

        Ok(Self {
            field,
            mask: raw.mask,
            partial: raw.partial,
            preserve_length: raw.preserve_length,
        })
    }
}

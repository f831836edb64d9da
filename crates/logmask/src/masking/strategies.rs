//! Masking algorithms over explicit types.
//!
//! These are pure functions: they never look at configuration beyond the
//! arguments they receive, which keeps them easy to test in isolation.
//! Lengths are measured in `char`s, not bytes.

use serde_json::Value;

use super::constants::{
    CARD_VISIBLE_DIGITS, MIN_CARD_DIGITS, PARTIAL_VISIBLE_PREFIX, PARTIAL_VISIBLE_SUFFIX,
};
use super::rule::MaskingRule;

/// Replaces a string with a mask of the same length.
///
/// Only single-character tokens can preserve length; a multi-character token
/// is returned verbatim regardless of the original length.
///
/// ```rust,ignore
/// assert_eq!(preserve_length_mask("secret", "*"), "******");
/// assert_eq!(preserve_length_mask("secret", "***"), "***");
/// ```
pub fn preserve_length_mask(value: &str, token: &str) -> String {
    let mut token_chars = token.chars();
    match (token_chars.next(), token_chars.next()) {
        (Some(ch), None) => std::iter::repeat_n(ch, value.chars().count()).collect(),
        _ => token.to_string(),
    }
}

/// Keeps the first two and last two characters and masks the middle.
///
/// Strings of four characters or fewer are masked entirely. With
/// `preserve_length` the middle is the token repeated once per hidden
/// character; otherwise the token appears once.
///
/// ```rust,ignore
/// assert_eq!(partial_mask("sensitive", "*", true), "se*****ve");
/// assert_eq!(partial_mask("sensitive", "***", false), "se***ve");
/// ```
pub fn partial_mask(value: &str, token: &str, preserve_length: bool) -> String {
    let chars: Vec<char> = value.chars().collect();
    let visible = PARTIAL_VISIBLE_PREFIX + PARTIAL_VISIBLE_SUFFIX;

    if chars.len() <= visible {
        return if preserve_length {
            preserve_length_mask(value, token)
        } else {
            token.to_string()
        };
    }

    let hidden = chars.len() - visible;
    let middle = if preserve_length {
        token.repeat(hidden)
    } else {
        token.to_string()
    };

    let prefix: String = chars[..PARTIAL_VISIBLE_PREFIX].iter().collect();
    let suffix: String = chars[chars.len() - PARTIAL_VISIBLE_SUFFIX..].iter().collect();
    format!("{prefix}{middle}{suffix}")
}

/// Masks the local part of an email address and keeps the domain.
///
/// Local parts of two characters or fewer are replaced by the token; longer
/// ones keep their first and last character around the token.
pub fn mask_email(email: &str, token: &str) -> String {
    let Some((local, domain)) = email.split_once('@') else {
        return token.to_string();
    };

    let local_chars: Vec<char> = local.chars().collect();
    match local_chars.as_slice() {
        [first, .., last] if local_chars.len() > 2 => format!("{first}{token}{last}@{domain}"),
        _ => format!("{token}@{domain}"),
    }
}

/// Masks a credit-card number, keeping only its last four digits.
///
/// Separators are dropped. With fewer than eight digits the whole match is
/// replaced by the token.
pub fn mask_credit_card(card: &str, token: &str) -> String {
    let digits: Vec<char> = card.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() < MIN_CARD_DIGITS {
        return token.to_string();
    }

    let hidden = digits.len() - CARD_VISIBLE_DIGITS;
    let visible: String = digits[hidden..].iter().collect();
    format!("{}{}", token.repeat(hidden), visible)
}

/// Applies a rule to the value of a matched key.
///
/// Null passes through and non-strings are replaced by the rule's token.
/// Strings honor the rule's `partial` and `preserve_length` flags.
pub fn apply_masking_rule(value: &Value, rule: &MaskingRule, default_mask: &str) -> Value {
    let token = rule.mask_or(default_mask);

    match value {
        Value::Null => Value::Null,
        Value::String(text) if rule.partial => {
            Value::String(partial_mask(text, token, rule.preserve_length))
        }
        Value::String(text) if rule.preserve_length => {
            Value::String(preserve_length_mask(text, token))
        }
        _ => Value::String(token.to_string()),
    }
}

/// Masks the value of a sensitive field.
///
/// Null passes through, strings get a length-preserving mask and every other
/// shape (numbers, booleans, arrays, objects) is replaced by the token.
pub fn mask_sensitive_value(value: &Value, token: &str) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::String(text) => Value::String(preserve_length_mask(text, token)),
        _ => Value::String(token.to_string()),
    }
}

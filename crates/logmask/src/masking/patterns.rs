//! String-pattern redaction for free text.
//!
//! Every string that reaches this stage is scanned for four kinds of
//! sensitive data, in a fixed order: email addresses, phone numbers,
//! credit-card numbers and SSNs. Each pattern is applied globally to the
//! whole string.
//!
//! Phone, card and SSN matches must not touch another digit on either side.
//! Letters, `_` and punctuation are valid neighbours, so `card_4532...` is
//! still caught, while a 16-digit card number is never partially consumed by
//! the shorter phone pattern that runs before it.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

use super::strategies::{mask_credit_card, mask_email};

/// Email addresses: local part, `@`, dotted domain, alphabetic TLD of 2+ letters.
pub static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
        .expect("email pattern is a valid regex")
});

/// North American phone numbers: optional area code (bare or parenthesized,
/// optionally preceded by `+1`), 3-digit exchange, 4-digit line number.
///
/// The country prefix is only accepted together with an area code; a bare
/// `1` in front of a 7-digit number is more often the tail of a longer
/// digit group than a dialling prefix.
pub static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:(?:\+?1[-.\s]?)?(?:\([0-9]{3}\)|[0-9]{3})[-.\s]?)?[0-9]{3}[-.\s]?[0-9]{4}",
    )
    .expect("phone pattern is a valid regex")
});

/// Four groups of four digits separated by `-`, whitespace, or nothing.
pub static CREDIT_CARD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:[0-9]{4}[-\s]?){3}[0-9]{4}").expect("credit card pattern is a valid regex")
});

/// US social security numbers: 3-2-4 digits with optional separators.
pub static SSN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9]{3}[-\s]?[0-9]{2}[-\s]?[0-9]{4}").expect("SSN pattern is a valid regex")
});

/// How a match must relate to the characters around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    /// Whatever the regex itself asserts.
    Pattern,
    /// No ASCII digit directly before or after the match.
    NonDigit,
}

impl Boundary {
    fn accepts(self, text: &str, start: usize, end: usize) -> bool {
        match self {
            Self::Pattern => true,
            Self::NonDigit => {
                let before = text[..start].chars().next_back();
                let after = text[end..].chars().next();
                !before.is_some_and(|c| c.is_ascii_digit())
                    && !after.is_some_and(|c| c.is_ascii_digit())
            }
        }
    }
}

/// Runs one global substitution, allocating only when the pattern matches.
///
/// None of the patterns can match the empty string, so every accepted match
/// advances the scan.
///
/// A candidate rejected by `boundary` is retried one character further on,
/// so later matches in the same string are still found.
fn substitute<'a, F>(
    text: Cow<'a, str>,
    pattern: &Regex,
    boundary: Boundary,
    mut replace: F,
) -> Cow<'a, str>
where
    F: FnMut(&str) -> String,
{
    let mut masked: Option<String> = None;
    let mut last = 0;
    let mut pos = 0;

    while let Some(found) = pattern.find_at(&text, pos) {
        if !boundary.accepts(&text, found.start(), found.end()) {
            pos = found.start()
                + text[found.start()..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
            continue;
        }

        let out = masked.get_or_insert_with(|| String::with_capacity(text.len()));
        out.push_str(&text[last..found.start()]);
        out.push_str(&replace(found.as_str()));
        last = found.end();
        pos = last;
    }

    match masked {
        Some(mut out) => {
            out.push_str(&text[last..]);
            Cow::Owned(out)
        }
        None => text,
    }
}

/// Redacts emails, phone numbers, credit cards and SSNs from `text`.
///
/// Returns [`Cow::Borrowed`] when nothing matched, so callers can tell
/// whether the string changed without comparing it.
///
/// ```rust,ignore
/// let masked = redact_patterns("mail john.doe@example.com", "***");
/// assert_eq!(masked, "mail j***e@example.com");
/// ```
pub fn redact_patterns<'a>(text: &'a str, token: &str) -> Cow<'a, str> {
    let text = Cow::Borrowed(text);
    let text = substitute(text, &EMAIL_PATTERN, Boundary::Pattern, |found| {
        mask_email(found, token)
    });
    let text = substitute(text, &PHONE_PATTERN, Boundary::NonDigit, |_| {
        token.to_string()
    });
    let text = substitute(text, &CREDIT_CARD_PATTERN, Boundary::NonDigit, |found| {
        mask_credit_card(found, token)
    });
    substitute(text, &SSN_PATTERN, Boundary::NonDigit, |_| token.to_string())
}

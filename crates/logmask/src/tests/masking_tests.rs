use crate::logging::{ErrorInfo, LogEntry, LogLevel};
use crate::masking::{DataMasker, MaskingConfig, MaskingRule, mask_value, partial_mask};

use proptest::prelude::*;
use serde_json::{Value, json};

fn star_masker() -> DataMasker {
    DataMasker::new(MaskingConfig::new().with_default_mask("*"))
}

/// Arbitrary JSON values, a few levels deep.
fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-zA-Z0-9@. -]{0,24}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::hash_map("[a-zA-Z_]{1,12}", inner, 0..6)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

// =============================================================================
// Dispatch
// =============================================================================

#[test]
fn test_disabled_masking_is_identity() {
    let masker = DataMasker::new(MaskingConfig::disabled());
    let input = json!({
        "password": "secret123",
        "note": "mail john.doe@example.com",
    });
    assert_eq!(masker.mask(&input), input);
    assert_eq!(masker.mask_text("call 555-123-4567"), "call 555-123-4567");
}

#[test]
fn test_scalars_unchanged() {
    let masker = DataMasker::default();
    assert_eq!(masker.mask(&json!(42)), json!(42));
    assert_eq!(masker.mask(&json!(1.5)), json!(1.5));
    assert_eq!(masker.mask(&json!(true)), json!(true));
    assert_eq!(masker.mask(&json!(null)), json!(null));
    assert_eq!(masker.mask(&json!("hello")), json!("hello"));
}

#[test]
fn test_top_level_string_pattern_redaction() {
    let masker = DataMasker::default();
    assert_eq!(
        masker.mask(&json!("reach me at john.doe@example.com")),
        json!("reach me at j***e@example.com")
    );
}

#[test]
fn test_input_not_mutated() {
    let masker = DataMasker::default();
    let input = json!({"user": {"password": "secret", "name": "John"}});
    let before = input.clone();
    let _ = masker.mask(&input);
    assert_eq!(input, before);
}

// =============================================================================
// Sensitive fields
// =============================================================================

#[test]
fn test_sensitive_field_multi_char_token() {
    let masker = DataMasker::default();
    let masked = masker.mask(&json!({
        "username": "john",
        "password": "secret123"
    }));
    assert_eq!(masked["username"], "john");
    assert_eq!(masked["password"], "***");
}

#[test]
fn test_sensitive_field_preserves_length_with_single_char_token() {
    let masked = star_masker().mask(&json!({"password": "secret123"}));
    assert_eq!(masked["password"], "*********");
}

#[test]
fn test_sensitive_field_case_insensitive() {
    let masked = star_masker().mask(&json!({
        "password": "secret",
        "Password": "secret",
        "PASSWORD": "secret"
    }));
    assert_eq!(masked["password"], "******");
    assert_eq!(masked["Password"], "******");
    assert_eq!(masked["PASSWORD"], "******");
}

#[test]
fn test_sensitive_field_exact_match_only() {
    let masked = DataMasker::default().mask(&json!({"user_password": "secret3"}));
    assert_eq!(masked["user_password"], "secret3");
}

#[test]
fn test_sensitive_non_string_values_replaced() {
    let masked = DataMasker::default().mask(&json!({
        "cvv": 123,
        "pin": true,
        "address": {"street": "Main St", "city": "Springfield"},
        "token": null
    }));
    assert_eq!(masked["cvv"], "***");
    assert_eq!(masked["pin"], "***");
    assert_eq!(masked["address"], "***");
    assert_eq!(masked["token"], json!(null));
}

#[test]
fn test_nested_mappings() {
    let masked = DataMasker::default().mask(&json!({
        "user": {"profile": {"password": "x", "name": "John"}}
    }));
    assert_eq!(masked["user"]["profile"]["password"], "***");
    assert_eq!(masked["user"]["profile"]["name"], "John");
}

#[test]
fn test_arrays_masked_elementwise() {
    let input = json!([{"password": "a"}, {"password": "b"}]);
    let masked = star_masker().mask(&input);

    let items = masked.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0], json!({"password": "*"}));
    assert_eq!(items[1], json!({"password": "*"}));
}

#[test]
fn test_array_order_preserved() {
    let masked = DataMasker::default().mask(&json!(["plain", "555-123-4567", 7]));
    assert_eq!(masked, json!(["plain", "***", 7]));
}

#[test]
fn test_string_patterns_in_nested_values() {
    let masked = DataMasker::default().mask(&json!({
        "order": {
            "note": "contact john.doe@example.com",
            "payment": "card 4532123456789012",
            "ids": ["SSN 123-45-6789"]
        }
    }));
    assert_eq!(masked["order"]["note"], "contact j***e@example.com");
    assert_eq!(
        masked["order"]["payment"],
        format!("card {}9012", "***".repeat(12))
    );
    assert_eq!(masked["order"]["ids"][0], "SSN ***");
}

// =============================================================================
// Rules
// =============================================================================

#[test]
fn test_rule_takes_precedence_over_sensitive_field() {
    let masker = DataMasker::new(
        MaskingConfig::new().rule(
            MaskingRule::field("password")
                .with_mask("#")
                .partial()
                .preserve_length(),
        ),
    );
    let masked = masker.mask(&json!({"password": "supersecret"}));
    assert_eq!(masked["password"], "su#######et");
}

#[test]
fn test_rule_name_match_is_case_insensitive() {
    let masker = DataMasker::new(
        MaskingConfig::new().rule(MaskingRule::field("sessionId").with_mask("X")),
    );
    let masked = masker.mask(&json!({"SESSIONID": "abc", "sessionid": "def"}));
    assert_eq!(masked["SESSIONID"], "X");
    assert_eq!(masked["sessionid"], "X");
}

#[test]
fn test_pattern_rule_is_case_sensitive() {
    let masker = DataMasker::new(
        MaskingConfig::new()
            .with_default_mask("*")
            .rule(MaskingRule::pattern("^card_").unwrap().with_mask("#")),
    );
    let masked = masker.mask(&json!({
        "card_holder": "Jane",
        "CARD_holder": "Jane"
    }));
    assert_eq!(masked["card_holder"], "#");
    assert_eq!(masked["CARD_holder"], "Jane");
}

#[test]
fn test_pattern_rule_with_inline_flags() {
    let masker = DataMasker::new(
        MaskingConfig::new().rule(MaskingRule::pattern("(?i)^card_").unwrap()),
    );
    let masked = masker.mask(&json!({"CARD_holder": "Jane"}));
    assert_eq!(masked["CARD_holder"], "***");
}

#[test]
fn test_first_matching_rule_wins() {
    let masker = DataMasker::new(
        MaskingConfig::new()
            .rule(MaskingRule::pattern("^tok").unwrap().with_mask("A"))
            .rule(MaskingRule::field("token").with_mask("B")),
    );
    let masked = masker.mask(&json!({"token": "abc"}));
    assert_eq!(masked["token"], "A");
}

#[test]
fn test_rule_does_not_recurse_into_objects() {
    let masker =
        DataMasker::new(MaskingConfig::new().rule(MaskingRule::field("profile").partial()));
    let masked = masker.mask(&json!({"profile": {"name": "John", "age": 30}}));
    assert_eq!(masked["profile"], "***");
}

#[test]
fn test_rule_keeps_null() {
    let masker = DataMasker::new(MaskingConfig::new().rule(MaskingRule::field("nickname")));
    let masked = masker.mask(&json!({"nickname": null}));
    assert_eq!(masked["nickname"], json!(null));
}

#[test]
fn test_rule_output_skips_pattern_scan() {
    // The rule's output is final even if it looks like an email.
    let masker = DataMasker::new(
        MaskingConfig::new().rule(MaskingRule::field("contact").with_mask("x@example.com")),
    );
    let masked = masker.mask(&json!({"contact": "jane"}));
    assert_eq!(masked["contact"], "x@example.com");
}

// =============================================================================
// Custom masker
// =============================================================================

#[test]
fn test_custom_masker_takes_precedence() {
    let masker = DataMasker::new(
        MaskingConfig::new()
            .rule(MaskingRule::field("password").with_mask("RULE"))
            .with_custom_masker(|key, value| {
                if key == "password" {
                    json!("CUSTOM")
                } else {
                    value.clone()
                }
            }),
    );

    let masked = masker.mask(&json!({
        "password": "secret",
        "token": "abc",
        "note": "mail john.doe@example.com",
        "nested": {"password": "inner"}
    }));

    assert_eq!(masked["password"], "CUSTOM");
    // Custom masker output is final: no sensitive-field or pattern pass afterwards
    assert_eq!(masked["token"], "abc");
    assert_eq!(masked["note"], "mail john.doe@example.com");
    assert_eq!(masked["nested"], json!({"password": "inner"}));
}

#[test]
fn test_custom_masker_not_applied_to_top_level_strings() {
    let masker = DataMasker::new(MaskingConfig::new().with_custom_masker(|_, _| json!("X")));
    assert_eq!(masker.mask(&json!("call 555-123-4567")), json!("call ***"));
}

// =============================================================================
// Depth guard
// =============================================================================

#[test]
fn test_depth_guard_masks_deep_subtrees() {
    let masker = DataMasker::new(MaskingConfig::new().with_max_depth(2));
    let masked = masker.mask(&json!({"a": {"b": {"c": 1}}, "flat": "ok"}));
    assert_eq!(masked, json!({"a": {"b": "***"}, "flat": "ok"}));
}

#[test]
fn test_default_depth_handles_deep_nesting() {
    let mut value = json!({"password": "secret"});
    for _ in 0..100 {
        value = json!({"level": value});
    }
    let masked = DataMasker::default().mask(&value);

    let mut cursor = &masked;
    for _ in 0..100 {
        cursor = &cursor["level"];
    }
    assert_eq!(cursor["password"], "***");
}

// =============================================================================
// Entries
// =============================================================================

#[test]
fn test_mask_entry_masks_message_context_and_error() {
    let entry = LogEntry::new(LogLevel::Error, "login failed for john.doe@example.com")
        .with_context(json!({"password": "hunter2", "attempt": 3}))
        .with_error(ErrorInfo::new("lookup 555-123-4567 failed").with_kind("io"));

    let masked = DataMasker::default().mask_entry(&entry);

    assert_eq!(masked.message, "login failed for j***e@example.com");
    assert_eq!(masked.context, Some(json!({"password": "***", "attempt": 3})));
    let error = masked.error.unwrap();
    assert_eq!(error.message, "lookup *** failed");
    assert_eq!(error.kind.as_deref(), Some("io"));

    // Original entry untouched, identity preserved
    assert_eq!(entry.message, "login failed for john.doe@example.com");
    assert_eq!(masked.id, entry.id);
    assert_eq!(masked.timestamp, entry.timestamp);
}

#[test]
fn test_mask_value_helper() {
    let config = MaskingConfig::new().with_default_mask("*");
    assert_eq!(
        mask_value(&json!({"pin": "1234"}), &config),
        json!({"pin": "****"})
    );
}

proptest! {
    /// Property: disabled masking returns a value equal to the input.
    #[test]
    fn prop_disabled_is_identity(value in arb_json()) {
        let masker = DataMasker::new(MaskingConfig::disabled());
        prop_assert_eq!(masker.mask(&value), value);
    }

    /// Property: masking a mapping never adds or drops keys.
    #[test]
    fn prop_mask_preserves_key_set(
        map in prop::collection::hash_map("[a-zA-Z_]{1,12}", arb_json(), 0..8)
    ) {
        let input = Value::Object(map.into_iter().collect());
        let masked = DataMasker::default().mask(&input);

        let input_keys: Vec<&String> = input.as_object().unwrap().keys().collect();
        let masked_keys: Vec<&String> = masked.as_object().unwrap().keys().collect();
        prop_assert_eq!(input_keys, masked_keys);
    }

    /// Property: arrays keep their length.
    #[test]
    fn prop_mask_preserves_array_length(items in prop::collection::vec(arb_json(), 0..10)) {
        let masked = DataMasker::default().mask(&Value::Array(items.clone()));
        prop_assert_eq!(masked.as_array().unwrap().len(), items.len());
    }

    /// Property: sensitive matching ignores the key's case.
    #[test]
    fn prop_sensitive_match_case_insensitive(
        upper in prop::collection::vec(any::<bool>(), 8),
        secret in "[a-z0-9]{1,20}"
    ) {
        let key: String = "password"
            .chars()
            .zip(upper)
            .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
            .collect();

        let masker = star_masker();
        let masked = masker.mask(&json!({ key.clone(): secret.clone() }));
        let reference = masker.mask(&json!({ "password": secret }));
        prop_assert_eq!(&masked[key.as_str()], &reference["password"]);
    }

    /// Property: a rule on a sensitive field always wins.
    #[test]
    fn prop_rule_beats_sensitive_field(secret in "[a-z]{1,20}") {
        let masker = DataMasker::new(MaskingConfig::new().rule(
            MaskingRule::field("password").with_mask("*").partial().preserve_length(),
        ));
        let masked = masker.mask(&json!({ "password": secret.clone() }));
        prop_assert_eq!(&masked["password"], &json!(partial_mask(&secret, "*", true)));
    }

    /// Property: the custom masker's output is final for every key.
    #[test]
    fn prop_custom_masker_is_final(key in "[a-zA-Z_]{1,12}", value in arb_json()) {
        let masker = DataMasker::new(
            MaskingConfig::new().with_custom_masker(|key, _| json!(format!("custom:{key}"))),
        );
        let masked = masker.mask(&json!({ key.clone(): value }));
        prop_assert_eq!(&masked[key.as_str()], &json!(format!("custom:{key}")));
    }
}

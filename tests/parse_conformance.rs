//! Parse-path conformance tests.
//!
//! Exercises the validator and parser contracts end to end: grammar
//! acceptance and rejection, Unicode edge cases, duplicate keys, depth
//! limits, and reviver behavior.

use dynjson::{parse, parse_with_limits, parse_with_reviver, validate, JsonValue, Limits};

// ============================================================================
// Validator: acceptance
// ============================================================================

#[test]
fn validator_accepts_primitives() {
    assert!(validate("null"));
    assert!(validate("true"));
    assert!(validate("-12.5e3"));
    assert!(validate(r#""hello\nworld""#));
}

#[test]
fn validator_accepts_nested_structures() {
    assert!(validate("[1,[2,[3]]]"));
    assert!(validate(r#"{"a":{"b":[1,2,3]}}"#));
    assert!(validate(" \t\r\n [] \t\r\n "));
}

// ============================================================================
// Validator: rejection
// ============================================================================

#[test]
fn validator_rejects_unmatched_brackets() {
    assert!(!validate("[1,2"));
    assert!(!validate(r#"{"a":1"#));
    assert!(!validate("[[]"));
}

#[test]
fn validator_rejects_bare_identifiers() {
    assert!(!validate("undefined"));
    assert!(!validate("function(){}"));
    assert!(!validate("alert(1)"));
}

#[test]
fn validator_rejects_trailing_garbage() {
    assert!(!validate(r#"{"a":1} garbage"#));
    assert!(!validate("[];"));
}

#[test]
fn validator_rejects_unescaped_control_characters() {
    assert!(!validate("\"tab\there\u{0}\""));
    assert!(!validate("\"line\nbreak\""));
}

#[test]
fn validator_rejects_comments() {
    assert!(!validate("// comment\n1"));
    assert!(!validate("[1 /* two */, 3]"));
}

// ============================================================================
// Parser: structure and semantics
// ============================================================================

#[test]
fn parser_builds_nested_tree() {
    let value = parse(r#"{"a":{"b":[1,2,3]}}"#).unwrap();
    let inner = value.get("a").unwrap().get("b").unwrap();
    assert_eq!(
        inner,
        &JsonValue::Array(vec![
            JsonValue::Number(1.0),
            JsonValue::Number(2.0),
            JsonValue::Number(3.0),
        ])
    );
}

#[test]
fn parser_agrees_with_validator() {
    let cases = [
        "null",
        "-12.5e3",
        r#""hello\nworld""#,
        "[1,[2,[3]]]",
        r#"{"a":{"b":[1,2,3]}}"#,
        "[1,2",
        "undefined",
        r#"{"a":1} garbage"#,
        "01",
        "'single'",
        "",
    ];
    for case in cases {
        assert_eq!(
            validate(case),
            parse(case).is_ok(),
            "validator and parser disagree on {case:?}"
        );
    }
}

#[test]
fn parser_resolves_duplicate_keys_last_write_wins() {
    let value = parse(r#"{"k":"first","k":"second"}"#).unwrap();
    assert_eq!(value.get("k").unwrap().as_str(), Some("second"));
    assert_eq!(value.as_object().unwrap().len(), 1);
}

#[test]
fn parser_preserves_insertion_order() {
    let value = parse(r#"{"zebra":1,"apple":2,"mango":3}"#).unwrap();
    let keys: Vec<&str> = value
        .as_object()
        .unwrap()
        .keys()
        .map(|k| k.as_str())
        .collect();
    assert_eq!(keys, vec!["zebra", "apple", "mango"]);
}

#[test]
fn parser_reports_error_position() {
    let err = parse(r#"{"a": }"#).unwrap_err();
    assert!(err.is_syntax());
    assert!(err.position().is_some());
}

// ============================================================================
// Unicode edge cases
// ============================================================================

#[test]
fn parser_combines_surrogate_pairs() {
    let value = parse(r#""\ud83d\ude00""#).unwrap();
    assert_eq!(value.as_str(), Some("\u{1f600}"));
}

#[test]
fn parser_rejects_unpaired_surrogates() {
    assert!(parse(r#""\ud800""#).is_err());
    assert!(parse(r#""\udc00""#).is_err());
    assert!(parse(r#""\ud800x""#).is_err());
}

#[test]
fn parser_accepts_unsafe_codepoints_inside_strings() {
    // Line/paragraph separators and friends are legal JSON string content;
    // the serializer is responsible for re-escaping them on the way out.
    let value = parse("\"a\u{2028}b\u{200c}c\"").unwrap();
    assert_eq!(value.as_str(), Some("a\u{2028}b\u{200c}c"));
}

#[test]
fn parser_resolves_escaped_unsafe_codepoints() {
    let value = parse(r#""\u2028\ufeff""#).unwrap();
    assert_eq!(value.as_str(), Some("\u{2028}\u{feff}"));
}

#[test]
fn parser_rejects_unsafe_codepoints_outside_strings() {
    assert!(parse("[1,\u{00ad}2]").is_err());
    assert!(parse("\u{feff}1").is_err());
}

// ============================================================================
// Depth limits
// ============================================================================

#[test]
fn parser_enforces_depth_limit() {
    let deep: String = "[".repeat(600) + &"]".repeat(600);
    let err = parse(&deep).unwrap_err();
    assert!(matches!(err, dynjson::Error::DepthExceeded { .. }));
}

#[test]
fn parser_accepts_depth_within_custom_limit() {
    let text = "[[[[1]]]]";
    assert!(parse_with_limits(text, Limits::with_max_depth(4)).is_ok());
    assert!(parse_with_limits(text, Limits::with_max_depth(3)).is_err());
}

// ============================================================================
// Reviver
// ============================================================================

#[test]
fn reviver_prunes_and_transforms() {
    let value = parse_with_reviver(
        r#"{"a":1,"b":2,"c":[10,20]}"#,
        Limits::standard(),
        |key, value| match key {
            "b" => Ok(None),
            "0" => Ok(Some(JsonValue::Number(11.0))),
            _ => Ok(Some(value)),
        },
    )
    .unwrap()
    .unwrap();

    let map = value.as_object().unwrap();
    assert!(map.get("b").is_none());
    assert_eq!(map.get("a"), Some(&JsonValue::Number(1.0)));
    assert_eq!(
        map.get("c"),
        Some(&JsonValue::Array(vec![
            JsonValue::Number(11.0),
            JsonValue::Number(20.0),
        ]))
    );
}

#[test]
fn reviver_walks_children_before_parents() {
    let mut order = Vec::new();
    parse_with_reviver(
        r#"{"a":{"b":{"c":1}},"d":2}"#,
        Limits::standard(),
        |key, value| {
            order.push(key.to_string());
            Ok(Some(value))
        },
    )
    .unwrap();
    assert_eq!(order, vec!["c", "b", "a", "d", ""]);
}

#[test]
fn reviver_root_uses_empty_key() {
    let mut root_key = None;
    let mut last = None;
    parse_with_reviver("[1]", Limits::standard(), |key, value| {
        last = Some(key.to_string());
        if key.is_empty() {
            root_key = Some(key.to_string());
        }
        Ok(Some(value))
    })
    .unwrap();
    assert_eq!(root_key.as_deref(), Some(""));
    assert_eq!(last.as_deref(), Some(""));
}

#[test]
fn reviver_failure_aborts_parse() {
    let result = parse_with_reviver(r#"{"a":1,"b":2}"#, Limits::standard(), |key, value| {
        if key == "a" {
            Err("unacceptable".into())
        } else {
            Ok(Some(value))
        }
    });
    assert!(matches!(result, Err(dynjson::Error::Reviver { .. })));
}

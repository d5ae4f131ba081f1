//! Serialize-path conformance tests.
//!
//! Exercises the serializer contract: escaping, omitted values, replacer
//! and whitelist transforms, indentation shapes, cycle detection, dates,
//! and depth limits.

use dynjson::{
    stringify, stringify_with, Error, HostValue, Indent, Limits, StringifyOptions, UtcDate,
};

fn compact(value: &HostValue) -> String {
    stringify(value).unwrap().unwrap()
}

// ============================================================================
// Escaping
// ============================================================================

#[test]
fn quotes_and_backslashes_are_escaped() {
    assert_eq!(compact(&HostValue::from("a\"b\\c")), r#""a\"b\\c""#);
}

#[test]
fn control_characters_use_short_forms() {
    assert_eq!(
        compact(&HostValue::from("\u{8}\t\n\u{c}\r")),
        r#""\b\t\n\f\r""#
    );
}

#[test]
fn line_separator_is_escaped_not_raw() {
    let out = compact(&HostValue::from("a\u{2028}b"));
    assert_eq!(out, r#""a\u2028b""#);
    assert!(!out.contains('\u{2028}'));
}

#[test]
fn object_keys_are_escaped_too() {
    let value = HostValue::object_from([("ke\"y", HostValue::from(1))]);
    assert_eq!(compact(&value), r#"{"ke\"y":1}"#);
}

// ============================================================================
// Omitted values
// ============================================================================

#[test]
fn undefined_values_drop_from_objects_and_null_in_arrays() {
    let value = HostValue::object_from([
        ("arr", HostValue::array(vec![HostValue::Undefined])),
        ("gone", HostValue::Undefined),
    ]);
    assert_eq!(compact(&value), r#"{"arr":[null]}"#);
}

#[test]
fn undefined_root_serializes_to_nothing() {
    assert_eq!(stringify(&HostValue::Undefined).unwrap(), None);
}

#[test]
fn non_finite_numbers_render_null() {
    let value = HostValue::array(vec![
        HostValue::Number(f64::NAN),
        HostValue::Number(f64::INFINITY),
        HostValue::Number(1.5),
    ]);
    assert_eq!(compact(&value), "[null,null,1.5]");
}

// ============================================================================
// Whitelist replacer
// ============================================================================

#[test]
fn whitelist_preserves_whitelist_order() {
    let value = HostValue::object_from([
        ("a", HostValue::from(1)),
        ("b", HostValue::from(2)),
        ("c", HostValue::from(3)),
    ]);
    let out = stringify_with(&value, StringifyOptions::with_keys(["c", "a"]))
        .unwrap()
        .unwrap();
    assert_eq!(out, r#"{"c":3,"a":1}"#);
}

#[test]
fn whitelist_applies_to_nested_objects() {
    let inner = HostValue::object_from([("a", HostValue::from(1)), ("x", HostValue::from(9))]);
    let value = HostValue::object_from([("a", inner), ("x", HostValue::from(0))]);
    let out = stringify_with(&value, StringifyOptions::with_keys(["a"]))
        .unwrap()
        .unwrap();
    assert_eq!(out, r#"{"a":{"a":1}}"#);
}

// ============================================================================
// Function replacer
// ============================================================================

#[test]
fn replacer_runs_top_down_before_dispatch() {
    // Substituting a container at the root means its children are the
    // substituted container's children.
    let out = stringify_with(
        &HostValue::from(0),
        StringifyOptions::with_replacer(Box::new(|_, key, value| {
            if key.is_empty() {
                Ok(HostValue::array(vec![HostValue::from(1)]))
            } else {
                Ok(value.clone())
            }
        })),
    )
    .unwrap()
    .unwrap();
    assert_eq!(out, "[1]");
}

#[test]
fn replacer_receives_array_indices_as_keys() {
    let mut seen = Vec::new();
    let value = HostValue::array(vec![HostValue::from(10), HostValue::from(20)]);
    stringify_with(
        &value,
        StringifyOptions::with_replacer(Box::new(|_, key, value| {
            seen.push(key.to_string());
            Ok(value.clone())
        })),
    )
    .unwrap();
    assert_eq!(seen, vec!["", "0", "1"]);
}

// ============================================================================
// Indentation
// ============================================================================

#[test]
fn numeric_indent_inserts_spaces_and_newlines() {
    let value = HostValue::object_from([("a", HostValue::from(1))]);
    let out = stringify_with(&value, StringifyOptions::with_indent(Indent::Spaces(2)))
        .unwrap()
        .unwrap();
    assert_eq!(out, "{\n  \"a\": 1\n}");
}

#[test]
fn text_indent_is_used_verbatim_per_level() {
    let value = HostValue::array(vec![
        HostValue::from(1),
        HostValue::array(vec![HostValue::from(2)]),
    ]);
    let out = stringify_with(&value, StringifyOptions::with_indent(Indent::Text("..".into())))
        .unwrap()
        .unwrap();
    assert_eq!(out, "[\n..1,\n..[\n....2\n..]\n]");
}

#[test]
fn compact_mode_has_no_space_after_colon() {
    let value = HostValue::object_from([("a", HostValue::from(1))]);
    assert_eq!(compact(&value), r#"{"a":1}"#);
}

// ============================================================================
// Cycles
// ============================================================================

#[test]
fn direct_cycle_fails_with_cyclic_reference() {
    let obj = HostValue::object();
    obj.insert("self", obj.clone());
    assert!(matches!(stringify(&obj), Err(Error::CyclicReference)));
}

#[test]
fn array_object_cycle_fails() {
    let arr = HostValue::array(vec![]);
    let obj = HostValue::object_from([("loop", arr.clone())]);
    arr.push(obj.clone());
    assert!(matches!(stringify(&obj), Err(Error::CyclicReference)));
}

#[test]
fn diamond_sharing_is_not_a_cycle() {
    let shared = HostValue::object_from([("v", HostValue::from(1))]);
    let value = HostValue::object_from([("left", shared.clone()), ("right", shared.clone())]);
    assert_eq!(compact(&value), r#"{"left":{"v":1},"right":{"v":1}}"#);
}

// ============================================================================
// Dates
// ============================================================================

#[test]
fn date_serializes_as_quoted_utc_timestamp() {
    let value = HostValue::from(UtcDate::new(2021, 1, 15, 3, 4, 5));
    assert_eq!(compact(&value), "\"2021-01-15T03:04:05Z\"");
}

#[test]
fn date_hook_is_overridable_per_call() {
    fn epoch_like(_: &UtcDate) -> String {
        "then".to_string()
    }
    let value = HostValue::from(UtcDate::new(2021, 1, 15, 3, 4, 5));
    let out = stringify_with(&value, StringifyOptions::default().date_format(epoch_like))
        .unwrap()
        .unwrap();
    assert_eq!(out, "\"then\"");
}

// ============================================================================
// Depth
// ============================================================================

#[test]
fn serializer_enforces_depth_limit() {
    let mut value = HostValue::from(1);
    for _ in 0..600 {
        value = HostValue::array(vec![value]);
    }
    assert!(matches!(
        stringify(&value),
        Err(Error::DepthExceeded { limit: 500, .. })
    ));
}

#[test]
fn serializer_allows_depth_within_custom_limit() {
    let value = HostValue::array(vec![HostValue::array(vec![HostValue::from(1)])]);
    let opts = StringifyOptions {
        limits: Limits::with_max_depth(2),
        ..StringifyOptions::default()
    };
    assert_eq!(stringify_with(&value, opts).unwrap().unwrap(), "[[1]]");
}

//! Shared character escaping tables.
//!
//! Both the parser and the serializer agree on one set of code points that
//! must never appear raw in output text: control characters, the C1 block,
//! and a collection of format/direction-control code points (soft hyphen,
//! Arabic format characters, zero-width joiners, line and paragraph
//! separators, BOM, and the specials block) that downstream consumers
//! handle inconsistently. The tables here are immutable module-owned state;
//! callers that need different behavior pass strategies explicitly instead
//! of mutating shared globals.

/// Returns the short escape form for characters that have one.
pub fn short_escape(c: char) -> Option<&'static str> {
    match c {
        '\u{08}' => Some("\\b"),
        '\t' => Some("\\t"),
        '\n' => Some("\\n"),
        '\u{0c}' => Some("\\f"),
        '\r' => Some("\\r"),
        '"' => Some("\\\""),
        '\\' => Some("\\\\"),
        _ => None,
    }
}

/// Code points that are handled inconsistently by naive JSON consumers and
/// are therefore always written in `\uXXXX` form.
pub fn is_unsafe_codepoint(c: char) -> bool {
    matches!(c,
        '\u{0000}'
        | '\u{00ad}'
        | '\u{0600}'..='\u{0604}'
        | '\u{070f}'
        | '\u{17b4}'
        | '\u{17b5}'
        | '\u{200c}'..='\u{200f}'
        | '\u{2028}'..='\u{202f}'
        | '\u{2060}'..='\u{206f}'
        | '\u{feff}'
        | '\u{fff0}'..='\u{ffff}')
}

/// Returns true if a character must be escaped when serializing a string.
pub fn needs_escape(c: char) -> bool {
    matches!(c, '"' | '\\')
        || (c as u32) < 0x20
        || matches!(c as u32, 0x7f..=0x9f)
        || is_unsafe_codepoint(c)
}

/// Append the `\uXXXX` escape form of a character. Characters outside the
/// Basic Multilingual Plane are written as a surrogate pair.
pub fn push_unicode_escape(out: &mut String, c: char) {
    let mut units = [0u16; 2];
    for unit in c.encode_utf16(&mut units) {
        out.push_str("\\u");
        for shift in [12u32, 8, 4, 0] {
            let digit = (*unit >> shift) & 0xf;
            out.push(char::from_digit(digit as u32, 16).unwrap_or('0'));
        }
    }
}

/// Append `s` as a quoted JSON string with all required escapes applied.
pub fn push_quoted(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        if let Some(short) = short_escape(c) {
            out.push_str(short);
        } else if needs_escape(c) {
            push_unicode_escape(out, c);
        } else {
            out.push(c);
        }
    }
    out.push('"');
}

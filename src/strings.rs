//! Helpers for showing text whose whitespace or styling matters, e.g. when
//! asserting on captured output.
use std::borrow::Cow;

pub use crate::parser::strip_ansi;

/// Escapes every character of `text` the way a string literal would spell it.
/// Characters without a short escape become `\xHH` or `\uHHHH` per UTF-16 unit.
pub fn to_literal(text: &str) -> String {
    let mut result = String::with_capacity(text.len() * 4);
    let mut units = [0u16; 2];
    for c in text.chars() {
        match c {
            '\0' => result.push_str("\\0"),
            '\u{8}' => result.push_str("\\b"),
            '\t' => result.push_str("\\t"),
            '\n' => result.push_str("\\n"),
            '\u{b}' => result.push_str("\\v"),
            '\u{c}' => result.push_str("\\f"),
            '\r' => result.push_str("\\r"),
            '"' => result.push_str("\\\""),
            '\'' => result.push_str("\\'"),
            '\\' => result.push_str("\\\\"),
            _ => {
                for unit in c.encode_utf16(&mut units).iter() {
                    if *unit > 0xff {
                        result.push_str(&format!("\\u{:04x}", unit));
                    } else {
                        result.push_str(&format!("\\x{:02x}", unit));
                    }
                }
            }
        }
    }
    result
}

/// True for non-empty text made of whitespace only
pub fn is_whitespace(text: &str) -> bool {
    !text.is_empty() && text.chars().all(char::is_whitespace)
}

/// Makes whitespace-only text visible. With `retain`, the original whitespace
/// follows its literal form.
pub fn mark_whitespace(text: &str, retain: bool) -> Cow<'_, str> {
    if !is_whitespace(text) {
        return Cow::Borrowed(text);
    }

    if retain {
        Cow::Owned(format!("{}{}", to_literal(text), text))
    } else {
        Cow::Owned(to_literal(text))
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0

//! Identifier normalization
//!
//! Turns display text such as `"add and"` or `"first name"` into canonical
//! identifiers (`AddAnd`, `firstName`). Text that already consists only of
//! identifier characters is returned unchanged, which makes both functions
//! idempotent.

/// Normalize text into a class-style identifier (used for scenario names).
///
/// Qualified names (containing `$`, or a `.` anywhere but the last position)
/// are returned unchanged.
pub fn to_class_name(text: &str) -> String {
    if has_dot_before_end(text) || text.contains('$') {
        return text.to_string();
    }
    normalize(text, true)
}

/// Normalize text into a method-style identifier (used for parameter names).
pub fn to_method_name(text: &str) -> String {
    normalize(text, false)
}

fn normalize(text: &str, capitalize_first: bool) -> String {
    if !text.chars().any(is_separator) {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut capitalize_next = capitalize_first;
    for c in text.chars() {
        if is_separator(c) {
            capitalize_next = true;
        } else if capitalize_next {
            out.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn has_dot_before_end(text: &str) -> bool {
    match text.find('.') {
        Some(idx) => idx != text.len() - 1,
        None => false,
    }
}

fn is_separator(c: char) -> bool {
    !(c.is_alphanumeric() || c == '_')
}

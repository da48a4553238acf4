// SPDX-License-Identifier: MIT OR Apache-2.0

//! Invocation Matcher - Match free-form invocations against scenario names
//!
//! A name pattern is prose with `_` placeholders (`"Add _ and _"`). Each `_`
//! becomes a greedy `(.*)` capture; the literal text between placeholders is
//! matched verbatim and the whole invocation must match.

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::SyntaxError;

/// A placeholder embedded in prose: non-word char, `_`, then non-word char or end.
/// Word characters are ASCII only, so `ñ_` still counts as a placeholder.
static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^0-9A-Za-z_]_(?:[^0-9A-Za-z_]|$)").expect("Invalid placeholder regex")
});

/// Placeholder character in name patterns
pub const PLACEHOLDER: char = '_';

/// Outcome of matching an invocation: `None` is "no match", otherwise one
/// captured argument per placeholder, left to right.
pub type MatchResult = Option<Vec<String>>;

/// Whether a header cell uses the parameterized-name convention
pub fn is_name_parameterized(cell: &str) -> bool {
    PLACEHOLDER_REGEX.is_match(cell)
}

/// Replace every placeholder marker with a single space and trim.
pub fn strip_placeholders(cell: &str) -> String {
    PLACEHOLDER_REGEX.replace_all(cell, " ").trim().to_string()
}

/// Compiled scenario name pattern
#[derive(Debug, Clone)]
pub struct NamePattern {
    template: String,
    regex: Regex,
    placeholders: usize,
}

impl NamePattern {
    pub fn compile(template: &str) -> Result<Self, SyntaxError> {
        let pieces: Vec<String> = template.split(PLACEHOLDER).map(regex::escape).collect();
        let placeholders = pieces.len() - 1;
        let pattern = format!("^(?:{})$", pieces.join("(.*)"));

        let regex = Regex::new(&pattern).map_err(|e| SyntaxError::InvalidNamePattern {
            pattern: template.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            template: template.to_string(),
            regex,
            placeholders,
        })
    }

    /// Rebuild the parameterized shape of an alternating header: the literal
    /// words joined with ` _ ` after each, trimmed.
    pub fn from_alternating_words<'a>(words: impl IntoIterator<Item = &'a str>) -> Result<Self, SyntaxError> {
        let mut template = String::new();
        for word in words {
            template.push_str(word);
            template.push_str(" _ ");
        }
        Self::compile(template.trim())
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn placeholder_count(&self) -> usize {
        self.placeholders
    }

    /// Match the whole invocation; captures are greedy, leftmost first.
    pub fn captures(&self, invocation: &str) -> MatchResult {
        let caps = self.regex.captures(invocation)?;
        Some(
            (1..caps.len())
                .map(|i| caps.get(i).map_or_else(String::new, |m| m.as_str().to_string()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_parameterized_names() {
        assert!(is_name_parameterized("Add _ and _"));
        assert!(is_name_parameterized("Add _ and _ gives _?"));
        assert!(is_name_parameterized("login as _"));
        assert!(!is_name_parameterized("login_as"));
        assert!(!is_name_parameterized("login"));
    }

    #[test]
    fn test_placeholder_word_chars_are_ascii() {
        assert!(is_name_parameterized("Añ_ x"));
        assert!(is_name_parameterized("Add\t_"));
        assert!(!is_name_parameterized("login_9"));
        // the neighbouring characters are part of the marker
        assert_eq!(strip_placeholders("Añ_ x"), "A x");
    }

    #[test]
    fn test_strip_placeholders() {
        assert_eq!(strip_placeholders("Add _ and _"), "Add and");
        assert_eq!(strip_placeholders("Add _ and _ gives _?"), "Add and gives");
    }

    #[test]
    fn test_match_extracts_arguments() {
        let pattern = NamePattern::compile("Add _ and _").unwrap();
        assert_eq!(pattern.placeholder_count(), 2);
        assert_eq!(
            pattern.captures("Add 3 and 4"),
            Some(vec!["3".to_string(), "4".to_string()])
        );
        assert_eq!(pattern.captures("Subtract 3 and 4"), None);
    }

    #[test]
    fn test_match_is_anchored() {
        let pattern = NamePattern::compile("Add _ and _").unwrap();
        assert_eq!(pattern.captures("Please Add 3 and 4"), None);
    }

    #[test]
    fn test_greedy_leftmost_split() {
        let pattern = NamePattern::compile("go __ now").unwrap();
        assert_eq!(
            pattern.captures("go abc now"),
            Some(vec!["abc".to_string(), String::new()])
        );

        let pattern = NamePattern::compile("_ and _").unwrap();
        assert_eq!(
            pattern.captures("a and b and c"),
            Some(vec!["a and b".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn test_literal_text_is_not_regex() {
        let pattern = NamePattern::compile("is _ (really) ok?").unwrap();
        assert_eq!(pattern.captures("is it (really) ok?"), Some(vec!["it".to_string()]));
        assert_eq!(pattern.captures("is it really o"), None);
    }

    #[test]
    fn test_from_alternating_words() {
        let pattern = NamePattern::from_alternating_words(["Add", "and"]).unwrap();
        assert_eq!(pattern.template(), "Add _ and _");
        assert_eq!(
            pattern.captures("Add 1 and 2"),
            Some(vec!["1".to_string(), "2".to_string()])
        );
    }
}

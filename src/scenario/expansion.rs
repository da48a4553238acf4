// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scenario Expansion - Bind arguments and fill in the body template
//!
//! Placeholders come in two spellings, `@name` and `@{name}`. Substitution
//! works cell by cell over the body; a placeholder whose name is not bound is
//! left as written and surfaces downstream as a missing value.

use std::collections::HashMap;

use super::definition::ScenarioDefinition;
use super::error::SyntaxError;
use crate::core::config::SubstitutionMode;
use crate::core::table::GridTable;

const SIGIL: char = '@';

/// Arguments supplied by an invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioArguments {
    /// Input name to literal value; every key must be a declared input
    Named(HashMap<String, String>),
    /// Values zipped against the declared inputs in order
    Positional(Vec<String>),
}

impl ScenarioArguments {
    pub fn named<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Named(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    pub fn positional<V: Into<String>>(values: impl IntoIterator<Item = V>) -> Self {
        Self::Positional(values.into_iter().map(Into::into).collect())
    }
}

/// Bound `(input, value)` pairs, sorted by input name
pub type Bindings = Vec<(String, String)>;

/// Map invocation arguments onto the scenario's inputs.
///
/// Surplus positional values are ignored and missing trailing inputs stay
/// unbound. A named argument that is not an input is a binding error.
pub fn bind_arguments(
    definition: &ScenarioDefinition,
    arguments: &ScenarioArguments,
) -> Result<Bindings, SyntaxError> {
    let mut bindings: Bindings = match arguments {
        ScenarioArguments::Named(map) => {
            let mut unknown: Vec<&String> = map.keys().filter(|k| !definition.has_input(k)).collect();
            unknown.sort();
            if let Some(name) = unknown.first() {
                return Err(SyntaxError::UnknownArgument((*name).clone()));
            }
            map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
        }
        ScenarioArguments::Positional(values) => definition
            .inputs()
            .iter()
            .zip(values.iter())
            .map(|(input, value)| (input.clone(), value.clone()))
            .collect(),
    };
    bindings.sort();
    Ok(bindings)
}

/// Bind `arguments` and substitute them into the scenario body.
pub fn expand(
    definition: &ScenarioDefinition,
    arguments: &ScenarioArguments,
    mode: SubstitutionMode,
) -> Result<GridTable, SyntaxError> {
    let bindings = bind_arguments(definition, arguments)?;
    log::debug!(
        "Expanding scenario '{}' with {} bound argument(s)",
        definition.name(),
        bindings.len()
    );
    Ok(substitute(definition.body(), &bindings, mode))
}

/// Replace placeholders in every cell of `body`.
pub fn substitute(body: &GridTable, bindings: &[(String, String)], mode: SubstitutionMode) -> GridTable {
    if bindings.is_empty() {
        return body.clone();
    }
    match mode {
        SubstitutionMode::SinglePass => {
            let lookup: HashMap<&str, &str> = bindings
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            // longest first so `@x2` prefers `x2` over `x`
            let mut by_length: Vec<&str> = lookup.keys().copied().collect();
            by_length.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
            body.map_cells(|cell| substitute_single_pass(cell, &lookup, &by_length))
        }
        SubstitutionMode::Sequential => body.map_cells(|cell| substitute_sequential(cell, bindings)),
    }
}

fn substitute_single_pass(cell: &str, lookup: &HashMap<&str, &str>, by_length: &[&str]) -> String {
    let mut out = String::with_capacity(cell.len());
    let mut rest = cell;

    while let Some(at) = rest.find(SIGIL) {
        out.push_str(&rest[..at]);
        let after = &rest[at + SIGIL.len_utf8()..];

        if let Some((name, consumed)) = braced_name(after) {
            if let Some(value) = lookup.get(name) {
                out.push_str(value);
                rest = &after[consumed..];
                continue;
            }
        }

        if let Some(name) = by_length.iter().find(|name| after.starts_with(**name)) {
            out.push_str(lookup[name]);
            rest = &after[name.len()..];
            continue;
        }

        out.push(SIGIL);
        rest = after;
    }

    out.push_str(rest);
    out
}

/// `{name}` at the start of `text`: the name and the bytes consumed
fn braced_name(text: &str) -> Option<(&str, usize)> {
    let inner = text.strip_prefix('{')?;
    let close = inner.find('}')?;
    Some((&inner[..close], close + 2))
}

fn substitute_sequential(cell: &str, bindings: &[(String, String)]) -> String {
    let mut text = cell.to_string();
    for (name, value) in bindings {
        text = text.replace(&format!("{}{}", SIGIL, name), value);
        text = text.replace(&format!("{}{{{}}}", SIGIL, name), value);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(header: Vec<&str>, body: Vec<Vec<&str>>) -> ScenarioDefinition {
        let mut rows = vec![header];
        rows.extend(body);
        ScenarioDefinition::parse(&GridTable::from_rows(rows)).unwrap()
    }

    #[test]
    fn test_both_spellings_replaced() {
        let def = definition(
            vec!["scenario", "echo", "a"],
            vec![vec!["check", "@a", "@{a}", "@b"]],
        );
        let body = expand(
            &def,
            &ScenarioArguments::named([("a", "5")]),
            SubstitutionMode::SinglePass,
        )
        .unwrap();
        assert_eq!(body.rows(), &[vec!["check", "5", "5", "@b"]]);
    }

    #[test]
    fn test_unknown_named_argument() {
        let def = definition(vec!["scenario", "add", "a", "and", "b"], vec![]);
        let err = expand(
            &def,
            &ScenarioArguments::named([("a", "1"), ("b", "2"), ("c", "3")]),
            SubstitutionMode::SinglePass,
        )
        .unwrap_err();
        assert_eq!(err, SyntaxError::UnknownArgument("c".to_string()));
        assert_eq!(err.to_string(), "The argument c is not an input to the scenario.");
    }

    #[test]
    fn test_positional_surplus_and_missing() {
        let def = definition(vec!["scenario", "add", "a", "and", "b"], vec![]);

        let bound = bind_arguments(&def, &ScenarioArguments::positional(["1", "2", "3"])).unwrap();
        assert_eq!(
            bound,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string())
            ]
        );

        let bound = bind_arguments(&def, &ScenarioArguments::positional(["1"])).unwrap();
        assert_eq!(bound, vec![("a".to_string(), "1".to_string())]);
    }

    #[test]
    fn test_unbound_placeholder_left_verbatim() {
        let def = definition(
            vec!["scenario", "add", "a", "and", "b"],
            vec![vec!["ensure", "@a", "@{b}", "@b"]],
        );
        let body = expand(
            &def,
            &ScenarioArguments::positional(["1"]),
            SubstitutionMode::SinglePass,
        )
        .unwrap();
        assert_eq!(body.rows(), &[vec!["ensure", "1", "@{b}", "@b"]]);
    }

    #[test]
    fn test_single_pass_prefers_longest_name() {
        let body = GridTable::from_rows(vec![vec!["@x2 @x @{x}2"]]);
        let bindings = vec![("x".to_string(), "A".to_string()), ("x2".to_string(), "B".to_string())];
        let out = substitute(&body, &bindings, SubstitutionMode::SinglePass);
        assert_eq!(out.rows(), &[vec!["B A A2"]]);
    }

    #[test]
    fn test_single_pass_does_not_rescan_values() {
        let body = GridTable::from_rows(vec![vec!["@a-@b"]]);
        let bindings = vec![("a".to_string(), "@b".to_string()), ("b".to_string(), "2".to_string())];
        let out = substitute(&body, &bindings, SubstitutionMode::SinglePass);
        assert_eq!(out.rows(), &[vec!["@b-2"]]);
    }

    #[test]
    fn test_sequential_splices_literally() {
        let body = GridTable::from_rows(vec![vec!["@a-@b", "@x2"]]);
        let bindings = vec![
            ("a".to_string(), "@b".to_string()),
            ("b".to_string(), "2".to_string()),
            ("x".to_string(), "A".to_string()),
        ];
        let out = substitute(&body, &bindings, SubstitutionMode::Sequential);
        assert_eq!(out.rows(), &[vec!["2-2", "A2"]]);
    }

    #[test]
    fn test_lone_sigil_and_unclosed_brace() {
        let body = GridTable::from_rows(vec![vec!["mail@ host @{a", "@"]]);
        let bindings = vec![("a".to_string(), "1".to_string())];
        let out = substitute(&body, &bindings, SubstitutionMode::SinglePass);
        assert_eq!(out.rows(), &[vec!["mail@ host @{a", "@"]]);
    }

    #[test]
    fn test_expansion_leaves_definition_untouched() {
        let def = definition(vec!["scenario", "echo", "a"], vec![vec!["say", "@a"]]);
        let _ = expand(&def, &ScenarioArguments::positional(["hi"]), SubstitutionMode::SinglePass)
            .unwrap();
        assert_eq!(def.body().rows(), &[vec!["say", "@a"]]);
    }
}

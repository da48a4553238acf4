// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scenario Definition - Parse scenario header rows
//!
//! Row 0 of a scenario table is the header; cell 0 is the table keyword and
//! is ignored. Two naming conventions are supported:
//!
//! ```text
//! parameterized:  | scenario | Add _ and _ gives _? | a, b |
//! alternating:    | scenario | Add | a | and | b | gives | result? |
//! ```
//!
//! Both produce the name `AddAndGives`. The remaining rows are kept verbatim
//! as the body template.

use std::collections::HashSet;

use super::error::SyntaxError;
use super::matcher::{self, MatchResult, NamePattern};
use crate::core::table::{GridTable, TableView};
use crate::core::util::{to_class_name, to_method_name};

/// Marks an output parameter in the alternating convention
const OUTPUT_MARKER: char = '?';

/// A parsed scenario table. Immutable once parsed.
#[derive(Debug, Clone)]
pub struct ScenarioDefinition {
    name: String,
    parameterized: bool,
    inputs: Vec<String>,
    outputs: HashSet<String>,
    body: GridTable,
    /// `None` for alternating headers without inputs
    name_pattern: Option<NamePattern>,
}

impl ScenarioDefinition {
    /// Parse a scenario table.
    ///
    /// Fails when the header has no name cell, declares an input twice, or
    /// declares an output that is also an input.
    pub fn parse(table: &dyn TableView) -> Result<Self, SyntaxError> {
        let cols = table.column_count_in_row(0);
        if cols <= 1 {
            return Err(SyntaxError::MissingName);
        }

        let first_name_cell = table.cell_contents(1, 0);
        let definition = if matcher::is_name_parameterized(first_name_cell) {
            Self::parse_parameterized(table, cols)?
        } else {
            Self::parse_alternating(table, cols)?
        };

        log::debug!(
            "Parsed scenario '{}' (parameterized: {}, inputs: {:?}, outputs: {:?})",
            definition.name,
            definition.parameterized,
            definition.inputs,
            definition.outputs
        );
        Ok(definition)
    }

    fn parse_parameterized(table: &dyn TableView, cols: usize) -> Result<Self, SyntaxError> {
        let name_cell = table.cell_contents(1, 0);
        let name = to_class_name(&matcher::strip_placeholders(name_cell));

        let mut inputs = Vec::new();
        if cols > 2 {
            for argument in table.cell_contents(2, 0).split(',') {
                let argument = argument.trim();
                if argument.is_empty() {
                    continue;
                }
                push_input(&mut inputs, to_method_name(argument))?;
            }
        }

        Ok(Self {
            name,
            parameterized: true,
            inputs,
            outputs: HashSet::new(),
            body: GridTable::from_view_rows(table, 1),
            name_pattern: Some(NamePattern::compile(name_cell)?),
        })
    }

    fn parse_alternating(table: &dyn TableView, cols: usize) -> Result<Self, SyntaxError> {
        let words: Vec<&str> = (1..cols).step_by(2).map(|col| table.cell_contents(col, 0)).collect();
        let name = to_class_name(words.join(" ").trim());

        let mut inputs = Vec::new();
        let mut outputs = HashSet::new();
        for col in (2..cols).step_by(2) {
            let parameter = table.cell_contents(col, 0).trim();
            match parameter.strip_suffix(OUTPUT_MARKER) {
                Some(output) => {
                    outputs.insert(to_method_name(output.trim()));
                }
                None => push_input(&mut inputs, to_method_name(parameter))?,
            }
        }

        if let Some(clash) = inputs.iter().find(|input| outputs.contains(*input)) {
            return Err(SyntaxError::OutputClashesWithInput(clash.clone()));
        }

        let name_pattern = if inputs.is_empty() {
            None
        } else {
            Some(NamePattern::from_alternating_words(words.iter().copied())?)
        };

        Ok(Self {
            name,
            parameterized: false,
            inputs,
            outputs,
            body: GridTable::from_view_rows(table, 1),
            name_pattern,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_parameterized(&self) -> bool {
        self.parameterized
    }

    /// Inputs in positional binding order
    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    pub fn outputs(&self) -> &HashSet<String> {
        &self.outputs
    }

    pub fn has_input(&self, name: &str) -> bool {
        self.inputs.iter().any(|input| input == name)
    }

    /// Body rows (everything below the header)
    pub fn body(&self) -> &GridTable {
        &self.body
    }

    pub fn name_pattern(&self) -> Option<&NamePattern> {
        self.name_pattern.as_ref()
    }

    /// Match a free-form invocation against this scenario's name pattern.
    ///
    /// Alternating headers without inputs never match: they have nothing to
    /// bind and are invoked by literal name instead.
    pub fn match_arguments(&self, invocation: &str) -> MatchResult {
        let result = self.name_pattern.as_ref()?.captures(invocation);
        if result.is_some() {
            log::debug!("Invocation '{}' matched scenario '{}'", invocation, self.name);
        }
        result
    }
}

fn push_input(inputs: &mut Vec<String>, input: String) -> Result<(), SyntaxError> {
    if inputs.contains(&input) {
        return Err(SyntaxError::DuplicateInput(input));
    }
    inputs.push(input);
    Ok(())
}

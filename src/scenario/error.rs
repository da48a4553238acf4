// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scenario Syntax Errors
//!
//! Definition errors are raised while parsing a scenario header; binding
//! errors while mapping invocation arguments onto declared inputs.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("Scenario tables must have a name.")]
    MissingName,

    #[error("Scenario input '{0}' is declared more than once.")]
    DuplicateInput(String),

    #[error("Scenario output '{0}' clashes with an input of the same name.")]
    OutputClashesWithInput(String),

    #[error("Scenario name pattern '{pattern}' cannot be compiled: {message}")]
    InvalidNamePattern { pattern: String, message: String },

    #[error("The argument {0} is not an input to the scenario.")]
    UnknownArgument(String),
}

impl SyntaxError {
    /// Binding errors are raised at expansion time, everything else at definition time
    pub fn is_binding_error(&self) -> bool {
        matches!(self, SyntaxError::UnknownArgument(_))
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scenario Core Error Types
//!
//! Error handling for scenario definition, binding and dispatch.

use thiserror::Error;

use crate::scenario::error::SyntaxError;

/// Result type for scenario operations
pub type ScenarioResult<T> = Result<T, ScenarioError>;

/// Scenario error types
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// Structural defect in a scenario table or invocation (never retried)
    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        config_key: Option<String>,
    },

    /// The script-interpretation collaborator failed to accept a nested unit
    #[error("Dispatch failed: {message}")]
    Dispatch { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ScenarioError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            config_key: None,
        }
    }

    /// Create a configuration error with a specific key
    pub fn configuration_with_key(message: impl Into<String>, config_key: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            config_key: Some(config_key.into()),
        }
    }

    /// Create a dispatch error
    pub fn dispatch(message: impl Into<String>) -> Self {
        Self::Dispatch {
            message: message.into(),
        }
    }

    /// Whether this error is a structural (definition or binding) defect
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax(_))
    }
}

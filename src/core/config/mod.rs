// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Scenario Configuration
//!
//! Run-level settings for scenario expansion, loaded from TOML.
//!
//! ```toml
//! substitution = "sequential"
//! warn_on_redefinition = false
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::core::error::{ScenarioError, ScenarioResult};

/// How `@name` / `@{name}` placeholders are replaced in a scenario body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubstitutionMode {
    /// One scan per cell; braced form first, longest bound name wins for the
    /// short form, inserted values are never re-scanned.
    #[default]
    SinglePass,
    /// Literal splice per bound pair in name order: `@name` then `@{name}`.
    /// Inserted values may be re-substituted by later pairs.
    Sequential,
}

impl SubstitutionMode {
    /// Parse substitution mode from string (case-insensitive)
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "single_pass" | "single-pass" => Ok(SubstitutionMode::SinglePass),
            "sequential" | "legacy" => Ok(SubstitutionMode::Sequential),
            _ => Err(format!(
                "Invalid substitution mode '{}'. Valid values: 'single_pass', 'sequential'",
                s
            )),
        }
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            SubstitutionMode::SinglePass => "single_pass",
            SubstitutionMode::Sequential => "sequential",
        }
    }
}

/// Settings for one test run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    pub substitution: SubstitutionMode,

    /// Log a warning when a scenario name is registered twice
    pub warn_on_redefinition: bool,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            substitution: SubstitutionMode::default(),
            warn_on_redefinition: true,
        }
    }
}

impl ScenarioConfig {
    pub fn from_toml_str(source: &str) -> ScenarioResult<Self> {
        toml::from_str(source)
            .map_err(|e| ScenarioError::configuration(format!("Invalid scenario config: {}", e)))
    }

    pub fn load(path: impl AsRef<Path>) -> ScenarioResult<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        log::debug!("Loading scenario config from {}", path.as_ref().display());
        Self::from_toml_str(&source)
    }

    pub fn with_substitution(mut self, mode: SubstitutionMode) -> Self {
        self.substitution = mode;
        self
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0

//! Run Context - Scenario state for one test run
//!
//! Created at run start and dropped at run end. Holds the scenario registry
//! and the run configuration; passed explicitly to every definition and
//! invocation call.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::definition::ScenarioDefinition;
use super::expansion::{self, ScenarioArguments};
use super::matcher::MatchResult;
use super::registry::{ResolvedInvocation, ScenarioRegistry};
use crate::core::config::ScenarioConfig;
use crate::core::error::ScenarioResult;
use crate::core::table::{GridTable, TableView};

#[derive(Debug, Default)]
pub struct RunContext {
    registry: ScenarioRegistry,
    config: ScenarioConfig,
    aborted: AtomicBool,
}

impl RunContext {
    pub fn new(config: ScenarioConfig) -> Self {
        Self {
            registry: ScenarioRegistry::new(),
            config,
            aborted: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    pub fn registry(&self) -> &ScenarioRegistry {
        &self.registry
    }

    /// Parse a scenario table and register it under its name.
    pub fn define_scenario(&self, table: &dyn TableView) -> ScenarioResult<Arc<ScenarioDefinition>> {
        let definition = Arc::new(ScenarioDefinition::parse(table)?);
        if let Some(previous) = self.registry.register(Arc::clone(&definition)) {
            if self.config.warn_on_redefinition {
                log::warn!("Scenario '{}' redefined; later definition wins", previous.name());
            }
        }
        Ok(definition)
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<ScenarioDefinition>> {
        self.registry.lookup(name)
    }

    pub fn match_invocation(&self, definition: &ScenarioDefinition, invocation: &str) -> MatchResult {
        definition.match_arguments(invocation)
    }

    pub fn resolve_invocation(&self, cells: &[String]) -> Option<ResolvedInvocation> {
        self.registry.resolve_invocation(cells)
    }

    /// Bind arguments and expand the body using the configured substitution mode.
    pub fn expand(
        &self,
        definition: &ScenarioDefinition,
        arguments: &ScenarioArguments,
    ) -> ScenarioResult<GridTable> {
        Ok(expansion::expand(definition, arguments, self.config.substitution)?)
    }

    /// Abort the run; pending nested executions resolve as errors.
    pub fn abort(&self) {
        if !self.aborted.swap(true, Ordering::SeqCst) {
            log::warn!("Test run aborted");
        }
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SubstitutionMode;
    use crate::core::error::ScenarioError;
    use crate::scenario::error::SyntaxError;

    #[test]
    fn test_define_registers() {
        let ctx = RunContext::default();
        let table = GridTable::from_rows(vec![vec!["scenario", "Add _ and _", "a, b"]]);
        let def = ctx.define_scenario(&table).unwrap();
        assert_eq!(def.name(), "AddAnd");
        assert!(ctx.lookup("AddAnd").is_some());
    }

    #[test]
    fn test_define_missing_name() {
        let ctx = RunContext::default();
        let err = ctx
            .define_scenario(&GridTable::from_rows(vec![vec!["scenario"]]))
            .unwrap_err();
        assert!(matches!(err, ScenarioError::Syntax(SyntaxError::MissingName)));
        assert!(ctx.registry().is_empty());
    }

    #[test]
    fn test_expand_uses_configured_mode() {
        let ctx = RunContext::new(ScenarioConfig::default().with_substitution(SubstitutionMode::Sequential));
        assert_eq!(ctx.config().substitution, SubstitutionMode::Sequential);
        let table = GridTable::from_rows(vec![
            vec!["scenario", "pair", "a", "with", "b"],
            vec!["note", "@a"],
        ]);
        let def = ctx.define_scenario(&table).unwrap();
        let body = ctx
            .expand(&def, &ScenarioArguments::positional(["@b", "2"]))
            .unwrap();
        assert_eq!(body.rows(), &[vec!["note", "2"]]);
    }

    #[test]
    fn test_abort_flag() {
        let ctx = RunContext::default();
        assert!(!ctx.is_aborted());
        ctx.abort();
        ctx.abort();
        assert!(ctx.is_aborted());
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scenario Registry - Run-scoped scenario lookup
//!
//! Definitions are registered while scenario tables are parsed and read while
//! invocations are resolved. Access is single-writer/many-reader so tables in
//! the same run can be processed from several threads.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::definition::ScenarioDefinition;
use crate::core::util::to_class_name;

/// A row resolved to a scenario plus the positional arguments to bind
#[derive(Debug, Clone)]
pub struct ResolvedInvocation {
    pub definition: Arc<ScenarioDefinition>,
    pub arguments: Vec<String>,
}

/// Registry of scenario definitions keyed by normalized name
#[derive(Debug, Default)]
pub struct ScenarioRegistry {
    scenarios: RwLock<HashMap<String, Arc<ScenarioDefinition>>>,
}

impl ScenarioRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            scenarios: RwLock::new(HashMap::new()),
        }
    }

    /// Register a definition under its name. A later definition with the same
    /// name replaces the earlier one; returns the replaced definition.
    ///
    /// Invocations already expanded from the replaced definition keep their
    /// own `Arc` and are unaffected.
    pub fn register(&self, definition: Arc<ScenarioDefinition>) -> Option<Arc<ScenarioDefinition>> {
        let name = definition.name().to_string();
        log::debug!("Registering scenario '{}'", name);
        self.write().insert(name, definition)
    }

    /// Get a definition by exact normalized name
    pub fn lookup(&self, name: &str) -> Option<Arc<ScenarioDefinition>> {
        self.read().get(name).map(Arc::clone)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Forget every definition (run start)
    pub fn reset(&self) {
        self.write().clear();
    }

    /// Resolve an invoking row to a scenario.
    ///
    /// The row is first read in the alternating form: cells 0, 2, 4, ... are
    /// joined into a name and cells 1, 3, 5, ... become arguments. If no
    /// scenario has that name, all cells joined with spaces are matched
    /// against each scenario's name pattern, in name order.
    pub fn resolve_invocation(&self, cells: &[String]) -> Option<ResolvedInvocation> {
        if cells.is_empty() {
            return None;
        }

        let words: Vec<&str> = cells.iter().step_by(2).map(|c| c.trim()).collect();
        let name = to_class_name(words.join(" ").trim());
        if let Some(definition) = self.lookup(&name) {
            let arguments = cells.iter().skip(1).step_by(2).cloned().collect();
            return Some(ResolvedInvocation {
                definition,
                arguments,
            });
        }

        let invocation = cells.join(" ");
        let scenarios = self.read();
        let mut names: Vec<&String> = scenarios.keys().collect();
        names.sort();
        let resolved = names.into_iter().find_map(|name| {
            let definition = &scenarios[name];
            definition
                .match_arguments(&invocation)
                .map(|arguments| ResolvedInvocation {
                    definition: Arc::clone(definition),
                    arguments,
                })
        });
        resolved
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<ScenarioDefinition>>> {
        // a panicked writer leaves the map itself intact
        self.scenarios.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<ScenarioDefinition>>> {
        self.scenarios.write().unwrap_or_else(|e| e.into_inner())
    }
}

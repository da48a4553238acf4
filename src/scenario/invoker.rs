// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Scenario Invoker and Result Aggregation
//!
//! An invocation moves through three states:
//!
//! ```text
//! Expanded   -> body bound and substituted
//! Dispatched -> body handed to the interpreter, NestedExecution recorded
//! Completed  -> outcome folded into the invoking row and the table totals
//! ```
//!
//! The invoking table owns its [`NestedExecution`] records. Each record is
//! consumed exactly once, when its completion handle resolves or when the run
//! is aborted.

use std::collections::HashMap;

use uuid::Uuid;

use super::context::RunContext;
use super::definition::ScenarioDefinition;
use super::expansion::ScenarioArguments;
use crate::core::error::{ScenarioError, ScenarioResult};
use crate::core::execution::{
    ChildAttachment, ChildOutcome, CompletionHandle, ExecutionResult, Instruction, Resolution,
    ScriptInterpreter, TestSummary,
};

/// Link from an invoking row to its dispatched nested unit
#[derive(Debug)]
pub struct NestedExecution {
    attachment: ChildAttachment,
    scenario: String,
    completion: CompletionHandle,
}

impl NestedExecution {
    pub fn row(&self) -> usize {
        self.attachment.row
    }

    pub fn child_id(&self) -> &str {
        &self.attachment.child_id
    }

    pub fn scenario(&self) -> &str {
        &self.scenario
    }
}

/// A table whose rows invoke scenarios
#[derive(Debug)]
pub struct InvokingTable {
    id: String,
    nested: Vec<NestedExecution>,
    row_statuses: HashMap<usize, ExecutionResult>,
    summary: TestSummary,
}

impl InvokingTable {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            nested: Vec::new(),
            row_statuses: HashMap::new(),
            summary: TestSummary::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Expand `definition` with `arguments` and dispatch it as a nested unit
    /// attached to `row`. Returns the instructions to schedule.
    ///
    /// Binding errors are returned and nothing is dispatched. Interpreter
    /// failures are not returned: they mark the row as an error and yield no
    /// instructions, so sibling rows keep running.
    pub fn invoke(
        &mut self,
        ctx: &RunContext,
        definition: &ScenarioDefinition,
        arguments: &ScenarioArguments,
        row: usize,
        interpreter: &dyn ScriptInterpreter,
    ) -> ScenarioResult<Vec<Instruction>> {
        if ctx.is_aborted() {
            self.record_fault(row, TestSummary::default(), "test run aborted before dispatch");
            return Ok(Vec::new());
        }

        let body = match ctx.expand(definition, arguments) {
            Ok(body) => body,
            Err(e) => {
                if let ScenarioError::Syntax(ref syntax) = e {
                    if syntax.is_binding_error() {
                        log::debug!(
                            "Arguments for scenario '{}' at row {} of {} do not bind: {}",
                            definition.name(),
                            row,
                            self.id,
                            syntax
                        );
                    }
                }
                return Err(e);
            }
        };

        let attachment = ChildAttachment {
            child_id: format!("{}.{}", self.id, Uuid::new_v4().simple()),
            parent_id: self.id.clone(),
            row,
        };

        match interpreter.interpret(body, attachment.clone()) {
            Ok(unit) => {
                log::debug!(
                    "Dispatched scenario '{}' as {} for row {} of {}",
                    definition.name(),
                    attachment.child_id,
                    row,
                    self.id
                );
                self.nested.push(NestedExecution {
                    attachment,
                    scenario: definition.name().to_string(),
                    completion: unit.completion,
                });
                Ok(unit.instructions)
            }
            Err(e) => {
                log::warn!(
                    "Scenario '{}' failed to dispatch for row {} of {}: {}",
                    definition.name(),
                    row,
                    self.id,
                    e
                );
                self.record_fault(row, TestSummary::default(), &e.to_string());
                Ok(Vec::new())
            }
        }
    }

    /// Resolve a row of cells to a registered scenario and invoke it.
    ///
    /// Returns `Ok(None)` when no scenario matches the row.
    pub fn invoke_row(
        &mut self,
        ctx: &RunContext,
        cells: &[String],
        row: usize,
        interpreter: &dyn ScriptInterpreter,
    ) -> ScenarioResult<Option<Vec<Instruction>>> {
        let Some(resolved) = ctx.resolve_invocation(cells) else {
            return Ok(None);
        };
        let arguments = ScenarioArguments::Positional(resolved.arguments);
        self.invoke(ctx, &resolved.definition, &arguments, row, interpreter)
            .map(Some)
    }

    /// Fold every delivered outcome into its row and the table totals.
    ///
    /// If the run has been aborted, executions still pending afterwards are
    /// resolved as errors. Returns the number of executions completed.
    pub fn resolve_completed(&mut self, ctx: &RunContext) -> usize {
        let mut completed = 0;
        for nested in std::mem::take(&mut self.nested) {
            match nested.completion.try_resolve() {
                Resolution::Resolved(outcome) => {
                    self.complete(&nested, outcome);
                    completed += 1;
                }
                Resolution::Pending => self.nested.push(nested),
            }
        }

        if ctx.is_aborted() {
            completed += self.abort_pending();
        }
        completed
    }

    /// Resolve every pending execution as an error. Returns how many there were.
    pub fn abort_pending(&mut self) -> usize {
        let pending = std::mem::take(&mut self.nested);
        let count = pending.len();
        for nested in pending {
            self.complete(
                &nested,
                ChildOutcome::Crashed {
                    summary: TestSummary::default(),
                    message: "test run aborted".to_string(),
                },
            );
        }
        count
    }

    fn complete(&mut self, nested: &NestedExecution, outcome: ChildOutcome) {
        match outcome {
            ChildOutcome::Completed(summary) => {
                let status = self.aggregate(nested.row(), &summary);
                log::info!(
                    "Scenario '{}' at row {} of {} completed: {} ({})",
                    nested.scenario(),
                    nested.row(),
                    self.id,
                    status,
                    summary
                );
            }
            ChildOutcome::Crashed { summary, message } => {
                log::warn!(
                    "Scenario '{}' at row {} of {} ended abnormally: {}",
                    nested.scenario(),
                    nested.row(),
                    self.id,
                    message
                );
                self.record_fault(nested.row(), summary, &message);
            }
        }
    }

    /// Stamp the status implied by `summary` on `row` and add its counts.
    fn aggregate(&mut self, row: usize, summary: &TestSummary) -> ExecutionResult {
        let status = ExecutionResult::from_summary(summary);
        self.row_statuses.insert(row, status);
        self.summary.add(summary);
        status
    }

    /// A fault counts as one error on top of whatever was already counted.
    fn record_fault(&mut self, row: usize, partial: TestSummary, message: &str) {
        log::debug!("Row {} of {} marked as error: {}", row, self.id, message);
        let mut counts = partial;
        counts.error = counts.error.saturating_add(1);
        self.aggregate(row, &counts);
    }

    pub fn row_status(&self, row: usize) -> Option<ExecutionResult> {
        self.row_statuses.get(&row).copied()
    }

    /// Running totals over all completed nested executions
    pub fn summary(&self) -> &TestSummary {
        &self.summary
    }

    pub fn pending_count(&self) -> usize {
        self.nested.len()
    }

    pub fn pending(&self) -> impl Iterator<Item = &NestedExecution> {
        self.nested.iter()
    }
}

impl Drop for InvokingTable {
    fn drop(&mut self) {
        if !self.nested.is_empty() {
            log::warn!(
                "Table {} dropped with {} unresolved nested execution(s)",
                self.id,
                self.nested.len()
            );
        }
    }
}

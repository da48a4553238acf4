// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parameterized scenario tables.
//!
//! A scenario table declares a reusable template: a name, ordered inputs,
//! optional outputs and a body of rows. Invoking rows elsewhere in a test run
//! are matched against registered scenarios, their arguments are substituted
//! into the body, and the expanded body is dispatched to a script interpreter
//! as a nested unit whose outcome is folded back into the invoking row.
//!
//! ```rust,ignore
//! use scenario_tables::prelude::*;
//!
//! let ctx = RunContext::new(ScenarioConfig::default());
//! let def = ctx.define_scenario(&GridTable::from_rows(vec![
//!     vec!["scenario", "Add _ and _", "a, b"],
//!     vec!["push", "@a"],
//!     vec!["push", "@b"],
//! ]))?;
//!
//! let args = ctx.match_invocation(&def, "Add 3 and 4").unwrap();
//! let mut table = InvokingTable::new("script_0");
//! let instructions = table.invoke(&ctx, &def, &ScenarioArguments::Positional(args), 1, &interpreter)?;
//! ```

pub mod core;
pub mod scenario;

pub mod prelude {
    pub use crate::core::config::{ScenarioConfig, SubstitutionMode};
    pub use crate::core::error::{ScenarioError, ScenarioResult};
    pub use crate::core::execution::{
        completion_link, ChildAttachment, ChildOutcome, CompletionHandle, CompletionSender,
        DispatchedUnit, ExecutionResult, Instruction, Resolution, ScriptInterpreter, TestSummary,
    };
    pub use crate::core::table::{GridTable, TableView};
    pub use crate::scenario::{
        InvokingTable, NestedExecution, RunContext, ScenarioArguments, ScenarioDefinition,
        ScenarioRegistry, SyntaxError,
    };
}

// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scenario pipeline: definition parsing, invocation matching, argument
//! binding and expansion, nested dispatch and result aggregation.

pub mod context;
pub mod definition;
pub mod error;
pub mod expansion;
pub mod invoker;
pub mod matcher;
pub mod registry;

pub use context::RunContext;
pub use definition::ScenarioDefinition;
pub use error::SyntaxError;
pub use expansion::{bind_arguments, expand, ScenarioArguments};
pub use invoker::{InvokingTable, NestedExecution};
pub use matcher::{MatchResult, NamePattern};
pub use registry::{ResolvedInvocation, ScenarioRegistry};

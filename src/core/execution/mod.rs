// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod interpreter;
pub mod summary;

pub use interpreter::{
    completion_link, ChildAttachment, ChildOutcome, CompletionHandle, CompletionSender,
    DispatchedUnit, Instruction, Resolution, ScriptInterpreter,
};
pub use summary::{ExecutionResult, TestSummary};

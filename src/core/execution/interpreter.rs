// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Script Interpreter Seam
//!
//! The script-interpretation collaborator turns an expanded scenario body into
//! instructions for the backing interpreter. Completion is reported later
//! through a one-shot link: the collaborator (or the backend acting for it)
//! keeps the [`CompletionSender`], the invoking table keeps the
//! [`CompletionHandle`].
//!
//! ```rust,ignore
//! let (sender, handle) = completion_link();
//! // ... backend runs the nested unit ...
//! sender.complete(TestSummary::new(2, 1, 0, 0));
//! assert!(matches!(handle.try_resolve(), Resolution::Resolved(_)));
//! ```

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};
use serde::Serialize;

use super::summary::TestSummary;
use crate::core::error::ScenarioResult;
use crate::core::table::GridTable;

/// A single instruction destined for the backing interpreter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instruction {
    pub id: String,
    pub tokens: Vec<String>,
}

impl Instruction {
    pub fn new(id: impl Into<String>, tokens: Vec<String>) -> Self {
        Self {
            id: id.into(),
            tokens,
        }
    }
}

/// Where a nested unit of work hangs in the invoking table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildAttachment {
    /// Unique address of the nested unit
    pub child_id: String,
    pub parent_id: String,
    pub row: usize,
}

/// Final report for a nested unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildOutcome {
    Completed(TestSummary),
    /// Interpreter-level fault; `summary` holds whatever was counted before it
    Crashed { summary: TestSummary, message: String },
}

/// Result of polling a [`CompletionHandle`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Pending,
    Resolved(ChildOutcome),
}

/// Delivering side of a completion link. Dropping it without delivering
/// resolves the handle as crashed.
#[derive(Debug)]
pub struct CompletionSender {
    tx: Sender<ChildOutcome>,
}

impl CompletionSender {
    pub fn complete(self, summary: TestSummary) {
        self.deliver(ChildOutcome::Completed(summary));
    }

    pub fn crash(self, summary: TestSummary, message: impl Into<String>) {
        self.deliver(ChildOutcome::Crashed {
            summary,
            message: message.into(),
        });
    }

    fn deliver(self, outcome: ChildOutcome) {
        // receiver gone means the invoking table was dropped; nobody is waiting
        if self.tx.send(outcome).is_err() {
            log::debug!("Nested completion delivered after its invoking table was dropped");
        }
    }
}

/// Receiving side of a completion link, held by the invoking table
#[derive(Debug)]
pub struct CompletionHandle {
    rx: Receiver<ChildOutcome>,
}

impl CompletionHandle {
    /// Poll without blocking.
    pub fn try_resolve(&self) -> Resolution {
        match self.rx.try_recv() {
            Ok(outcome) => Resolution::Resolved(outcome),
            Err(TryRecvError::Empty) => Resolution::Pending,
            Err(TryRecvError::Disconnected) => Resolution::Resolved(ChildOutcome::Crashed {
                summary: TestSummary::default(),
                message: "nested execution ended without reporting a result".to_string(),
            }),
        }
    }
}

/// Create a one-shot completion link.
pub fn completion_link() -> (CompletionSender, CompletionHandle) {
    let (tx, rx) = bounded(1);
    (CompletionSender { tx }, CompletionHandle { rx })
}

/// A nested unit accepted by the interpreter
#[derive(Debug)]
pub struct DispatchedUnit {
    pub instructions: Vec<Instruction>,
    pub completion: CompletionHandle,
}

/// Script-interpretation collaborator
pub trait ScriptInterpreter {
    /// Accept an expanded scenario body as a nested unit attached to the
    /// invoking row and return its instructions plus a completion handle.
    fn interpret(&self, body: GridTable, attachment: ChildAttachment)
        -> ScenarioResult<DispatchedUnit>;
}

// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(dead_code)]

use scenario_tables::prelude::*;
use std::cell::RefCell;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn table(rows: &[&[&str]]) -> GridTable {
    GridTable::from_rows(rows.iter().map(|row| row.iter().copied()))
}

pub fn cells(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Interpreter double: one instruction per body row, completion driven by the test
#[derive(Default)]
pub struct RecordingInterpreter {
    pub dispatched: RefCell<Vec<(ChildAttachment, GridTable)>>,
    pub senders: RefCell<Vec<(String, CompletionSender)>>,
    pub refuse: bool,
}

impl RecordingInterpreter {
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Default::default()
        }
    }

    /// Report `summary` for the nested unit dispatched for `row`
    pub fn complete_row(&self, row: usize, summary: TestSummary) {
        self.take_sender(row).complete(summary);
    }

    pub fn crash_row(&self, row: usize, summary: TestSummary, message: &str) {
        self.take_sender(row).crash(summary, message);
    }

    /// Drop the sender without reporting, as a dead backend would
    pub fn lose_row(&self, row: usize) {
        drop(self.take_sender(row));
    }

    fn take_sender(&self, row: usize) -> CompletionSender {
        let child_id = self
            .dispatched
            .borrow()
            .iter()
            .find(|(attachment, _)| attachment.row == row)
            .map(|(attachment, _)| attachment.child_id.clone())
            .expect("no dispatch for row");
        let mut senders = self.senders.borrow_mut();
        let idx = senders
            .iter()
            .position(|(id, _)| *id == child_id)
            .expect("sender already used");
        senders.remove(idx).1
    }
}

impl ScriptInterpreter for RecordingInterpreter {
    fn interpret(&self, body: GridTable, attachment: ChildAttachment) -> ScenarioResult<DispatchedUnit> {
        if self.refuse {
            return Err(ScenarioError::dispatch("slim server not running"));
        }
        let instructions = body
            .rows()
            .iter()
            .enumerate()
            .map(|(i, row)| Instruction::new(format!("{}_{}", attachment.child_id, i), row.clone()))
            .collect();
        let (sender, completion) = completion_link();
        self.senders
            .borrow_mut()
            .push((attachment.child_id.clone(), sender));
        self.dispatched.borrow_mut().push((attachment, body));
        Ok(DispatchedUnit {
            instructions,
            completion,
        })
    }
}

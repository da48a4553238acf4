// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

/// Pass/fail/error/ignore counts for a table or nested execution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSummary {
    pub pass: u32,
    pub fail: u32,
    pub error: u32,
    pub ignore: u32,
}

impl TestSummary {
    pub fn new(pass: u32, fail: u32, error: u32, ignore: u32) -> Self {
        Self {
            pass,
            fail,
            error,
            ignore,
        }
    }

    pub fn add(&mut self, other: &TestSummary) {
        self.pass = self.pass.saturating_add(other.pass);
        self.fail = self.fail.saturating_add(other.fail);
        self.error = self.error.saturating_add(other.error);
        self.ignore = self.ignore.saturating_add(other.ignore);
    }

    pub fn total(&self) -> u32 {
        self.pass
            .saturating_add(self.fail)
            .saturating_add(self.error)
            .saturating_add(self.ignore)
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl AddAssign<&TestSummary> for TestSummary {
    fn add_assign(&mut self, other: &TestSummary) {
        self.add(other);
    }
}

impl fmt::Display for TestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} right, {} wrong, {} ignored, {} exceptions",
            self.pass, self.fail, self.ignore, self.error
        )
    }
}

/// Row-level execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionResult {
    Pass,
    Fail,
    Error,
    Ignore,
}

impl ExecutionResult {
    /// Status implied by a summary; precedence is error > fail > ignore > pass.
    ///
    /// An empty summary is a pass.
    pub fn from_summary(summary: &TestSummary) -> Self {
        if summary.error > 0 {
            ExecutionResult::Error
        } else if summary.fail > 0 {
            ExecutionResult::Fail
        } else if summary.ignore > 0 {
            ExecutionResult::Ignore
        } else {
            ExecutionResult::Pass
        }
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ExecutionResult::Pass => "pass",
            ExecutionResult::Fail => "fail",
            ExecutionResult::Error => "error",
            ExecutionResult::Ignore => "ignore",
        }
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

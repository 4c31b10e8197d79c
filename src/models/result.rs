// Netswitch - Execution Results
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Result types for plan application.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::command::Command;
use super::error::{Error, Result};

/// Status of a single execution step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// Step completed successfully.
    Success,
    /// Step failed.
    Error,
    /// Step was never run because an earlier one failed.
    Skipped,
}

impl StepStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Skipped => "skipped",
        }
    }
}

/// Why a step failed, as reported by the executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureCause {
    /// The program ran and exited unsuccessfully.
    ExitStatus {
        /// Exit code, if the process was not killed by a signal.
        code: Option<i32>,
        /// Captured stderr (or stdout when stderr was empty), trimmed.
        output: String,
    },
    /// The program could not be started at all.
    Spawn { reason: String },
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExitStatus { code: Some(code), output } if output.is_empty() => {
                write!(f, "exited with status {}", code)
            }
            Self::ExitStatus { code: Some(code), output } => {
                write!(f, "exited with status {}: {}", code, output)
            }
            Self::ExitStatus { code: None, output } if output.is_empty() => {
                f.write_str("terminated by signal")
            }
            Self::ExitStatus { code: None, output } => {
                write!(f, "terminated by signal: {}", output)
            }
            Self::Spawn { reason } => write!(f, "could not start: {}", reason),
        }
    }
}

/// Result of a single command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    /// Position of the command in its plan.
    pub index: usize,
    /// The command that was (or would have been) run.
    pub command: Command,
    /// Execution status.
    pub status: StepStatus,
    /// Failure cause (if error).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<FailureCause>,
    /// Execution duration in milliseconds.
    pub duration_ms: u64,
}

impl StepResult {
    /// Create a success result.
    pub fn success(index: usize, command: Command, duration_ms: u64) -> Self {
        Self {
            index,
            command,
            status: StepStatus::Success,
            cause: None,
            duration_ms,
        }
    }

    /// Create an error result.
    pub fn error(index: usize, command: Command, cause: FailureCause, duration_ms: u64) -> Self {
        Self {
            index,
            command,
            status: StepStatus::Error,
            cause: Some(cause),
            duration_ms,
        }
    }

    /// Create a skipped result.
    pub fn skipped(index: usize, command: Command) -> Self {
        Self {
            index,
            command,
            status: StepStatus::Skipped,
            cause: None,
            duration_ms: 0,
        }
    }
}

/// Overall result of applying a plan.
///
/// Earlier successful steps are never rolled back, so after a failure the
/// adapter may be left in a mixed state; `steps` records exactly how far the
/// plan got.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyResult {
    /// Adapter the plan targeted.
    pub adapter: String,
    /// Per-command results, in plan order.
    pub steps: Vec<StepResult>,
    /// Total execution duration in milliseconds.
    pub total_duration_ms: u64,
    /// Execution start timestamp.
    pub started_at: DateTime<Utc>,
    /// Execution end timestamp.
    pub completed_at: DateTime<Utc>,
    /// Whether the caller should clear cached form and profile selection.
    #[serde(default)]
    pub resets_form_state: bool,
}

impl ApplyResult {
    /// Create an empty result for an adapter.
    pub fn new(adapter: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            adapter: adapter.into(),
            steps: Vec::new(),
            total_duration_ms: 0,
            started_at: now,
            completed_at: now,
            resets_form_state: false,
        }
    }

    /// Add a step result.
    pub fn add_step(&mut self, step: StepResult) {
        self.steps.push(step);
    }

    /// Record completion time.
    pub fn finalize(&mut self) {
        self.completed_at = Utc::now();
        self.total_duration_ms = (self.completed_at - self.started_at)
            .num_milliseconds()
            .max(0) as u64;
    }

    /// True when no step failed.
    pub fn is_success(&self) -> bool {
        !self.steps.iter().any(|s| s.status.is_error())
    }

    /// Index of the first failing command, if any.
    pub fn failed_at(&self) -> Option<usize> {
        self.failure().map(|s| s.index)
    }

    /// The failing step, if any.
    pub fn failure(&self) -> Option<&StepResult> {
        self.steps.iter().find(|s| s.status.is_error())
    }

    /// Count successful steps.
    pub fn success_count(&self) -> usize {
        self.steps.iter().filter(|s| s.status.is_success()).count()
    }

    /// Summary message for display.
    pub fn message(&self) -> String {
        match self.failure() {
            None => format!(
                "{} command(s) applied to {}",
                self.success_count(),
                self.adapter
            ),
            Some(step) => format!(
                "Step {} of {} failed on {} after {} succeeded",
                step.index + 1,
                self.steps.len(),
                self.adapter,
                self.success_count()
            ),
        }
    }

    /// Convert a failed application into an [`Error::Execution`].
    pub fn into_result(self) -> Result<Self> {
        match self.failure() {
            None => Ok(self),
            Some(step) => Err(Error::Execution {
                step: step.index,
                command: step.command.to_string(),
                cause: step
                    .cause
                    .as_ref()
                    .map(|c| c.to_string())
                    .unwrap_or_default(),
            }),
        }
    }
}

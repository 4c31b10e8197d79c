// Netswitch - Configuration Applier
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Sequential plan execution.
//!
//! Commands run strictly in order and execution stops at the first failure.
//! Nothing is rolled back: commands that already succeeded stay applied, and
//! the returned [`ApplyResult`] says exactly how far the plan got.

use std::time::Instant;

use tracing::{error, info};

use super::executor::CommandExecutor;
use crate::models::{ApplyResult, CommandPlan, FailureCause, StepResult};

/// Execute `plan` through `executor`, consuming the plan.
pub fn apply<E>(plan: CommandPlan, executor: &E) -> ApplyResult
where
    E: CommandExecutor + ?Sized,
{
    let mut result = ApplyResult::new(plan.adapter());
    result.resets_form_state = plan.resets_form_state();
    let total = plan.len();

    let mut failed = false;
    for (index, command) in plan.into_iter().enumerate() {
        if failed {
            result.add_step(StepResult::skipped(index, command));
            continue;
        }

        let started = Instant::now();
        let outcome = executor.execute(&command);
        let duration_ms = started.elapsed().as_millis() as u64;

        let cause = match outcome {
            Ok(output) if output.success() => None,
            Ok(output) => Some(FailureCause::ExitStatus {
                code: output.code,
                output: output.diagnostic().to_string(),
            }),
            Err(e) => Some(FailureCause::Spawn { reason: e.to_string() }),
        };

        match cause {
            None => {
                info!(
                    "[{}/{}] {} on {}: ok",
                    index + 1,
                    total,
                    command.action.description(),
                    result.adapter
                );
                result.add_step(StepResult::success(index, command, duration_ms));
            }
            Some(cause) => {
                error!(
                    "[{}/{}] {} on {} failed: {} ({})",
                    index + 1,
                    total,
                    command.action.description(),
                    result.adapter,
                    cause,
                    command
                );
                result.add_step(StepResult::error(index, command, cause, duration_ms));
                failed = true;
            }
        }
    }

    result.finalize();
    result
}

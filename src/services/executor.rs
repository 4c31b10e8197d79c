// Netswitch - Command Execution
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Command execution against the host.
//!
//! The [`CommandExecutor`] trait is the seam between planning and the OS.
//! Only the exit status decides success; output is captured for error
//! reporting and never parsed.

use std::io;
use std::process;

use tracing::debug;

use crate::models::Command;

/// Exit status plus captured output of one program run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, or `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// A successful run with no output.
    pub fn ok() -> Self {
        Self {
            code: Some(0),
            ..Default::default()
        }
    }

    /// A failed run with the given exit code and stderr.
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// The most useful diagnostic text: stderr, else stdout, trimmed.
    pub fn diagnostic(&self) -> &str {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim()
        } else {
            stderr
        }
    }
}

impl From<process::Output> for CommandOutput {
    fn from(output: process::Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Runs one command to completion.
///
/// An `Err` means the program could not be started; a program that ran and
/// failed is an `Ok` with a non-zero code.
#[cfg_attr(test, mockall::automock)]
pub trait CommandExecutor {
    fn execute(&self, command: &Command) -> io::Result<CommandOutput>;
}

/// Executes commands as child processes, blocking until each exits.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

impl CommandExecutor for SystemExecutor {
    fn execute(&self, command: &Command) -> io::Result<CommandOutput> {
        debug!("Executing: {}", command);
        process::Command::new(&command.program)
            .args(&command.args)
            .stdin(process::Stdio::null())
            .output()
            .map(CommandOutput::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConfigAction, DnsTarget};

    fn command(program: &str, args: &[&str]) -> Command {
        Command::new(
            ConfigAction::SetDns(DnsTarget::Automatic),
            program,
            args.iter().copied(),
        )
    }

    #[test]
    fn test_diagnostic_prefers_stderr() {
        let output = CommandOutput {
            code: Some(1),
            stdout: "stdout text\n".into(),
            stderr: "  stderr text \n".into(),
        };
        assert_eq!(output.diagnostic(), "stderr text");

        let quiet = CommandOutput {
            code: Some(1),
            stdout: "only stdout\n".into(),
            stderr: String::new(),
        };
        assert_eq!(quiet.diagnostic(), "only stdout");
    }

    #[cfg(unix)]
    #[test]
    fn test_system_executor_reports_exit_status() {
        let ok = SystemExecutor
            .execute(&command("sh", &["-c", "echo hello"]))
            .expect("sh should start");
        assert!(ok.success());
        assert_eq!(ok.stdout.trim(), "hello");

        let failed = SystemExecutor
            .execute(&command("sh", &["-c", "echo nope >&2; exit 3"]))
            .expect("sh should start");
        assert!(!failed.success());
        assert_eq!(failed.code, Some(3));
        assert_eq!(failed.diagnostic(), "nope");
    }

    #[test]
    fn test_system_executor_missing_program() {
        let result = SystemExecutor.execute(&command("nonexistent_command_xyz", &[]));
        assert!(result.is_err());
    }
}

// src/exec/shell.rs

//! Shell-interpreted command execution.

use std::process::Command;

use crate::errors::{Result, RunletError};
use crate::exec::diag::{DiagnosticSink, TracingSink};
use crate::exec::status::ChildStatus;

/// Runs a whole command line through `sh -c` and collapses the outcome to a
/// boolean.
///
/// The shell owns all interpretation (quoting, globbing, PATH lookup); this
/// type only invokes it and decodes the composite status. One attempt per
/// call, no retry.
pub struct ShellRunner<S = TracingSink> {
    diag: S,
}

impl ShellRunner<TracingSink> {
    pub fn new() -> Self {
        Self { diag: TracingSink }
    }
}

impl Default for ShellRunner<TracingSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DiagnosticSink> ShellRunner<S> {
    /// Use a caller-supplied diagnostic sink instead of `tracing`.
    pub fn with_sink(diag: S) -> Self {
        Self { diag }
    }

    /// Execute `command_line` via the shell.
    ///
    /// True iff the command ran and exited zero. Every failure mode (shell
    /// could not be invoked, non-zero exit, signal termination) is reported
    /// through the sink and returns false.
    pub fn run(&self, command_line: &str) -> bool {
        match self.try_run(command_line) {
            Ok(status) if status.is_success() => {
                self.diag.debug(&format!("command {command_line} succeeded"));
                true
            }
            Ok(status) => {
                self.diag
                    .error(&format!("command {command_line} failed with {status}"));
                false
            }
            Err(err) => {
                self.diag
                    .error(&format!("failed to execute command {command_line}: {err}"));
                false
            }
        }
    }

    fn try_run(&self, command_line: &str) -> Result<ChildStatus> {
        let status = Command::new("sh")
            .arg("-c")
            .arg(command_line)
            .status()
            .map_err(RunletError::ShellSpawn)?;

        Ok(ChildStatus::from_exit_status(status))
    }
}

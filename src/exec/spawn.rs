// src/exec/spawn.rs

//! Direct execution via fork/execv/waitpid.
//!
//! Both executors share one skeleton: fork, replace the child image with
//! `execv`, wait for that specific pid, decode the status. The redirecting
//! variant opens the output file in the parent before the fork and rebinds
//! stdout in the child before the image replacement.
//!
//! Child-side rule: once `fork` returns in the child, the only ways out are
//! `execv` and `_exit`. A child that failed to exec (or to rebind stdout) is
//! still running the parent's image and must terminate before it can fall
//! back into caller logic, so each failure site ends in `_exit` with a
//! distinguished code.

use std::fs::{File, OpenOptions};
use std::os::fd::AsRawFd;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use nix::libc;
use nix::sys::wait::waitpid;
use nix::unistd::{self, ForkResult, fork};

use crate::errors::{Result, RunletError};
use crate::exec::argv::ArgVector;
use crate::exec::diag::{DiagnosticSink, TracingSink};
use crate::exec::status::ChildStatus;

/// Exit code of a child whose `execv` failed.
pub const EXEC_FAILED_CODE: i32 = 127;

/// Exit code of a child whose stdout rebinding failed.
pub const REDIRECT_FAILED_CODE: i32 = 126;

/// Permission bits for newly created output files (rw-r--r--).
const OUTPUT_FILE_MODE: u32 = 0o644;

/// Runs an absolute-path program with an explicit argument vector, bypassing
/// shell interpretation.
pub struct ProcessExecutor<S = TracingSink> {
    diag: S,
}

impl ProcessExecutor<TracingSink> {
    pub fn new() -> Self {
        Self { diag: TracingSink }
    }
}

impl Default for ProcessExecutor<TracingSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DiagnosticSink> ProcessExecutor<S> {
    /// Use a caller-supplied diagnostic sink instead of `tracing`.
    pub fn with_sink(diag: S) -> Self {
        Self { diag }
    }

    /// Execute `argv` and wait for termination.
    ///
    /// True iff the program ran and exited zero. The program path must be
    /// absolute; a relative path is reported and returns false with no
    /// process spawned.
    pub fn run(&self, argv: &ArgVector) -> bool {
        let outcome = ensure_absolute(argv).and_then(|()| spawn_and_wait(argv, None));
        report(&self.diag, argv, outcome)
    }
}

/// Same as [`ProcessExecutor`], but the child's stdout is rebound to a file
/// before the image replacement.
pub struct RedirectingExecutor<S = TracingSink> {
    diag: S,
}

impl RedirectingExecutor<TracingSink> {
    pub fn new() -> Self {
        Self { diag: TracingSink }
    }
}

impl Default for RedirectingExecutor<TracingSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DiagnosticSink> RedirectingExecutor<S> {
    /// Use a caller-supplied diagnostic sink instead of `tracing`.
    pub fn with_sink(diag: S) -> Self {
        Self { diag }
    }

    /// Execute `argv` with stdout captured into `output_path`
    /// (create/truncate, mode 0644).
    ///
    /// True iff the program ran and exited zero. On a setup failure the
    /// output file may not exist at all; on a child failure it may exist
    /// but hold only whatever the child wrote before dying.
    pub fn run(&self, output_path: &Path, argv: &ArgVector) -> bool {
        let outcome = try_run_redirected(output_path, argv);
        report(&self.diag, argv, outcome)
    }
}

fn try_run_redirected(output_path: &Path, argv: &ArgVector) -> Result<ChildStatus> {
    ensure_absolute(argv)?;

    // Acquired before the fork so an open failure never spawns a child.
    let output = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(OUTPUT_FILE_MODE)
        .open(output_path)
        .map_err(|source| RunletError::OpenOutput {
            path: output_path.to_path_buf(),
            source,
        })?;

    spawn_and_wait(argv, Some(output))
}

fn ensure_absolute(argv: &ArgVector) -> Result<()> {
    if argv.has_absolute_program() {
        Ok(())
    } else {
        Err(RunletError::RelativeProgram(argv.program_display()))
    }
}

/// Collapse the decoded outcome to the public boolean, reporting every
/// failure through the sink.
fn report<S: DiagnosticSink>(diag: &S, argv: &ArgVector, outcome: Result<ChildStatus>) -> bool {
    match outcome {
        Ok(status) if status.is_success() => true,
        Ok(status) => {
            diag.error(&format!(
                "command {} failed with {status}",
                argv.program_display()
            ));
            false
        }
        Err(err) => {
            diag.error(&format!("command {} failed: {err}", argv.program_display()));
            false
        }
    }
}

/// Fork, exec in the child, wait in the parent.
///
/// `redirect` is the already-open output file for the redirecting variant.
/// Ownership encodes the descriptor discipline: the parent drops its copy
/// right after the fork, the child drops its copy right after `dup2`, and
/// the non-redirecting variant never opens one.
fn spawn_and_wait(argv: &ArgVector, redirect: Option<File>) -> Result<ChildStatus> {
    // SAFETY: the child continuation calls only fork-safe primitives
    // (dup2, write, execv, _exit) before the image replacement.
    match unsafe { fork() }.map_err(RunletError::Fork)? {
        ForkResult::Parent { child } => {
            // The parent has no use for the output descriptor.
            drop(redirect);

            let status = waitpid(child, None).map_err(RunletError::Wait)?;
            ChildStatus::from_wait_status(status)
                .ok_or(RunletError::UnexpectedWaitStatus(child.as_raw()))
        }
        ForkResult::Child => {
            if let Some(output) = redirect {
                if let Err(err) = unistd::dup2(output.as_raw_fd(), libc::STDOUT_FILENO) {
                    child_fail(
                        &[b"runlet: failed to redirect stdout: ", err.desc().as_bytes()],
                        REDIRECT_FAILED_CODE,
                    );
                }
                // Close the now-redundant original descriptor.
                drop(output);
            }

            if let Err(err) = unistd::execv(argv.program(), argv.as_slice()) {
                child_fail(
                    &[
                        b"runlet: failed to execute ",
                        argv.program().to_bytes(),
                        b": ",
                        err.desc().as_bytes(),
                    ],
                    EXEC_FAILED_CODE,
                );
            }
            unreachable!("execv does not return on success");
        }
    }
}

/// Fork-safe child bailout: raw writes to stderr, then `_exit` so no atexit
/// handlers or buffered writers inherited from the parent image run.
fn child_fail(message: &[&[u8]], code: i32) -> ! {
    for part in message {
        let _ = unistd::write(std::io::stderr(), part);
    }
    let _ = unistd::write(std::io::stderr(), b"\n");
    unsafe { libc::_exit(code) }
}

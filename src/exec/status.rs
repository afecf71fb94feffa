// src/exec/status.rs

//! Tagged decoding of child termination status.

use std::fmt;
use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

use nix::sys::wait::WaitStatus;

/// How a child process terminated.
///
/// Replaces raw composite status integers with an explicit outcome: exited
/// with a code, or killed by a signal. Success is `Exited(0)` for every
/// operation in this crate; signal termination is never success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildStatus {
    /// Terminated normally with the given exit code.
    Exited(i32),
    /// Terminated by the given signal number.
    Signaled(i32),
}

impl ChildStatus {
    pub fn is_success(self) -> bool {
        matches!(self, ChildStatus::Exited(0))
    }

    /// Decode a `waitpid` status.
    ///
    /// Returns `None` for states that cannot occur when waiting without
    /// `WUNTRACED`/`WCONTINUED` flags (stopped, continued, ptrace events).
    pub fn from_wait_status(status: WaitStatus) -> Option<Self> {
        match status {
            WaitStatus::Exited(_, code) => Some(ChildStatus::Exited(code)),
            WaitStatus::Signaled(_, signal, _) => Some(ChildStatus::Signaled(signal as i32)),
            _ => None,
        }
    }

    /// Decode a `std::process` exit status (the shell path).
    pub fn from_exit_status(status: ExitStatus) -> Self {
        match status.code() {
            Some(code) => ChildStatus::Exited(code),
            // On Unix a missing code means signal termination.
            None => ChildStatus::Signaled(status.signal().unwrap_or(0)),
        }
    }
}

impl fmt::Display for ChildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildStatus::Exited(code) => write!(f, "exit status {code}"),
            ChildStatus::Signaled(signal) => write!(f, "signal {signal}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::sys::signal::Signal;
    use nix::unistd::Pid;

    #[test]
    fn exit_zero_is_the_only_success() {
        assert!(ChildStatus::Exited(0).is_success());
        assert!(!ChildStatus::Exited(1).is_success());
        assert!(!ChildStatus::Signaled(9).is_success());
    }

    #[test]
    fn decodes_raw_exit_statuses() {
        // Raw wait-status encoding: exit codes live in the high byte,
        // signals in the low bits.
        let exited = ChildStatus::from_exit_status(ExitStatus::from_raw(3 << 8));
        assert_eq!(exited, ChildStatus::Exited(3));

        let killed = ChildStatus::from_exit_status(ExitStatus::from_raw(9));
        assert_eq!(killed, ChildStatus::Signaled(9));
    }

    #[test]
    fn decodes_wait_statuses() {
        let pid = Pid::from_raw(42);

        assert_eq!(
            ChildStatus::from_wait_status(WaitStatus::Exited(pid, 0)),
            Some(ChildStatus::Exited(0))
        );
        assert_eq!(
            ChildStatus::from_wait_status(WaitStatus::Signaled(pid, Signal::SIGKILL, false)),
            Some(ChildStatus::Signaled(9))
        );
        assert_eq!(
            ChildStatus::from_wait_status(WaitStatus::Stopped(pid, Signal::SIGSTOP)),
            None
        );
    }

    #[test]
    fn display_names_the_outcome() {
        assert_eq!(ChildStatus::Exited(3).to_string(), "exit status 3");
        assert_eq!(ChildStatus::Signaled(15).to_string(), "signal 15");
    }
}

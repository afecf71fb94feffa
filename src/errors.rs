// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! The executor operations collapse every failure to `false` at the public
//! boundary; this enum is what keeps the failure stages distinguishable in
//! diagnostics: setup failures (bad argument shape, file open, fork), wait
//! failures, and shell-invocation failures. A child that ran but exited
//! non-zero is not an error here, it is a decoded [`crate::exec::ChildStatus`].

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunletError {
    #[error("argument vector is empty")]
    EmptyArgv,

    #[error("argument contains an interior NUL byte")]
    NulInArgument(#[from] std::ffi::NulError),

    #[error("program path {0} is not absolute")]
    RelativeProgram(String),

    #[error("failed to open output file {path}: {source}")]
    OpenOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fork: {0}")]
    Fork(#[source] nix::Error),

    #[error("failed to wait for child: {0}")]
    Wait(#[source] nix::Error),

    #[error("unexpected wait status for child pid {0}")]
    UnexpectedWaitStatus(i32),

    #[error("failed to invoke shell: {0}")]
    ShellSpawn(#[source] std::io::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, RunletError>;

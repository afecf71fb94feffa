// src/lib.rs

pub mod cli;
pub mod contention;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod writer;

use anyhow::Result;
use tracing::debug;

use crate::cli::{CliArgs, CliCommand};
use crate::exec::{ArgVector, ProcessExecutor, RedirectingExecutor, ShellRunner};

/// High-level entry point used by `main.rs`.
///
/// Dispatches one subcommand and reports whether the operation succeeded;
/// the binary maps `false` onto a non-zero exit status.
pub fn run(args: CliArgs) -> Result<bool> {
    match args.command {
        CliCommand::Sh { command_line } => {
            debug!(cmd = %command_line, "running command line via shell");
            Ok(ShellRunner::new().run(&command_line))
        }

        CliCommand::Exec {
            output,
            program,
            args,
        } => {
            let argv = ArgVector::new(std::iter::once(program).chain(args))?;
            debug!(argv = %argv, redirect = output.is_some(), "running program directly");

            let ok = match output {
                Some(path) => RedirectingExecutor::new().run(&path, &argv),
                None => ProcessExecutor::new().run(&argv),
            };
            Ok(ok)
        }

        CliCommand::Write { file, text } => {
            writer::write_file(&file, &text)?;
            Ok(true)
        }
    }
}

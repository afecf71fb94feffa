// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `runlet`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "runlet",
    version,
    about = "Run commands directly or through the shell, with optional stdout capture.",
    long_about = None
)]
pub struct CliArgs {
    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `RUNLET_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Run a command line through `sh -c`.
    Sh {
        /// The command line, handed to the shell verbatim.
        command_line: String,
    },

    /// Run an absolute-path program with explicit arguments (no shell).
    Exec {
        /// Capture the program's stdout into this file (create/truncate).
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Absolute path of the program to execute.
        program: String,

        /// Arguments passed to the program verbatim.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Write a string to a file (create/truncate, no trailing newline).
    Write {
        /// Destination file; its directory must already exist.
        file: PathBuf,

        /// The exact string to write.
        text: String,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

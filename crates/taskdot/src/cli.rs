//! CLI argument surface and error-to-exit-code policy.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use miette::{Diagnostic, Report};
use thiserror::Error;

/// Exit code for a successful run.
pub const EXIT_OK: i32 = 0;
/// CLI or style-configuration error exit code.
pub const EXIT_CLI: i32 = 2;
/// Taskfile load or parse error exit code.
pub const EXIT_LOAD: i32 = 3;

/// Command-line arguments.
///
/// Exactly one positional argument names the taskfile, or a directory
/// containing one; clap rejects a missing or surplus positional with usage
/// output and a non-zero exit.
#[derive(Debug, Parser)]
#[command(
    name = "taskdot",
    version,
    about = "Render a Graphviz DOT graph of a taskfile's tasks, dependencies and calls",
    long_about = "Renders a taskfile's task topology as a Graphviz DOT document on stdout:\n\
                  one node per task, dashed edges for declared dependencies and solid\n\
                  edges for task calls found in command lists. Diagnostics go to stderr,\n\
                  so the output can be piped straight into `dot`."
)]
pub struct Cli {
    /// Colored diagnostics. Enabled by default; set to false or set
    /// NO_COLOR to disable.
    #[arg(short, long, default_value_t = true, action = clap::ArgAction::Set)]
    pub color: bool,

    /// Enable verbose (debug-level) diagnostics.
    #[arg(short, long)]
    pub verbose: bool,

    /// Style configuration file. Built-in defaults apply when omitted.
    #[arg(short = 'C', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Taskfile to render, or a directory containing one.
    #[arg(value_name = "TASKFILE")]
    pub taskfile: PathBuf,
}

/// Parse the process arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

impl Cli {
    /// Whether diagnostics should use ANSI color, honoring the `NO_COLOR`
    /// convention on top of the `--color` flag.
    #[must_use]
    pub fn color_enabled(&self) -> bool {
        self.color && std::env::var_os("NO_COLOR").is_none()
    }
}

/// CLI-facing error with exit-code mapping.
#[derive(Debug, Clone, Error, Diagnostic)]
pub enum CliError {
    /// CLI or style-configuration error (exit code 2).
    #[error("{message}")]
    #[diagnostic(code(taskdot::cli::config))]
    Config {
        /// The error message.
        message: String,
        /// Optional help text.
        #[help]
        help: Option<String>,
    },

    /// Taskfile load or parse error (exit code 3).
    #[error("{message}")]
    #[diagnostic(code(taskdot::cli::load))]
    Load {
        /// The error message.
        message: String,
        /// Optional help text.
        #[help]
        help: Option<String>,
    },
}

impl CliError {
    /// Create a configuration error with help text.
    #[must_use]
    pub fn config_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Create a taskfile-load error with help text.
    #[must_use]
    pub fn load_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Load {
            message: message.into(),
            help: Some(help.into()),
        }
    }
}

impl From<taskdot_core::Error> for CliError {
    fn from(err: taskdot_core::Error) -> Self {
        Self::load_with_help(
            chain(&err),
            "Check that the path names a taskfile or a directory containing one",
        )
    }
}

impl From<taskdot_graph::Error> for CliError {
    fn from(err: taskdot_graph::Error) -> Self {
        Self::config_with_help(
            chain(&err),
            "Recognized style keys are 'task', 'dependency', 'invocation' and 'node-styles'",
        )
    }
}

/// Map a CLI error to its exit code.
#[must_use]
pub const fn exit_code_for(err: &CliError) -> i32 {
    match err {
        CliError::Config { .. } => EXIT_CLI,
        CliError::Load { .. } => EXIT_LOAD,
    }
}

/// Render an error to stderr as a miette report.
#[allow(clippy::print_stderr)]
pub fn render_error(err: &CliError) {
    let report = Report::new(err.clone());
    eprintln!("{report:?}");
    // Ensure output is flushed before process exit
    let _ = io::stderr().flush();
}

/// Flatten an error and its source chain into one message.
fn chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

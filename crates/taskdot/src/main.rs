//! taskdot CLI application.
//!
//! Loads a taskfile, builds its task graph and writes a Graphviz DOT
//! document to stdout. Diagnostics always go to stderr so the output can be
//! piped into GraphViz.

// The binary's whole purpose is writing the document to stdout
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use tracing_subscriber::filter::EnvFilter;

use cli::{Cli, CliError, EXIT_OK};
use taskdot_core::Taskfile;
use taskdot_graph::{StyleConfig, build_graph};

fn main() {
    let cli = cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => std::process::exit(EXIT_OK),
        Err(err) => {
            cli::render_error(&err);
            std::process::exit(cli::exit_code_for(&err));
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let taskfile = Taskfile::load(&cli.taskfile)?;

    let config = match &cli.config {
        Some(path) => StyleConfig::load(path)?,
        None => StyleConfig::builtin(),
    };
    let styles = config.compile()?;

    // Nothing reaches stdout until the whole document is rendered, so a
    // fatal error can never leave a partial graph behind.
    let document = build_graph(&taskfile, &styles);
    print!("{document}");

    Ok(())
}

/// Install the stderr diagnostics subscriber.
///
/// `RUST_LOG` overrides the level derived from `--verbose`; ANSI follows
/// the `--color` flag and the `NO_COLOR` convention.
fn init_tracing(cli: &Cli) {
    let level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            EnvFilter::try_new(format!(
                "taskdot={level},taskdot_core={level},taskdot_graph={level}"
            ))
        })
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(cli.color_enabled())
        .init();
}

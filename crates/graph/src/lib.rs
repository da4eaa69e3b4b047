//! Task graph construction, styling and DOT rendering for taskdot.
//!
//! This crate turns a decoded [`Taskfile`] into a Graphviz DOT document in
//! four stages:
//!
//! 1. Sanitize every task name into a valid DOT identifier ([`sanitize`])
//! 2. Build a directed graph with one node per task, dependency edges from
//!    `deps` lists and call edges from `cmds` task references ([`TaskGraph`])
//! 3. Apply glob-matched style rules to every node ([`StyleSheet`])
//! 4. Serialize the graph into a deterministic, sectioned document
//!
//! The pipeline is strictly linear and synchronous. Unresolvable edge
//! endpoints are logged as warnings and skipped; they never fail the build.
//!
//! # Example
//!
//! ```
//! use taskdot_core::Taskfile;
//! use taskdot_graph::{StyleConfig, build_graph};
//!
//! let taskfile: Taskfile = serde_yaml::from_str(
//!     "tasks:\n  build:\n    deps: [lint]\n  lint: {}\n",
//! )?;
//! let styles = StyleConfig::builtin().compile()?;
//!
//! let dot = build_graph(&taskfile, &styles);
//! assert!(dot.contains("build -> lint;"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod attributes;
mod error;
mod graph;
mod ident;
mod render;
mod style;

pub use attributes::Attributes;
pub use error::{Error, Result};
pub use graph::{EdgeKind, Node, TaskGraph};
pub use ident::sanitize;
pub use style::{StyleConfig, StyleRule, StyleSheet};

use taskdot_core::Taskfile;

/// Build the DOT document for a taskfile under the given stylesheet.
///
/// Orchestrates the full pipeline: node construction, dependency and call
/// edge construction, per-node style application, and serialization. The
/// output is byte-identical across invocations for the same inputs.
#[must_use]
pub fn build_graph(taskfile: &Taskfile, styles: &StyleSheet) -> String {
    let mut graph = TaskGraph::from_taskfile(taskfile);
    graph.apply_styles(styles);
    render::render(&graph, styles)
}

//! DOT document assembly.
//!
//! Writes the sectioned document: a `digraph` header, a "Tasks" section
//! with the shared node defaults and every node in ascending identifier
//! order, "Dependencies" and "Calls" sections with their shared edge
//! defaults and edges in build order, and the closing brace. Each section
//! is preceded by a blank line and a comment naming it.

use crate::attributes::{Attributes, INDENT};
use crate::graph::{EdgeKind, Node, TaskGraph};
use crate::style::StyleSheet;

/// Serialize a styled graph into the final document.
pub(crate) fn render(graph: &TaskGraph, styles: &StyleSheet) -> String {
    let mut out = String::new();

    out.push_str("digraph taskfile {\n");
    write_nodes("Tasks", &styles.task, graph, &mut out);
    write_edges(
        "Dependencies",
        &styles.dependency,
        graph.edges(EdgeKind::Dependency),
        &mut out,
    );
    write_edges("Calls", &styles.invocation, graph.edges(EdgeKind::Call), &mut out);
    out.push_str("}\n");

    out
}

fn write_section_comment(header: &str, out: &mut String) {
    out.push('\n');
    out.push_str(INDENT);
    out.push_str("// ");
    out.push_str(header);
    out.push_str("\n\n");
}

fn write_nodes(header: &str, defaults: &Attributes, graph: &TaskGraph, out: &mut String) {
    write_section_comment(header, out);

    if !defaults.is_empty() {
        defaults.write_block("node", out);
    }

    for node in graph.sorted_nodes() {
        node.attributes.write_statement(&node.id, out);
    }
}

fn write_edges<'a>(
    header: &str,
    defaults: &Attributes,
    edges: impl Iterator<Item = (&'a Node, &'a Node)>,
    out: &mut String,
) {
    write_section_comment(header, out);

    if !defaults.is_empty() {
        defaults.write_block("edge", out);
    }

    for (from, to) in edges {
        out.push_str(INDENT);
        out.push_str(&from.id);
        out.push_str(" -> ");
        out.push_str(&to.id);
        out.push_str(";\n");
    }
}

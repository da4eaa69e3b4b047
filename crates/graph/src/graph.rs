//! Task graph builder.
//!
//! Builds a directed graph from a taskfile: one node per task, keyed by
//! sanitized identifier, plus two logical edge collections distinguished by
//! [`EdgeKind`]. Nodes are added first, then edges, so every edge endpoint
//! can be resolved against the complete node set. Endpoints that do not
//! resolve are logged and skipped; they never fail the build.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use tracing::{debug, warn};

use taskdot_core::Taskfile;

use crate::attributes::Attributes;
use crate::ident::sanitize;
use crate::style::StyleSheet;

/// The two logical edge collections of a task graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// An edge from a task to a declared dependency.
    Dependency,
    /// An edge from a task to a task it invokes from its command list.
    Call,
}

/// A graph node representing one task.
#[derive(Debug, Clone)]
pub struct Node {
    /// Sanitized identifier, unique within the graph.
    pub id: String,
    /// The original, unmodified task name.
    pub label: String,
    /// Rendering attributes; always contains at least `label`.
    pub attributes: Attributes,
}

impl Node {
    /// Create a node with the initial attribute set `{label: <label>}`.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        let label = label.into();
        let attributes = [("label", label.as_str())].into_iter().collect();
        Self {
            id: id.into(),
            label,
            attributes,
        }
    }
}

/// Directed graph of tasks, dependency edges and call edges.
pub struct TaskGraph {
    graph: DiGraph<Node, EdgeKind>,
    /// Map from sanitized identifiers to node indices.
    id_to_node: HashMap<String, NodeIndex>,
}

impl TaskGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            id_to_node: HashMap::new(),
        }
    }

    /// Build the full graph for a taskfile: all nodes, then dependency
    /// edges, then call edges, each pass in task declaration order.
    #[must_use]
    pub fn from_taskfile(taskfile: &Taskfile) -> Self {
        let mut graph = Self::new();
        graph.add_task_nodes(taskfile);
        graph.add_dependency_edges(taskfile);
        graph.add_call_edges(taskfile);
        graph
    }

    /// Add one node per task. If two task names sanitize to the same
    /// identifier, the later task overwrites the earlier node.
    fn add_task_nodes(&mut self, taskfile: &Taskfile) {
        for name in taskfile.tasks.keys() {
            let id = sanitize(name);
            let node = Node::new(id.clone(), name);

            if let Some(&index) = self.id_to_node.get(&id) {
                warn!("task '{name}' collides with an existing node '{id}', keeping the later task");
                self.graph[index] = node;
            } else {
                let index = self.graph.add_node(node);
                debug!("added node '{id}' for task '{name}'");
                self.id_to_node.insert(id, index);
            }
        }
    }

    /// Add one dependency edge per `deps` entry that resolves at both ends.
    fn add_dependency_edges(&mut self, taskfile: &Taskfile) {
        for (name, task) in &taskfile.tasks {
            let Some(from) = self.resolve(name) else {
                warn!("didn't find 'from' node for task '{name}', skipping its dependencies");
                continue;
            };

            for dep in &task.deps {
                let Some(to) = self.resolve(dep.task()) else {
                    warn!("didn't find 'to' node for task '{}'", dep.task());
                    continue;
                };

                self.graph.add_edge(from, to, EdgeKind::Dependency);
            }
        }
    }

    /// Add one call edge per command entry that references another task and
    /// resolves at both ends. Plain shell commands are skipped silently.
    fn add_call_edges(&mut self, taskfile: &Taskfile) {
        for (name, task) in &taskfile.tasks {
            let Some(from) = self.resolve(name) else {
                warn!("didn't find 'from' node for task '{name}', skipping its calls");
                continue;
            };

            for cmd in &task.cmds {
                let Some(called) = cmd.task_ref() else {
                    continue;
                };

                let Some(to) = self.resolve(called) else {
                    warn!("didn't find 'to' node for task '{called}'");
                    continue;
                };

                self.graph.add_edge(from, to, EdgeKind::Call);
            }
        }
    }

    /// Resolve a task name to its node via the sanitized identifier.
    fn resolve(&self, name: &str) -> Option<NodeIndex> {
        self.id_to_node.get(&sanitize(name)).copied()
    }

    /// Apply the stylesheet's rules to every node.
    pub fn apply_styles(&mut self, styles: &StyleSheet) {
        for node in self.graph.node_weights_mut() {
            styles.apply(node);
        }
    }

    /// Look up a node by sanitized identifier.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.id_to_node
            .get(id)
            .and_then(|&index| self.graph.node_weight(index))
    }

    /// Number of nodes in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges of the given kind.
    #[must_use]
    pub fn edge_count(&self, kind: EdgeKind) -> usize {
        self.edges(kind).count()
    }

    /// All nodes in ascending lexicographic order of their identifiers.
    ///
    /// This ordering is the document's determinism guarantee: it holds
    /// regardless of task declaration order.
    #[must_use]
    pub fn sorted_nodes(&self) -> Vec<&Node> {
        let mut nodes: Vec<&Node> = self.graph.node_weights().collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));
        nodes
    }

    /// Edge endpoints of the given kind, in build order.
    pub fn edges(&self, kind: EdgeKind) -> impl Iterator<Item = (&Node, &Node)> {
        self.graph
            .edge_references()
            .filter(move |edge| *edge.weight() == kind)
            .map(|edge| (&self.graph[edge.source()], &self.graph[edge.target()]))
    }
}

impl Default for TaskGraph {
    fn default() -> Self {
        Self::new()
    }
}

//! Machine-readable graph dump

use serde::Serialize;
use std::io::{self, Write};

use crate::graph::{walk, DependencyGraph, DependencyNode, Provenance};

#[derive(Debug, Serialize)]
pub struct JsonModule {
    pub name: String,
    pub path: String,
    pub provenance: Provenance,
    pub valid: bool,
    pub stripped: bool,
    pub dependencies: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct JsonGraph {
    pub root: String,
    /// Modules in walk order, each listed once
    pub modules: Vec<JsonModule>,
}

/// Collect the graph into its serializable form
pub fn to_json_graph(graph: &DependencyGraph, include_platform: bool) -> JsonGraph {
    let shows = |node: &DependencyNode| include_platform || !node.is_platform();
    let mut modules = Vec::new();
    walk(
        graph,
        true,
        |node, was_visited, _| {
            if was_visited || !shows(node) {
                return;
            }
            let dependencies = node
                .dependencies
                .iter()
                .map(|id| graph.node(*id))
                .filter(|dep| shows(*dep))
                .map(|dep| dep.name.clone())
                .collect();
            modules.push(JsonModule {
                name: node.name.clone(),
                path: node.path().display().to_string(),
                provenance: node.provenance,
                valid: node.is_valid,
                stripped: node.is_stripped,
                dependencies,
            });
        },
        None,
    );

    JsonGraph {
        root: graph.root_node().name.clone(),
        modules,
    }
}

/// Write the graph as pretty-printed JSON
pub fn render_json(
    graph: &DependencyGraph,
    include_platform: bool,
    out: &mut dyn Write,
) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &to_json_graph(graph, include_platform))?;
    writeln!(out)
}

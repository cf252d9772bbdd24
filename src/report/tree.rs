//! Tree and flat dependency listings

use std::io::{self, Write};

use crate::graph::{walk, DependencyGraph, DependencyNode};

/// Options shared by the text renderers
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Show (and expand) platform-provided modules
    pub include_platform: bool,
    /// Append the resolved path to every row
    pub full_paths: bool,
}

impl RenderOptions {
    fn shows(&self, node: &DependencyNode) -> bool {
        self.include_platform || !node.is_platform()
    }
}

fn repeat_marker(node: &DependencyNode) -> &'static str {
    if node.dependencies.is_empty() {
        " (see above)"
    } else {
        " (+ more, see above)"
    }
}

/// Rows of the indented tree, four spaces per level.
///
/// Repeated modules are listed where they occur with a "see above" marker but
/// not expanded again.
pub fn tree_lines(graph: &DependencyGraph, options: RenderOptions) -> Vec<String> {
    let mut lines = Vec::new();
    let recurse = |node: &DependencyNode, _: bool, _: usize| options.shows(node);
    walk(
        graph,
        true,
        |node, was_visited, level| {
            if !options.shows(node) {
                return;
            }
            let mut line = format!("{}{}", " ".repeat(level * 4), node.label(options.full_paths));
            if was_visited {
                line.push_str(repeat_marker(node));
            }
            lines.push(line);
        },
        Some(&recurse),
    );
    lines
}

/// Rows of the flat listing: the root, then every other module once
pub fn flat_lines(graph: &DependencyGraph, options: RenderOptions) -> Vec<String> {
    let mut lines = Vec::new();
    let recurse = |node: &DependencyNode, _: bool, _: usize| options.shows(node);
    walk(
        graph,
        true,
        |node, was_visited, level| {
            if was_visited || !options.shows(node) {
                return;
            }
            let indent = if level > 0 { "    " } else { "" };
            lines.push(format!("{}{}", indent, node.label(options.full_paths)));
        },
        Some(&recurse),
    );
    lines
}

/// Write the tree listing to `out`
pub fn render_tree(
    graph: &DependencyGraph,
    options: RenderOptions,
    out: &mut dyn Write,
) -> io::Result<()> {
    for line in tree_lines(graph, options) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Write the flat listing to `out`
pub fn render_flat(
    graph: &DependencyGraph,
    options: RenderOptions,
    out: &mut dyn Write,
) -> io::Result<()> {
    for line in flat_lines(graph, options) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

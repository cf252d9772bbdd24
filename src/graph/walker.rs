//! Cycle-safe graph traversal
//!
//! Depth-first, pre-order, in dependency list order. Every reference to a node
//! is reported, but each node is recursed into at most once per walk.

use std::collections::HashSet;

use super::builder::DependencyGraph;
use super::node::{DependencyNode, NodeId};

/// Recursion filter: `(node, was_visited, level) -> recurse?`
pub type RecurseFilter<'f> = &'f dyn Fn(&DependencyNode, bool, usize) -> bool;

/// Walk the graph from its root.
///
/// With `visit_root`, `on_visit(root, false, 0)` runs first. Dependencies are
/// reported at level 1 and deeper with `was_visited` telling first visits from
/// repeats. Recursion happens on first visits only, and only when
/// `should_recurse` is absent or agrees.
pub fn walk<F>(
    graph: &DependencyGraph,
    visit_root: bool,
    mut on_visit: F,
    should_recurse: Option<RecurseFilter<'_>>,
) where
    F: FnMut(&DependencyNode, bool, usize),
{
    let root = graph.root();
    if visit_root {
        on_visit(graph.node(root), false, 0);
    }
    let mut visited = HashSet::new();
    walk_from(graph, root, &mut visited, &mut on_visit, should_recurse, 1);
}

fn walk_from<F>(
    graph: &DependencyGraph,
    id: NodeId,
    visited: &mut HashSet<NodeId>,
    on_visit: &mut F,
    should_recurse: Option<RecurseFilter<'_>>,
    level: usize,
) where
    F: FnMut(&DependencyNode, bool, usize),
{
    visited.insert(id);
    for &dep in &graph.node(id).dependencies {
        let node = graph.node(dep);
        let was_visited = visited.contains(&dep);
        on_visit(node, was_visited, level);
        if !was_visited && should_recurse.map_or(true, |f| f(node, was_visited, level)) {
            walk_from(graph, dep, visited, on_visit, should_recurse, level + 1);
        }
    }
}

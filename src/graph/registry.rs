//! Module registry
//!
//! Deduplication map from module name to the single node owning it. Nodes live
//! in an arena; every edge in the graph is a [`NodeId`] into it.

use std::collections::HashMap;

use super::node::{DependencyNode, NodeId};
use crate::resolver::ResolvedModule;

/// Owns every node of one resolution run
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    nodes: Vec<DependencyNode>,
    by_name: HashMap<String, NodeId>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the node registered under `name`, creating it with `factory` if absent.
    ///
    /// `factory` is never invoked for a registered name. The flag is true when
    /// this call created the node. Check and insert happen under one `&mut`
    /// borrow, so a name can never start two expansions.
    pub fn get_or_create<F>(&mut self, name: &str, factory: F) -> (NodeId, bool)
    where
        F: FnOnce() -> ResolvedModule,
    {
        if let Some(&id) = self.by_name.get(name) {
            return (id, false);
        }
        let resolved = factory();
        let id = self.insert(DependencyNode::new(
            name,
            resolved.path,
            resolved.provenance,
        ));
        (id, true)
    }

    fn insert(&mut self, node: DependencyNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.by_name.insert(node.name.clone(), id);
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> &DependencyNode {
        &self.nodes[id.0]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut DependencyNode {
        &mut self.nodes[id.0]
    }

    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in creation order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &DependencyNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }
}

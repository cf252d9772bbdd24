//! Dependency graph engine
//!
//! - `ModuleRegistry`: one node per module name, arena-owned
//! - `GraphBuilder`: resolves and expands imports depth-first
//! - `walk`: cycle-safe traversal shared by every report

pub mod builder;
pub mod node;
pub mod registry;
pub mod walker;

pub use builder::{DependencyGraph, GraphBuilder};
pub use node::{DependencyNode, NodeId, Provenance};
pub use registry::ModuleRegistry;
pub use walker::{walk, RecurseFilter};

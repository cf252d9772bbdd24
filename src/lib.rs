//! depwalk - dynamic library dependency resolution for native binaries
//!
//! This crate inspects an executable or library, resolves the transitive closure
//! of the dynamic libraries it imports the way the loader would, and reports the
//! result as a tree, a flat list, a size summary or a JSON dump, or copies the
//! bundled files into one directory.
//!
//! ## Architecture
//!
//! 1. `resolver` - module name → file, following the loader search order
//! 2. `graph` - registry, builder and cycle-safe walker
//! 3. `imports` - import tables and strip flags via goblin (PE, ELF, Mach-O)
//! 4. `fs` - filesystem collaborator
//! 5. `report` - tree, flat, size, copy and JSON reporters
//!
//! ## Design Principles
//!
//! 1. **One node per module name**: the registry deduplicates and owns every node
//! 2. **Edges are indices**: dependency lists hold `NodeId`s into the registry arena
//! 3. **Errors stay with their item**: missing and unparsable modules become
//!    node state; nothing aborts a walk halfway
//!
//! ## Example
//!
//! ```rust,no_run
//! use depwalk::{GraphBuilder, PathResolver, SearchLocations};
//! use depwalk::fs::LocalFileSystem;
//! use depwalk::imports::BinaryImportExtractor;
//! use depwalk::report::{render_tree, RenderOptions};
//! use std::path::Path;
//!
//! let fs = LocalFileSystem::new();
//! let extractor = BinaryImportExtractor::new();
//! let resolver = PathResolver::new(&fs, SearchLocations::from_env());
//! let graph = GraphBuilder::new(resolver, &extractor).build(Path::new("app.exe"));
//! render_tree(&graph, RenderOptions::default(), &mut std::io::stdout()).unwrap();
//! ```

pub mod config;
pub mod error;
pub mod fs;
pub mod graph;
pub mod imports;
pub mod report;
pub mod resolver;
pub mod utils;

pub use config::{DepsConfig, LoggingConfig, ResolverConfig};
pub use error::{DepsError, Result};
pub use graph::{
    walk, DependencyGraph, DependencyNode, GraphBuilder, ModuleRegistry, NodeId, Provenance,
};
pub use resolver::{PathResolver, ResolvedModule, SearchLocations};

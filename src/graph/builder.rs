//! Graph construction
//!
//! Populates nodes depth-first by combining import extraction with path
//! resolution. Cycles terminate because only newly registered nodes are
//! expanded; a name already in the registry is linked, never re-entered.

use std::path::Path;
use tracing::{debug, info, warn};

use super::node::{DependencyNode, NodeId, Provenance};
use super::registry::ModuleRegistry;
use crate::imports::ImportExtractor;
use crate::resolver::{PathResolver, ResolvedModule};

/// The result of one resolution run: the registry plus the root it was built from
#[derive(Debug)]
pub struct DependencyGraph {
    registry: ModuleRegistry,
    root: NodeId,
}

impl DependencyGraph {
    pub fn new(registry: ModuleRegistry, root: NodeId) -> Self {
        Self { registry, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_node(&self) -> &DependencyNode {
        self.registry.get(self.root)
    }

    pub fn node(&self, id: NodeId) -> &DependencyNode {
        self.registry.get(id)
    }

    pub fn lookup(&self, name: &str) -> Option<&DependencyNode> {
        self.registry.lookup(name).map(|id| self.registry.get(id))
    }

    /// Direct dependencies of `id`, in import order
    pub fn dependencies(&self, id: NodeId) -> impl Iterator<Item = &DependencyNode> {
        self.registry
            .get(id)
            .dependencies
            .iter()
            .map(move |dep| self.registry.get(*dep))
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

/// Builds a [`DependencyGraph`] from a root binary
pub struct GraphBuilder<'a> {
    resolver: PathResolver<'a>,
    extractor: &'a dyn ImportExtractor,
    recurse_into_platform: bool,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(resolver: PathResolver<'a>, extractor: &'a dyn ImportExtractor) -> Self {
        Self {
            resolver,
            extractor,
            recurse_into_platform: false,
        }
    }

    /// Also expand modules found in platform directories
    pub fn recurse_into_platform(mut self, recurse: bool) -> Self {
        self.recurse_into_platform = recurse;
        self
    }

    /// Register `root_path` as a bundled root and expand everything reachable from it
    pub fn build(&self, root_path: &Path) -> DependencyGraph {
        let mut registry = ModuleRegistry::new();
        let name = root_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root_path.display().to_string());

        let (root, _) = registry.get_or_create(&name, || ResolvedModule {
            path: root_path.to_path_buf(),
            provenance: Provenance::Bundled,
        });
        self.expand(&mut registry, root);

        let missing = registry.iter().filter(|(_, n)| n.is_missing()).count();
        info!(
            "Resolved {} modules for {:?} ({} missing)",
            registry.len(),
            root_path,
            missing
        );
        DependencyGraph::new(registry, root)
    }

    /// Populate the dependencies of `id`, recursing into modules seen for the first time
    pub fn expand(&self, registry: &mut ModuleRegistry, id: NodeId) {
        let node = registry.get(id);
        if node.is_expanded()
            || node.provenance == Provenance::Missing
            || (node.provenance == Provenance::Platform && !self.recurse_into_platform)
        {
            return;
        }
        let path = node.resolved_path.clone();
        let directory = node.directory();
        registry.get_mut(id).expanded = true;

        let imports = match self.extractor.extract(&path) {
            Ok(imports) => imports,
            Err(e) => {
                warn!("Treating {:?} as a leaf: {}", path, e);
                registry.get_mut(id).is_valid = false;
                return;
            }
        };
        registry.get_mut(id).is_stripped = imports.strip.is_fully_stripped();
        debug!("{:?} imports {:?}", path, imports.modules);

        for name in &imports.modules {
            let (dep, created) =
                registry.get_or_create(name, || self.resolver.resolve(&directory, name));
            registry.get_mut(id).dependencies.push(dep);
            if created {
                self.expand(registry, dep);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DepsError, Result};
    use crate::fs::FileSystem;
    use crate::imports::{ImportInfo, StripFlags};
    use crate::resolver::SearchLocations;
    use std::collections::HashMap;
    use std::io;
    use std::path::PathBuf;

    /// Imports scripted per file name; unscripted files fail to parse
    #[derive(Default)]
    struct Scripted {
        imports: HashMap<String, Vec<&'static str>>,
    }

    impl Scripted {
        fn with(mut self, file: &str, imports: &[&'static str]) -> Self {
            self.imports.insert(file.to_string(), imports.to_vec());
            self
        }
    }

    impl ImportExtractor for Scripted {
        fn extract(&self, path: &Path) -> Result<ImportInfo> {
            let name = path.file_name().unwrap().to_string_lossy().into_owned();
            match self.imports.get(&name) {
                Some(list) => Ok(ImportInfo::new(list.iter().copied(), StripFlags::ALL)),
                None => Err(DepsError::Parse {
                    path: path.to_path_buf(),
                    message: "scripted failure".to_string(),
                }),
            }
        }
    }

    struct AppDirFs;

    impl FileSystem for AppDirFs {
        fn is_file(&self, path: &Path) -> bool {
            path.starts_with("/app") && !path.ends_with("gone.dll")
        }
        fn file_size(&self, _path: &Path) -> io::Result<u64> {
            Ok(0)
        }
        fn normalize_file_name(&self, path: &Path) -> io::Result<PathBuf> {
            Ok(path.to_path_buf())
        }
        fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
            Ok(())
        }
        fn copy_file(&self, _from: &Path, _to: &Path, _overwrite: bool) -> io::Result<u64> {
            Ok(0)
        }
    }

    fn build(extractor: &Scripted) -> DependencyGraph {
        let fs = AppDirFs;
        let resolver = PathResolver::new(&fs, SearchLocations::default());
        GraphBuilder::new(resolver, extractor).build(Path::new("/app/main.exe"))
    }

    #[test]
    fn test_cycle_terminates_with_mutual_references() {
        let extractor = Scripted::default()
            .with("main.exe", &["a.dll"])
            .with("a.dll", &["b.dll"])
            .with("b.dll", &["a.dll"]);
        let graph = build(&extractor);
        assert_eq!(graph.len(), 3);

        let a = graph.registry().lookup("a.dll").unwrap();
        let b = graph.registry().lookup("b.dll").unwrap();
        assert_eq!(graph.node(a).dependencies, vec![b]);
        assert_eq!(graph.node(b).dependencies, vec![a]);
    }

    #[test]
    fn test_diamond_shares_one_node() {
        let extractor = Scripted::default()
            .with("main.exe", &["left.dll", "right.dll"])
            .with("left.dll", &["base.dll"])
            .with("right.dll", &["base.dll"])
            .with("base.dll", &[]);
        let graph = build(&extractor);
        assert_eq!(graph.len(), 4);

        let base = graph.registry().lookup("base.dll").unwrap();
        let left = graph.lookup("left.dll").unwrap();
        let right = graph.lookup("right.dll").unwrap();
        assert_eq!(left.dependencies, vec![base]);
        assert_eq!(right.dependencies, vec![base]);
    }

    #[test]
    fn test_missing_module_is_leaf() {
        let extractor = Scripted::default().with("main.exe", &["gone.dll"]);
        let graph = build(&extractor);
        let gone = graph.lookup("gone.dll").unwrap();
        assert_eq!(gone.provenance, Provenance::Missing);
        assert!(gone.dependencies.is_empty());
        assert!(gone.is_valid);
        assert_eq!(gone.resolved_path, PathBuf::from("gone.dll"));
    }

    #[test]
    fn test_unparsable_module_is_invalid_leaf() {
        let extractor = Scripted::default().with("main.exe", &["broken.dll"]);
        let graph = build(&extractor);
        let broken = graph.lookup("broken.dll").unwrap();
        assert!(!broken.is_valid);
        assert!(broken.dependencies.is_empty());
        assert!(graph.root_node().is_valid);
        assert!(graph.root_node().is_stripped);
    }

    #[test]
    fn test_imports_are_sorted() {
        let extractor = Scripted::default()
            .with("main.exe", &["zeta.dll", "alpha.dll", "mid.dll"])
            .with("zeta.dll", &[])
            .with("alpha.dll", &[])
            .with("mid.dll", &[]);
        let graph = build(&extractor);
        let names: Vec<_> = graph
            .dependencies(graph.root())
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(names, vec!["alpha.dll", "mid.dll", "zeta.dll"]);
    }

    #[test]
    fn test_expand_is_idempotent() {
        let extractor = Scripted::default()
            .with("main.exe", &["a.dll"])
            .with("a.dll", &[]);
        let fs = AppDirFs;
        let resolver = PathResolver::new(&fs, SearchLocations::default());
        let builder = GraphBuilder::new(resolver, &extractor);
        let graph = builder.build(Path::new("/app/main.exe"));
        let root = graph.root();

        let DependencyGraph { mut registry, .. } = graph;
        builder.expand(&mut registry, root);
        assert_eq!(registry.get(root).dependencies.len(), 1);
    }
}

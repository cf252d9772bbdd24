//! Dependency graph nodes

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::fs::parent_dir;

/// Index of a node inside its owning [`ModuleRegistry`](super::ModuleRegistry)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Where a module's file was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Beside the requesting binary or on the generic search path
    Bundled,
    /// In a privileged platform directory
    Platform,
    /// Not found anywhere
    Missing,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Bundled => write!(f, "bundled"),
            Provenance::Platform => write!(f, "platform"),
            Provenance::Missing => write!(f, "missing"),
        }
    }
}

/// One resolved (or unresolved) module and its direct dependencies
#[derive(Debug, Clone)]
pub struct DependencyNode {
    /// Module name, unique within one resolution run
    pub name: String,
    /// Resolved file, or the requested name when missing
    pub resolved_path: PathBuf,
    pub provenance: Provenance,
    /// False when the located file could not be parsed
    pub is_valid: bool,
    /// True when debug info, line numbers and local symbols are all stripped
    pub is_stripped: bool,
    /// Non-owning references into the same registry, in import order
    pub dependencies: Vec<NodeId>,
    pub(crate) expanded: bool,
}

impl DependencyNode {
    pub fn new(name: impl Into<String>, resolved_path: PathBuf, provenance: Provenance) -> Self {
        Self {
            name: name.into(),
            resolved_path,
            provenance,
            is_valid: true,
            is_stripped: false,
            dependencies: Vec::new(),
            expanded: false,
        }
    }

    /// Directory imports of this module are resolved against
    pub fn directory(&self) -> PathBuf {
        parent_dir(&self.resolved_path)
    }

    /// File name of the resolved path, falling back to the module name
    pub fn file_name(&self) -> String {
        self.resolved_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.name.clone())
    }

    pub fn path(&self) -> &Path {
        &self.resolved_path
    }

    pub fn is_missing(&self) -> bool {
        self.provenance == Provenance::Missing
    }

    pub fn is_platform(&self) -> bool {
        self.provenance == Provenance::Platform
    }

    pub fn is_bundled(&self) -> bool {
        self.provenance == Provenance::Bundled
    }

    /// Whether the builder has populated this node's dependencies
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Human-readable label used by the text reports
    pub fn label(&self, full_paths: bool) -> String {
        let mut label = match self.provenance {
            Provenance::Missing => return format!("{} (MISSING)", self.name),
            Provenance::Bundled if !self.is_valid => format!("{} (INVALID!)", self.file_name()),
            Provenance::Bundled => self.file_name(),
            Provenance::Platform if !self.is_valid => {
                format!("{} (SYSTEM) (INVALID!)", self.file_name())
            }
            Provenance::Platform => format!("{} (SYSTEM)", self.file_name()),
        };
        if full_paths {
            label.push_str(&format!(" ({})", self.resolved_path.display()));
        }
        label
    }
}

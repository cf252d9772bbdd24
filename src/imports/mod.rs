//! Import-table extraction
//!
//! Given a file path, produce the set of module names it imports and whether its
//! debug information has been stripped.

pub mod binary;

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::Result;

pub use binary::BinaryImportExtractor;

/// Which kinds of debug metadata have been removed from a binary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StripFlags {
    pub debug_info: bool,
    pub line_numbers: bool,
    pub local_symbols: bool,
}

impl StripFlags {
    /// All three kinds stripped
    pub const ALL: StripFlags = StripFlags {
        debug_info: true,
        line_numbers: true,
        local_symbols: true,
    };

    /// A binary counts as stripped only when nothing is left to strip
    pub fn is_fully_stripped(&self) -> bool {
        self.debug_info && self.line_numbers && self.local_symbols
    }
}

/// Imports and strip state extracted from one binary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportInfo {
    /// Imported module names, deduplicated and sorted
    pub modules: BTreeSet<String>,
    pub strip: StripFlags,
}

impl ImportInfo {
    pub fn new<I, S>(modules: I, strip: StripFlags) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            modules: modules.into_iter().map(Into::into).collect(),
            strip,
        }
    }
}

/// Source of import tables for the graph builder
pub trait ImportExtractor {
    /// Parse the binary at `path`.
    ///
    /// Fails for unreadable, corrupt or unsupported files.
    fn extract(&self, path: &Path) -> Result<ImportInfo>;
}

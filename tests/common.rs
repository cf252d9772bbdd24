//! Shared fixtures for integration tests
//!
//! `MemoryFs` stands in for the disk and `ScriptedExtractor` for the binary
//! parser, so graphs of any shape can be built without real executables.

#![allow(dead_code)]

use depwalk::error::{DepsError, Result};
use depwalk::fs::FileSystem;
use depwalk::imports::{ImportExtractor, ImportInfo, StripFlags};
use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// In-memory filesystem: a set of files with sizes
#[derive(Default)]
pub struct MemoryFs {
    files: HashMap<PathBuf, u64>,
    unsized_files: Vec<PathBuf>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, path: &str, size: u64) -> Self {
        self.files.insert(PathBuf::from(path), size);
        self
    }

    /// A file that exists but whose size query fails
    pub fn unsized_file(mut self, path: &str) -> Self {
        self.files.insert(PathBuf::from(path), 0);
        self.unsized_files.push(PathBuf::from(path));
        self
    }
}

impl FileSystem for MemoryFs {
    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn file_size(&self, path: &Path) -> io::Result<u64> {
        if self.unsized_files.iter().any(|p| p == path) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "locked"));
        }
        self.files
            .get(path)
            .copied()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }

    fn normalize_file_name(&self, path: &Path) -> io::Result<PathBuf> {
        Ok(path.to_path_buf())
    }

    fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }

    fn copy_file(&self, _from: &Path, _to: &Path, _overwrite: bool) -> io::Result<u64> {
        Err(io::Error::new(io::ErrorKind::Unsupported, "read-only fixture"))
    }
}

/// Import tables scripted per file name; unscripted files fail to parse
#[derive(Default)]
pub struct ScriptedExtractor {
    modules: HashMap<String, ImportInfo>,
    calls: RefCell<HashMap<String, usize>>,
}

impl ScriptedExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fully stripped module importing `imports`
    pub fn module(self, file: &str, imports: &[&str]) -> Self {
        self.with_strip(file, imports, StripFlags::ALL)
    }

    /// A module that still carries debug information
    pub fn unstripped(self, file: &str, imports: &[&str]) -> Self {
        self.with_strip(file, imports, StripFlags::default())
    }

    pub fn with_strip(mut self, file: &str, imports: &[&str], strip: StripFlags) -> Self {
        self.modules.insert(
            file.to_string(),
            ImportInfo::new(imports.iter().copied(), strip),
        );
        self
    }

    /// How many times the file was parsed
    pub fn calls(&self, file: &str) -> usize {
        self.calls.borrow().get(file).copied().unwrap_or(0)
    }
}

impl ImportExtractor for ScriptedExtractor {
    fn extract(&self, path: &Path) -> Result<ImportInfo> {
        let file = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        *self.calls.borrow_mut().entry(file.clone()).or_insert(0) += 1;
        self.modules
            .get(&file)
            .cloned()
            .ok_or_else(|| DepsError::Parse {
                path: path.to_path_buf(),
                message: "not a scripted binary".to_string(),
            })
    }
}

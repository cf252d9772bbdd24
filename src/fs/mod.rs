//! Filesystem collaborator
//!
//! Everything the resolver and reporters need from the disk goes through the
//! [`FileSystem`] trait so graphs can be built against in-memory fixtures.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Filesystem operations used by resolution and reporting
pub trait FileSystem {
    /// Whether `path` names an existing regular file
    fn is_file(&self, path: &Path) -> bool;

    /// Size of the file at `path` in bytes
    fn file_size(&self, path: &Path) -> io::Result<u64>;

    /// Rewrite the file name segment of an existing `path` to its on-disk casing.
    ///
    /// The directory segment is returned exactly as given.
    fn normalize_file_name(&self, path: &Path) -> io::Result<PathBuf>;

    /// Create `path` and all missing parents; existing directories are fine
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Copy `from` to `to`, failing with `AlreadyExists` unless `overwrite`
    fn copy_file(&self, from: &Path, to: &Path, overwrite: bool) -> io::Result<u64>;

    /// Whether two directory paths refer to the same location
    fn same_directory(&self, a: &Path, b: &Path) -> bool {
        a == b
    }
}

/// [`FileSystem`] backed by `std::fs`
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        Self
    }
}

/// Directory part of `path`, `.` when the path is a bare file name
pub fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

impl FileSystem for LocalFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn file_size(&self, path: &Path) -> io::Result<u64> {
        fs::metadata(path).map(|m| m.len())
    }

    fn normalize_file_name(&self, path: &Path) -> io::Result<PathBuf> {
        let name = path
            .file_name()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
        let dir = parent_dir(path);

        let mut folded = None;
        for entry in fs::read_dir(&dir)? {
            let entry_name = entry?.file_name();
            if entry_name == name {
                return Ok(path.to_path_buf());
            }
            if folded.is_none() && eq_ignore_case(&entry_name, name) {
                folded = Some(entry_name);
            }
        }

        match folded {
            Some(on_disk) => {
                debug!("Normalized {:?} to on-disk name {:?}", name, on_disk);
                Ok(match path.parent() {
                    Some(parent) => parent.join(on_disk),
                    None => PathBuf::from(on_disk),
                })
            }
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{:?} not found in {:?}", name, dir),
            )),
        }
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn copy_file(&self, from: &Path, to: &Path, overwrite: bool) -> io::Result<u64> {
        if overwrite {
            return fs::copy(from, to);
        }
        let mut source = fs::File::open(from)?;
        let permissions = source.metadata()?.permissions();
        let mut dest = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(to)?;

        // The destination is ours from here on; never leave a partial file behind
        let copied = io::copy(&mut source, &mut dest)
            .and_then(|bytes| dest.set_permissions(permissions).map(|_| bytes));
        if copied.is_err() {
            drop(dest);
            if let Err(e) = fs::remove_file(to) {
                debug!("Failed to remove partial copy {:?}: {}", to, e);
            }
        }
        copied
    }

    fn same_directory(&self, a: &Path, b: &Path) -> bool {
        match (fs::canonicalize(a), fs::canonicalize(b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => a == b,
        }
    }
}

fn eq_ignore_case(a: &std::ffi::OsStr, b: &std::ffi::OsStr) -> bool {
    match (a.to_str(), b.to_str()) {
        (Some(a), Some(b)) => a.to_lowercase() == b.to_lowercase(),
        _ => false,
    }
}

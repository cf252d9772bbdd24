//! Copy bundled dependencies next to each other
//!
//! Gathers every bundled module into one directory so the result can be shipped
//! without relying on the search path. Per-file failures are collected and the
//! export carries on; only failing to create the target directory is fatal.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::DepsError;
use crate::fs::FileSystem;
use crate::graph::{walk, DependencyGraph};

/// Copy behaviour switches
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyOptions {
    /// Replace files already present in the target directory
    pub overwrite: bool,
    /// Copy the root binary as well
    pub include_root: bool,
}

/// A single file that could not be copied
#[derive(Debug)]
pub struct CopyFailure {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub error: DepsError,
}

/// Outcome of one export
#[derive(Debug, Default)]
pub struct CopyReport {
    /// Destination paths written
    pub copied: Vec<PathBuf>,
    /// Sources already living in the target directory
    pub skipped: Vec<PathBuf>,
    pub failures: Vec<CopyFailure>,
}

impl CopyReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Copy every bundled module reachable from the root into `target`
pub fn copy_dependencies(
    graph: &DependencyGraph,
    fs: &dyn FileSystem,
    target: &Path,
    options: CopyOptions,
) -> Result<CopyReport, DepsError> {
    fs.create_dir_all(target)
        .map_err(|e| DepsError::io(target, e))?;

    let mut report = CopyReport::default();
    walk(
        graph,
        options.include_root,
        |node, was_visited, _| {
            if was_visited || !node.is_bundled() {
                return;
            }
            let source = node.path().to_path_buf();
            if fs.same_directory(&node.directory(), target) {
                debug!("{:?} already in {:?}, skipping", source, target);
                report.skipped.push(source);
                return;
            }

            let destination = target.join(node.file_name());
            match fs.copy_file(&source, &destination, options.overwrite) {
                Ok(bytes) => {
                    debug!("Copied {:?} to {:?} ({} bytes)", source, destination, bytes);
                    report.copied.push(destination);
                }
                Err(e) => {
                    debug!("Failed to copy {:?} to {:?}: {}", source, destination, e);
                    report.failures.push(CopyFailure {
                        error: DepsError::io(&destination, e),
                        source,
                        destination,
                    });
                }
            }
        },
        None,
    );

    info!(
        "Copied {} files to {:?} ({} skipped, {} failed)",
        report.copied.len(),
        target,
        report.skipped.len(),
        report.failures.len()
    );
    Ok(report)
}

//! Aggregate size report

use std::io::{self, Write};

use crate::fs::FileSystem;
use crate::graph::{walk, DependencyGraph, DependencyNode};
use crate::utils::result_to_option;

/// Size lookup outcome for one module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeStatus {
    Bytes(u64),
    /// The size query failed
    Error,
    /// The module was never found
    Missing,
}

/// One row of the size report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeEntry {
    pub file_name: String,
    pub level: usize,
    pub size: SizeStatus,
    /// Parsed, non-platform and not fully stripped
    pub unstripped: bool,
}

/// Per-module sizes plus their total
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizeReport {
    pub entries: Vec<SizeEntry>,
    pub total: u64,
    pub any_unstripped: bool,
}

/// Format a byte count as `B`, `kB` or `MB` (1024 based, two decimals above bytes)
pub fn format_file_size(size: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;
    if size < KIB {
        format!("{}B", size)
    } else if size < MIB {
        format!("{:.2}kB", size as f64 / KIB as f64)
    } else {
        format!("{:.2}MB", size as f64 / MIB as f64)
    }
}

/// Only parsed modules can be judged: missing and invalid nodes never get the
/// `*` marker, and neither do platform modules, which are not ours to strip.
fn counts_as_unstripped(node: &DependencyNode) -> bool {
    !node.is_platform() && !node.is_missing() && node.is_valid && !node.is_stripped
}

/// Walk the graph once and size every first-visited module.
///
/// Platform modules are left out unless `include_platform` is set. A row is
/// flagged unstripped only for a valid, non-platform module that still carries
/// debug, line-number or local-symbol information.
pub fn aggregate_sizes(
    graph: &DependencyGraph,
    fs: &dyn FileSystem,
    include_platform: bool,
) -> SizeReport {
    let mut report = SizeReport::default();
    walk(
        graph,
        true,
        |node, was_visited, level| {
            if was_visited || (node.is_platform() && !include_platform) {
                return;
            }

            let size = if node.is_missing() {
                SizeStatus::Missing
            } else {
                let context = format!("Failed to get size of {:?}", node.path());
                match result_to_option(fs.file_size(node.path()), &context) {
                    Some(bytes) => {
                        report.total += bytes;
                        SizeStatus::Bytes(bytes)
                    }
                    None => SizeStatus::Error,
                }
            };

            let unstripped = counts_as_unstripped(node);
            report.any_unstripped |= unstripped;
            report.entries.push(SizeEntry {
                file_name: node.file_name(),
                level,
                size,
                unstripped,
            });
        },
        None,
    );
    report
}

impl SizeReport {
    /// Write the report in its text form
    pub fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        for entry in &self.entries {
            let indent = if entry.level > 0 { "    " } else { "" };
            let size = match entry.size {
                SizeStatus::Bytes(bytes) => format_file_size(bytes),
                SizeStatus::Error => "ERROR".to_string(),
                SizeStatus::Missing => "MISSING".to_string(),
            };
            let marker = if entry.unstripped { "*" } else { "" };
            writeln!(out, "{}{} ({}){}", indent, entry.file_name, size, marker)?;
        }
        writeln!(out)?;
        writeln!(out, "Total: {}", format_file_size(self.total))?;
        if self.any_unstripped {
            writeln!(out, "Files marked with * can be further stripped.")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size_units() {
        assert_eq!(format_file_size(0), "0B");
        assert_eq!(format_file_size(512), "512B");
        assert_eq!(format_file_size(1023), "1023B");
        assert_eq!(format_file_size(2048), "2.00kB");
        assert_eq!(format_file_size(1536 * 1024), "1.50MB");
    }

    #[test]
    fn test_render_marks_unstripped_rows() {
        let report = SizeReport {
            entries: vec![
                SizeEntry {
                    file_name: "app.exe".to_string(),
                    level: 0,
                    size: SizeStatus::Bytes(512),
                    unstripped: true,
                },
                SizeEntry {
                    file_name: "gone.dll".to_string(),
                    level: 1,
                    size: SizeStatus::Missing,
                    unstripped: false,
                },
                SizeEntry {
                    file_name: "locked.dll".to_string(),
                    level: 1,
                    size: SizeStatus::Error,
                    unstripped: false,
                },
            ],
            total: 512,
            any_unstripped: true,
        };
        let mut out = Vec::new();
        report.render(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "app.exe (512B)*\n    gone.dll (MISSING)\n    locked.dll (ERROR)\n\nTotal: 512B\nFiles marked with * can be further stripped.\n"
        );
    }
}

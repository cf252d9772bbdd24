//! Reports over a built dependency graph
//!
//! Every reporter is a thin consumer of [`walk`](crate::graph::walk): the tree and
//! flat listings, the size aggregator, the copy exporter and the JSON dump.

pub mod copy;
pub mod json;
pub mod size;
pub mod tree;

pub use copy::{copy_dependencies, CopyFailure, CopyOptions, CopyReport};
pub use json::{render_json, to_json_graph, JsonGraph, JsonModule};
pub use size::{aggregate_sizes, format_file_size, SizeEntry, SizeReport, SizeStatus};
pub use tree::{flat_lines, render_flat, render_tree, tree_lines, RenderOptions};

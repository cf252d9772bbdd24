//! depwalk - show and collect the dynamic library dependencies of a binary
//!
//! Usage:
//!   depwalk <file> [--report tree|flat|size|json] [--system] [--full-paths]
//!   depwalk <file> --copy <dir> [--force] [--all]

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};

use depwalk::fs::LocalFileSystem;
use depwalk::imports::BinaryImportExtractor;
use depwalk::report::{
    aggregate_sizes, copy_dependencies, render_flat, render_json, render_tree, CopyOptions,
    RenderOptions,
};
use depwalk::utils::init_logging_from_config;
use depwalk::{DepsConfig, GraphBuilder, PathResolver, SearchLocations};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportKind {
    /// Indented dependency tree
    Tree,
    /// Every module once
    Flat,
    /// Per-file sizes and total
    Size,
    /// Whole graph as JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "depwalk", version)]
#[command(about = "Show and collect the dynamic library dependencies of a binary")]
struct Args {
    /// The exe/dll/so file for which to show dependencies
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Report to print
    #[arg(short, long, value_enum, default_value_t = ReportKind::Size)]
    report: ReportKind,

    /// Include platform (system) libraries in the report
    #[arg(long)]
    system: bool,

    /// Also resolve the imports of platform libraries
    #[arg(long)]
    recurse_system: bool,

    /// Show the resolved path of every module
    #[arg(long)]
    full_paths: bool,

    /// Copy all bundled dependencies to this directory
    #[arg(long, value_name = "DIR")]
    copy: Option<PathBuf>,

    /// When used with --copy, overwrite existing files
    #[arg(long, requires = "copy")]
    force: bool,

    /// When used with --copy, also include the input file
    #[arg(long, requires = "copy")]
    all: bool,

    /// Configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "depwalk::graph=trace" (RUST_LOG wins)
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version are not failures
            let code = if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
            let _ = e.print();
            return code;
        }
    };

    let config = match &args.config {
        Some(path) => match DepsConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("error: {:#}", e);
                return ExitCode::from(1);
            }
        },
        None => DepsConfig::default(),
    };

    init_logging_from_config(config.logging.as_ref(), args.log_level.as_deref());

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run(args: &Args, config: &DepsConfig) -> anyhow::Result<()> {
    if !args.input.is_file() {
        anyhow::bail!("input file {:?} does not exist", args.input);
    }

    let fs = LocalFileSystem::new();
    let extractor = BinaryImportExtractor::new();
    let resolver = PathResolver::new(&fs, SearchLocations::from_config(&config.resolver));
    let graph = GraphBuilder::new(resolver, &extractor)
        .recurse_into_platform(args.recurse_system || config.resolver.recurse_into_platform)
        .build(&args.input);
    debug!("Graph holds {} modules", graph.len());

    let options = RenderOptions {
        include_platform: args.system,
        full_paths: args.full_paths,
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.report {
        ReportKind::Tree => render_tree(&graph, options, &mut out)?,
        ReportKind::Flat => render_flat(&graph, options, &mut out)?,
        ReportKind::Size => aggregate_sizes(&graph, &fs, args.system).render(&mut out)?,
        ReportKind::Json => render_json(&graph, args.system, &mut out)?,
    }
    out.flush()?;

    if let Some(target) = &args.copy {
        let copy_options = CopyOptions {
            overwrite: args.force,
            include_root: args.all,
        };
        let report = copy_dependencies(&graph, &fs, target, copy_options)
            .with_context(|| format!("Failed to prepare copy target {:?}", target))?;
        for failure in &report.failures {
            eprintln!(
                "Failed to copy {} to {}: {}",
                failure.source.display(),
                failure.destination.display(),
                failure.error
            );
        }
    }

    Ok(())
}

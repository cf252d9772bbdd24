//! Module path resolution
//!
//! Reproduces the loader search order: the requesting binary's directory, the
//! platform system directory, the platform installation directory, then each
//! entry of the search-path environment variable.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::ResolverConfig;
use crate::fs::FileSystem;
use crate::graph::Provenance;
use crate::utils::env::{env_opt, split_search_path};
use crate::utils::error::with_fallback;

/// Environment variable holding the generic library search path
#[cfg(windows)]
pub const DEFAULT_SEARCH_PATH_VAR: &str = "PATH";
#[cfg(not(windows))]
pub const DEFAULT_SEARCH_PATH_VAR: &str = "LD_LIBRARY_PATH";

/// Where a module name resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModule {
    /// Concrete file path, or the bare module name when missing
    pub path: PathBuf,
    pub provenance: Provenance,
}

impl ResolvedModule {
    pub fn missing(name: &str) -> Self {
        Self {
            path: PathBuf::from(name),
            provenance: Provenance::Missing,
        }
    }
}

/// The fixed set of directories searched after the requesting directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchLocations {
    /// Privileged platform directory (e.g. `System32`)
    pub system_dir: Option<PathBuf>,
    /// Primary platform installation directory (e.g. `C:\Windows`)
    pub primary_dir: Option<PathBuf>,
    /// Generic search path, searched in order
    pub search_path: Vec<PathBuf>,
}

impl SearchLocations {
    /// Host defaults with the search path read from `DEFAULT_SEARCH_PATH_VAR`
    pub fn from_env() -> Self {
        Self::from_config(&ResolverConfig::default())
    }

    /// Build search locations from configuration, reading the search-path variable once
    pub fn from_config(config: &ResolverConfig) -> Self {
        let (default_system, default_primary) = platform_dirs();
        let system_dir = config
            .system_dir
            .as_ref()
            .map(PathBuf::from)
            .or(default_system);
        let primary_dir = config
            .primary_dir
            .as_ref()
            .map(PathBuf::from)
            .or(default_primary);

        let var = config
            .search_path_var
            .as_deref()
            .unwrap_or(DEFAULT_SEARCH_PATH_VAR);
        let mut search_path = env_opt(var)
            .map(|value| split_search_path(&value, SEARCH_PATH_SEPARATOR))
            .unwrap_or_default();
        search_path.extend(config.extra_search_dirs.iter().map(PathBuf::from));

        debug!(
            "Search locations: system={:?} primary={:?} {}={} entries",
            system_dir,
            primary_dir,
            var,
            search_path.len()
        );

        Self {
            system_dir,
            primary_dir,
            search_path,
        }
    }
}

#[cfg(windows)]
const SEARCH_PATH_SEPARATOR: char = ';';
#[cfg(not(windows))]
const SEARCH_PATH_SEPARATOR: char = ':';

#[cfg(windows)]
fn platform_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    let root = env_opt("SystemRoot")
        .or_else(|| env_opt("windir"))
        .unwrap_or_else(|| "C:\\Windows".to_string());
    let root = PathBuf::from(root);
    (Some(root.join("System32")), Some(root))
}

#[cfg(not(windows))]
fn platform_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    unix_platform_dirs(std::env::consts::ARCH, |dir| dir.is_dir())
}

/// Debian-style multiarch triple for a Rust `ARCH` value
#[cfg_attr(windows, allow(dead_code))]
fn multiarch_triple(arch: &str) -> String {
    match arch {
        "x86" => "i386-linux-gnu".to_string(),
        "arm" => "arm-linux-gnueabihf".to_string(),
        "powerpc64" => "powerpc64le-linux-gnu".to_string(),
        other => format!("{}-linux-gnu", other),
    }
}

/// System and primary library directories: the first existing of the multiarch,
/// `lib64` and plain `lib` directories under `/` and `/usr` respectively
#[cfg_attr(windows, allow(dead_code))]
fn unix_platform_dirs<F>(arch: &str, exists: F) -> (Option<PathBuf>, Option<PathBuf>)
where
    F: Fn(&Path) -> bool,
{
    let triple = multiarch_triple(arch);
    let pick = |prefix: &str| {
        let candidates = [
            PathBuf::from(format!("{}/lib/{}", prefix, triple)),
            PathBuf::from(format!("{}/lib64", prefix)),
            PathBuf::from(format!("{}/lib", prefix)),
        ];
        let fallback = candidates[2].clone();
        candidates
            .into_iter()
            .find(|dir| exists(dir.as_path()))
            .unwrap_or(fallback)
    };
    (Some(pick("")), Some(pick("/usr")))
}

/// Resolves module names to files using [`SearchLocations`]
pub struct PathResolver<'fs> {
    fs: &'fs dyn FileSystem,
    locations: SearchLocations,
}

impl<'fs> PathResolver<'fs> {
    pub fn new(fs: &'fs dyn FileSystem, locations: SearchLocations) -> Self {
        Self { fs, locations }
    }

    /// Resolve `module_name` as requested by a binary living in `requesting_dir`.
    ///
    /// Names that carry a directory (Mach-O install names, absolute `DT_NEEDED`
    /// entries) are checked as given and never joined onto a search directory.
    pub fn resolve(&self, requesting_dir: &Path, module_name: &str) -> ResolvedModule {
        let as_path = Path::new(module_name);
        if as_path.has_root() || as_path.components().count() > 1 {
            return self.resolve_as_path(as_path, module_name);
        }

        let platform = [
            self.locations.system_dir.as_deref(),
            self.locations.primary_dir.as_deref(),
        ];

        let candidates = std::iter::once((requesting_dir, Provenance::Bundled))
            .chain(
                platform
                    .into_iter()
                    .flatten()
                    .map(|dir| (dir, Provenance::Platform)),
            )
            .chain(
                self.locations
                    .search_path
                    .iter()
                    .map(|dir| (dir.as_path(), Provenance::Bundled)),
            );

        for (dir, provenance) in candidates {
            let candidate = dir.join(module_name);
            if self.fs.is_file(&candidate) {
                debug!("Resolved {} to {:?} ({:?})", module_name, candidate, provenance);
                return ResolvedModule {
                    path: self.normalize(candidate),
                    provenance,
                };
            }
        }

        debug!("Could not resolve {}", module_name);
        ResolvedModule::missing(module_name)
    }

    /// A name with a directory part: platform if it lives under a platform directory
    fn resolve_as_path(&self, path: &Path, module_name: &str) -> ResolvedModule {
        if !self.fs.is_file(path) {
            debug!("Could not resolve {}", module_name);
            return ResolvedModule::missing(module_name);
        }
        let in_platform_dir = [
            self.locations.system_dir.as_deref(),
            self.locations.primary_dir.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|dir| path.starts_with(dir));
        let provenance = if in_platform_dir {
            Provenance::Platform
        } else {
            Provenance::Bundled
        };
        debug!("Resolved {} as given ({:?})", module_name, provenance);
        ResolvedModule {
            path: self.normalize(path.to_path_buf()),
            provenance,
        }
    }

    fn normalize(&self, path: PathBuf) -> PathBuf {
        with_fallback(
            || self.fs.normalize_file_name(&path),
            || {
                warn!("Keeping unnormalized path {:?}", path);
                path.clone()
            },
            "Failed to normalize file name case",
        )
    }
}

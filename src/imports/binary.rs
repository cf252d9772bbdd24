//! Import extraction for PE, ELF and Mach-O images via `goblin`

use std::path::Path;

use goblin::elf::Elf;
use goblin::mach::{Mach, MachO};
use goblin::pe::PE;
use goblin::Object;
use tracing::debug;

use super::{ImportExtractor, ImportInfo, StripFlags};
use crate::error::{DepsError, Result};

// COFF file header characteristics
const IMAGE_FILE_LINE_NUMS_STRIPPED: u16 = 0x0004;
const IMAGE_FILE_LOCAL_SYMS_STRIPPED: u16 = 0x0008;
const IMAGE_FILE_DEBUG_STRIPPED: u16 = 0x0200;

/// [`ImportExtractor`] that reads the file from disk and parses it with goblin
#[derive(Debug, Default, Clone, Copy)]
pub struct BinaryImportExtractor;

impl BinaryImportExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract imports from an in-memory image
    pub fn extract_bytes(&self, path: &Path, bytes: &[u8]) -> Result<ImportInfo> {
        let object = Object::parse(bytes).map_err(|e| DepsError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let info = match object {
            Object::PE(pe) => pe_imports(&pe),
            Object::Elf(elf) => elf_imports(&elf),
            Object::Mach(Mach::Binary(macho)) => macho_imports(&macho),
            Object::Mach(Mach::Fat(_)) => {
                return Err(DepsError::UnsupportedFormat {
                    path: path.to_path_buf(),
                    format: "fat Mach-O".to_string(),
                })
            }
            Object::Archive(_) => {
                return Err(DepsError::UnsupportedFormat {
                    path: path.to_path_buf(),
                    format: "archive".to_string(),
                })
            }
            _ => {
                return Err(DepsError::UnsupportedFormat {
                    path: path.to_path_buf(),
                    format: "unknown".to_string(),
                })
            }
        };

        debug!(
            "Extracted {} imports from {:?} (stripped: {:?})",
            info.modules.len(),
            path,
            info.strip
        );
        Ok(info)
    }
}

impl ImportExtractor for BinaryImportExtractor {
    fn extract(&self, path: &Path) -> Result<ImportInfo> {
        let bytes = std::fs::read(path).map_err(|e| DepsError::io(path, e))?;
        self.extract_bytes(path, &bytes)
    }
}

fn pe_imports(pe: &PE) -> ImportInfo {
    let c = pe.header.coff_header.characteristics;
    let strip = StripFlags {
        debug_info: c & IMAGE_FILE_DEBUG_STRIPPED != 0,
        line_numbers: c & IMAGE_FILE_LINE_NUMS_STRIPPED != 0,
        local_symbols: c & IMAGE_FILE_LOCAL_SYMS_STRIPPED != 0,
    };
    ImportInfo::new(pe.libraries.iter().copied(), strip)
}

fn elf_imports(elf: &Elf) -> ImportInfo {
    let has_section = |wanted: &[&str]| {
        elf.section_headers.iter().any(|sh| {
            elf.shdr_strtab
                .get_at(sh.sh_name)
                .map(|name| wanted.contains(&name))
                .unwrap_or(false)
        })
    };
    let strip = StripFlags {
        debug_info: !has_section(&[".debug_info", ".zdebug_info"]),
        line_numbers: !has_section(&[".debug_line", ".zdebug_line"]),
        local_symbols: elf.syms.len() == 0,
    };
    ImportInfo::new(elf.libraries.iter().copied(), strip)
}

fn macho_imports(macho: &MachO) -> ImportInfo {
    let has_dwarf = macho
        .segments
        .iter()
        .any(|seg| seg.name().map(|n| n == "__DWARF").unwrap_or(false));
    let strip = StripFlags {
        debug_info: !has_dwarf,
        line_numbers: !has_dwarf,
        local_symbols: macho.symbols.is_none(),
    };
    // libs[0] is the "self" placeholder goblin inserts for the image itself
    ImportInfo::new(
        macho.libs.iter().copied().filter(|lib| *lib != "self"),
        strip,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_garbage_is_rejected() {
        let extractor = BinaryImportExtractor::new();
        let result = extractor.extract_bytes(Path::new("junk.dll"), b"definitely not a binary");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let extractor = BinaryImportExtractor::new();
        let err = extractor.extract(&dir.path().join("absent.dll")).unwrap_err();
        assert!(matches!(err, DepsError::Io { .. }));
    }

    #[test]
    fn test_current_executable_parses() {
        // The test harness itself is a native image in the host format
        let exe = std::env::current_exe().unwrap();
        let extractor = BinaryImportExtractor::new();
        assert!(extractor.extract(&exe).is_ok());
    }
}

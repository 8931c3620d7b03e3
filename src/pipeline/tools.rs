//! Startup check for the external poppler tools.
//!
//! A missing tool is only worth a warning here: a missing `pdfinfo` means
//! every file uses the fallback scale, and a missing `pdftoppm` surfaces as
//! a per-file error for each PDF.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Availability of one external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolStatus {
    /// Name or path as configured.
    pub program: PathBuf,
    /// Where it was found, if anywhere.
    pub resolved: Option<PathBuf>,
}

impl ToolStatus {
    pub fn is_available(&self) -> bool {
        self.resolved.is_some()
    }
}

/// Locate `program` the way a shell would.
///
/// A value containing a path separator is checked as-is; a bare name is
/// searched in every `PATH` entry (with `.exe` appended on Windows).
pub fn find_program(program: &Path) -> Option<PathBuf> {
    if program.components().count() > 1 || program.is_absolute() {
        return program.is_file().then(|| program.to_path_buf());
    }
    let path_var = std::env::var_os("PATH")?;
    find_in_path(program, &path_var)
}

fn find_in_path(program: &Path, path_var: &OsString) -> Option<PathBuf> {
    std::env::split_paths(path_var).find_map(|dir| {
        let candidate = dir.join(program);
        if candidate.is_file() {
            return Some(candidate);
        }
        if cfg!(windows) {
            let exe = candidate.with_extension("exe");
            if exe.is_file() {
                return Some(exe);
            }
        }
        None
    })
}

/// Check every program and warn about the ones that are missing.
pub fn check_tools(programs: &[&Path]) -> Vec<ToolStatus> {
    programs
        .iter()
        .map(|program| {
            let status = ToolStatus {
                program: program.to_path_buf(),
                resolved: find_program(program),
            };
            if !status.is_available() {
                warn!(
                    "{} not found. Install poppler-utils (e.g., sudo apt-get install poppler-utils).",
                    program.display()
                );
            }
            status
        })
        .collect()
}

//! Real system implementation using `std::fs`

use super::{System, WalkEntry};
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// Production implementation of the System trait
///
/// Directly delegates to the standard library's filesystem functions.
/// A zero-cost abstraction with no overhead in production.
#[derive(Debug, Clone, Copy)]
pub struct RealSystem;

impl RealSystem {
    /// Create a new `RealSystem` instance
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for RealSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for RealSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        fs::write(path, contents)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn walk_dir(&self, path: &Path) -> io::Result<Vec<WalkEntry>> {
        let mut entries = Vec::new();
        for entry in WalkDir::new(path).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(io::Error::other)?;
            let file_type = entry.file_type();
            entries.push(WalkEntry {
                path: entry.into_path(),
                is_file: file_type.is_file(),
                is_dir: file_type.is_dir(),
            });
        }
        Ok(entries)
    }
}

//! System abstraction for filesystem operations
//!
//! This module provides a unified trait for the filesystem interactions
//! the engine performs, allowing for easy testing with a mock
//! implementation.

use std::io;
use std::path::{Path, PathBuf};

pub mod mock;
pub mod real;

pub use mock::MockSystem;
pub use real::RealSystem;

/// Entry from directory walking
#[derive(Debug, Clone)]
pub struct WalkEntry {
    pub path: PathBuf,
    pub is_file: bool,
    pub is_dir: bool,
}

/// Unified trait for filesystem operations
///
/// # Implementations
/// - `RealSystem`: Production implementation using `std::fs`
/// - `MockSystem`: Test implementation using in-memory storage
pub trait System: Send + Sync {
    /// Read entire file contents as a string
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write bytes to a file, creating it if it doesn't exist
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Recursively create a directory and all parent directories
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if a path points to a file
    fn is_file(&self, path: &Path) -> bool;

    /// Check if a path points to a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Recursively walk a directory, returning all entries below the root
    ///
    /// Entries are returned in a stable depth-first order, excluding the
    /// root itself.
    fn walk_dir(&self, path: &Path) -> io::Result<Vec<WalkEntry>>;
}

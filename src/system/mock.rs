//! Mock system implementation for testing

use super::{System, WalkEntry};
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// In-memory implementation of the System trait for testing
///
/// `MockSystem` provides an in-memory filesystem for fast, isolated unit
/// tests without side effects.
///
/// # Example
/// ```
/// use vehicle_components::system::{MockSystem, System};
/// use std::path::Path;
///
/// let system = MockSystem::new()
///     .with_file("/vehicle/vehicle_components.json", b"{}")
///     .with_dir("/vehicle/params");
///
/// assert!(system.exists(Path::new("/vehicle/vehicle_components.json")));
/// ```
#[derive(Clone, Default)]
pub struct MockSystem {
    state: Arc<RwLock<MockSystemState>>,
}

#[derive(Default)]
struct MockSystemState {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
    read_only: BTreeSet<PathBuf>,
}

impl MockSystem {
    /// Create a new `MockSystem` with an empty root directory
    #[must_use]
    pub fn new() -> Self {
        let system = Self::default();
        system.lock_write().dirs.insert(PathBuf::from("/"));
        system
    }

    /// Add a file with contents, creating parent directories (builder)
    #[must_use]
    pub fn with_file<P: AsRef<Path>>(self, path: P, contents: &[u8]) -> Self {
        let path = path.as_ref().to_path_buf();
        {
            let mut state = self.lock_write();
            if let Some(parent) = path.parent() {
                Self::insert_dirs(&mut state.dirs, parent);
            }
            state.files.insert(path, contents.to_vec());
        }
        self
    }

    /// Add a directory and its parents (builder)
    #[must_use]
    pub fn with_dir<P: AsRef<Path>>(self, path: P) -> Self {
        {
            let mut state = self.lock_write();
            Self::insert_dirs(&mut state.dirs, path.as_ref());
        }
        self
    }

    /// Mark a path as read-only so writes to it fail with
    /// `PermissionDenied` (builder)
    #[must_use]
    pub fn with_read_only<P: AsRef<Path>>(self, path: P) -> Self {
        self.lock_write()
            .read_only
            .insert(path.as_ref().to_path_buf());
        self
    }

    fn insert_dirs(dirs: &mut BTreeSet<PathBuf>, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            dirs.insert(current.clone());
        }
    }

    fn lock_write(&self) -> std::sync::RwLockWriteGuard<'_, MockSystemState> {
        self.state.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn lock_read(&self) -> std::sync::RwLockReadGuard<'_, MockSystemState> {
        self.state.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl System for MockSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let state = self.lock_read();
        let contents = state.files.get(path).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display()))
        })?;
        String::from_utf8(contents.clone()).map_err(io::Error::other)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let mut state = self.lock_write();
        if state.read_only.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is read-only", path.display()),
            ));
        }
        if state.dirs.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("{} is a directory", path.display()),
            ));
        }
        match path.parent() {
            Some(parent) if state.dirs.contains(parent) => {
                state.files.insert(path.to_path_buf(), contents.to_vec());
                Ok(())
            }
            _ => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("parent directory of {} not found", path.display()),
            )),
        }
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        Self::insert_dirs(&mut self.lock_write().dirs, path);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let state = self.lock_read();
        state.files.contains_key(path) || state.dirs.contains(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.lock_read().files.contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.lock_read().dirs.contains(path)
    }

    fn walk_dir(&self, path: &Path) -> io::Result<Vec<WalkEntry>> {
        let state = self.lock_read();
        if !state.dirs.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            ));
        }

        let mut entries = Vec::new();
        for dir in &state.dirs {
            if dir != path && dir.starts_with(path) {
                entries.push(WalkEntry {
                    path: dir.clone(),
                    is_file: false,
                    is_dir: true,
                });
            }
        }
        for file in state.files.keys() {
            if file.starts_with(path) {
                entries.push(WalkEntry {
                    path: file.clone(),
                    is_file: true,
                    is_dir: false,
                });
            }
        }
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }
}

use std::{
    collections::HashMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::foundation::error::{ClipError, ClipResult};

/// Key/value persistence backend for project records.
///
/// Writes are last-write-wins; no transactional guarantee is expected.
pub trait ProjectStorage {
    /// Read the record stored under `key`; `Ok(None)` when absent.
    fn read(&self, key: &str) -> ClipResult<Option<String>>;
    /// Store `value` under `key`, replacing any previous record.
    fn write(&mut self, key: &str, value: &str) -> ClipResult<()>;
    /// Erase the record under `key`. Erasing an absent key is not an error.
    fn remove(&mut self, key: &str) -> ClipResult<()>;
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: HashMap<String, String>,
    failing: bool,
}

impl MemoryStorage {
    /// Empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage whose every operation fails, for exercising storage-failure paths.
    pub fn failing() -> Self {
        Self {
            records: HashMap::new(),
            failing: true,
        }
    }

    /// Seed a record directly.
    pub fn with_record(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.records.insert(key.into(), value.into());
        self
    }

    /// Borrow the raw record under `key`.
    pub fn record(&self, key: &str) -> Option<&str> {
        self.records.get(key).map(String::as_str)
    }

    fn check(&self, op: &str, key: &str) -> ClipResult<()> {
        if self.failing {
            return Err(ClipError::storage(format!("{op} '{key}' refused")));
        }
        Ok(())
    }
}

impl ProjectStorage for MemoryStorage {
    fn read(&self, key: &str) -> ClipResult<Option<String>> {
        self.check("read", key)?;
        Ok(self.records.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> ClipResult<()> {
        self.check("write", key)?;
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> ClipResult<()> {
        self.check("remove", key)?;
        self.records.remove(key);
        Ok(())
    }
}

/// Directory-backed storage: one JSON file per key.
#[derive(Clone, Debug)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    /// Records under directory `root`, created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the records.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", escape_key(key)))
    }
}

impl ProjectStorage for FsStorage {
    fn read(&self, key: &str) -> ClipResult<Option<String>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ClipError::storage(format!(
                "failed to read '{}': {e}",
                path.display()
            ))),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> ClipResult<()> {
        std::fs::create_dir_all(&self.root).map_err(|e| {
            ClipError::storage(format!(
                "failed to create '{}': {e}",
                self.root.display()
            ))
        })?;
        let path = self.path_for(key);
        std::fs::write(&path, value).map_err(|e| {
            ClipError::storage(format!("failed to write '{}': {e}", path.display()))
        })
    }

    fn remove(&mut self, key: &str) -> ClipResult<()> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClipError::storage(format!(
                "failed to remove '{}': {e}",
                path.display()
            ))),
        }
    }
}

/// Escape a storage key into a portable file name.
///
/// ASCII alphanumerics, `-` and `_` pass through; every other byte becomes `%XX`.
pub fn escape_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for b in key.bytes() {
        if b.is_ascii_alphanumeric() || b == b'-' || b == b'_' {
            out.push(char::from(b));
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/project/storage.rs"]
mod tests;

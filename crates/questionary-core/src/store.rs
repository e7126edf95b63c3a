//! Statistics storage backends.
//!
//! The aggregator owns no global state; it is handed a [`StatsStore`] and
//! performs read-then-write updates through it. The substrate offers no
//! transactional isolation; callers serialize updates per statistics owner.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::StoreError;
use crate::statistics::GlobalStats;

/// Trait for statistics persistence backends.
pub trait StatsStore {
    /// Load the persisted state. `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<GlobalStats>, StoreError>;

    /// Replace the persisted state.
    fn save(&self, stats: &GlobalStats) -> Result<(), StoreError>;

    /// Clear the persisted state entirely.
    fn reset(&self) -> Result<(), StoreError>;
}

/// In-memory store, primarily for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<Option<GlobalStats>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatsStore for MemoryStore {
    fn load(&self) -> Result<Option<GlobalStats>, StoreError> {
        Ok(self.state.read().unwrap().clone())
    }

    fn save(&self, stats: &GlobalStats) -> Result<(), StoreError> {
        *self.state.write().unwrap() = Some(stats.clone());
        Ok(())
    }

    fn reset(&self) -> Result<(), StoreError> {
        *self.state.write().unwrap() = None;
        Ok(())
    }
}

/// JSON file store.
///
/// The whole state is one pretty-printed JSON document at a fixed path;
/// `save` replaces it and creates parent directories on first write.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StatsStore for JsonFileStore {
    fn load(&self) -> Result<Option<GlobalStats>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&self, stats: &GlobalStats) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(stats)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    fn reset(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

//! Pinned set persistence.

use super::PinnedSet;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Persists the pinned set as a JSON list of slugs.
pub struct PinStore {
    pinned: PinnedSet,
    /// Path to the pins file (empty = in-memory only)
    path: PathBuf,
}

impl PinStore {
    /// Load pins from `<data_dir>/pinned.json`, starting empty if the file is missing.
    pub fn load(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir).with_context(|| {
            format!("Failed to create data directory: {}", data_dir.display())
        })?;

        let path = data_dir.join("pinned.json");

        let pinned: PinnedSet = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read pins file: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse pins file: {}", path.display()))?
        } else {
            PinnedSet::new()
        };

        debug!(
            "event=pins_loaded count={} path={}",
            pinned.len(),
            path.display()
        );

        Ok(Self { pinned, path })
    }

    /// Create an in-memory store that never touches disk.
    pub fn in_memory(pinned: PinnedSet) -> Self {
        Self {
            pinned,
            path: PathBuf::new(),
        }
    }

    /// Save pins to disk
    pub fn save(&self) -> Result<()> {
        self.write(&self.pinned)
    }

    fn write(&self, pinned: &PinnedSet) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create data directory")?;
        }

        let content = serde_json::to_string_pretty(pinned).context("Failed to serialize pins")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write pins file: {}", self.path.display()))?;

        Ok(())
    }

    /// Persist `next` and adopt it only once it is on disk.
    fn commit(&mut self, next: PinnedSet) -> Result<()> {
        self.write(&next)?;
        self.pinned = next;
        Ok(())
    }

    pub fn pinned(&self) -> &PinnedSet {
        &self.pinned
    }

    pub fn is_pinned(&self, slug: &str) -> bool {
        self.pinned.contains(slug)
    }

    /// Toggle a slug and persist. Returns the new pinned state.
    /// The in-memory set is left untouched if the write fails.
    pub fn toggle(&mut self, slug: &str) -> Result<bool> {
        let mut next = self.pinned.clone();
        let now_pinned = next.toggle(slug);
        self.commit(next)?;
        info!("event=pin_toggled slug={} pinned={}", slug, now_pinned);
        Ok(now_pinned)
    }

    /// Pin a slug (no-op if already pinned) and persist.
    pub fn add(&mut self, slug: &str) -> Result<()> {
        if self.pinned.contains(slug) {
            return Ok(());
        }
        let mut next = self.pinned.clone();
        next.insert(slug);
        self.commit(next)?;
        info!("event=pin_added slug={}", slug);
        Ok(())
    }

    /// Drop pins whose note no longer exists, persisting if anything changed.
    pub fn prune(&mut self, exists: impl FnMut(&str) -> bool) -> Result<usize> {
        let mut next = self.pinned.clone();
        let dropped = next.retain(exists);
        if dropped > 0 {
            self.commit(next)?;
            debug!("event=pins_pruned dropped={}", dropped);
        }
        Ok(dropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_store_toggles_without_touching_disk() {
        let mut store = PinStore::in_memory(PinnedSet::new());
        assert!(store.toggle("a").unwrap());
        assert!(store.is_pinned("a"));
        assert!(!store.toggle("a").unwrap());
        assert!(!store.is_pinned("a"));
    }

    #[test]
    fn pins_round_trip_through_data_dir() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = PinStore::load(dir.path()).unwrap();
        assert!(store.pinned().is_empty());
        store.add("welcome").unwrap();
        store.toggle("ideas").unwrap();

        let reloaded = PinStore::load(dir.path()).unwrap();
        assert!(reloaded.is_pinned("welcome"));
        assert!(reloaded.is_pinned("ideas"));
        assert_eq!(reloaded.pinned().len(), 2);
    }

    #[test]
    fn prune_drops_slugs_without_notes() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = PinStore::load(dir.path()).unwrap();
        store.add("kept").unwrap();
        store.add("gone").unwrap();

        let dropped = store.prune(|slug| slug == "kept").unwrap();
        assert_eq!(dropped, 1);

        let reloaded = PinStore::load(dir.path()).unwrap();
        assert!(reloaded.is_pinned("kept"));
        assert!(!reloaded.is_pinned("gone"));
    }

    #[test]
    fn failed_write_keeps_previous_pins() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = PinStore::load(dir.path()).unwrap();
        store.add("kept").unwrap();

        // A directory in place of the pins file makes every write fail
        let path = dir.path().join("pinned.json");
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        assert!(store.toggle("a").is_err());
        assert!(!store.is_pinned("a"));

        assert!(store.toggle("kept").is_err());
        assert!(store.is_pinned("kept"));

        assert!(store.add("b").is_err());
        assert!(!store.is_pinned("b"));
        assert_eq!(store.pinned().len(), 1);
    }

    #[test]
    fn corrupt_pins_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("pinned.json"), "{not json").unwrap();
        assert!(PinStore::load(dir.path()).is_err());
    }
}

//! JSON file backed note store.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::{debug, info};

use super::{new_untitled_note, sample_notes, NoteStore, StoreError};
use crate::note::Note;

/// Stores all notes in a single `notes.json` file.
pub struct JsonNoteStore {
    path: PathBuf,
    notes: Vec<Note>,
}

impl JsonNoteStore {
    /// Open `<data_dir>/notes.json`, seeding sample notes when it does not exist yet.
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(data_dir).map_err(|e| StoreError::io(data_dir, e))?;
        let path = data_dir.join("notes.json");

        let mut store = Self {
            path,
            notes: Vec::new(),
        };

        if store.path.exists() {
            store.notes = store.read()?;
        } else {
            store.notes = sample_notes(Utc::now());
            store.write()?;
            info!(
                "event=notes_seeded count={} path={}",
                store.notes.len(),
                store.path.display()
            );
        }

        Ok(store)
    }

    /// Path of the backing file (watched for external edits).
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<Note>, StoreError> {
        let content = fs::read_to_string(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write(&self) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(&self.notes)?;
        fs::write(&self.path, content).map_err(|e| StoreError::io(&self.path, e))
    }
}

impl NoteStore for JsonNoteStore {
    fn load(&mut self) -> Result<Vec<Note>, StoreError> {
        self.notes = self.read()?;
        debug!("event=notes_loaded count={}", self.notes.len());
        Ok(self.notes.clone())
    }

    fn create_note(&mut self) -> Result<Note, StoreError> {
        let note = new_untitled_note(&self.notes, Utc::now());
        self.notes.push(note.clone());
        self.write()?;
        info!("event=note_created slug={}", note.slug);
        Ok(note)
    }

    fn delete_note(&mut self, note: &Note) -> Result<(), StoreError> {
        let Some(pos) = self.notes.iter().position(|n| n.slug == note.slug) else {
            return Err(StoreError::NotFound(note.slug.clone()));
        };
        self.notes.remove(pos);
        self.write()?;
        info!("event=note_deleted slug={}", note.slug);
        Ok(())
    }
}

//! In-memory note store.

use chrono::Utc;

use super::{new_untitled_note, NoteStore, StoreError};
use crate::note::Note;

/// Keeps notes in memory. Used by `--demo` and by tests, which can make deletes fail.
#[derive(Debug, Default)]
pub struct MemoryNoteStore {
    notes: Vec<Note>,
    fail_deletes: Option<String>,
    delete_calls: usize,
}

impl MemoryNoteStore {
    pub fn new(notes: Vec<Note>) -> Self {
        Self {
            notes,
            fail_deletes: None,
            delete_calls: 0,
        }
    }

    /// Make every subsequent delete fail with `reason`.
    pub fn fail_deletes(&mut self, reason: impl Into<String>) {
        self.fail_deletes = Some(reason.into());
    }

    /// Number of delete requests received, successful or not.
    pub fn delete_calls(&self) -> usize {
        self.delete_calls
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }
}

impl NoteStore for MemoryNoteStore {
    fn load(&mut self) -> Result<Vec<Note>, StoreError> {
        Ok(self.notes.clone())
    }

    fn create_note(&mut self) -> Result<Note, StoreError> {
        let note = new_untitled_note(&self.notes, Utc::now());
        self.notes.push(note.clone());
        Ok(note)
    }

    fn delete_note(&mut self, note: &Note) -> Result<(), StoreError> {
        self.delete_calls += 1;
        if let Some(reason) = &self.fail_deletes {
            return Err(StoreError::Rejected {
                operation: "delete".to_string(),
                reason: reason.clone(),
            });
        }
        let before = self.notes.len();
        self.notes.retain(|n| n.slug != note.slug);
        if self.notes.len() == before {
            return Err(StoreError::NotFound(note.slug.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_removes_note_and_counts_calls() {
        let mut store = MemoryNoteStore::new(vec![Note::new("1", "a", "A")]);
        let note = store.notes()[0].clone();
        store.delete_note(&note).unwrap();
        assert!(store.notes().is_empty());
        assert_eq!(store.delete_calls(), 1);
    }

    #[test]
    fn injected_failure_leaves_notes_untouched() {
        let mut store = MemoryNoteStore::new(vec![Note::new("1", "a", "A")]);
        store.fail_deletes("offline");
        let note = store.notes()[0].clone();
        let err = store.delete_note(&note).unwrap_err();
        assert!(matches!(err, StoreError::Rejected { .. }));
        assert_eq!(store.notes().len(), 1);
    }
}

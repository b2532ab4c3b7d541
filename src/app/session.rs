//! Session-owned state the sidebar acts on: the note store, pins and the selected note.

use anyhow::{Context, Result};
use log::{debug, error};

use crate::note::Note;
use crate::pins::{PinStore, PinnedSet};
use crate::sidebar::SidebarEffects;
use crate::store::NoteStore;

/// Store, pins and selection, driven by the sidebar through [`SidebarEffects`].
pub struct Session {
    store: Box<dyn NoteStore>,
    pins: PinStore,
    /// Slug of the note open in the detail pane
    selected: Option<String>,
}

impl Session {
    pub fn new(store: Box<dyn NoteStore>, pins: PinStore) -> Self {
        Self {
            store,
            pins,
            selected: None,
        }
    }

    pub fn pinned(&self) -> &PinnedSet {
        self.pins.pinned()
    }

    pub fn is_pinned(&self, slug: &str) -> bool {
        self.pins.is_pinned(slug)
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn select(&mut self, slug: Option<String>) {
        if self.selected != slug {
            debug!("event=selection_changed slug={:?}", slug);
        }
        self.selected = slug;
    }

    /// Read the collection from the store and drop pins of notes that are gone.
    pub fn load_notes(&mut self) -> Result<Vec<Note>> {
        let notes = self.store.load().context("Failed to load notes")?;
        self.pins
            .prune(|slug| notes.iter().any(|n| n.slug == slug))
            .context("Failed to save pins")?;
        Ok(notes)
    }
}

impl SidebarEffects for Session {
    type Error = anyhow::Error;

    fn toggle_pin(&mut self, slug: &str) -> Result<()> {
        self.pins
            .toggle(slug)
            .with_context(|| format!("Failed to update pin for {}", slug))?;
        Ok(())
    }

    fn add_pinned(&mut self, slug: &str) -> Result<()> {
        self.pins
            .add(slug)
            .with_context(|| format!("Failed to pin {}", slug))
    }

    fn delete_note(&mut self, note: &Note) -> Result<()> {
        if let Err(err) = self.store.delete_note(note) {
            error!("event=store_delete_failed slug={} error={}", note.slug, err);
            return Err(err).with_context(|| format!("Failed to delete \"{}\"", note.display_title()));
        }
        Ok(())
    }

    fn create_note(&mut self) -> Result<Note> {
        self.store.create_note().context("Failed to create note")
    }

    fn navigate_to(&mut self, slug: &str) {
        self.select(Some(slug.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryNoteStore;

    fn session(notes: Vec<Note>, pinned: &[&str]) -> Session {
        Session::new(
            Box::new(MemoryNoteStore::new(notes)),
            PinStore::in_memory(pinned.iter().copied().collect()),
        )
    }

    #[test]
    fn load_notes_prunes_pins_of_missing_notes() {
        let mut session = session(vec![Note::new("1", "kept", "Kept")], &["kept", "gone"]);
        let notes = session.load_notes().unwrap();
        assert_eq!(notes.len(), 1);
        assert!(session.is_pinned("kept"));
        assert!(!session.is_pinned("gone"));
    }

    #[test]
    fn navigate_to_sets_selection() {
        let mut session = session(Vec::new(), &[]);
        session.navigate_to("alpha");
        assert_eq!(session.selected(), Some("alpha"));
    }

    #[test]
    fn delete_of_unknown_note_reports_error_with_title() {
        let mut session = session(Vec::new(), &[]);
        let err = session
            .delete_note(&Note::new("9", "ghost", "Ghost"))
            .unwrap_err();
        assert!(err.to_string().contains("Ghost"));
    }

    #[test]
    fn create_then_pin() {
        let mut session = session(Vec::new(), &[]);
        let note = session.create_note().unwrap();
        session.add_pinned(&note.slug).unwrap();
        assert!(session.is_pinned(&note.slug));
        assert_eq!(session.load_notes().unwrap().len(), 1);
    }
}

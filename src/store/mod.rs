//! Note persistence.
//!
//! The sidebar never persists notes itself; it asks a [`NoteStore`] to create or delete
//! them and the session reloads the collection afterwards.

pub mod error;
pub mod json;
pub mod memory;
pub mod watcher;

use chrono::{DateTime, Duration, Utc};

use crate::note::Note;

pub use error::StoreError;
pub use json::JsonNoteStore;
pub use memory::MemoryNoteStore;
pub use watcher::NotesWatcher;

/// Backing store for notes.
pub trait NoteStore {
    /// Current note collection.
    fn load(&mut self) -> Result<Vec<Note>, StoreError>;

    /// Create an empty note and return it.
    fn create_note(&mut self) -> Result<Note, StoreError>;

    /// Delete a note. Fails with [`StoreError::NotFound`] if it is not stored.
    fn delete_note(&mut self, note: &Note) -> Result<(), StoreError>;
}

/// Build a fresh untitled note whose slug does not collide with `existing`.
pub(crate) fn new_untitled_note(existing: &[Note], now: DateTime<Utc>) -> Note {
    let stamp = now.timestamp_millis();
    let mut slug = format!("new-note-{}", stamp);
    let mut suffix = 1;
    while existing.iter().any(|n| n.slug == slug) {
        suffix += 1;
        slug = format!("new-note-{}-{}", stamp, suffix);
    }

    let mut note = Note::new(format!("note_{}", slug), slug, "");
    note.created_at = now;
    note
}

/// Notes written on first run so the sidebar is not empty.
pub fn sample_notes(now: DateTime<Utc>) -> Vec<Note> {
    let make = |slug: &str, title: &str, emoji: &str, days_ago: i64, content: &str| {
        let mut note = Note::new(format!("note_{}", slug), slug, title);
        note.emoji = Some(emoji.to_string());
        note.created_at = now - Duration::days(days_ago);
        note.content = content.to_string();
        note
    };

    vec![
        make(
            "about-me",
            "about me",
            "👋",
            0,
            "This sidebar lists your notes grouped by when they were written.\n\
             Press / to search, j/k to move, p to pin.",
        ),
        make(
            "quick-links",
            "quick links",
            "🔗",
            1,
            "Bookmarks and references worth keeping close.",
        ),
        make(
            "reading-list",
            "reading list",
            "📚",
            4,
            "Books queued for the next few months.",
        ),
        make(
            "project-ideas",
            "project ideas",
            "💡",
            12,
            "A terminal notes app with live search.",
        ),
        make(
            "travel-plans",
            "travel plans",
            "✈️",
            45,
            "Places to visit and things to pack.",
        ),
    ]
}

//! Default search provider: case-insensitive substring match.

use crate::note::Note;

use super::SearchProvider;

/// Matches notes whose title or content contains the query.
///
/// Title matches come before content-only matches; within each tier the collection
/// order is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoteSearch;

impl NoteSearch {
    pub fn new() -> Self {
        Self
    }
}

impl SearchProvider for NoteSearch {
    fn search(&self, query: &str, notes: &[Note]) -> Option<Vec<Note>> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        let query_lower = query.to_lowercase();

        let mut title_hits = Vec::new();
        let mut content_hits = Vec::new();
        for note in notes {
            if note.title.to_lowercase().contains(&query_lower) {
                title_hits.push(note.clone());
            } else if note.content.to_lowercase().contains(&query_lower) {
                content_hits.push(note.clone());
            }
        }

        title_hits.extend(content_hits);
        Some(title_hits)
    }
}

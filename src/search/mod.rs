//! Search over the note collection.

pub mod engine;

use crate::note::Note;

pub use engine::NoteSearch;

/// Turns a query into an ordered result list.
///
/// `None` means there is no active query (browse mode); `Some(vec![])` means the query
/// ran and nothing matched. Ranking is entirely up to the provider.
pub trait SearchProvider {
    fn search(&self, query: &str, notes: &[Note]) -> Option<Vec<Note>>;
}

impl<F> SearchProvider for F
where
    F: Fn(&str, &[Note]) -> Option<Vec<Note>>,
{
    fn search(&self, query: &str, notes: &[Note]) -> Option<Vec<Note>> {
        self(query, notes)
    }
}

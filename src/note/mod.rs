//! Note data model and category grouping.

pub mod grouping;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use grouping::{group_notes, Category, GroupedNotes};

/// A single note.
///
/// The slug is the stable key for everything the sidebar does: pinning, selection,
/// swipe rows and navigation are all keyed by slug, never by list position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Store-assigned identifier
    pub id: String,
    /// Stable external key
    pub slug: String,
    /// Title shown in the sidebar row
    pub title: String,
    /// Body text (opaque to the sidebar, used by search and the detail pane)
    #[serde(default)]
    pub content: String,
    /// When the note was created
    pub created_at: DateTime<Utc>,
    /// Optional emoji shown before the title
    #[serde(default)]
    pub emoji: Option<String>,
}

impl Note {
    /// Create a note with the given slug and title, created now.
    pub fn new(id: impl Into<String>, slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            title: title.into(),
            content: String::new(),
            created_at: Utc::now(),
            emoji: None,
        }
    }

    /// Title with the emoji prefix, falling back to "Untitled" for blank titles.
    pub fn display_title(&self) -> String {
        let title = if self.title.trim().is_empty() {
            "Untitled"
        } else {
            self.title.as_str()
        };
        match &self.emoji {
            Some(emoji) => format!("{} {}", emoji, title),
            None => title.to_string(),
        }
    }

    /// First non-empty line of the content, for row previews.
    pub fn preview(&self) -> &str {
        self.content
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or("")
    }
}

/// Find a note by slug.
pub fn find_note<'a>(notes: &'a [Note], slug: &str) -> Option<&'a Note> {
    notes.iter().find(|n| n.slug == slug)
}

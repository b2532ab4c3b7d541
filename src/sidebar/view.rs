//! Render-ready projection of the sidebar.

use crate::note::{Category, GroupedNotes, Note};
use crate::pins::PinnedSet;

/// Which list the sidebar shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Notes grouped by category
    #[default]
    Browse,
    /// Flat list of search results, in provider order (possibly empty)
    Search(Vec<Note>),
}

impl ViewMode {
    pub fn is_search(&self) -> bool {
        matches!(self, Self::Search(_))
    }
}

/// Session-owned inputs the projection reads from.
pub struct SidebarContext<'a> {
    /// Notes grouped by category key
    pub grouped: &'a GroupedNotes,
    /// Display order and labels of categories
    pub categories: &'a [Category],
    /// Pinned slugs
    pub pinned: &'a PinnedSet,
    /// Slug of the note open in the detail pane
    pub selected: Option<&'a str>,
}

/// Everything a renderer needs to draw one note row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRow<'a> {
    pub note: &'a Note,
    pub pinned: bool,
    /// Keyboard highlight (search mode only)
    pub highlighted: bool,
    /// Action row revealed
    pub swipe_open: bool,
    /// Open in the detail pane
    pub selected: bool,
}

/// A labeled browse-mode section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    pub key: &'a str,
    pub label: &'a str,
    pub rows: Vec<NoteRow<'a>>,
}

/// The sidebar as it should be drawn right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarView<'a> {
    /// Category sections; empty categories are left out
    Browse(Vec<Section<'a>>),
    /// Non-empty search results
    Results(Vec<NoteRow<'a>>),
    /// A search ran and matched nothing
    NoResults,
}

impl<'a> SidebarView<'a> {
    /// All rows in display order.
    pub fn rows(&self) -> Vec<&NoteRow<'a>> {
        match self {
            Self::Browse(sections) => sections.iter().flat_map(|s| s.rows.iter()).collect(),
            Self::Results(rows) => rows.iter().collect(),
            Self::NoResults => Vec::new(),
        }
    }

    /// Slugs in display order.
    pub fn slugs(&self) -> Vec<&'a str> {
        self.rows().into_iter().map(|r| r.note.slug.as_str()).collect()
    }

    /// Whether any row references `slug`.
    pub fn contains(&self, slug: &str) -> bool {
        self.rows().iter().any(|r| r.note.slug == slug)
    }

    /// Step from `current` to the neighbouring row, wrapping at both ends.
    ///
    /// An unknown or absent `current` lands on the first row (forward) or the last row
    /// (backward). Returns `None` only when there are no rows.
    pub fn step_from(&self, current: Option<&str>, forward: bool) -> Option<&'a str> {
        let slugs = self.slugs();
        if slugs.is_empty() {
            return None;
        }
        let len = slugs.len();
        let pos = current.and_then(|c| slugs.iter().position(|s| *s == c));
        let next = match (pos, forward) {
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
            (None, true) => 0,
            (None, false) => len - 1,
        };
        Some(slugs[next])
    }
}

//! Sidebar widget: search row, notes header and the category / result list.

mod rendering;

use ratatui::layout::{Position, Rect};
use ratatui::widgets::ListState;

pub use rendering::Sidebar;

/// The note behind one rendered list line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowHit {
    pub slug: String,
    /// Position in the search results (search mode only)
    pub result_index: Option<usize>,
}

/// Render state kept between frames, used for scrolling and mouse hit-testing.
#[derive(Debug, Default)]
pub struct SidebarState {
    /// Ratatui list selection and scroll offset
    pub list_state: ListState,
    /// One entry per list line; `None` for section headers and placeholders
    hits: Vec<Option<RowHit>>,
    /// Where the list was last drawn
    list_area: Rect,
    /// Where the search input was last drawn
    search_area: Rect,
}

impl SidebarState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Note row under a screen position, if any.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<&RowHit> {
        if !self.list_area.contains(Position::new(column, row)) {
            return None;
        }
        let line = self.list_state.offset() + usize::from(row - self.list_area.y);
        self.hits.get(line)?.as_ref()
    }

    /// Whether a screen position falls on the search input.
    pub fn is_search_row(&self, column: u16, row: u16) -> bool {
        self.search_area.contains(Position::new(column, row))
    }

    pub(crate) fn set_layout(&mut self, search_area: Rect, list_area: Rect, hits: Vec<Option<RowHit>>) {
        self.search_area = search_area;
        self.list_area = list_area;
        self.hits = hits;
    }
}

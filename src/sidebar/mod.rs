//! Sidebar interaction controller.
//!
//! Owns the transient sidebar state (search results, keyboard highlight, search field,
//! open swipe row) and sequences every mutation through one place so that pin, delete,
//! edit and new-note always clear an active search before acting.
//!
//! Notes, pins and the selected note belong to the session. The controller only reads
//! them and asks the session to change them through [`SidebarEffects`].

mod navigation;
mod search_field;
mod swipe;
mod view;

use log::{debug, info, warn};

use crate::note::{find_note, Note};
use crate::search::SearchProvider;

pub use navigation::Highlight;
pub use search_field::{QueryEdit, SearchField};
pub use swipe::SwipeTracker;
pub use view::{NoteRow, Section, SidebarContext, SidebarView, ViewMode};

/// Session-side operations the controller triggers.
pub trait SidebarEffects {
    type Error;

    /// Invert pinned membership of `slug`.
    fn toggle_pin(&mut self, slug: &str) -> Result<(), Self::Error>;

    /// Pin `slug`.
    fn add_pinned(&mut self, slug: &str) -> Result<(), Self::Error>;

    /// Delete `note` from the store.
    fn delete_note(&mut self, note: &Note) -> Result<(), Self::Error>;

    /// Create an empty note.
    fn create_note(&mut self) -> Result<Note, Self::Error>;

    /// Show the note `slug` in the detail view.
    fn navigate_to(&mut self, slug: &str);
}

/// Navigation inputs routed to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarInput {
    /// Open the highlighted search result
    Confirm,
    /// Highlight the next result
    Next,
    /// Highlight the previous result
    Previous,
    /// Leave the search field / search / action row
    Escape,
}

/// What the controller did with an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// Not consumed; the caller may handle it (browse-mode movement, for instance)
    Ignored,
    /// Consumed
    Handled,
    /// Consumed and navigated to the note with this slug
    Opened(String),
}

/// The sidebar state machine.
#[derive(Debug, Clone, Default)]
pub struct SidebarController {
    mode: ViewMode,
    highlight: Highlight,
    swipe: SwipeTracker,
    field: SearchField,
}

impl SidebarController {
    pub fn new() -> Self {
        Self::default()
    }

    // ── State accessors ─────────────────────────────────────────────

    pub fn mode(&self) -> &ViewMode {
        &self.mode
    }

    pub fn is_searching(&self) -> bool {
        self.mode.is_search()
    }

    /// Current search results, `None` in browse mode.
    pub fn results(&self) -> Option<&[Note]> {
        match &self.mode {
            ViewMode::Browse => None,
            ViewMode::Search(results) => Some(results),
        }
    }

    /// Highlighted result index. Always 0 outside an active, non-empty search.
    pub fn highlighted_index(&self) -> usize {
        self.highlight.index().unwrap_or(0)
    }

    pub fn highlight(&self) -> Highlight {
        self.highlight
    }

    pub fn highlighted_note(&self) -> Option<&Note> {
        let index = self.highlight.index()?;
        self.results()?.get(index)
    }

    pub fn search_field(&self) -> &SearchField {
        &self.field
    }

    pub fn is_search_focused(&self) -> bool {
        self.field.is_focused()
    }

    pub fn open_swipe_slug(&self) -> Option<&str> {
        self.swipe.open_slug()
    }

    // ── Search ──────────────────────────────────────────────────────

    /// Give the search field keyboard focus.
    pub fn focus_search(&mut self) {
        self.field.focus();
    }

    /// Take focus away from the search field. Results stay as they are.
    pub fn blur_search(&mut self) {
        self.field.blur();
    }

    /// Apply an edit to the query and re-run the search if the text changed.
    pub fn edit_query<P>(&mut self, edit: QueryEdit, provider: &P, notes: &[Note]) -> bool
    where
        P: SearchProvider + ?Sized,
    {
        if !self.field.apply(edit) {
            return false;
        }
        self.run_search(provider, notes);
        true
    }

    /// Replace the query text and re-run the search.
    pub fn set_query<P>(&mut self, query: &str, provider: &P, notes: &[Note])
    where
        P: SearchProvider + ?Sized,
    {
        self.field.set_query(query);
        self.run_search(provider, notes);
    }

    /// Install a new result set (or none). The highlight always restarts at 0.
    pub fn apply_results(&mut self, results: Option<Vec<Note>>) {
        match results {
            Some(results) => {
                debug!("event=search_results count={}", results.len());
                self.highlight = Highlight::reset(results.len());
                self.mode = ViewMode::Search(results);
            }
            None => {
                self.highlight = Highlight::Inactive;
                self.mode = ViewMode::Browse;
            }
        }
    }

    /// Leave search mode: drop results, reset highlight, empty and blur the field.
    /// The open swipe row is left alone.
    pub fn clear_search(&mut self) {
        if self.mode.is_search() || !self.field.query().is_empty() {
            debug!("event=search_cleared");
        }
        self.mode = ViewMode::Browse;
        self.highlight = Highlight::Inactive;
        self.field.clear();
    }

    /// Bring transient state in line with a reloaded note collection.
    ///
    /// An active query is re-run (which restarts the highlight), and an open action row
    /// whose note disappeared is closed.
    pub fn sync_notes<P>(&mut self, provider: &P, notes: &[Note])
    where
        P: SearchProvider + ?Sized,
    {
        if self.mode.is_search() {
            self.run_search(provider, notes);
        }
        if let Some(slug) = self.swipe.open_slug() {
            if find_note(notes, slug).is_none() {
                self.swipe.close_any();
            }
        }
    }

    fn run_search<P>(&mut self, provider: &P, notes: &[Note])
    where
        P: SearchProvider + ?Sized,
    {
        let results = provider.search(self.field.query(), notes);
        self.apply_results(results);
    }

    // ── Keyboard navigation ─────────────────────────────────────────

    /// Route a navigation input.
    ///
    /// Confirm is honoured even while the search field has focus; next/previous are
    /// not, so typing in the field never moves the highlight.
    pub fn handle_input<E>(&mut self, input: SidebarInput, effects: &mut E) -> InputOutcome
    where
        E: SidebarEffects + ?Sized,
    {
        match input {
            SidebarInput::Confirm => match self.confirm(effects) {
                Some(slug) => InputOutcome::Opened(slug),
                None => InputOutcome::Ignored,
            },
            SidebarInput::Next | SidebarInput::Previous if self.field.is_focused() => {
                InputOutcome::Ignored
            }
            SidebarInput::Next => self.step(true),
            SidebarInput::Previous => self.step(false),
            SidebarInput::Escape => self.escape(),
        }
    }

    /// Open the highlighted result, then clear the search. No-op without results.
    pub fn confirm<E>(&mut self, effects: &mut E) -> Option<String>
    where
        E: SidebarEffects + ?Sized,
    {
        let slug = self.highlighted_note()?.slug.clone();
        info!("event=result_opened slug={}", slug);
        effects.navigate_to(&slug);
        self.clear_search();
        Some(slug)
    }

    pub fn next(&mut self) {
        self.highlight.next();
    }

    pub fn previous(&mut self) {
        self.highlight.previous();
    }

    /// Move the highlight onto result `index` (pointer hover/click).
    pub fn highlight_result(&mut self, index: usize) -> bool {
        self.highlight.select(index)
    }

    fn step(&mut self, forward: bool) -> InputOutcome {
        if !self.mode.is_search() {
            return InputOutcome::Ignored;
        }
        if forward {
            self.next();
        } else {
            self.previous();
        }
        InputOutcome::Handled
    }

    fn escape(&mut self) -> InputOutcome {
        if self.field.is_focused() {
            self.field.blur();
            return InputOutcome::Handled;
        }
        if self.mode.is_search() {
            self.clear_search();
            return InputOutcome::Handled;
        }
        if self.swipe.close_any().is_some() {
            return InputOutcome::Handled;
        }
        InputOutcome::Ignored
    }

    // ── Swipe rows ──────────────────────────────────────────────────

    /// Reveal the action row of `slug`, closing any other.
    pub fn open_swipe(&mut self, slug: &str) {
        self.swipe.open(slug);
    }

    /// Close the action row of `slug` if it is the open one.
    pub fn close_swipe(&mut self, slug: &str) -> bool {
        self.swipe.close(slug)
    }

    pub fn toggle_swipe(&mut self, slug: &str) -> bool {
        self.swipe.toggle(slug)
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Toggle the pin of `slug`. Returns false (and changes nothing) for unknown slugs.
    pub fn toggle_pin<E>(
        &mut self,
        slug: &str,
        notes: &[Note],
        effects: &mut E,
    ) -> Result<bool, E::Error>
    where
        E: SidebarEffects + ?Sized,
    {
        if find_note(notes, slug).is_none() {
            debug!("event=pin_ignored reason=unknown_slug slug={}", slug);
            return Ok(false);
        }
        self.clear_search();
        effects.toggle_pin(slug)?;
        Ok(true)
    }

    /// Delete the note `slug`.
    ///
    /// The search is cleared before the store is asked, so no result list can refer to
    /// the note once the delete resolves. A store failure is returned untouched.
    pub fn delete<E>(&mut self, slug: &str, notes: &[Note], effects: &mut E) -> Result<bool, E::Error>
    where
        E: SidebarEffects + ?Sized,
    {
        let Some(note) = find_note(notes, slug) else {
            debug!("event=delete_ignored reason=unknown_slug slug={}", slug);
            return Ok(false);
        };
        self.clear_search();

        if let Err(err) = effects.delete_note(note) {
            warn!("event=delete_failed slug={}", slug);
            return Err(err);
        }

        self.swipe.close(slug);
        info!("event=note_deleted slug={}", slug);
        Ok(true)
    }

    /// Open `slug` for editing. Returns false for unknown slugs.
    pub fn edit<E>(&mut self, slug: &str, notes: &[Note], effects: &mut E) -> bool
    where
        E: SidebarEffects + ?Sized,
    {
        if find_note(notes, slug).is_none() {
            debug!("event=edit_ignored reason=unknown_slug slug={}", slug);
            return false;
        }
        self.clear_search();
        effects.navigate_to(slug);
        true
    }

    /// Create a note, pin it and open it.
    pub fn create_note<E>(&mut self, effects: &mut E) -> Result<String, E::Error>
    where
        E: SidebarEffects + ?Sized,
    {
        self.clear_search();
        let note = effects.create_note()?;
        effects.add_pinned(&note.slug)?;
        effects.navigate_to(&note.slug);
        info!("event=note_created slug={}", note.slug);
        Ok(note.slug)
    }

    // ── Projection ──────────────────────────────────────────────────

    /// Build the render-ready view for the current state.
    pub fn view<'a>(&'a self, ctx: &SidebarContext<'a>) -> SidebarView<'a> {
        match &self.mode {
            ViewMode::Browse => SidebarView::Browse(
                ctx.categories
                    .iter()
                    .filter_map(|category| {
                        let notes = ctx.grouped.get(&category.key)?;
                        if notes.is_empty() {
                            return None;
                        }
                        Some(Section {
                            key: category.key.as_str(),
                            label: category.label.as_str(),
                            rows: notes.iter().map(|n| self.row(n, false, ctx)).collect(),
                        })
                    })
                    .collect(),
            ),
            ViewMode::Search(results) if results.is_empty() => SidebarView::NoResults,
            ViewMode::Search(results) => SidebarView::Results(
                results
                    .iter()
                    .enumerate()
                    .map(|(i, n)| self.row(n, self.highlight.is_highlighted(i), ctx))
                    .collect(),
            ),
        }
    }

    fn row<'a>(&self, note: &'a Note, highlighted: bool, ctx: &SidebarContext<'_>) -> NoteRow<'a> {
        NoteRow {
            note,
            pinned: ctx.pinned.contains(&note.slug),
            highlighted,
            swipe_open: self.swipe.is_open(&note.slug),
            selected: ctx.selected == Some(note.slug.as_str()),
        }
    }
}

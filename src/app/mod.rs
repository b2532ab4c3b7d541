//! Application state and core data types for notebar.

mod session;

use std::time::Instant;

use anyhow::Result;
use chrono::Utc;
use log::{error, info, warn};

use crate::config::Config;
use crate::note::{find_note, group_notes, GroupedNotes, Note};
use crate::search::NoteSearch;
use crate::sidebar::{
    InputOutcome, QueryEdit, SidebarContext, SidebarController, SidebarInput, SidebarView,
};
use crate::store::NotesWatcher;
use crate::ui::sidebar::SidebarState;
use crate::ui::toast::ToastManager;

pub use session::Session;

/// State for tracking multi-key chord sequences (vim-style "dd" to delete)
#[derive(Debug, Clone, Default)]
pub enum ChordState {
    #[default]
    None,
    /// First 'd' pressed, waiting for second 'd' to delete the current note
    DeletePending { started_at: Instant },
}

/// Chord state timeout duration (500ms)
const CHORD_TIMEOUT_MS: u128 = 500;

impl ChordState {
    /// Check if the chord has expired (timed out)
    pub fn is_expired(&self) -> bool {
        match self {
            ChordState::None => false,
            ChordState::DeletePending { started_at } => {
                started_at.elapsed().as_millis() > CHORD_TIMEOUT_MS
            }
        }
    }

    /// Pending key sequence for the help bar
    pub fn pending_display(&self) -> Option<&'static str> {
        match self {
            ChordState::None => None,
            ChordState::DeletePending { .. } => Some("d"),
        }
    }
}

/// A left-button press on a sidebar row, kept until release to tell clicks from swipes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragStart {
    pub column: u16,
    pub slug: String,
    pub result_index: Option<usize>,
}

/// Application state
pub struct App {
    /// User configuration
    pub config: Config,
    /// Whether layout changes are written back to the config file
    persist_config: bool,
    /// Current note collection, as last loaded from the store
    pub notes: Vec<Note>,
    /// Store, pins and selection
    pub session: Session,
    /// Sidebar interaction state
    pub sidebar: SidebarController,
    /// Search provider used for the sidebar
    pub search: NoteSearch,
    /// Sidebar render state (scroll offset, hit table)
    pub sidebar_state: SidebarState,
    /// State for tracking chord key sequences ("dd" to delete)
    pub chord_state: ChordState,
    /// Pending row press
    pub drag_start: Option<DragStart>,
    /// Toast notification manager
    pub toast_manager: ToastManager,
    /// Watcher for external edits of the notes file
    watcher: Option<NotesWatcher>,
    /// Should quit
    pub should_quit: bool,
}

impl App {
    /// Create the application and load the initial note collection.
    pub fn new(
        mut config: Config,
        mut session: Session,
        watcher: Option<NotesWatcher>,
        persist_config: bool,
    ) -> Result<Self> {
        config.validate();
        let notes = session.load_notes()?;

        let mut app = Self {
            config,
            persist_config,
            notes,
            session,
            sidebar: SidebarController::new(),
            search: NoteSearch::new(),
            sidebar_state: SidebarState::new(),
            chord_state: ChordState::None,
            drag_start: None,
            toast_manager: ToastManager::new(),
            watcher,
            should_quit: false,
        };
        app.ensure_selection();
        info!("event=app_ready notes={}", app.notes.len());
        Ok(app)
    }

    // ── Projection ──────────────────────────────────────────────────

    /// Notes grouped by category as of now.
    pub fn grouped(&self) -> GroupedNotes {
        group_notes(&self.notes, self.session.pinned(), Utc::now())
    }

    /// Build the sidebar view over `grouped` and hand it to `f`.
    pub fn with_view<R>(&self, grouped: &GroupedNotes, f: impl FnOnce(&SidebarView) -> R) -> R {
        let ctx = SidebarContext {
            grouped,
            categories: &self.config.categories.order,
            pinned: self.session.pinned(),
            selected: self.session.selected(),
        };
        let view = self.sidebar.view(&ctx);
        f(&view)
    }

    /// Slugs in browse display order.
    fn browse_order(&self) -> Vec<String> {
        let grouped = self.grouped();
        self.config
            .categories
            .order
            .iter()
            .filter_map(|c| grouped.get(&c.key))
            .flatten()
            .map(|n| n.slug.clone())
            .collect()
    }

    /// Note the row actions apply to: the highlighted result while searching,
    /// the selected note otherwise.
    pub fn current_slug(&self) -> Option<String> {
        if self.sidebar.is_searching() {
            return self.sidebar.highlighted_note().map(|n| n.slug.clone());
        }
        let selected = self.session.selected()?;
        find_note(&self.notes, selected).map(|n| n.slug.clone())
    }

    pub fn selected_note(&self) -> Option<&Note> {
        find_note(&self.notes, self.session.selected()?)
    }

    // ── Notes collection ────────────────────────────────────────────

    /// Keep the selection on an existing note, falling back to the first in browse order.
    fn ensure_selection(&mut self) {
        let valid = self
            .session
            .selected()
            .is_some_and(|slug| find_note(&self.notes, slug).is_some());
        if !valid {
            let first = self.browse_order().into_iter().next();
            self.session.select(first);
        }
    }

    /// Reload notes from the store and reconcile pins, selection and sidebar state.
    pub fn reload_notes(&mut self) -> Result<()> {
        self.notes = self.session.load_notes()?;
        self.ensure_selection();
        self.sidebar.sync_notes(&self.search, &self.notes);
        Ok(())
    }

    fn reload_or_toast(&mut self) {
        if let Err(err) = self.reload_notes() {
            error!("event=reload_failed error={:#}", err);
            self.toast_manager.error(format!("{:#}", err));
        }
    }

    /// Reload when the notes file changed outside the app.
    pub fn check_notes_updates(&mut self) {
        let changed = self.watcher.as_ref().is_some_and(NotesWatcher::changed);
        if changed {
            self.reload_or_toast();
        }
    }

    // ── Search ──────────────────────────────────────────────────────

    pub fn focus_search(&mut self) {
        self.sidebar.focus_search();
    }

    pub fn edit_query(&mut self, edit: QueryEdit) {
        self.sidebar.edit_query(edit, &self.search, &self.notes);
    }

    // ── Navigation ──────────────────────────────────────────────────

    /// Route a navigation input; browse-mode movement falls through to the selection.
    pub fn handle_sidebar_input(&mut self, input: SidebarInput) -> InputOutcome {
        let outcome = self.sidebar.handle_input(input, &mut self.session);
        if outcome != InputOutcome::Ignored || self.sidebar.is_search_focused() {
            return outcome;
        }
        match input {
            SidebarInput::Next => self.move_selection(true),
            SidebarInput::Previous => self.move_selection(false),
            SidebarInput::Confirm | SidebarInput::Escape => InputOutcome::Ignored,
        }
    }

    /// Move the selection through the browse order, wrapping.
    fn move_selection(&mut self, forward: bool) -> InputOutcome {
        let grouped = self.grouped();
        let current = self.session.selected().map(ToOwned::to_owned);
        let next = self.with_view(&grouped, |view| {
            view.step_from(current.as_deref(), forward)
                .map(ToOwned::to_owned)
        });
        match next {
            Some(slug) => {
                self.session.select(Some(slug));
                InputOutcome::Handled
            }
            None => InputOutcome::Ignored,
        }
    }

    /// Select a note directly (mouse click in browse mode).
    pub fn select_note(&mut self, slug: &str) {
        if find_note(&self.notes, slug).is_some() {
            self.session.select(Some(slug.to_string()));
        }
    }

    // ── Swipe rows ──────────────────────────────────────────────────

    pub fn open_swipe_current(&mut self) {
        if let Some(slug) = self.current_slug() {
            self.sidebar.open_swipe(&slug);
        }
    }

    pub fn close_swipe_current(&mut self) {
        if let Some(slug) = self.current_slug() {
            self.sidebar.close_swipe(&slug);
        }
    }

    // ── Mutations ───────────────────────────────────────────────────

    pub fn toggle_pin_current(&mut self) {
        let Some(slug) = self.current_slug() else {
            return;
        };
        match self.sidebar.toggle_pin(&slug, &self.notes, &mut self.session) {
            Ok(true) => {
                let message = if self.session.is_pinned(&slug) {
                    "Pinned"
                } else {
                    "Unpinned"
                };
                self.toast_manager.success(message);
            }
            Ok(false) => {}
            Err(err) => {
                error!("event=pin_failed slug={} error={:#}", slug, err);
                self.toast_manager.error(format!("{:#}", err));
            }
        }
    }

    pub fn delete_current(&mut self) {
        let Some(slug) = self.current_slug() else {
            return;
        };
        let title = find_note(&self.notes, &slug).map(Note::display_title);
        match self.sidebar.delete(&slug, &self.notes, &mut self.session) {
            Ok(true) => {
                if let Some(title) = title {
                    self.toast_manager.success(format!("Deleted \"{}\"", title));
                }
                self.reload_or_toast();
            }
            Ok(false) => {}
            Err(err) => {
                warn!("event=delete_surfaced slug={} error={:#}", slug, err);
                self.toast_manager.error(format!("{:#}", err));
            }
        }
    }

    pub fn edit_current(&mut self) {
        if let Some(slug) = self.current_slug() {
            self.sidebar.edit(&slug, &self.notes, &mut self.session);
        }
    }

    pub fn new_note(&mut self) {
        match self.sidebar.create_note(&mut self.session) {
            Ok(_) => {
                self.toast_manager.success("New note created");
                self.reload_or_toast();
            }
            Err(err) => {
                error!("event=create_failed error={:#}", err);
                self.toast_manager.error(format!("{:#}", err));
                self.reload_or_toast();
            }
        }
    }

    // ── Housekeeping ────────────────────────────────────────────────

    /// Reset the chord state once its window has passed
    pub fn check_chord_timeout(&mut self) {
        if self.chord_state.is_expired() {
            self.chord_state = ChordState::None;
        }
    }

    /// Adjust sidebar width by `delta` percent and persist the layout
    pub fn resize_sidebar(&mut self, delta: i16) {
        if !self.config.layout.resize_sidebar(delta) || !self.persist_config {
            return;
        }
        if let Err(err) = self.config.save() {
            warn!("event=config_save_failed error={:#}", err);
            self.toast_manager.warning("Could not save layout");
        }
    }
}

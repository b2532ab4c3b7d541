use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, ChordState};
use crate::event_loop::KeyAction;
use crate::sidebar::{QueryEdit, SidebarInput};

/// Sidebar width step for Ctrl+. / Ctrl+,
const RESIZE_STEP: i16 = 5;

pub(crate) fn handle_key_event(app: &mut App, key: KeyEvent) -> KeyAction {
    // True global keybindings, work while typing too
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::CONTROL) => return KeyAction::Quit,
        (KeyCode::Char('.'), KeyModifiers::CONTROL) => {
            app.resize_sidebar(RESIZE_STEP);
            return KeyAction::Continue;
        }
        (KeyCode::Char(','), KeyModifiers::CONTROL) => {
            app.resize_sidebar(-RESIZE_STEP);
            return KeyAction::Continue;
        }
        _ => {}
    }

    if app.sidebar.is_search_focused() {
        handle_search_key(app, key);
        return KeyAction::Continue;
    }

    handle_sidebar_key_normal(app, key)
}

/// Keys while the search field has focus: text editing plus Enter / Esc.
fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.handle_sidebar_input(SidebarInput::Escape);
        }
        KeyCode::Enter => {
            let has_results = app.sidebar.results().is_some_and(|r| !r.is_empty());
            if has_results {
                app.handle_sidebar_input(SidebarInput::Confirm);
            } else {
                // Nothing to open; just leave the field
                app.sidebar.blur_search();
            }
        }
        KeyCode::Down => {
            app.handle_sidebar_input(SidebarInput::Next);
        }
        KeyCode::Up => {
            app.handle_sidebar_input(SidebarInput::Previous);
        }
        KeyCode::Char(c)
            if key.modifiers == KeyModifiers::NONE || key.modifiers == KeyModifiers::SHIFT =>
        {
            app.edit_query(QueryEdit::Insert(c));
        }
        KeyCode::Backspace => app.edit_query(QueryEdit::Backspace),
        KeyCode::Delete => app.edit_query(QueryEdit::Delete),
        KeyCode::Left => app.edit_query(QueryEdit::Left),
        KeyCode::Right => app.edit_query(QueryEdit::Right),
        KeyCode::Home => app.edit_query(QueryEdit::Home),
        KeyCode::End => app.edit_query(QueryEdit::End),
        _ => {}
    }
}

/// Handle sidebar keys in normal mode
pub(crate) fn handle_sidebar_key_normal(app: &mut App, key: KeyEvent) -> KeyAction {
    // "dd" chord: second 'd' within the window deletes
    if let ChordState::DeletePending { .. } = app.chord_state {
        app.chord_state = ChordState::None;
        if key.code == KeyCode::Char('d') {
            app.delete_current();
            return KeyAction::Continue;
        }
        // Any other key cancels the chord; Esc only cancels
        if key.code == KeyCode::Esc {
            return KeyAction::Continue;
        }
    }

    match key.code {
        KeyCode::Char('q') => return KeyAction::Quit,
        KeyCode::Char('/') => app.focus_search(),
        KeyCode::Esc => {
            app.handle_sidebar_input(SidebarInput::Escape);
        }
        KeyCode::Enter => {
            app.handle_sidebar_input(SidebarInput::Confirm);
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.handle_sidebar_input(SidebarInput::Next);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.handle_sidebar_input(SidebarInput::Previous);
        }
        KeyCode::Char('l') | KeyCode::Right => app.open_swipe_current(),
        KeyCode::Char('h') | KeyCode::Left => app.close_swipe_current(),
        KeyCode::Char('p') => app.toggle_pin_current(),
        KeyCode::Char('e') => app.edit_current(),
        KeyCode::Char('n') => app.new_note(),
        KeyCode::Char('d') => {
            app.chord_state = ChordState::DeletePending {
                started_at: Instant::now(),
            };
        }
        _ => {}
    }
    KeyAction::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Session;
    use crate::config::Config;
    use crate::note::Note;
    use crate::pins::PinStore;
    use crate::store::MemoryNoteStore;
    use chrono::{Duration, Utc};

    fn app() -> App {
        let mut notes = vec![
            Note::new("1", "groceries", "Groceries"),
            Note::new("2", "garden", "Garden plan"),
            Note::new("3", "books", "Books"),
        ];
        for (i, note) in notes.iter_mut().enumerate() {
            note.created_at = Utc::now() - Duration::minutes(i as i64);
        }
        let session = Session::new(
            Box::new(MemoryNoteStore::new(notes)),
            PinStore::in_memory(Default::default()),
        );
        App::new(Config::default(), session, None, false).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) -> KeyAction {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn slash_focuses_search_and_letters_become_query() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "gar");

        assert_eq!(app.sidebar.search_field().query(), "gar");
        assert_eq!(app.sidebar.results().map(<[Note]>::len), Some(1));
        // 'j' and 'q' were not treated as commands while typing
        type_str(&mut app, "jq");
        assert_eq!(app.sidebar.search_field().query(), "garjq");
    }

    #[test]
    fn enter_in_focused_search_opens_highlighted_note() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "ook");
        press(&mut app, KeyCode::Enter);

        assert!(!app.sidebar.is_searching());
        assert!(!app.sidebar.is_search_focused());
        assert_eq!(app.session.selected(), Some("books"));
    }

    #[test]
    fn enter_with_no_results_just_blurs() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "zzz");
        press(&mut app, KeyCode::Enter);

        assert!(!app.sidebar.is_search_focused());
        assert!(app.sidebar.is_searching());
    }

    #[test]
    fn escape_blurs_then_clears() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "o");
        press(&mut app, KeyCode::Esc);
        assert!(app.sidebar.is_searching());

        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.sidebar.highlighted_index(), 1);

        press(&mut app, KeyCode::Esc);
        assert!(!app.sidebar.is_searching());
    }

    #[test]
    fn dd_deletes_current_note() {
        let mut app = app();
        assert_eq!(app.session.selected(), Some("groceries"));
        press(&mut app, KeyCode::Char('d'));
        assert!(matches!(app.chord_state, ChordState::DeletePending { .. }));
        press(&mut app, KeyCode::Char('d'));

        assert_eq!(app.notes.len(), 2);
        assert_eq!(app.session.selected(), Some("garden"));
    }

    #[test]
    fn d_then_other_key_cancels_chord() {
        let mut app = app();
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('j'));

        assert_eq!(app.notes.len(), 3);
        assert!(matches!(app.chord_state, ChordState::None));
        assert_eq!(app.session.selected(), Some("garden"));
    }

    #[test]
    fn l_and_h_open_and_close_swipe_row() {
        let mut app = app();
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.sidebar.open_swipe_slug(), Some("groceries"));
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.sidebar.open_swipe_slug(), None);
    }

    #[test]
    fn p_pins_and_n_creates() {
        let mut app = app();
        press(&mut app, KeyCode::Char('p'));
        assert!(app.session.is_pinned("groceries"));

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.notes.len(), 4);
    }

    #[test]
    fn q_quits_only_outside_search() {
        let mut app = app();
        assert!(matches!(press(&mut app, KeyCode::Char('q')), KeyAction::Quit));

        press(&mut app, KeyCode::Char('/'));
        assert!(matches!(
            press(&mut app, KeyCode::Char('q')),
            KeyAction::Continue
        ));
        let ctrl_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(matches!(handle_key_event(&mut app, ctrl_q), KeyAction::Quit));
    }
}

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{poll, read, Event};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};

use crate::app::App;
use crate::handlers::keyboard::handle_key_event;
use crate::handlers::mouse::handle_mouse_event;
use crate::ui::layout::create_layout_with_help;
use crate::ui::sidebar::Sidebar;
use crate::ui::{DetailPane, ToastWidget};

/// Action returned from key handling
pub(crate) enum KeyAction {
    Continue,
    Quit,
}

pub fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Drop a half-typed "d" chord after its window
        app.check_chord_timeout();

        // Pick up edits made to the notes file by other programs
        app.check_notes_updates();

        // Update toast manager (remove expired)
        app.toast_manager.update();

        terminal.draw(|f| draw_ui(f, app))?;

        if poll(Duration::from_millis(100))? {
            match read()? {
                Event::Key(key) => match handle_key_event(app, key) {
                    KeyAction::Continue => {}
                    KeyAction::Quit => app.should_quit = true,
                },
                Event::Mouse(mouse) => handle_mouse_event(app, mouse),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn draw_ui(f: &mut Frame, app: &mut App) {
    let (sidebar_area, detail_area, help_area) =
        create_layout_with_help(f.area(), &app.config.layout);

    let grouped = app.grouped();
    let mut sidebar_state = std::mem::take(&mut app.sidebar_state);
    app.with_view(&grouped, |view| {
        let sidebar = Sidebar::new(view, app.sidebar.search_field());
        f.render_stateful_widget(sidebar, sidebar_area, &mut sidebar_state);
    });
    app.sidebar_state = sidebar_state;

    let note = app.selected_note();
    let pinned = note.is_some_and(|n| app.session.is_pinned(&n.slug));
    f.render_widget(DetailPane::new(note, pinned), detail_area);

    draw_help_bar(f, help_area, app);

    let toasts: Vec<_> = app.toast_manager.visible_toasts();
    if !toasts.is_empty() {
        ToastWidget::new(&toasts).render(f, f.area());
    }
}

fn key_hint(key: &'static str, label: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(key, Style::default().fg(Color::Cyan)),
        Span::raw(label),
    ]
}

fn draw_help_bar(f: &mut Frame, area: Rect, app: &App) {
    if app.chord_state.pending_display().is_some() {
        let msg = Paragraph::new(Line::from(vec![
            Span::styled(
                " PENDING ",
                Style::default().fg(Color::Black).bg(Color::Yellow),
            ),
            Span::raw(" d (press d again to delete, Esc to cancel)"),
        ]))
        .style(Style::default().bg(Color::DarkGray));
        f.render_widget(msg, area);
        return;
    }

    let (mode, mode_style, hints): (&str, Style, Vec<[Span<'static>; 2]>) =
        if app.sidebar.is_search_focused() {
            (
                " SEARCH ",
                Style::default().fg(Color::Black).bg(Color::Green),
                vec![
                    key_hint(" Enter ", "open "),
                    key_hint(" Esc ", "leave field "),
                    key_hint(" C-q ", "quit"),
                ],
            )
        } else if app.sidebar.is_searching() {
            (
                " RESULTS ",
                Style::default().fg(Color::Black).bg(Color::Yellow),
                vec![
                    key_hint(" j/k ", "move "),
                    key_hint(" Enter ", "open "),
                    key_hint(" / ", "edit query "),
                    key_hint(" p ", "pin "),
                    key_hint(" dd ", "delete "),
                    key_hint(" Esc ", "clear "),
                ],
            )
        } else {
            (
                " NOTES ",
                Style::default().fg(Color::Black).bg(Color::Blue),
                vec![
                    key_hint(" j/k ", "move "),
                    key_hint(" / ", "search "),
                    key_hint(" l/h ", "actions "),
                    key_hint(" p ", "pin "),
                    key_hint(" e ", "edit "),
                    key_hint(" dd ", "delete "),
                    key_hint(" n ", "new "),
                    key_hint(" q ", "quit"),
                ],
            )
        };

    let mut spans = vec![Span::styled(mode, mode_style)];
    spans.extend(hints.into_iter().flatten());

    let help = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    f.render_widget(help, area);
}

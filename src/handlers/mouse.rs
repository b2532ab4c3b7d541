use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::app::{App, DragStart};
use crate::sidebar::SidebarInput;

/// Horizontal travel (in columns) that turns a press into a swipe
const SWIPE_THRESHOLD: u16 = 3;

pub(crate) fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if app.sidebar_state.is_search_row(mouse.column, mouse.row) {
                app.drag_start = None;
                app.focus_search();
                return;
            }
            app.drag_start = app
                .sidebar_state
                .hit_test(mouse.column, mouse.row)
                .map(|hit| DragStart {
                    column: mouse.column,
                    slug: hit.slug.clone(),
                    result_index: hit.result_index,
                });
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let Some(start) = app.drag_start.take() else {
                return;
            };
            let travel = mouse.column.abs_diff(start.column);
            if travel >= SWIPE_THRESHOLD {
                // Leftward reveals the actions, rightward hides them
                if mouse.column < start.column {
                    app.sidebar.open_swipe(&start.slug);
                } else {
                    app.sidebar.close_swipe(&start.slug);
                }
                return;
            }
            match start.result_index {
                Some(index) => {
                    app.sidebar.highlight_result(index);
                }
                None => app.select_note(&start.slug),
            }
        }
        MouseEventKind::ScrollUp => {
            app.handle_sidebar_input(SidebarInput::Previous);
        }
        MouseEventKind::ScrollDown => {
            app.handle_sidebar_input(SidebarInput::Next);
        }
        _ => {}
    }
}

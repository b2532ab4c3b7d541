use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::config::LayoutConfig;

/// Split the screen into sidebar, detail pane and a one-line help bar at the bottom.
pub fn create_layout_with_help(area: Rect, layout: &LayoutConfig) -> (Rect, Rect, Rect) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let main_area = vertical[0];
    let help_area = vertical[1];

    let sidebar_pct = u16::from(layout.sidebar_width_pct);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(sidebar_pct),
            Constraint::Percentage(100 - sidebar_pct),
        ])
        .split(main_area);

    (horizontal[0], horizontal[1], help_area)
}

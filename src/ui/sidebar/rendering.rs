//! Sidebar widget rendering: the `Sidebar` struct and its `StatefulWidget` implementation.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, StatefulWidget, Widget},
};

use crate::sidebar::{NoteRow, SearchField, SidebarView};

use super::{RowHit, SidebarState};

const SEARCH_PREFIX: &str = "/ ";
const SEARCH_PLACEHOLDER: &str = "Search notes...";

/// Sidebar widget for displaying notes.
pub struct Sidebar<'a> {
    view: &'a SidebarView<'a>,
    field: &'a SearchField,
}

impl<'a> Sidebar<'a> {
    pub fn new(view: &'a SidebarView<'a>, field: &'a SearchField) -> Self {
        Self { view, field }
    }
}

impl StatefulWidget for Sidebar<'_> {
    type State = SidebarState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let border_style = if self.field.is_focused() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Cyan)
        };

        let block = Block::default()
            .title(" Notes ")
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 3 {
            state.set_layout(Rect::default(), Rect::default(), Vec::new());
            return;
        }

        let search_area = Rect { height: 1, ..inner };
        let header_area = Rect {
            y: inner.y + 1,
            height: 1,
            ..inner
        };
        let list_area = Rect {
            y: inner.y + 2,
            height: inner.height - 2,
            ..inner
        };

        render_search_row(search_area, buf, self.field);
        render_notes_header(header_area, buf, self.view);

        let width = usize::from(list_area.width).saturating_sub(2);
        let (items, hits, selected) = build_list_items(self.view, width);

        state.list_state.select(selected);
        if selected.is_none() {
            *state.list_state.offset_mut() = 0;
        }

        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        StatefulWidget::render(list, list_area, buf, &mut state.list_state);
        state.set_layout(search_area, list_area, hits);
    }
}

/// Render the search input row at the top of the sidebar
fn render_search_row(area: Rect, buf: &mut Buffer, field: &SearchField) {
    let query = field.query();

    if !field.is_focused() {
        let line = if query.is_empty() {
            Line::from(vec![
                Span::styled(SEARCH_PREFIX, Style::default().fg(Color::DarkGray)),
                Span::styled(SEARCH_PLACEHOLDER, Style::default().fg(Color::DarkGray)),
            ])
        } else {
            Line::from(vec![
                Span::styled(SEARCH_PREFIX, Style::default().fg(Color::Yellow)),
                Span::raw(query.to_string()),
            ])
        };
        Paragraph::new(line).render(area, buf);
        return;
    }

    let mut spans = vec![Span::styled(
        SEARCH_PREFIX,
        Style::default().fg(Color::Yellow),
    )];

    // Scroll the text horizontally so the cursor stays visible
    let chars: Vec<char> = query.chars().collect();
    let available = usize::from(area.width).saturating_sub(SEARCH_PREFIX.len() + 1);
    let cursor = field.cursor();
    let start = (cursor + 1)
        .saturating_sub(available.max(1))
        .min(chars.len());
    let end = (start + available).min(chars.len());

    for (i, c) in chars[start..end].iter().enumerate() {
        if start + i == cursor {
            spans.push(Span::styled(
                c.to_string(),
                Style::default().bg(Color::White).fg(Color::Black),
            ));
        } else {
            spans.push(Span::raw(c.to_string()));
        }
    }
    if cursor >= chars.len() {
        spans.push(Span::styled(" ", Style::default().bg(Color::White)));
    }

    Paragraph::new(Line::from(spans)).render(area, buf);
}

fn render_notes_header(area: Rect, buf: &mut Buffer, view: &SidebarView) {
    let title = match view {
        SidebarView::Browse(_) => "Notes".to_string(),
        SidebarView::Results(rows) => format!("Results ({})", rows.len()),
        SidebarView::NoResults => "Results (0)".to_string(),
    };
    let line = Line::from(vec![
        Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
        Span::styled("  n new", Style::default().fg(Color::DarkGray)),
    ]);
    Paragraph::new(line).render(area, buf);
}

/// Flatten the view into list items, a parallel hit table and the line to highlight.
fn build_list_items(
    view: &SidebarView,
    width: usize,
) -> (Vec<ListItem<'static>>, Vec<Option<RowHit>>, Option<usize>) {
    let mut items = Vec::new();
    let mut hits = Vec::new();
    let mut selected = None;

    match view {
        SidebarView::Browse(sections) => {
            for section in sections {
                items.push(ListItem::new(Line::from(Span::styled(
                    section.label.to_string(),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD),
                ))));
                hits.push(None);

                for row in &section.rows {
                    if row.selected {
                        selected = Some(items.len());
                    }
                    items.push(row_item(row, width, false));
                    hits.push(Some(RowHit {
                        slug: row.note.slug.clone(),
                        result_index: None,
                    }));
                }
            }
        }
        SidebarView::Results(rows) => {
            for (i, row) in rows.iter().enumerate() {
                if row.highlighted {
                    selected = Some(items.len());
                }
                items.push(row_item(row, width, true));
                hits.push(Some(RowHit {
                    slug: row.note.slug.clone(),
                    result_index: Some(i),
                }));
            }
        }
        SidebarView::NoResults => {
            items.push(ListItem::new(Line::from(Span::styled(
                "No results found",
                Style::default().fg(Color::DarkGray),
            ))));
            hits.push(None);
        }
    }

    (items, hits, selected)
}

fn row_item(row: &NoteRow, width: usize, show_pin: bool) -> ListItem<'static> {
    if row.swipe_open {
        let pin_label = if row.pinned { "Unpin" } else { "Pin" };
        return ListItem::new(Line::from(vec![
            Span::styled(
                format!(" p {} ", pin_label),
                Style::default().fg(Color::Black).bg(Color::Yellow),
            ),
            Span::raw(" "),
            Span::styled(" e Edit ", Style::default().fg(Color::Black).bg(Color::Blue)),
            Span::raw(" "),
            Span::styled(" dd Delete ", Style::default().fg(Color::White).bg(Color::Red)),
        ]));
    }

    let mut spans = Vec::new();
    let mut used = 0;
    if show_pin && row.pinned {
        spans.push(Span::styled("* ", Style::default().fg(Color::Yellow)));
        used += 2;
    }

    let title = truncate_string(&row.note.display_title(), width.saturating_sub(used));
    used += title.chars().count();
    let title_style = if row.selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    spans.push(Span::styled(title, title_style));

    let preview = row.note.preview();
    let room = width.saturating_sub(used + 2);
    if !preview.is_empty() && room > 4 {
        spans.push(Span::styled(
            format!("  {}", truncate_string(preview, room)),
            Style::default().fg(Color::DarkGray),
        ));
    }

    ListItem::new(Line::from(spans))
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

//! Detail pane showing the selected note.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::note::Note;

/// Read-only view of one note.
pub struct DetailPane<'a> {
    note: Option<&'a Note>,
    pinned: bool,
}

impl<'a> DetailPane<'a> {
    pub fn new(note: Option<&'a Note>, pinned: bool) -> Self {
        Self { note, pinned }
    }
}

impl Widget for DetailPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        let Some(note) = self.note else {
            Paragraph::new(Line::from(Span::styled(
                "No note selected. Press n to create one.",
                Style::default().fg(Color::DarkGray),
            )))
            .block(block)
            .render(area, buf);
            return;
        };

        let mut lines = vec![
            Line::from(Span::styled(
                note.display_title(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                meta_line(note, self.pinned),
                Style::default().fg(Color::DarkGray),
            )),
            Line::default(),
        ];
        if note.content.trim().is_empty() {
            lines.push(Line::from(Span::styled(
                "(empty)",
                Style::default().fg(Color::DarkGray),
            )));
        } else {
            lines.extend(note.content.lines().map(|l| Line::from(l.to_string())));
        }

        Paragraph::new(lines)
            .block(block.title(format!(" {} ", note.slug)))
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

fn meta_line(note: &Note, pinned: bool) -> String {
    let created = note.created_at.format("%Y-%m-%d %H:%M");
    if pinned {
        format!("Created {} · pinned", created)
    } else {
        format!("Created {}", created)
    }
}

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::ui::toast::{Toast, ToastType};

const MIN_TOAST_WIDTH: u16 = 24;
const MAX_TOAST_WIDTH: u16 = 48;
const TOAST_HEIGHT: u16 = 3;

/// Stack of toasts drawn in the bottom-right corner, newest at the bottom.
pub struct ToastWidget<'a> {
    toasts: &'a [&'a Toast],
}

impl<'a> ToastWidget<'a> {
    pub fn new(toasts: &'a [&'a Toast]) -> Self {
        Self { toasts }
    }

    pub fn render(self, frame: &mut Frame, area: Rect) {
        for (idx, toast) in self.toasts.iter().rev().enumerate() {
            let toast_area = toast_area(area, &toast.message, idx as u16);
            if toast_area.height == 0 {
                break;
            }

            frame.render_widget(Clear, toast_area);

            let style = Style::default().fg(toast_color(toast.toast_type));
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(style)
                .style(Style::default().bg(Color::Black));

            let text = Paragraph::new(Line::from(vec![
                Span::styled(icon(toast.toast_type), style.add_modifier(Modifier::BOLD)),
                Span::raw(" "),
                Span::raw(toast.message.as_str()),
            ]))
            .block(block);

            frame.render_widget(text, toast_area);
        }
    }
}

/// Rect for the `index`-th toast counted upwards from the bottom edge.
fn toast_area(area: Rect, message: &str, index: u16) -> Rect {
    let wanted = u16::try_from(message.chars().count())
        .unwrap_or(u16::MAX)
        .saturating_add(6);
    let width = wanted.clamp(MIN_TOAST_WIDTH, MAX_TOAST_WIDTH).min(area.width);
    let offset = index * TOAST_HEIGHT + TOAST_HEIGHT + 1;
    if offset > area.height {
        return Rect::default();
    }

    let x = area.right().saturating_sub(width + 1);
    let y = area.bottom() - offset;
    Rect::new(x, y, width, TOAST_HEIGHT)
}

fn icon(toast_type: ToastType) -> &'static str {
    match toast_type {
        ToastType::Info => "ℹ",
        ToastType::Success => "✓",
        ToastType::Warning => "⚠",
        ToastType::Error => "✗",
    }
}

fn toast_color(toast_type: ToastType) -> Color {
    match toast_type {
        ToastType::Info => Color::Cyan,
        ToastType::Success => Color::Green,
        ToastType::Warning => Color::Yellow,
        ToastType::Error => Color::Red,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_stack_upwards_and_stop_at_top() {
        let area = Rect::new(0, 0, 80, 10);
        let first = toast_area(area, "Pinned", 0);
        let second = toast_area(area, "Pinned", 1);
        assert_eq!(first.y, 6);
        assert_eq!(second.y, 3);
        assert_eq!(first.width, MIN_TOAST_WIDTH);
        assert_eq!(toast_area(area, "Pinned", 3), Rect::default());
    }

    #[test]
    fn long_messages_are_capped() {
        let area = Rect::new(0, 0, 120, 20);
        let message = "x".repeat(200);
        assert_eq!(toast_area(area, &message, 0).width, MAX_TOAST_WIDTH);
    }

    #[test]
    fn messages_longer_than_u16_do_not_overflow_width() {
        let area = Rect::new(0, 0, 120, 20);
        let message = "x".repeat(usize::from(u16::MAX) + 10);
        assert_eq!(toast_area(area, &message, 0).width, MAX_TOAST_WIDTH);
    }
}

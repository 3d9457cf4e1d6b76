//! Key binding overlay.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::{centered_rect, theme};

const BINDINGS: [(&str, &str); 9] = [
    ("n", "new todo"),
    ("t / space", "toggle completed"),
    ("d / del", "delete (moves to archive)"),
    ("a / tab", "switch active / archive"),
    ("j k / ↑ ↓", "move selection"),
    ("g G", "first / last row"),
    ("?", "toggle this help"),
    ("q / esc", "quit"),
    ("ctrl+c", "quit from anywhere"),
];

/// Render the help overlay.
pub fn render(frame: &mut Frame, area: Rect) {
    let height = u16::try_from(BINDINGS.len() + 2).unwrap_or(u16::MAX);
    let popup = centered_rect(44, height, area);

    let lines: Vec<Line> = BINDINGS
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!("{keys:>12}"), theme::bold()),
                Span::raw("  "),
                Span::styled(*action, theme::normal()),
            ])
        })
        .collect();

    let block = Block::default()
        .title(" Keys ")
        .borders(Borders::ALL)
        .border_style(theme::highlighted());

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme::Theme;

/// Braille spinner frames, advanced once per event loop tick
pub const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Spinner character for a tick count
pub fn spinner_char(tick: usize) -> char {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

/// Spinner span, also used inline for rows with a ping in flight
pub fn spinner_span(tick: usize, theme: &Theme) -> Span<'static> {
    Span::styled(spinner_char(tick).to_string(), Style::default().fg(theme.accent))
}

/// Centered loading box shown before a page has any data
pub fn render_loading_indicator(
    frame: &mut Frame,
    area: Rect,
    tick: usize,
    label: &str,
    theme: &Theme,
) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("   {}   ", spinner_char(tick)),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                label.to_string(),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled("...", theme.muted_style()),
        ]),
        Line::from(""),
    ];

    let loading = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent)),
    );

    let [row] = Layout::vertical([Constraint::Length(7)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(30)])
        .flex(Flex::Center)
        .areas(row);

    frame.render_widget(loading, cell);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_spinner_wraps() {
        assert_eq!(SPINNER_FRAMES.len(), 10);
        assert_eq!(spinner_char(0), '⠋');
        assert_eq!(spinner_char(9), '⠏');
        assert_eq!(spinner_char(10), '⠋');
    }

    #[test]
    fn test_render_loading_indicator() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal
            .draw(|frame| {
                render_loading_indicator(frame, frame.area(), 3, "Loading jobs", &Theme::dark())
            })
            .unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(content.contains("Loading jobs..."));
        assert!(content.contains(spinner_char(3)));
    }
}

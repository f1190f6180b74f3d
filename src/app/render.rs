use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table},
};

use super::App;
use super::types::MessageType;
use crate::navigation::Section;
use crate::ui::centered_rect;

impl App {
    pub(super) fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(self.theme.base()), area);

        let search_height = if self.search.is_some() { 3 } else { 0 };
        let [header, search, content, status] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(search_height),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .areas(area);

        self.render_header(frame, header);
        if self.search.is_some() {
            self.render_search_input(frame, search);
        }
        self.view.render(frame, content, &self.theme, self.tick);
        self.render_statusbar(frame, status);

        if self.show_help {
            self.render_help(frame, area);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                "Relique",
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
        ];

        let crumbs = self.route.breadcrumbs();
        let last = crumbs.len().saturating_sub(1);
        for (idx, crumb) in crumbs.into_iter().enumerate() {
            if idx > 0 {
                spans.push(Span::styled(" > ", self.theme.muted_style()));
            }
            let style = if idx == last {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.text)
            };
            spans.push(Span::styled(crumb.name, style));
        }

        let current = self.route.section();
        let mut tabs = vec![Span::raw(" ")];
        for (idx, section) in Section::ALL.iter().enumerate() {
            let style = if Some(*section) == current {
                self.theme.title_style().add_modifier(Modifier::REVERSED)
            } else {
                self.theme.muted_style()
            };
            tabs.push(Span::styled(format!("{} {}", idx + 1, section.label()), style));
            tabs.push(Span::raw(" "));
        }

        let header = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.theme.border_style())
                .title(Line::from(tabs)),
        );
        frame.render_widget(header, area);
    }

    fn render_search_input(&self, frame: &mut Frame, area: Rect) {
        let Some(input) = &self.search else {
            return;
        };
        let width = area.width.saturating_sub(2) as usize;
        let scroll = input.visual_scroll(width);

        let paragraph = Paragraph::new(input.value())
            .scroll((0, scroll as u16))
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Search - Enter to apply, Esc to clear")
                    .border_style(Style::default().fg(Color::Yellow)),
            );
        frame.render_widget(paragraph, area);

        let cursor = input.visual_cursor().saturating_sub(scroll) as u16;
        frame.set_cursor_position((area.x + 1 + cursor, area.y + 1));
    }

    fn render_statusbar(&self, frame: &mut Frame, area: Rect) {
        let line = match &self.status {
            Some(status) => {
                let color = match status.message_type {
                    MessageType::Info => Color::Blue,
                    MessageType::Error => Color::Red,
                };
                Line::from(Span::styled(
                    status.text.clone(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ))
            }
            None => {
                let hints = if self.view_has_pings() {
                    "j/k: Move  |  Enter: Open  |  /: Search  |  s: Sort  |  p/P: Ping  |  ?: Help  |  q: Quit"
                } else {
                    "j/k: Move  |  Enter: Open  |  /: Search  |  s: Sort  |  r: Refresh  |  ?: Help  |  q: Quit"
                };
                Line::from(Span::styled(hints, Style::default().fg(self.theme.text)))
            }
        };

        let server = Line::from(Span::styled(
            format!(" {} | {} ", self.config.server.url, self.theme.name.as_str()),
            self.theme.muted_style(),
        ))
        .alignment(Alignment::Right);

        let status = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.theme.border_style())
                .title("Status")
                .title(server),
        );
        frame.render_widget(status, area);
    }

    fn view_has_pings(&self) -> bool {
        matches!(
            self.view,
            crate::view::View::Clients(_) | crate::view::View::ClientDetails(_)
        )
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let entries = self.keymap.describe();
        let rows: Vec<Row> = entries
            .iter()
            .map(|(command, keys)| {
                Row::new(vec![
                    Span::styled(
                        keys.join(", "),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(command.description()),
                ])
            })
            .collect();

        let popup = centered_rect(64, entries.len() as u16 + 2, area);
        let table = Table::new(rows, [Constraint::Length(22), Constraint::Fill(1)]).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Keys - any key to close ")
                .border_style(Style::default().fg(Color::Yellow))
                .style(Style::default().bg(Color::Black).fg(Color::White)),
        );

        frame.render_widget(Clear, popup);
        frame.render_widget(table, popup);
    }
}

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
};

use unicode_width::UnicodeWidthStr;

use super::theme::Theme;

/// Titled key/value panel used by the detail pages
#[derive(Debug, Clone, Default)]
pub struct Card {
    pub title: Line<'static>,
    pub rows: Vec<(String, Line<'static>)>,
}

impl Card {
    pub fn new(title: impl Into<Line<'static>>) -> Self {
        Self {
            title: title.into(),
            rows: Vec::new(),
        }
    }

    pub fn row(mut self, key: impl Into<String>, value: impl Into<Line<'static>>) -> Self {
        self.rows.push((key.into(), value.into()));
        self
    }

    /// Lines needed to draw every row plus the borders
    pub fn height(&self) -> u16 {
        self.rows.len() as u16 + 2
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.rows
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.to_string())
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let key_width = self
            .rows
            .iter()
            .map(|(k, _)| k.width())
            .max()
            .unwrap_or(0) as u16;

        let rows: Vec<Row> = self
            .rows
            .iter()
            .map(|(key, value)| {
                Row::new(vec![
                    Cell::from(key.clone()).style(theme.muted_style()),
                    Cell::from(value.clone()),
                ])
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .title(self.title.clone().style(theme.title_style()));

        let table = Table::new(rows, [Constraint::Length(key_width + 2), Constraint::Fill(1)])
            .block(block);
        frame.render_widget(table, area);
    }
}

/// Bordered block of free text, for messages such as "not found"
pub fn render_message(frame: &mut Frame, area: Rect, title: &str, message: &str, theme: &Theme) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(theme.text).add_modifier(Modifier::ITALIC),
    )))
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .title(Span::styled(format!(" {} ", title), theme.title_style())),
    );
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_rows() {
        let card = Card::new("Repository")
            .row("Type", "local")
            .row("Storage path", Line::from(vec![Span::raw("/var/"), Span::raw("backups")]));
        assert_eq!(card.height(), 4);
        assert_eq!(card.value("Storage path").as_deref(), Some("/var/backups"));
        assert_eq!(card.value("Missing"), None);
    }
}

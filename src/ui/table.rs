use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use super::loading::spinner_span;
use super::theme::Theme;
use crate::table::{Column, DataTable, PageItem, SortDirection, TableBody};

pub const EMPTY_MESSAGE: &str = "Nothing to show";

/// Where the keyboard is inside a table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCursor {
    /// Selected row within the current page
    pub selected: usize,
    /// Column the sort key acts on
    pub column: usize,
    pub focused: bool,
}

fn sort_marker(direction: Option<SortDirection>) -> &'static str {
    match direction {
        Some(SortDirection::Asc) => " ▲",
        Some(SortDirection::Desc) => " ▼",
        None => "",
    }
}

fn widths<T>(columns: &[Column<T>]) -> Vec<Constraint> {
    columns
        .iter()
        .map(|c| c.width.map(Constraint::Length).unwrap_or(Constraint::Fill(1)))
        .collect()
}

fn header_row<T>(table: &DataTable<T>, cursor: TableCursor, theme: &Theme) -> Row<'static> {
    let sortable = table.options().sorted;
    let cells = table.columns().iter().enumerate().map(|(idx, column)| {
        let text = format!("{}{}", column.header, sort_marker(table.sort_direction(idx)));
        let mut style = Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD);
        if cursor.focused && sortable && idx == cursor.column {
            style = style.add_modifier(Modifier::REVERSED);
        }
        Cell::from(text).style(style)
    });
    Row::new(cells).height(1)
}

fn title_line<T>(table: &DataTable<T>, title: &str, theme: &Theme, tick: usize) -> Line<'static> {
    let mut spans = vec![Span::styled(format!(" {} ", title), theme.title_style())];
    if !table.global_filter().is_empty() {
        spans.push(Span::styled(
            format!("[filter: {}] ", table.global_filter()),
            theme.muted_style(),
        ));
    }
    if table.is_loading() {
        spans.push(spinner_span(tick, theme));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// "Showing a-b of n  ‹ 1 2 … 9 ›  25/page"
pub fn pagination_line<T>(table: &DataTable<T>, theme: &Theme) -> Line<'static> {
    let (first, last, total) = table.showing_range();
    let mut spans = vec![
        Span::styled(
            format!("Showing {}-{} of {}", first, last, total),
            Style::default().fg(theme.text),
        ),
        Span::raw("  "),
    ];

    let arrow = |enabled: bool, symbol: &'static str| {
        if enabled {
            Span::styled(symbol, Style::default().fg(theme.accent))
        } else {
            Span::styled(symbol, theme.muted_style())
        }
    };

    spans.push(arrow(table.can_previous_page(), "‹"));
    for item in table.page_items() {
        spans.push(Span::raw(" "));
        match item {
            PageItem::Page(idx) if idx == table.page_index() => spans.push(Span::styled(
                (idx + 1).to_string(),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            )),
            PageItem::Page(idx) => spans.push(Span::styled(
                (idx + 1).to_string(),
                Style::default().fg(theme.text),
            )),
            PageItem::Ellipsis => spans.push(Span::styled("…", theme.muted_style())),
        }
    }
    spans.push(Span::raw(" "));
    spans.push(arrow(table.can_next_page(), "›"));
    spans.push(Span::styled(
        format!("  {}/page", table.page_size()),
        theme.muted_style(),
    ));

    Line::from(spans)
}

/// Draw a table with its header, body state and pagination footer
pub fn render_data_table<T>(
    frame: &mut Frame,
    area: Rect,
    table: &DataTable<T>,
    title: &str,
    cursor: TableCursor,
    theme: &Theme,
    tick: usize,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if cursor.focused {
            Style::default().fg(theme.accent)
        } else {
            theme.border_style()
        })
        .title(title_line(table, title, theme, tick));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let paginated = table.options().paginated;
    let [body_area, footer_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(if paginated { 1 } else { 0 }),
    ])
    .areas(inner);

    let header = header_row(table, cursor, theme);
    let widths = widths(table.columns());

    match table.body() {
        TableBody::Empty => {
            frame.render_widget(Table::new(Vec::<Row>::new(), widths).header(header), body_area);
            let message_area = Rect {
                y: body_area.y.saturating_add(1),
                height: body_area.height.saturating_sub(1),
                ..body_area
            };
            let empty = Paragraph::new(Line::from(Span::styled(
                EMPTY_MESSAGE,
                theme.muted_style().add_modifier(Modifier::ITALIC),
            )))
            .alignment(Alignment::Center);
            frame.render_widget(empty, message_area);
        }
        TableBody::Loading(rows) => {
            let skeleton = theme.skeleton_style(tick);
            let rows: Vec<Row> = rows
                .into_iter()
                .map(|row| {
                    Row::new(
                        table
                            .active_columns()
                            .iter()
                            .map(|c| Cell::from(c.render(row)).style(skeleton)),
                    )
                })
                .collect();
            frame.render_widget(Table::new(rows, widths).header(header), body_area);
        }
        TableBody::Rows(rows) => {
            let rows: Vec<Row> = rows
                .into_iter()
                .map(|row| Row::new(table.columns().iter().map(|c| Cell::from(c.render(row)))))
                .collect();
            let mut state = TableState::default();
            if cursor.focused {
                state.select(Some(cursor.selected));
            }
            let widget = Table::new(rows, widths)
                .header(header)
                .row_highlight_style(theme.selection_style())
                .highlight_symbol("> ");
            frame.render_stateful_widget(widget, body_area, &mut state);
        }
    }

    if paginated && !matches!(table.body(), TableBody::Empty) {
        frame.render_widget(Paragraph::new(pagination_line(table, theme)), footer_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{CellValue, SKELETON, TableOptions};
    use ratatui::{Terminal, backend::TestBackend};

    struct Host {
        name: &'static str,
    }

    fn table(names: &[&'static str], options: TableOptions) -> DataTable<Host> {
        let columns = vec![Column::new("name", "Name", |h: &Host| CellValue::from(h.name))];
        DataTable::new(columns, options)
            .with_rows(names.iter().map(|n| Host { name: *n }).collect())
    }

    fn draw(table: &DataTable<Host>, cursor: TableCursor) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal
            .draw(|frame| {
                render_data_table(frame, frame.area(), table, "Hosts", cursor, &Theme::dark(), 0)
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_rows_and_sort_marker() {
        let mut t = table(&["web", "db"], TableOptions::default());
        t.toggle_sort(0);
        let screen = draw(&t, TableCursor::default());
        assert!(screen.contains("Hosts"));
        assert!(screen.contains("Name ▲"));
        assert!(screen.contains("db"));
        assert!(screen.contains("Showing 1-2 of 2"));

        t.toggle_sort(0);
        assert!(draw(&t, TableCursor::default()).contains("Name ▼"));
    }

    #[test]
    fn test_empty_state() {
        let mut t = table(&[], TableOptions::default());
        t.set_loading(true);
        let screen = draw(&t, TableCursor::default());
        assert!(screen.contains(EMPTY_MESSAGE));
        assert!(!screen.contains(SKELETON));
        assert!(!screen.contains("Showing"));
    }

    #[test]
    fn test_loading_draws_skeletons_only() {
        let mut t = table(&["secret-web"], TableOptions::default());
        t.set_loading(true);
        let screen = draw(&t, TableCursor::default());
        assert!(screen.contains(SKELETON));
        assert!(!screen.contains("secret-web"));
    }

    #[test]
    fn test_filter_shown_in_title() {
        let mut t = table(&["web", "db"], TableOptions::default());
        t.set_global_filter("web");
        let screen = draw(&t, TableCursor::default());
        assert!(screen.contains("[filter: web]"));
        assert!(!screen.contains("db"));
    }

    #[test]
    fn test_plain_table_has_no_footer() {
        let t = table(&["web"], TableOptions::plain());
        assert!(!draw(&t, TableCursor::default()).contains("Showing"));
    }

    #[test]
    fn test_pagination_line() {
        let names: Vec<&'static str> = vec!["a"; 30];
        let mut t = table(&names, TableOptions::default().with_page_size(2));
        t.set_page_index(7);
        let line = pagination_line(&t, &Theme::dark()).to_string();
        assert_eq!(line, "Showing 15-16 of 30  ‹ 1 … 7 8 9 … 15 ›  2/page");
    }
}

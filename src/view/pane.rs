use ratatui::{Frame, layout::Rect};

use crate::config::PAGE_SIZES;
use crate::navigation::Route;
use crate::table::{Column, DataTable, TableOptions};
use crate::ui::{TableCursor, Theme, render_data_table};

/// Keyboard surface of a table, independent of its row type
pub trait TableControl {
    fn select_next(&mut self);
    fn select_previous(&mut self);
    fn select_first(&mut self);
    fn select_last(&mut self);

    fn next_page(&mut self);
    fn previous_page(&mut self);
    fn first_page(&mut self);
    fn last_page(&mut self);
    fn cycle_page_size(&mut self);

    fn column_left(&mut self);
    fn column_right(&mut self);
    fn toggle_sort(&mut self);

    fn filter(&self) -> &str;
    fn is_filterable(&self) -> bool;
    fn set_filter(&mut self, query: &str);

    /// Route of the selected row, if rows link anywhere
    fn open_selected(&self) -> Option<Route>;

    /// (page index, selected row)
    fn position(&self) -> (usize, usize);
    fn restore_position(&mut self, page: usize, selected: usize);
}

/// A titled DataTable plus its row selection and column cursor
pub struct TablePane<T> {
    pub title: String,
    pub table: DataTable<T>,
    pub selected: usize,
    pub column: usize,
    link: Option<fn(&T) -> Route>,
}

impl<T> TablePane<T> {
    pub fn new(title: impl Into<String>, columns: Vec<Column<T>>, options: TableOptions) -> Self {
        Self {
            title: title.into(),
            table: DataTable::new(columns, options),
            selected: 0,
            column: 0,
            link: None,
        }
    }

    pub fn with_link(mut self, link: fn(&T) -> Route) -> Self {
        self.link = Some(link);
        self
    }

    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.table.set_rows(rows);
        self.selected = 0;
    }

    pub fn selected_row(&self) -> Option<&T> {
        self.table.page_rows().get(self.selected).copied()
    }

    pub fn clamp_selection(&mut self) {
        let rows = self.table.page_rows().len();
        self.selected = self.selected.min(rows.saturating_sub(1));
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, tick: usize, focused: bool) {
        let cursor = TableCursor {
            selected: self.selected,
            column: self.column,
            focused,
        };
        render_data_table(frame, area, &self.table, &self.title, cursor, theme, tick);
    }
}

/// Next entry of PAGE_SIZES after `current`, wrapping around
pub fn next_page_size(current: usize) -> usize {
    PAGE_SIZES
        .iter()
        .copied()
        .find(|&size| size > current)
        .unwrap_or(PAGE_SIZES[0])
}

impl<T> TableControl for TablePane<T> {
    fn select_next(&mut self) {
        let rows = self.table.page_rows().len();
        if self.selected + 1 < rows {
            self.selected += 1;
        } else if self.table.can_next_page() {
            self.table.next_page();
            self.selected = 0;
        }
    }

    fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else if self.table.can_previous_page() {
            self.table.previous_page();
            self.selected = self.table.page_rows().len().saturating_sub(1);
        }
    }

    fn select_first(&mut self) {
        self.selected = 0;
    }

    fn select_last(&mut self) {
        self.selected = self.table.page_rows().len().saturating_sub(1);
    }

    fn next_page(&mut self) {
        self.table.next_page();
        self.clamp_selection();
    }

    fn previous_page(&mut self) {
        self.table.previous_page();
        self.clamp_selection();
    }

    fn first_page(&mut self) {
        self.table.first_page();
        self.clamp_selection();
    }

    fn last_page(&mut self) {
        self.table.last_page();
        self.clamp_selection();
    }

    fn cycle_page_size(&mut self) {
        if !self.table.options().paginated {
            return;
        }
        let size = next_page_size(self.table.page_size());
        self.table.set_page_size(size);
        self.clamp_selection();
    }

    fn column_left(&mut self) {
        self.column = self.column.saturating_sub(1);
    }

    fn column_right(&mut self) {
        let last = self.table.columns().len().saturating_sub(1);
        self.column = (self.column + 1).min(last);
    }

    fn toggle_sort(&mut self) {
        self.table.toggle_sort(self.column);
        self.clamp_selection();
    }

    fn filter(&self) -> &str {
        self.table.global_filter()
    }

    fn is_filterable(&self) -> bool {
        self.table.options().filtered
    }

    fn set_filter(&mut self, query: &str) {
        self.table.set_global_filter(query);
        self.selected = 0;
    }

    fn open_selected(&self) -> Option<Route> {
        let link = self.link?;
        self.selected_row().map(link)
    }

    fn position(&self) -> (usize, usize) {
        (self.table.page_index(), self.selected)
    }

    fn restore_position(&mut self, page: usize, selected: usize) {
        self.table.set_page_index(page);
        self.selected = selected;
        self.clamp_selection();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::CellValue;

    fn pane(count: usize) -> TablePane<String> {
        let columns = vec![
            Column::new("name", "Name", |s: &String| CellValue::from(s.as_str())),
            Column::new("len", "Length", |s: &String| CellValue::from(s.len())),
        ];
        let mut pane = TablePane::new("Names", columns, TableOptions::default().with_page_size(5))
            .with_link(|s: &String| Route::ClientDetails(s.clone()));
        pane.set_rows((0..count).map(|i| format!("host-{:02}", i)).collect());
        pane
    }

    #[test]
    fn test_selection_crosses_pages() {
        let mut pane = pane(12);
        for _ in 0..5 {
            pane.select_next();
        }
        assert_eq!(pane.position(), (1, 0));
        assert_eq!(pane.selected_row().unwrap(), "host-05");

        pane.select_previous();
        assert_eq!(pane.position(), (0, 4));

        pane.last_page();
        pane.select_last();
        assert_eq!(pane.selected_row().unwrap(), "host-11");
        pane.select_next();
        assert_eq!(pane.selected_row().unwrap(), "host-11");
    }

    #[test]
    fn test_open_selected() {
        let mut pane = pane(3);
        pane.select_next();
        assert_eq!(
            pane.open_selected(),
            Some(Route::ClientDetails("host-01".to_string()))
        );

        let empty = self::pane(0);
        assert_eq!(empty.open_selected(), None);
    }

    #[test]
    fn test_column_cursor_and_sort() {
        let mut pane = pane(3);
        pane.column_left();
        assert_eq!(pane.column, 0);
        pane.column_right();
        pane.column_right();
        assert_eq!(pane.column, 1);

        pane.column_left();
        pane.toggle_sort();
        pane.toggle_sort();
        assert_eq!(pane.selected_row().unwrap(), "host-02");
    }

    #[test]
    fn test_page_size_cycle() {
        assert_eq!(next_page_size(5), 10);
        assert_eq!(next_page_size(25), 50);
        assert_eq!(next_page_size(100), 5);
        assert_eq!(next_page_size(7), 10);

        let mut pane = pane(30);
        pane.cycle_page_size();
        assert_eq!(pane.table.page_size(), 10);
        assert_eq!(pane.table.page_count(), 3);
    }

    #[test]
    fn test_filter_resets_selection() {
        let mut pane = pane(12);
        pane.select_last();
        pane.set_filter("host-1");
        assert_eq!(pane.filter(), "host-1");
        assert_eq!(pane.position(), (0, 0));
        // host-10, host-11 and the in-order match host-01
        assert_eq!(pane.table.filtered_len(), 3);
    }

    #[test]
    fn test_restore_position_clamps() {
        let mut pane = pane(7);
        pane.restore_position(1, 4);
        assert_eq!(pane.position(), (1, 1));
    }
}

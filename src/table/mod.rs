//! Generic in-memory table model: sorting, fuzzy global filtering and
//! pagination over a row vector.
//!
//! The model only keeps row indices in view order; rows themselves are never
//! cloned or reordered. Rendering lives in `crate::ui::table`.

pub mod column;
pub mod debounce;
pub mod pagination;
pub mod rank;
pub mod sort;

pub use column::{CellValue, Column, SKELETON, placeholder_columns};
pub use debounce::Debouncer;
pub use pagination::{PageItem, page_count, pagination_items};
pub use rank::{THRESHOLD, rank_item};
pub use sort::{SortDirection, SortKind, SortState};

use crate::config::PAGINATION_WINDOW;

/// Feature switches for a table instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    pub filtered: bool,
    pub sorted: bool,
    pub paginated: bool,
    pub page_size: usize,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            filtered: true,
            sorted: true,
            paginated: true,
            page_size: 25,
        }
    }
}

impl TableOptions {
    /// Plain list: no filter, no sort, one page
    pub fn plain() -> Self {
        Self {
            filtered: false,
            sorted: false,
            paginated: false,
            ..Self::default()
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

/// What the table body should show
#[derive(Debug)]
pub enum TableBody<'a, T> {
    /// No row survives the filter
    Empty,
    /// Data is pending; draw one skeleton line per row with placeholder columns
    Loading(Vec<&'a T>),
    Rows(Vec<&'a T>),
}

pub struct DataTable<T> {
    columns: Vec<Column<T>>,
    placeholders: Vec<Column<T>>,
    rows: Vec<T>,
    options: TableOptions,
    sorting: Option<SortState>,
    global_filter: String,
    page_index: usize,
    page_size: usize,
    loading: bool,
    /// Indices into `rows` after filtering and sorting
    view: Vec<usize>,
}

impl<T> DataTable<T> {
    pub fn new(columns: Vec<Column<T>>, options: TableOptions) -> Self {
        let placeholders = placeholder_columns(&columns);
        Self {
            columns,
            placeholders,
            rows: Vec::new(),
            page_size: options.page_size.max(1),
            options,
            sorting: None,
            global_filter: String::new(),
            page_index: 0,
            loading: false,
            view: Vec::new(),
        }
    }

    pub fn with_rows(mut self, rows: Vec<T>) -> Self {
        self.set_rows(rows);
        self
    }

    /// Replace the row set and go back to the first page
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
        self.page_index = 0;
        self.recompute();
    }

    /// Mutate rows in place, keeping the current page
    pub fn update_rows<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut T),
    {
        self.rows.iter_mut().for_each(&mut f);
        self.recompute();
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// Columns to draw: placeholders while loading
    pub fn active_columns(&self) -> &[Column<T>] {
        if self.loading {
            &self.placeholders
        } else {
            &self.columns
        }
    }

    pub fn options(&self) -> TableOptions {
        self.options
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn sorting(&self) -> Option<SortState> {
        self.sorting
    }

    pub fn sort_direction(&self, column: usize) -> Option<SortDirection> {
        self.sorting
            .filter(|s| s.column == column)
            .map(|s| s.direction)
    }

    /// Cycle the sort on `column`; returns the new state
    pub fn toggle_sort(&mut self, column: usize) -> Option<SortState> {
        let sortable = self.columns.get(column).is_some_and(|c| c.sortable);
        if !self.options.sorted || !sortable {
            return self.sorting;
        }
        self.sorting = sort::next_sort(self.sorting, column);
        self.recompute();
        self.sorting
    }

    pub fn set_sorting(&mut self, sorting: Option<SortState>) {
        if !self.options.sorted {
            return;
        }
        self.sorting = sorting.filter(|s| self.columns.get(s.column).is_some_and(|c| c.sortable));
        self.recompute();
    }

    pub fn global_filter(&self) -> &str {
        &self.global_filter
    }

    pub fn set_global_filter(&mut self, query: impl Into<String>) {
        if !self.options.filtered {
            return;
        }
        self.global_filter = query.into();
        self.page_index = 0;
        self.recompute();
    }

    /// Best rank of `query` over the filterable columns of `row`
    pub fn row_rank(&self, row: &T, query: &str) -> f64 {
        self.columns
            .iter()
            .filter(|c| c.global_filter)
            .map(|c| c.value(row))
            .filter(|v| !v.is_empty())
            .map(|v| rank_item(&v.to_string(), query))
            .fold(rank::ranking::NO_MATCH, f64::max)
    }

    fn recompute(&mut self) {
        let query = self.global_filter.as_str();
        let filtering = self.options.filtered && !query.is_empty();

        let mut view: Vec<usize> = (0..self.rows.len())
            .filter(|&i| !filtering || self.row_rank(&self.rows[i], query) >= THRESHOLD)
            .collect();

        let active = self
            .sorting
            .filter(|_| self.options.sorted)
            .and_then(|state| self.columns.get(state.column).map(|c| (state, c)));

        if let Some((state, column)) = active {
            let mut keyed: Vec<(usize, CellValue)> = view
                .iter()
                .map(|&i| (i, column.value(&self.rows[i])))
                .collect();
            keyed.sort_by(|a, b| sort::compare(column.sort_kind, &a.1, &b.1));
            if state.direction == SortDirection::Desc {
                keyed.reverse();
            }
            view = keyed.into_iter().map(|(i, _)| i).collect();
        }

        self.view = view;
        self.clamp_page();
    }

    fn clamp_page(&mut self) {
        let last = self.page_count().saturating_sub(1);
        self.page_index = self.page_index.min(last);
    }

    /// Rows after filter and sort, before pagination
    pub fn visible_rows(&self) -> Vec<&T> {
        self.view.iter().map(|&i| &self.rows[i]).collect()
    }

    pub fn total_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn filtered_len(&self) -> usize {
        self.view.len()
    }

    pub fn page_size(&self) -> usize {
        if self.options.paginated {
            self.page_size
        } else {
            self.view.len().max(1)
        }
    }

    /// Change rows per page, staying on the page that holds the current first row
    pub fn set_page_size(&mut self, page_size: usize) {
        let page_size = page_size.max(1);
        let first_row = self.page_index * self.page_size;
        self.page_size = page_size;
        self.page_index = first_row / page_size;
        self.clamp_page();
    }

    pub fn page_count(&self) -> usize {
        page_count(self.view.len(), self.page_size())
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn set_page_index(&mut self, index: usize) {
        self.page_index = index;
        self.clamp_page();
    }

    pub fn can_previous_page(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.page_index + 1 < self.page_count()
    }

    pub fn first_page(&mut self) {
        self.page_index = 0;
    }

    pub fn previous_page(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
    }

    pub fn next_page(&mut self) {
        if self.can_next_page() {
            self.page_index += 1;
        }
    }

    pub fn last_page(&mut self) {
        self.page_index = self.page_count().saturating_sub(1);
    }

    /// Rows of page `index`
    pub fn page(&self, index: usize) -> Vec<&T> {
        let size = self.page_size();
        self.view
            .iter()
            .skip(index.saturating_mul(size))
            .take(size)
            .map(|&i| &self.rows[i])
            .collect()
    }

    pub fn page_rows(&self) -> Vec<&T> {
        self.page(self.page_index)
    }

    pub fn page_items(&self) -> Vec<PageItem> {
        pagination_items(self.page_index, self.page_count(), PAGINATION_WINDOW)
    }

    /// (first, last, total) for the "Showing a-b of n" line, 1-based
    pub fn showing_range(&self) -> (usize, usize, usize) {
        let total = self.view.len();
        let shown = self.page_rows().len();
        if shown == 0 {
            return (0, 0, total);
        }
        let first = self.page_index * self.page_size() + 1;
        (first, first + shown - 1, total)
    }

    pub fn body(&self) -> TableBody<'_, T> {
        if self.view.is_empty() {
            return TableBody::Empty;
        }
        let rows = self.page_rows();
        if self.loading {
            TableBody::Loading(rows)
        } else {
            TableBody::Rows(rows)
        }
    }
}

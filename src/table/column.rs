use chrono::{DateTime, Utc};
use ratatui::text::Line;
use std::fmt;
use std::sync::Arc;

use super::sort::SortKind;

/// Skeleton block drawn in place of a value while data is loading
pub const SKELETON: &str = "▒▒▒▒▒▒▒▒";

/// Value extracted from a row by a column accessor
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Time(DateTime<Utc>),
    Flag(bool),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Time(t) => write!(f, "{}", t.format("%Y-%m-%d %H:%M:%S")),
            CellValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<u64> for CellValue {
    fn from(value: u64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<usize> for CellValue {
    fn from(value: usize) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Flag(value)
    }
}

impl From<Option<DateTime<Utc>>> for CellValue {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        value.map(CellValue::Time).unwrap_or(CellValue::Empty)
    }
}

pub type Accessor<T> = Arc<dyn Fn(&T) -> CellValue + Send + Sync>;
pub type CellRenderer<T> = Arc<dyn Fn(&CellValue, &T) -> Line<'static> + Send + Sync>;

/// Column descriptor: how to pull a value out of a row and how to draw it
pub struct Column<T> {
    pub id: String,
    pub header: String,
    accessor: Accessor<T>,
    renderer: Option<CellRenderer<T>>,
    /// Whether the header can be toggled to sort by this column
    pub sortable: bool,
    pub sort_kind: SortKind,
    /// Whether the global filter looks at this column
    pub global_filter: bool,
    /// Fixed width in cells; shared evenly with other unsized columns when None
    pub width: Option<u16>,
    placeholder: bool,
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            accessor: Arc::clone(&self.accessor),
            renderer: self.renderer.clone(),
            sortable: self.sortable,
            sort_kind: self.sort_kind,
            global_filter: self.global_filter,
            width: self.width,
            placeholder: self.placeholder,
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("sort_kind", &self.sort_kind)
            .field("placeholder", &self.placeholder)
            .finish()
    }
}

impl<T> Column<T> {
    pub fn new<F>(id: impl Into<String>, header: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> CellValue + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            header: header.into(),
            accessor: Arc::new(accessor),
            renderer: None,
            sortable: true,
            sort_kind: SortKind::Auto,
            global_filter: true,
            width: None,
            placeholder: false,
        }
    }

    pub fn cell<F>(mut self, renderer: F) -> Self
    where
        F: Fn(&CellValue, &T) -> Line<'static> + Send + Sync + 'static,
    {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn sort_by(mut self, kind: SortKind) -> Self {
        self.sort_kind = kind;
        self
    }

    pub fn filterable(mut self, filterable: bool) -> Self {
        self.global_filter = filterable;
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn value(&self, row: &T) -> CellValue {
        (self.accessor)(row)
    }

    pub fn render(&self, row: &T) -> Line<'static> {
        let value = self.value(row);
        match &self.renderer {
            Some(renderer) => renderer(&value, row),
            None => Line::from(value.to_string()),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    /// Loading variant of this column: the accessor yields nothing and the
    /// renderer draws a skeleton block, so row values can never leak through.
    pub fn placeholder(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            accessor: Arc::new(|_| CellValue::Empty),
            renderer: Some(Arc::new(|_, _| Line::from(SKELETON))),
            sortable: self.sortable,
            sort_kind: self.sort_kind,
            global_filter: false,
            width: self.width,
            placeholder: true,
        }
    }
}

pub fn placeholder_columns<T>(columns: &[Column<T>]) -> Vec<Column<T>> {
    columns.iter().map(Column::placeholder).collect()
}

use std::cmp::Ordering;

use super::column::CellValue;

/// Comparison applied when sorting a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKind {
    /// Picked from both values: two times → datetime, two numbers or two
    /// flags → basic, anything else → alphanumeric
    #[default]
    Auto,
    /// Case-insensitive natural order ("job2" < "job10")
    Alphanumeric,
    /// Case-insensitive lexical order
    Text,
    /// Raw value order
    Basic,
    Datetime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// The single active sort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: usize,
    pub direction: SortDirection,
}

/// Next sort state after toggling `column`: asc → desc → unsorted on the same
/// column, asc when switching to another column.
pub fn next_sort(current: Option<SortState>, column: usize) -> Option<SortState> {
    match current {
        Some(state) if state.column == column => match state.direction {
            SortDirection::Asc => Some(SortState {
                column,
                direction: SortDirection::Desc,
            }),
            SortDirection::Desc => None,
        },
        _ => Some(SortState {
            column,
            direction: SortDirection::Asc,
        }),
    }
}

/// Ascending comparison of two cell values. Empty values sort last.
pub fn compare(kind: SortKind, a: &CellValue, b: &CellValue) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        _ => {}
    }

    // auto looks at both sides so mixed columns still compare symmetrically
    let kind = match kind {
        SortKind::Auto => match (a, b) {
            (CellValue::Time(_), CellValue::Time(_)) => SortKind::Datetime,
            (CellValue::Number(_), CellValue::Number(_))
            | (CellValue::Flag(_), CellValue::Flag(_)) => SortKind::Basic,
            _ => SortKind::Alphanumeric,
        },
        other => other,
    };

    match kind {
        SortKind::Alphanumeric => natural_cmp(
            &a.to_string().to_lowercase(),
            &b.to_string().to_lowercase(),
        ),
        SortKind::Text => a.to_string().to_lowercase().cmp(&b.to_string().to_lowercase()),
        SortKind::Datetime | SortKind::Basic | SortKind::Auto => basic_cmp(a, b),
    }
}

fn basic_cmp(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::Number(x), CellValue::Number(y)) => {
            x.partial_cmp(y).unwrap_or(Ordering::Equal)
        }
        (CellValue::Text(x), CellValue::Text(y)) => x.cmp(y),
        (CellValue::Time(x), CellValue::Time(y)) => x.cmp(y),
        (CellValue::Flag(x), CellValue::Flag(y)) => x.cmp(y),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

fn chunks(s: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_digits: Option<bool> = None;

    for (idx, ch) in s.char_indices() {
        let digit = ch.is_ascii_digit();
        match in_digits {
            Some(prev) if prev != digit => {
                out.push(make_chunk(&s[start..idx], prev));
                start = idx;
            }
            _ => {}
        }
        in_digits = Some(digit);
    }
    if let Some(prev) = in_digits {
        out.push(make_chunk(&s[start..], prev));
    }
    out
}

fn make_chunk(s: &str, digits: bool) -> Chunk<'_> {
    if digits { Chunk::Digits(s) } else { Chunk::Text(s) }
}

fn digits_cmp(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Natural string order: digit runs compare numerically, text runs
/// lexically, and a text run sorts before a digit run at the same position.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let left = chunks(a);
    let right = chunks(b);

    for (x, y) in left.iter().zip(right.iter()) {
        let ord = match (x, y) {
            (Chunk::Digits(x), Chunk::Digits(y)) => digits_cmp(x, y),
            (Chunk::Text(x), Chunk::Text(y)) => x.cmp(y),
            (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Less,
            (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Greater,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }

    left.len().cmp(&right.len())
}

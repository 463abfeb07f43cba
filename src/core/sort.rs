use std::cmp::Ordering;

use chrono::{DateTime, Utc};

/// Typed sort key for one cell of a tabular result.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Number(f64),
    Date(DateTime<Utc>),
    Text(String),
}

impl SortKey {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            // Mixed kinds only happen on a miswired column; keep input order.
            _ => Ordering::Equal,
        }
    }
}

/// Stable, type-aware sort of `rows` by the key extracted per row.
///
/// Rows with a missing key always order after rows with a present one; the
/// ascending/descending flip applies only to present-value comparisons.
pub fn sort_rows<T>(rows: &mut [T], key: impl Fn(&T) -> Option<SortKey>, ascending: bool) {
    rows.sort_by(|a, b| match (key(a), key(b)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(ka), Some(kb)) => {
            let ord = ka.compare(&kb);
            if ascending { ord } else { ord.reverse() }
        }
    });
}

/// Click-to-sort state: clicking the active column toggles direction,
/// clicking a new column resets to ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub column: String,
    pub ascending: bool,
}

impl SortState {
    #[must_use]
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: true,
        }
    }

    pub fn click(&mut self, column: &str) {
        if self.column == column {
            self.ascending = !self.ascending;
        } else {
            self.column = column.to_string();
            self.ascending = true;
        }
    }
}

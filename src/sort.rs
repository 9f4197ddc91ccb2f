//! Type-aware, stable single-column sorting.
//!
//! Comparison dispatches on the runtime types of the two values, not on the
//! column's declared type, so dirty data still sorts deterministically:
//!
//! - dates compare by timestamp
//! - text compares case-insensitively, ties broken by code point
//! - numbers compare arithmetically
//! - values of different types order by type: number, date, text, list
//! - missing values (absent or null) always sort last, in both directions
//!
//! Descending order reverses the comparison of present values only.

use crate::column::Columns;
use crate::error::{GridError, Result};
use crate::value::{Row, Value};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    /// Smallest first
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    /// Largest first
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn reverse(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The column to sort by, if any. With no key, rows keep their input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortState {
    pub key: Option<String>,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortState {
    /// Input order is preserved.
    pub fn none() -> Self {
        SortState::default()
    }

    pub fn ascending(key: impl Into<String>) -> Self {
        SortState {
            key: Some(key.into()),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: impl Into<String>) -> Self {
        SortState {
            key: Some(key.into()),
            direction: SortDirection::Descending,
        }
    }

    pub fn is_active(&self) -> bool {
        self.key.is_some()
    }

    /// The key, if set, must name a configured, sortable column.
    pub fn validate(&self, columns: &Columns) -> Result<()> {
        if let Some(key) = &self.key {
            if !columns.require(key)?.sortable {
                log::warn!("rejecting sort on unsortable column '{}'", key);
                return Err(GridError::NotSortable(key.clone()));
            }
        }
        Ok(())
    }
}

/// Compares two field values for sorting.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>, direction: SortDirection) -> Ordering {
    let (a, b) = match (a, b) {
        (None, None) => return Ordering::Equal,
        (None, Some(_)) => return Ordering::Greater,
        (Some(_), None) => return Ordering::Less,
        (Some(a), Some(b)) => (a, b),
    };

    let base_cmp = match (a, b) {
        (Value::Date(a), Value::Date(b)) => a.cmp(b),
        (Value::Text(a), Value::Text(b)) => compare_text(a, b),
        (Value::Number(a), Value::Number(b)) => a.total_cmp(b),
        (Value::List(a), Value::List(b)) => compare_text(&a.join(","), &b.join(",")),
        // Mixed types - order by type for a deterministic result
        (a, b) => type_rank(a).cmp(&type_rank(b)),
    };

    match direction {
        SortDirection::Ascending => base_cmp,
        SortDirection::Descending => base_cmp.reverse(),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Number(_) => 0,
        Value::Date(_) => 1,
        Value::Text(_) => 2,
        Value::List(_) => 3,
        Value::Null => 4,
    }
}

/// Case-insensitive collation with a code-point tie-break, so distinct
/// strings never compare equal and the order stays total.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b))
}

/// Sorts row references in place. Stable: rows that compare equal keep their
/// relative order.
pub fn sort_rows(rows: &mut [&Row], sort: &SortState) {
    let Some(key) = &sort.key else {
        return;
    };
    rows.sort_by(|a, b| compare_values(a.get(key), b.get(key), sort.direction));
}

/// Sorts indices into `rows` in place, stably.
pub fn sort_indices(indices: &mut [usize], rows: &[Row], sort: &SortState) {
    let Some(key) = &sort.key else {
        return;
    };
    indices.sort_by(|&a, &b| compare_values(rows[a].get(key), rows[b].get(key), sort.direction));
}

/// Returns the rows in sorted order without touching the input.
///
/// # Examples
///
/// ```
/// use gridline::{sorted_rows, Row, SortState};
///
/// let rows = vec![
///     Row::new().with("v", 3),
///     Row::new().with("v", 1),
///     Row::new().with("v", 2),
/// ];
///
/// let sorted = sorted_rows(&rows, &SortState::descending("v"));
/// let values: Vec<f64> = sorted.iter().filter_map(|r| r.get("v")?.as_number()).collect();
/// assert_eq!(values, vec![3.0, 2.0, 1.0]);
/// ```
pub fn sorted_rows<'r, I>(rows: I, sort: &SortState) -> Vec<&'r Row>
where
    I: IntoIterator<Item = &'r Row>,
{
    let mut rows: Vec<&Row> = rows.into_iter().collect();
    sort_rows(&mut rows, sort);
    rows
}

//! Predicate filter: free-text search plus per-column constraints.
//!
//! Filter values are a tagged variant per filter type. A filter state is
//! checked against the column descriptors once, when it is compiled into a
//! `Predicate`; evaluating the predicate against rows never fails.
//!
//! Semantics:
//! - search matches a row if any text or number field contains the term
//!   (case-insensitive); an empty term matches everything
//! - constraints on different columns are ANDed
//! - a `select` constraint passes if the value, or any element of a list
//!   value, is one of the selected values
//! - a `range` constraint has inclusive bounds and fails non-numeric values
//! - a missing field fails any active constraint on it
//! - filtering keeps the relative order of the rows it retains

use crate::column::{Columns, FilterType};
use crate::error::{GridError, Result};
use crate::value::{format_number, Row, Value};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Constraint value for one column; the variant must match the column's
/// `FilterType`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FilterValue {
    Text { value: String },
    Select { values: BTreeSet<String> },
    Range { min: Option<f64>, max: Option<f64> },
}

impl FilterValue {
    pub fn text(value: impl Into<String>) -> Self {
        FilterValue::Text { value: value.into() }
    }

    pub fn select<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        FilterValue::Select {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn range(min: Option<f64>, max: Option<f64>) -> Self {
        FilterValue::Range { min, max }
    }

    /// Empty values impose no constraint.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Text { value } => value.is_empty(),
            FilterValue::Select { values } => values.is_empty(),
            FilterValue::Range { min, max } => finite(*min).is_none() && finite(*max).is_none(),
        }
    }

    pub fn filter_type(&self) -> FilterType {
        match self {
            FilterValue::Text { .. } => FilterType::Text,
            FilterValue::Select { .. } => FilterType::Select,
            FilterValue::Range { .. } => FilterType::Range,
        }
    }
}

/// NaN and infinite range bounds count as unset.
fn finite(bound: Option<f64>) -> Option<f64> {
    bound.filter(|b| b.is_finite())
}

/// Per-column constraints keyed by column id. A column without an entry is
/// unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterState {
    filters: BTreeMap<String, FilterValue>,
}

impl FilterState {
    pub fn new() -> Self {
        FilterState::default()
    }

    /// Builder-style `set`.
    pub fn with(mut self, column: impl Into<String>, value: FilterValue) -> Self {
        self.set(column, value);
        self
    }

    /// Sets a column's constraint. An empty value clears it instead.
    pub fn set(&mut self, column: impl Into<String>, value: FilterValue) {
        let column = column.into();
        if value.is_empty() {
            self.filters.remove(&column);
        } else {
            self.filters.insert(column, value);
        }
    }

    pub fn remove(&mut self, column: &str) -> Option<FilterValue> {
        self.filters.remove(column)
    }

    pub fn clear(&mut self) {
        self.filters.clear();
    }

    pub fn get(&self, column: &str) -> Option<&FilterValue> {
        self.filters.get(column)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.filters.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// True when no entry constrains anything.
    pub fn is_empty(&self) -> bool {
        self.filters.values().all(FilterValue::is_empty)
    }

    /// Checks every non-empty entry against the column descriptors. Empty
    /// entries (e.g. from deserialized state) constrain nothing and are skipped.
    pub fn validate(&self, columns: &Columns) -> Result<()> {
        for (id, value) in self.filters.iter().filter(|(_, v)| !v.is_empty()) {
            let column = columns.require(id)?;
            if column.filter_type != value.filter_type() {
                log::warn!(
                    "rejecting {} filter on {} column '{}'",
                    value.filter_type().name(),
                    column.filter_type.name(),
                    id
                );
                return Err(GridError::filter_type_mismatch(
                    id.clone(),
                    column.filter_type.name(),
                    value.filter_type().name(),
                ));
            }
        }
        Ok(())
    }
}

/// Restricts rows to those owned by one user ("my leads"). The owner is
/// always passed in by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerScope {
    pub field: String,
    pub owner: String,
}

impl OwnerScope {
    pub fn new(field: impl Into<String>, owner: impl Into<String>) -> Self {
        OwnerScope {
            field: field.into(),
            owner: owner.into(),
        }
    }

    fn matches(&self, row: &Row) -> bool {
        match row.get(&self.field) {
            Some(Value::List(items)) => items.iter().any(|item| *item == self.owner),
            Some(value) => value.to_string() == self.owner,
            None => false,
        }
    }
}

#[derive(Debug, Clone)]
enum Constraint {
    Text(String),
    Select(BTreeSet<String>),
    Range { min: Option<f64>, max: Option<f64> },
}

impl Constraint {
    fn matches(&self, value: Option<&Value>) -> bool {
        let Some(value) = value else {
            return false;
        };
        match self {
            Constraint::Text(needle) => value.to_string().to_lowercase().contains(needle.as_str()),
            Constraint::Select(selected) => match value {
                Value::List(items) => items.iter().any(|item| selected.contains(item)),
                other => selected.contains(&other.to_string()),
            },
            Constraint::Range { min, max } => match value {
                Value::Number(n) => {
                    min.map_or(true, |lo| *n >= lo) && max.map_or(true, |hi| *n <= hi)
                }
                _ => false,
            },
        }
    }
}

/// A validated search term, filter state and optional owner scope, ready to
/// be evaluated against rows.
#[derive(Debug, Clone, Default)]
pub struct Predicate {
    search: Option<String>,
    constraints: Vec<(String, Constraint)>,
    scope: Option<OwnerScope>,
}

impl Predicate {
    pub fn new(search: &str, filters: &FilterState, columns: &Columns) -> Result<Self> {
        filters.validate(columns)?;

        let search = search.trim();
        let search = (!search.is_empty()).then(|| search.to_lowercase());

        let constraints = filters
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(id, value)| {
                let constraint = match value {
                    FilterValue::Text { value } => Constraint::Text(value.to_lowercase()),
                    FilterValue::Select { values } => Constraint::Select(values.clone()),
                    FilterValue::Range { min, max } => Constraint::Range {
                        min: finite(*min),
                        max: finite(*max),
                    },
                };
                (id.to_string(), constraint)
            })
            .collect();

        Ok(Predicate {
            search,
            constraints,
            scope: None,
        })
    }

    pub fn with_scope(mut self, scope: Option<OwnerScope>) -> Self {
        self.scope = scope;
        self
    }

    /// True if the predicate accepts every row.
    pub fn is_trivial(&self) -> bool {
        self.search.is_none() && self.constraints.is_empty() && self.scope.is_none()
    }

    pub fn matches(&self, row: &Row) -> bool {
        if let Some(scope) = &self.scope {
            if !scope.matches(row) {
                return false;
            }
        }
        if let Some(term) = &self.search {
            if !matches_search(row, term) {
                return false;
            }
        }
        self.constraints
            .iter()
            .all(|(field, constraint)| constraint.matches(row.get(field)))
    }
}

/// `term` must already be lowercased.
fn matches_search(row: &Row, term: &str) -> bool {
    row.values().any(|value| match value {
        Value::Text(s) => s.to_lowercase().contains(term),
        Value::Number(n) => format_number(*n).contains(term),
        _ => false,
    })
}

/// Returns the indices of the rows the predicate accepts, in input order.
pub fn filter_indices(rows: &[Row], predicate: &Predicate) -> Vec<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| predicate.matches(row))
        .map(|(i, _)| i)
        .collect()
}

/// Applies search and column constraints to `rows`, preserving their order.
///
/// # Examples
///
/// ```
/// use gridline::{filter_rows, ColumnDescriptor, Columns, FilterState, FilterValue, Row};
///
/// let columns = Columns::new(vec![
///     ColumnDescriptor::new("company").text_filter(),
///     ColumnDescriptor::new("amount").range_filter(),
/// ]).unwrap();
///
/// let rows = vec![
///     Row::new().with("company", "Acme Corp").with("amount", 5000),
///     Row::new().with("company", "Globex").with("amount", 12000),
///     Row::new().with("company", "Acme Labs").with("amount", 20000),
/// ];
///
/// let filters = FilterState::new().with("amount", FilterValue::range(Some(10000.0), None));
/// let matched = filter_rows(&rows, "acme", &filters, &columns).unwrap();
///
/// assert_eq!(matched.len(), 1);
/// assert_eq!(matched[0].get("company").unwrap().as_text(), Some("Acme Labs"));
/// ```
pub fn filter_rows<'r, I>(
    rows: I,
    search: &str,
    filters: &FilterState,
    columns: &Columns,
) -> Result<Vec<&'r Row>>
where
    I: IntoIterator<Item = &'r Row>,
{
    let predicate = Predicate::new(search, filters, columns)?;
    Ok(rows.into_iter().filter(|row| predicate.matches(row)).collect())
}

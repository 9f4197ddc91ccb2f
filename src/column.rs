//! Column descriptors.
//!
//! A descriptor says how one displayed field may be sorted and filtered.
//! Descriptors are validated together as a `Columns` set, which is what the
//! engine consults when it checks a query.

use crate::error::{GridError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How a column can be filtered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Column cannot be filtered
    #[default]
    None,
    /// Case-insensitive substring match
    Text,
    /// Multi-valued membership against a fixed option list
    Select,
    /// Inclusive numeric bounds
    Range,
}

impl FilterType {
    pub fn name(&self) -> &'static str {
        match self {
            FilterType::None => "none",
            FilterType::Text => "text",
            FilterType::Select => "select",
            FilterType::Range => "range",
        }
    }
}

/// One choice offered by a `select` filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        FilterOption {
            value: value.into(),
            label: label.into(),
        }
    }
}

impl From<&str> for FilterOption {
    fn from(value: &str) -> Self {
        FilterOption::new(value, value)
    }
}

fn default_sortable() -> bool {
    true
}

/// Display, sort and filter metadata for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    /// Field name in the row
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default = "default_sortable")]
    pub sortable: bool,
    #[serde(default)]
    pub filter_type: FilterType,
    /// Ordered choices, required when `filter_type` is `Select`
    #[serde(default)]
    pub filter_options: Vec<FilterOption>,
}

impl ColumnDescriptor {
    /// A sortable, unfiltered column labelled with its id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        ColumnDescriptor {
            label: id.clone(),
            id,
            sortable: true,
            filter_type: FilterType::None,
            filter_options: Vec::new(),
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn text_filter(mut self) -> Self {
        self.filter_type = FilterType::Text;
        self
    }

    pub fn range_filter(mut self) -> Self {
        self.filter_type = FilterType::Range;
        self
    }

    pub fn select_filter<O: Into<FilterOption>>(mut self, options: impl IntoIterator<Item = O>) -> Self {
        self.filter_type = FilterType::Select;
        self.filter_options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Label to display; falls back to the id when none was configured.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.id
        } else {
            &self.label
        }
    }
}

/// A validated, ordered set of column descriptors with unique ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Columns {
    columns: Vec<ColumnDescriptor>,
}

impl Columns {
    /// Validates the descriptors: ids must be unique and `select` columns
    /// must carry at least one option.
    pub fn new(columns: Vec<ColumnDescriptor>) -> Result<Self> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.id.as_str()) {
                log::warn!("rejecting duplicate column id '{}'", column.id);
                return Err(GridError::DuplicateColumn(column.id.clone()));
            }
            if column.filter_type == FilterType::Select && column.filter_options.is_empty() {
                log::warn!("rejecting select column '{}' without options", column.id);
                return Err(GridError::MissingFilterOptions(column.id.clone()));
            }
        }
        Ok(Columns { columns })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColumnDescriptor> {
        self.columns.iter()
    }

    pub fn get(&self, id: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Like `get`, but an unknown id is a configuration error.
    pub fn require(&self, id: &str) -> Result<&ColumnDescriptor> {
        self.get(id)
            .ok_or_else(|| GridError::UnknownColumn(id.to_string()))
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.id.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a Columns {
    type Item = &'a ColumnDescriptor;
    type IntoIter = std::slice::Iter<'a, ColumnDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

//! Table configuration: column descriptors plus pagination and empty-state
//! settings, loadable from JSON.

use crate::column::{ColumnDescriptor, Columns};
use crate::error::{GridError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_EMPTY_MESSAGE: &str = "No records found";

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_page_size_options() -> Vec<usize> {
    vec![10, 25, 50]
}

fn default_empty_message() -> String {
    DEFAULT_EMPTY_MESSAGE.to_string()
}

/// Everything a list view hands the engine at setup time.
///
/// # Examples
///
/// ```
/// use gridline::{FilterType, TableConfig};
///
/// let config = TableConfig::from_json(r#"{
///     "columns": [
///         {"id": "company", "label": "Company", "filterType": "text"},
///         {"id": "status", "filterType": "select",
///          "filterOptions": [{"value": "New", "label": "New"}]}
///     ],
///     "defaultPageSize": 25
/// }"#).unwrap();
///
/// assert_eq!(config.default_page_size, 25);
/// assert_eq!(config.page_size_options, vec![10, 25, 50]);
/// assert_eq!(config.columns[1].filter_type, FilterType::Select);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    pub columns: Vec<ColumnDescriptor>,
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    #[serde(default = "default_page_size_options")]
    pub page_size_options: Vec<usize>,
    /// Shown by the presentation layer when a query matches nothing
    #[serde(default = "default_empty_message")]
    pub empty_message: String,
}

impl TableConfig {
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        TableConfig {
            columns,
            default_page_size: DEFAULT_PAGE_SIZE,
            page_size_options: default_page_size_options(),
            empty_message: default_empty_message(),
        }
    }

    pub fn with_page_sizes(mut self, default_page_size: usize, options: Vec<usize>) -> Self {
        self.default_page_size = default_page_size;
        self.page_size_options = options;
        self
    }

    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| GridError::InvalidConfig(e.to_string()))
    }

    /// Checks the whole configuration and returns the validated columns.
    pub fn validate(&self) -> Result<Columns> {
        let columns = Columns::new(self.columns.clone())?;

        if self.page_size_options.is_empty() {
            return Err(GridError::EmptyPageSizeOptions);
        }
        if let Some(&size) = self.page_size_options.iter().find(|&&size| size == 0) {
            return Err(GridError::InvalidPageSize {
                size,
                reason: "must be positive",
            });
        }
        if !self.page_size_options.contains(&self.default_page_size) {
            return Err(GridError::InvalidPageSize {
                size: self.default_page_size,
                reason: "default page size is not one of the page size options",
            });
        }

        Ok(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<ColumnDescriptor> {
        vec![ColumnDescriptor::new("name"), ColumnDescriptor::new("amount").range_filter()]
    }

    #[test]
    fn test_defaults() {
        let config = TableConfig::new(columns());
        assert_eq!(config.default_page_size, 10);
        assert_eq!(config.empty_message, "No records found");
        assert_eq!(config.validate().unwrap().len(), 2);
    }

    #[test]
    fn test_page_size_validation() {
        let config = TableConfig::new(columns()).with_page_sizes(20, vec![10, 25]);
        assert!(matches!(
            config.validate(),
            Err(GridError::InvalidPageSize { size: 20, .. })
        ));

        let config = TableConfig::new(columns()).with_page_sizes(0, vec![0, 10]);
        assert!(matches!(
            config.validate(),
            Err(GridError::InvalidPageSize { size: 0, .. })
        ));

        let config = TableConfig::new(columns()).with_page_sizes(10, vec![]);
        assert_eq!(config.validate(), Err(GridError::EmptyPageSizeOptions));
    }

    #[test]
    fn test_invalid_json() {
        let result = TableConfig::from_json(r#"{"columns": [{"id": "x", "filterType": "fuzzy"}]}"#);
        assert!(matches!(result, Err(GridError::InvalidConfig(_))));

        let result = TableConfig::from_json(r#"{"defaultPageSize": 10}"#);
        assert!(matches!(result, Err(GridError::InvalidConfig(_))));
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        let config = TableConfig::new(vec![ColumnDescriptor::new("id"), ColumnDescriptor::new("id")]);
        assert_eq!(config.validate(), Err(GridError::DuplicateColumn("id".to_string())));
    }
}

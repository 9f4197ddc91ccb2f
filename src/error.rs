//! Error types for the tabular engine.
//!
//! Configuration mistakes fail fast with one of these variants. Anomalies
//! inside otherwise well-formed rows never become errors: the offending row
//! simply fails the constraint it was tested against.

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// Two column descriptors share the same id.
    #[error("Duplicate column id '{0}'")]
    DuplicateColumn(String),

    /// A filter, sort key or facet refers to a column that is not configured.
    #[error("Column '{0}' not found in table configuration")]
    UnknownColumn(String),

    /// A `select` column was configured without any options.
    #[error("Column '{0}' uses a select filter but has no filter options")]
    MissingFilterOptions(String),

    /// Page sizes must be positive, and the default must be an allowed option.
    #[error("Invalid page size {size}: {reason}")]
    InvalidPageSize { size: usize, reason: &'static str },

    #[error("At least one page size option is required")]
    EmptyPageSizeOptions,

    /// The filter value's shape does not match the column's filter type.
    #[error("Column '{column}' expects a {expected} filter, got {actual}")]
    FilterTypeMismatch {
        column: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Column '{0}' is not sortable")]
    NotSortable(String),

    /// Configuration could not be parsed.
    #[error("Invalid table configuration: {0}")]
    InvalidConfig(String),

    /// A record handed to the engine is not a field map.
    #[error("Invalid row: expected an object, got {0}")]
    InvalidRow(&'static str),

    /// A collection handed to the engine is not a list of records.
    #[error("Invalid rows: expected an array, got {0}")]
    InvalidRows(&'static str),
}

impl GridError {
    pub fn filter_type_mismatch(
        column: impl Into<String>,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        GridError::FilterTypeMismatch {
            column: column.into(),
            expected,
            actual,
        }
    }

    /// True for errors caused by table setup rather than by the supplied data.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, GridError::InvalidRow(_) | GridError::InvalidRows(_))
    }
}

/// Name of a JSON value's kind, for error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GridError::filter_type_mismatch("status", "select", "range");
        assert_eq!(
            err.to_string(),
            "Column 'status' expects a select filter, got range"
        );
        assert_eq!(
            GridError::InvalidPageSize { size: 0, reason: "must be positive" }.to_string(),
            "Invalid page size 0: must be positive"
        );
    }

    #[test]
    fn test_configuration_classification() {
        assert!(GridError::DuplicateColumn("id".into()).is_configuration());
        assert!(GridError::NotSortable("tags".into()).is_configuration());
        assert!(!GridError::InvalidRows("object").is_configuration());
    }
}

//! Row and field values.
//!
//! A `Row` is an immutable field map handed to the engine by the data layer.
//! Values carry their runtime type, which the filter and the comparator
//! dispatch on instead of the column's declared filter type.

use crate::error::{json_kind, GridError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::fmt;

/// A single field value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Text(String),
    Number(f64),
    Date(DateTime<Utc>),
    List(Vec<String>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Date(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Text(_) => "text",
            Value::Number(_) => "number",
            Value::Date(_) => "date",
            Value::List(_) => "list",
        }
    }

    /// Converts the value to JSON for the presentation layer.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Null => JsonValue::Null,
            Value::Text(s) => JsonValue::String(s.clone()),
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::Date(d) => JsonValue::String(d.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Value::List(items) => {
                JsonValue::Array(items.iter().cloned().map(JsonValue::String).collect())
            }
        }
    }

    /// Materializes a JSON field. Returns `None` for shapes a row cannot hold
    /// (nested objects that are not timestamps).
    pub fn from_json(value: &JsonValue) -> Option<Value> {
        match value {
            JsonValue::Null => Some(Value::Null),
            JsonValue::Bool(b) => Some(Value::Text(b.to_string())),
            JsonValue::Number(n) => n.as_f64().map(Value::Number),
            JsonValue::String(s) => Some(Value::Text(s.clone())),
            JsonValue::Array(items) => Some(Value::List(
                items
                    .iter()
                    .filter_map(|item| match item {
                        JsonValue::String(s) => Some(s.clone()),
                        JsonValue::Number(n) => Some(format_number(n.as_f64()?)),
                        _ => None,
                    })
                    .collect(),
            )),
            JsonValue::Object(_) => timestamp_from_json(value).map(Value::Date),
        }
    }
}

/// Renders a number the way a record would display it: integral values
/// without a fractional part.
pub(crate) fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Document-store timestamps arrive either as `{seconds, nanoseconds}` or as
/// `{"$date": <RFC 3339 string | epoch millis>}`.
fn timestamp_from_json(value: &JsonValue) -> Option<DateTime<Utc>> {
    let object = value.as_object()?;
    if let Some(date) = object.get("$date") {
        return match date {
            JsonValue::String(s) => DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|d| d.with_timezone(&Utc)),
            JsonValue::Number(n) => DateTime::from_timestamp_millis(n.as_i64()?),
            _ => None,
        };
    }
    let seconds = object.get("seconds")?.as_i64()?;
    let nanos = object
        .get("nanoseconds")
        .and_then(JsonValue::as_u64)
        .unwrap_or(0);
    DateTime::from_timestamp(seconds, u32::try_from(nanos).ok()?)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Text(s) => f.write_str(s),
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Date(d) => f.write_str(&d.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Value::List(items) => f.write_str(&items.join(",")),
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(v as f64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Number(v as f64)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Date(v)
    }
}

impl From<Vec<&str>> for Value {
    fn from(v: Vec<&str>) -> Self {
        Value::List(v.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self {
        Value::List(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// One record: a mapping from field name to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: HashMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Row::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Field accessor. Absent fields and explicit nulls both read as `None`,
    /// so search, filtering and sorting share one missing-value policy.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).filter(|v| !v.is_null())
    }

    /// Iterates over present, non-null fields.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.values().filter(|v| !v.is_null())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Materializes one record fetched from the document store.
    pub fn from_json(value: &JsonValue) -> Result<Row> {
        let object = value
            .as_object()
            .ok_or_else(|| GridError::InvalidRow(json_kind(value)))?;

        let mut row = Row::new();
        for (field, raw) in object {
            match Value::from_json(raw) {
                Some(v) => row.insert(field.clone(), v),
                None => log::trace!("dropping field '{}' with unsupported shape", field),
            }
        }
        Ok(row)
    }

    /// Materializes a fetched collection. Fails fast on a non-array input or
    /// on any element that is not a record.
    pub fn from_json_array(value: &JsonValue) -> Result<Vec<Row>> {
        let items = value
            .as_array()
            .ok_or_else(|| GridError::InvalidRows(json_kind(value)))?;
        items.iter().map(Row::from_json).collect()
    }

    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Row {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_get_missing_and_null() {
        let row = Row::new().with("name", "Acme").with("phone", Value::Null);

        assert_eq!(row.get("name").and_then(Value::as_text), Some("Acme"));
        assert!(row.get("phone").is_none());
        assert!(row.get("email").is_none());
        assert_eq!(row.values().count(), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from(10).to_string(), "10");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::from(vec!["a", "b"]).to_string(), "a,b");
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(Value::from(date).to_string(), "2024-03-01T12:00:00.000Z");
    }

    #[test]
    fn test_from_json_record() {
        let row = Row::from_json(&json!({
            "id": "lead-1",
            "amount": 2500,
            "tags": ["hot", 3, {"skip": true}],
            "verified": true,
            "notes": null,
            "createdAt": {"seconds": 1700000000, "nanoseconds": 0},
            "lastContact": {"$date": "2024-01-02T03:04:05Z"},
            "address": {"city": "Oslo"}
        }))
        .unwrap();

        assert_eq!(row.get("id").and_then(Value::as_text), Some("lead-1"));
        assert_eq!(row.get("amount").and_then(Value::as_number), Some(2500.0));
        assert_eq!(
            row.get("tags").and_then(Value::as_list),
            Some(&["hot".to_string(), "3".to_string()][..])
        );
        assert_eq!(row.get("verified").and_then(Value::as_text), Some("true"));
        assert!(row.get("notes").is_none());
        assert_eq!(
            row.get("createdAt").and_then(Value::as_date),
            Utc.timestamp_opt(1_700_000_000, 0).single()
        );
        assert_eq!(
            row.get("lastContact").and_then(Value::as_date),
            Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap())
        );
        // Nested non-timestamp objects are dropped
        assert!(row.get("address").is_none());
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        assert_eq!(
            Row::from_json(&json!("lead")),
            Err(GridError::InvalidRow("string"))
        );
        assert_eq!(
            Row::from_json_array(&json!({"id": 1})),
            Err(GridError::InvalidRows("object"))
        );
        assert!(Row::from_json_array(&json!([{"id": 1}, 2])).is_err());
        assert_eq!(Row::from_json_array(&json!([])).unwrap().len(), 0);
    }

    #[test]
    fn test_to_json() {
        let row = Row::new().with("v", 3).with("tags", vec!["x"]);
        assert_eq!(row.to_json(), json!({"v": 3.0, "tags": ["x"]}));
    }
}

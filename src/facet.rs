//! Per-option row counts for `select` columns, e.g. status badges above a
//! lead list.

use crate::column::{ColumnDescriptor, FilterOption, FilterType};
use crate::error::{GridError, Result};
use crate::value::{Row, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct FacetCount {
    pub option: FilterOption,
    pub count: usize,
}

/// Counts, for each option of a `select` column, the rows whose value (or
/// any element of a list value) equals it. Options keep their configured
/// order; a row may count toward several options when its value is a list.
pub fn facet_counts<'r, I>(rows: I, column: &ColumnDescriptor) -> Result<Vec<FacetCount>>
where
    I: IntoIterator<Item = &'r Row>,
{
    if column.filter_type != FilterType::Select {
        return Err(GridError::filter_type_mismatch(
            column.id.clone(),
            column.filter_type.name(),
            FilterType::Select.name(),
        ));
    }

    let mut counts = vec![0usize; column.filter_options.len()];
    for row in rows {
        let Some(value) = row.get(&column.id) else {
            continue;
        };
        for (option, count) in column.filter_options.iter().zip(counts.iter_mut()) {
            let hit = match value {
                Value::List(items) => items.iter().any(|item| *item == option.value),
                other => other.to_string() == option.value,
            };
            if hit {
                *count += 1;
            }
        }
    }

    Ok(column
        .filter_options
        .iter()
        .cloned()
        .zip(counts)
        .map(|(option, count)| FacetCount { option, count })
        .collect())
}

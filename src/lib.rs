//! Gridline - Tabular Data Engine
//!
//! Search, multi-criteria filtering, type-aware sorting and pagination for
//! list views over records fetched from a document store (leads, clients,
//! investors, partners). Every list view supplies its column descriptors and
//! its current state; one engine does the rest.
//!
//! Pipeline: rows → predicate filter → stable sort → paginate → page.
//! The engine is synchronous and pure apart from memoizing the last
//! filtered-and-sorted order.

pub mod column;
pub mod config;
pub mod engine;
pub mod error;
pub mod facet;
pub mod filter;
pub mod page;
pub mod sort;
pub mod state;
pub mod value;

#[cfg(feature = "debounce")]
pub mod debounce;

pub use column::{ColumnDescriptor, Columns, FilterOption, FilterType};
pub use config::TableConfig;
pub use engine::{RowSet, TableEngine, TableQuery, TableView};
pub use error::{GridError, Result};
pub use facet::{facet_counts, FacetCount};
pub use filter::{filter_indices, filter_rows, FilterState, FilterValue, OwnerScope, Predicate};
pub use page::{page_window, paginate, Page};
pub use sort::{compare_values, sort_rows, sorted_rows, SortDirection, SortState};
pub use state::TableState;
pub use value::{Row, Value};

#[cfg(feature = "debounce")]
pub use debounce::{Debouncer, DEFAULT_SEARCH_DEBOUNCE};

#[cfg(test)]
mod integration_tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    const STATUSES: [&str; 3] = ["New", "Qualified", "Negotiation"];

    fn lead_config() -> TableConfig {
        TableConfig::new(vec![
            ColumnDescriptor::new("company").label("Company").text_filter(),
            ColumnDescriptor::new("contact").label("Contact"),
            ColumnDescriptor::new("status").label("Status").select_filter(STATUSES),
            ColumnDescriptor::new("amount").label("Funding").range_filter(),
            ColumnDescriptor::new("lastContact").label("Last contact"),
            ColumnDescriptor::new("tags").label("Tags").unsortable(),
        ])
        .with_page_sizes(10, vec![1, 10, 25])
        .with_empty_message("No leads match your filters")
    }

    /// 25 leads; four of them are Acme companies, two of which are Qualified.
    fn leads() -> Vec<Row> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let acme = [
            (3, "Acme Corp", "Qualified", 40),
            (8, "Acme Logistics", "New", 12),
            (14, "ACME Robotics", "Qualified", 55),
            (20, "Acme Foods", "Negotiation", 70),
        ];

        (0..25)
            .map(|i| {
                let (company, status, day) = match acme.iter().find(|(idx, ..)| *idx == i) {
                    Some(&(_, company, status, day)) => (company.to_string(), status, day),
                    None => (format!("Company {}", i), STATUSES[i % 3], i as i64),
                };
                Row::new()
                    .with("id", format!("lead-{}", i))
                    .with("company", company)
                    .with("contact", format!("Contact {}", i))
                    .with("status", status)
                    .with("amount", (i as i64 + 1) * 1000)
                    .with("lastContact", start + Duration::days(day))
                    .with("tags", vec!["inbound"])
            })
            .collect()
    }

    #[test]
    fn test_end_to_end_lead_list() {
        let mut engine = TableEngine::new(lead_config()).unwrap();
        let rows = RowSet::new(leads());
        let mut state = TableState::new(&engine);

        state.set_search("acme");
        let view = engine.run(&rows, state.query()).unwrap();
        assert_eq!(view.result_count, 4);

        state.set_filter("status", FilterValue::select(["Qualified"]));
        state.toggle_sort("lastContact", engine.columns()).unwrap();
        state.toggle_sort("lastContact", engine.columns()).unwrap();
        state.set_page_size(1).unwrap();
        assert_eq!(state.query().sort, SortState::descending("lastContact"));

        let view = engine.run(&rows, state.query()).unwrap();
        assert_eq!(view.result_count, 2);
        assert_eq!(view.total_pages, 2);
        assert_eq!(view.current_page, 1);
        assert_eq!(view.page_rows.len(), 1);
        assert_eq!(view.page_rows[0].get("id").unwrap().as_text(), Some("lead-14"));

        state.set_page(2);
        let view = engine.run(&rows, state.query()).unwrap();
        assert_eq!(view.page_rows[0].get("id").unwrap().as_text(), Some("lead-3"));
        assert_eq!(view.page_window(), vec![1, 2]);
    }

    #[test]
    fn test_no_matches_reports_empty() {
        let mut engine = TableEngine::new(lead_config()).unwrap();
        let rows = RowSet::new(leads());
        let mut state = TableState::new(&engine);

        state.set_search("initech");
        let view = engine.run(&rows, state.query()).unwrap();
        assert!(view.is_empty());
        assert!(view.page_rows.is_empty());
        assert_eq!(view.total_pages, 1);
        assert_eq!(engine.empty_message(), "No leads match your filters");
    }

    #[test]
    fn test_funding_range_and_my_leads() {
        let mut engine = TableEngine::new(lead_config()).unwrap();
        let rows: Vec<Row> = leads()
            .into_iter()
            .enumerate()
            .map(|(i, mut row)| {
                row.insert("assignedTo", if i < 10 { "u-1" } else { "u-2" });
                row
            })
            .collect();
        let rows = RowSet::new(rows);

        let query = engine
            .default_query()
            .filter("amount", FilterValue::range(Some(5000.0), Some(12000.0)))
            .scope(OwnerScope::new("assignedTo", "u-1"))
            .sort(SortState::descending("amount"));
        let view = engine.run(&rows, &query).unwrap();

        // amounts 5000..=10000 belong to leads 4..=9, all assigned to u-1
        assert_eq!(view.result_count, 6);
        assert_eq!(view.page_rows[0].get("id").unwrap().as_text(), Some("lead-9"));
        assert_eq!(view.page_rows[5].get("id").unwrap().as_text(), Some("lead-4"));
    }

    #[test]
    fn test_rows_from_document_store_json() {
        let mut engine = TableEngine::new(lead_config()).unwrap();
        let rows = RowSet::from_json(&serde_json::json!([
            {"id": "a", "company": "Acme", "status": "New",
             "lastContact": {"seconds": 1704100000, "nanoseconds": 0}},
            {"id": "b", "company": "Globex", "status": "Qualified",
             "lastContact": {"seconds": 1704200000, "nanoseconds": 0}},
            {"id": "c", "company": "Hooli", "status": "Qualified", "lastContact": null}
        ]))
        .unwrap();

        let query = engine.default_query().sort(SortState::ascending("lastContact"));
        let view = engine.run(&rows, &query).unwrap();
        let ids: Vec<&str> = view
            .page_rows
            .iter()
            .filter_map(|r| r.get("id")?.as_text())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);

        let counts: Vec<usize> = engine
            .facet_counts(&rows, "status")
            .unwrap()
            .iter()
            .map(|f| f.count)
            .collect();
        assert_eq!(counts, vec![1, 2, 0]);
    }
}

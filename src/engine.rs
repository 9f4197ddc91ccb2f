//! The table engine: filter, then sort, then paginate.
//!
//! The engine keeps no row data of its own. The consuming view owns a
//! `RowSet` and a `TableQuery` and passes both in on every call. The only
//! thing remembered between calls is the filtered and sorted index list for
//! the last (rows, search, filters, scope, sort) tuple, the same way a sorted
//! view keeps an index into its parent table rather than copies of its rows.

use crate::column::Columns;
use crate::config::TableConfig;
use crate::error::Result;
use crate::facet::{facet_counts, FacetCount};
use crate::filter::{filter_indices, FilterState, FilterValue, OwnerScope, Predicate};
use crate::page::{page_window, paginate};
use crate::sort::{sort_indices, SortState};
use crate::value::Row;
use serde_json::{json, Value as JsonValue};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

fn next_revision() -> u64 {
    NEXT_REVISION.fetch_add(1, Ordering::Relaxed)
}

/// Rows supplied by the data layer, tagged with a revision that changes
/// whenever the contents change. Revisions are unique across all row sets in
/// the process, so two row sets never share cached results.
#[derive(Debug, Clone)]
pub struct RowSet {
    rows: Vec<Row>,
    revision: u64,
}

impl RowSet {
    pub fn new(rows: Vec<Row>) -> Self {
        RowSet {
            rows,
            revision: next_revision(),
        }
    }

    /// Materializes a fetched JSON collection.
    pub fn from_json(value: &JsonValue) -> Result<Self> {
        Ok(RowSet::new(Row::from_json_array(value)?))
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Replaces the contents, e.g. after a refetch.
    pub fn replace(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        self.revision = next_revision();
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
        self.revision = next_revision();
    }
}

impl From<Vec<Row>> for RowSet {
    fn from(rows: Vec<Row>) -> Self {
        RowSet::new(rows)
    }
}

/// Everything that determines which rows a view shows.
#[derive(Debug, Clone, PartialEq)]
pub struct TableQuery {
    pub search: String,
    pub filters: FilterState,
    pub scope: Option<OwnerScope>,
    pub sort: SortState,
    pub page_size: usize,
    /// 1-based; clamped by the engine
    pub page: usize,
}

impl TableQuery {
    pub fn new(page_size: usize) -> Self {
        TableQuery {
            search: String::new(),
            filters: FilterState::new(),
            scope: None,
            sort: SortState::none(),
            page_size,
            page: 1,
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn filter(mut self, column: impl Into<String>, value: FilterValue) -> Self {
        self.filters.set(column, value);
        self
    }

    pub fn scope(mut self, scope: OwnerScope) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn sort(mut self, sort: SortState) -> Self {
        self.sort = sort;
        self
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    fn memo_key(&self, revision: u64) -> MemoKey {
        MemoKey {
            revision,
            search: self.search.trim().to_string(),
            filters: self.filters.clone(),
            scope: self.scope.clone(),
            sort: self.sort.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct MemoKey {
    revision: u64,
    search: String,
    filters: FilterState,
    scope: Option<OwnerScope>,
    sort: SortState,
}

/// What the presentation layer renders.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView<'r> {
    pub page_rows: Vec<&'r Row>,
    pub total_pages: usize,
    /// The requested page after clamping
    pub current_page: usize,
    /// Rows matching the query across all pages
    pub result_count: usize,
}

impl TableView<'_> {
    /// True when nothing matched; the caller shows the empty message.
    pub fn is_empty(&self) -> bool {
        self.result_count == 0
    }

    /// Page numbers for the navigation controls.
    pub fn page_window(&self) -> Vec<usize> {
        page_window(self.total_pages, self.current_page)
    }

    pub fn to_json(&self) -> JsonValue {
        json!({
            "pageRows": self.page_rows.iter().map(|row| row.to_json()).collect::<Vec<_>>(),
            "totalPages": self.total_pages,
            "currentPage": self.current_page,
            "resultCount": self.result_count,
        })
    }
}

/// Evaluates queries for one configured table.
///
/// # Examples
///
/// ```
/// use gridline::{ColumnDescriptor, FilterValue, Row, RowSet, SortState, TableConfig, TableEngine, TableQuery};
///
/// let config = TableConfig::new(vec![
///     ColumnDescriptor::new("company").text_filter(),
///     ColumnDescriptor::new("status").select_filter(["New", "Qualified"]),
///     ColumnDescriptor::new("amount").range_filter(),
/// ]);
/// let mut engine = TableEngine::new(config).unwrap();
///
/// let rows = RowSet::new(vec![
///     Row::new().with("company", "Acme").with("status", "New").with("amount", 100),
///     Row::new().with("company", "Acme Labs").with("status", "Qualified").with("amount", 300),
///     Row::new().with("company", "Acme West").with("status", "Qualified").with("amount", 200),
/// ]);
///
/// let query = TableQuery::new(10)
///     .search("acme")
///     .filter("status", FilterValue::select(["Qualified"]))
///     .sort(SortState::ascending("amount"));
/// let view = engine.run(&rows, &query).unwrap();
///
/// assert_eq!(view.result_count, 2);
/// assert_eq!(view.page_rows[0].get("company").unwrap().as_text(), Some("Acme West"));
/// ```
#[derive(Debug)]
pub struct TableEngine {
    config: TableConfig,
    columns: Columns,
    cache: Option<(MemoKey, Vec<usize>)>,
    recomputations: u64,
}

impl TableEngine {
    /// Validates the configuration; misconfiguration fails here.
    pub fn new(config: TableConfig) -> Result<Self> {
        let columns = config.validate()?;
        Ok(TableEngine {
            config,
            columns,
            cache: None,
            recomputations: 0,
        })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    pub fn empty_message(&self) -> &str {
        &self.config.empty_message
    }

    /// A query with the configured default page size and nothing else set.
    pub fn default_query(&self) -> TableQuery {
        TableQuery::new(self.config.default_page_size)
    }

    /// How many times filtering and sorting actually ran.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    /// Drops the memoized result.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// Runs filter, sort and paginate for `query` over `rows`.
    pub fn run<'r>(&mut self, rows: &'r RowSet, query: &TableQuery) -> Result<TableView<'r>> {
        let key = query.memo_key(rows.revision());

        let indices = match self.cache.take() {
            Some((cached, indices)) if cached == key => {
                log::debug!("reusing {} matched rows (revision {})", indices.len(), key.revision);
                indices
            }
            _ => {
                let indices = self.compute(rows.rows(), query)?;
                log::debug!(
                    "matched {} of {} rows (revision {}, sort {:?})",
                    indices.len(),
                    rows.len(),
                    key.revision,
                    query.sort.key
                );
                self.recomputations += 1;
                indices
            }
        };

        let page = match paginate(&indices, query.page_size, query.page) {
            Ok(page) => page,
            Err(err) => {
                self.cache = Some((key, indices));
                return Err(err);
            }
        };
        let view = TableView {
            page_rows: page.rows.into_iter().map(|i| &rows.rows()[i]).collect(),
            total_pages: page.total_pages,
            current_page: page.page,
            result_count: indices.len(),
        };
        self.cache = Some((key, indices));
        Ok(view)
    }

    fn compute(&self, rows: &[Row], query: &TableQuery) -> Result<Vec<usize>> {
        query.sort.validate(&self.columns)?;
        let predicate = Predicate::new(&query.search, &query.filters, &self.columns)?
            .with_scope(query.scope.clone());

        let mut indices = if predicate.is_trivial() {
            (0..rows.len()).collect()
        } else {
            filter_indices(rows, &predicate)
        };
        sort_indices(&mut indices, rows, &query.sort);
        Ok(indices)
    }

    /// Per-option counts for a configured `select` column over all rows.
    pub fn facet_counts(&self, rows: &RowSet, column: &str) -> Result<Vec<FacetCount>> {
        facet_counts(rows.rows(), self.columns.require(column)?)
    }
}

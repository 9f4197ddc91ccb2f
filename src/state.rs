//! View-side table state.
//!
//! `TableState` is what a list view holds on to between renders. It applies
//! the call-site rules the engine deliberately leaves out: any change to the
//! search term, the filters or the page size sends the user back to page 1,
//! and clicking a column header cycles its sort.

use crate::column::Columns;
use crate::engine::{TableEngine, TableQuery, TableView};
use crate::error::{GridError, Result};
use crate::filter::{FilterValue, OwnerScope};
use crate::sort::{SortDirection, SortState};

#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    query: TableQuery,
    page_size_options: Vec<usize>,
}

impl TableState {
    /// Initial state for a table: default page size, first page, no search,
    /// filters or sort.
    pub fn new(engine: &TableEngine) -> Self {
        TableState {
            query: engine.default_query(),
            page_size_options: engine.config().page_size_options.clone(),
        }
    }

    /// The query to hand to `TableEngine::run`.
    pub fn query(&self) -> &TableQuery {
        &self.query
    }

    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term != self.query.search {
            self.query.search = term;
            self.query.page = 1;
        }
    }

    /// Sets one column's constraint; an empty value removes it.
    pub fn set_filter(&mut self, column: impl Into<String>, value: FilterValue) {
        self.query.filters.set(column, value);
        self.query.page = 1;
    }

    pub fn clear_filter(&mut self, column: &str) {
        if self.query.filters.remove(column).is_some() {
            self.query.page = 1;
        }
    }

    pub fn clear_filters(&mut self) {
        self.query.filters.clear();
        self.query.page = 1;
    }

    /// Restricts the view to one owner's rows ("my leads"), or lifts the
    /// restriction with `None`.
    pub fn set_scope(&mut self, scope: Option<OwnerScope>) {
        self.query.scope = scope;
        self.query.page = 1;
    }

    /// Header click: an unsorted column sorts ascending, an ascending column
    /// flips to descending, and a descending column clears the sort.
    pub fn toggle_sort(&mut self, column: &str, columns: &Columns) -> Result<()> {
        SortState::ascending(column).validate(columns)?;

        self.query.sort = match (&self.query.sort.key, self.query.sort.direction) {
            (Some(key), SortDirection::Ascending) if key == column => SortState::descending(column),
            (Some(key), SortDirection::Descending) if key == column => SortState::none(),
            _ => SortState::ascending(column),
        };
        Ok(())
    }

    pub fn set_sort(&mut self, sort: SortState) {
        self.query.sort = sort;
    }

    /// Changes the page size and returns to page 1. The size must be one of
    /// the configured options.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        if !self.page_size_options.contains(&page_size) {
            return Err(GridError::InvalidPageSize {
                size: page_size,
                reason: "not one of the page size options",
            });
        }
        self.query.page_size = page_size;
        self.query.page = 1;
        Ok(())
    }

    pub fn set_page(&mut self, page: usize) {
        self.query.page = page.max(1);
    }

    /// Adopts the page the engine actually displayed, so later navigation
    /// starts from a page that exists.
    pub fn sync_page(&mut self, view: &TableView<'_>) {
        self.query.page = view.current_page;
    }
}

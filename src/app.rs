//! Application state management.
//!
//! Owns the table page, selection, sort, filters, pagination and detail panel.
//! State transitions return [`Command`]s for the dispatcher instead of doing
//! I/O themselves; completed requests come back as [`Message`]s.

use crate::api::{ApiError, Link, Page, RelationshipDetail, Row};
use crate::debounce::Debouncer;
use crate::detail::{DetailView, LinkSide, SeriesToggle};
use crate::export;
use crate::local::{self, LocalTable};
use crate::pagination::Pagination;
use crate::query::PageQuery;
use crate::sort::SortIndicators;
use crate::view::{DetailSource, FilterMode, LinkSource, TableOptions};
use anyhow::Result;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

/// Input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    /// Normal table navigation
    List,
    /// Editing the free-text search
    Search,
    /// Editing the per-column filters
    Filters,
}

/// Which pane receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Table,
    GeneLinks,
    DiseaseLinks,
}

/// Request to be run by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch a page of rows
    FetchPage(PageQuery),
    /// Fetch the same page as a server-rendered CSV file
    ExportCsv(PageQuery),
    /// Fetch the detail payload of a row
    FetchDetail(String),
    /// Search articles for a gene or disease name
    SearchArticles { side: LinkSide, term: String },
}

/// Completed request delivered back to the event loop.
#[derive(Debug)]
pub enum Message {
    Page(Result<Page, ApiError>),
    Detail {
        id: String,
        result: Result<RelationshipDetail, ApiError>,
    },
    Links {
        side: LinkSide,
        result: Result<Vec<Link>, ApiError>,
    },
    Export(Result<String, ApiError>),
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    /// Active view configuration
    pub options: TableOptions,
    /// Rows of the current page
    pub rows: Vec<Row>,
    /// Selected row index (in rows)
    pub selected: Option<usize>,
    /// Column sort indicators
    pub sort: SortIndicators,
    /// Column the sort key acts on
    pub sort_cursor: usize,
    /// Free-text search
    pub search_query: String,
    /// Per-column filter text by column index
    pub column_filters: BTreeMap<usize, String>,
    /// Column whose filter is being edited
    pub filter_column: usize,
    pub pagination: Pagination,
    debouncer: Debouncer,
    /// Whether a page request is in flight
    pub loading: bool,
    pub detail: DetailView,
    pub mode: UiMode,
    pub focus: Focus,
    /// Status message to display
    pub status_message: Option<String>,
    /// Full row set of the local view
    local: Option<LocalTable>,
    /// Directory exports are written to
    export_dir: PathBuf,
}

impl App {
    /// Create a new application state.
    ///
    /// # Arguments
    /// * `options` - Table view options
    /// * `export_dir` - Directory `data.csv` is written to
    pub fn new(options: TableOptions, export_dir: PathBuf) -> Self {
        let filter_column = options.filterable_columns().next().unwrap_or(0);
        Self {
            sort: SortIndicators::new(options.columns.len()),
            debouncer: Debouncer::new(options.debounce),
            options,
            rows: Vec::new(),
            selected: None,
            sort_cursor: 0,
            search_query: String::new(),
            column_filters: BTreeMap::new(),
            filter_column,
            pagination: Pagination::default(),
            loading: false,
            detail: DetailView::default(),
            mode: UiMode::List,
            focus: Focus::Table,
            status_message: None,
            local: None,
            export_dir,
        }
    }

    /// Attach a local row set; its header replaces the configured columns.
    pub fn with_local_table(mut self, table: LocalTable) -> Self {
        self.options.columns = table.columns().to_vec();
        self.sort = SortIndicators::new(self.options.columns.len());
        self.filter_column = 0;
        self.local = Some(table);
        self
    }

    /// Snapshot of the state sent with a list request.
    pub fn query(&self) -> PageQuery {
        PageQuery {
            search: self.search_query.clone(),
            column_filters: self.column_filters.clone(),
            sort: self.sort.active(),
            page: self.pagination.page(),
        }
    }

    /// Re-query the current page.
    ///
    /// # Returns
    /// * `Vec<Command>` - A page fetch, or for the local view the commands
    ///   that follow rendering the new rows
    pub fn refresh(&mut self) -> Vec<Command> {
        if let Some(local) = &self.local {
            let page = local.query(&self.search_query, self.sort.active());
            return self.set_page(page);
        }

        self.loading = true;
        vec![Command::FetchPage(self.query())]
    }

    /// Replace the displayed rows with a freshly loaded page.
    ///
    /// # Details
    /// Updates the page count and selects the first row, which loads its
    /// detail. An empty page leaves nothing selected.
    pub fn set_page(&mut self, page: Page) -> Vec<Command> {
        self.loading = false;
        self.rows = page.items;
        self.pagination.set_total_pages(page.total_pages);

        if self.rows.is_empty() {
            self.selected = None;
            self.detail.clear();
            return Vec::new();
        }
        self.select_row(0)
    }

    /// Select a row and load its detail.
    ///
    /// # Details
    /// Remote views fetch the detail by row id. The local view builds it
    /// from the row itself and only issues the two article searches.
    pub fn select_row(&mut self, index: usize) -> Vec<Command> {
        if index >= self.rows.len() {
            return Vec::new();
        }
        self.selected = Some(index);

        match &self.options.detail {
            DetailSource::None => Vec::new(),
            DetailSource::Remote(_) => match self.rows[index].id() {
                Some(id) => vec![Command::FetchDetail(id.to_string())],
                None => Vec::new(),
            },
            DetailSource::Row => {
                let detail = local::row_detail(&self.rows[index], self.options.columns.len());
                self.show_detail(detail)
            }
        }
    }

    /// Whether an edit is waiting for its debounced fetch.
    pub fn search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Get the currently selected row.
    pub fn selected_row(&self) -> Option<&Row> {
        self.rows.get(self.selected?)
    }

    /// Move selection up, wrapping to the bottom.
    pub fn move_up(&mut self) -> Vec<Command> {
        if self.rows.is_empty() {
            return Vec::new();
        }
        let index = match self.selected {
            Some(0) | None => self.rows.len() - 1,
            Some(i) => i - 1,
        };
        self.select_row(index)
    }

    /// Move selection down, wrapping to the top.
    pub fn move_down(&mut self) -> Vec<Command> {
        if self.rows.is_empty() {
            return Vec::new();
        }
        let index = self.selected.map_or(0, |i| (i + 1) % self.rows.len());
        self.select_row(index)
    }

    pub fn next_page(&mut self) -> Vec<Command> {
        if self.pagination.next() {
            self.refresh()
        } else {
            Vec::new()
        }
    }

    pub fn prev_page(&mut self) -> Vec<Command> {
        if self.pagination.prev() {
            self.refresh()
        } else {
            Vec::new()
        }
    }

    /// Cycle the sort indicator of `column` and refetch from the first page.
    pub fn cycle_sort(&mut self, column: usize) -> Vec<Command> {
        if column >= self.options.columns.len() {
            return Vec::new();
        }
        self.sort.cycle(column);
        self.sort_cursor = column;
        self.pagination.reset();
        self.debouncer.cancel();
        self.refresh()
    }

    /// Move the sort cursor one column right, wrapping.
    pub fn next_sort_column(&mut self) {
        let count = self.options.columns.len();
        if count > 0 {
            self.sort_cursor = (self.sort_cursor + 1) % count;
        }
    }

    /// Move the sort cursor one column left, wrapping.
    pub fn prev_sort_column(&mut self) {
        let count = self.options.columns.len();
        if count > 0 {
            self.sort_cursor = (self.sort_cursor + count - 1) % count;
        }
    }

    /// Record an edit of the search or a filter.
    ///
    /// # Details
    /// The page index goes back to 0 right away so the debounced fetch never
    /// asks for an out-of-range page of the new result set.
    fn input_changed(&mut self, now: Instant) {
        self.pagination.reset();
        self.debouncer.touch(now);
    }

    /// Add a character to the search query.
    ///
    /// # Details
    /// Only works in Search mode.
    pub fn add_search_char(&mut self, ch: char, now: Instant) {
        if self.mode == UiMode::Search {
            self.search_query.push(ch);
            self.input_changed(now);
        }
    }

    /// Remove last character from search query.
    pub fn remove_search_char(&mut self, now: Instant) {
        if self.mode == UiMode::Search && self.search_query.pop().is_some() {
            self.input_changed(now);
        }
    }

    /// Add a character to the filter of the edited column.
    pub fn add_filter_char(&mut self, ch: char, now: Instant) {
        if self.mode == UiMode::Filters {
            self.column_filters
                .entry(self.filter_column)
                .or_default()
                .push(ch);
            self.input_changed(now);
        }
    }

    /// Remove last character from the filter of the edited column.
    pub fn remove_filter_char(&mut self, now: Instant) {
        if self.mode != UiMode::Filters {
            return;
        }
        let removed = self
            .column_filters
            .get_mut(&self.filter_column)
            .and_then(String::pop)
            .is_some();
        if removed {
            self.input_changed(now);
        }
    }

    /// Edit the next filterable column, wrapping.
    pub fn next_filter_column(&mut self) {
        let columns: Vec<usize> = self.options.filterable_columns().collect();
        if let Some(pos) = columns.iter().position(|c| *c == self.filter_column) {
            self.filter_column = columns[(pos + 1) % columns.len()];
        } else if let Some(first) = columns.first() {
            self.filter_column = *first;
        }
    }

    /// Edit the previous filterable column, wrapping.
    pub fn prev_filter_column(&mut self) {
        let columns: Vec<usize> = self.options.filterable_columns().collect();
        if let Some(pos) = columns.iter().position(|c| *c == self.filter_column) {
            self.filter_column = columns[(pos + columns.len() - 1) % columns.len()];
        } else if let Some(first) = columns.first() {
            self.filter_column = *first;
        }
    }

    /// Enter the mode used to edit search text for this view.
    pub fn begin_search(&mut self) {
        self.mode = match self.options.filter_mode {
            FilterMode::FreeText => UiMode::Search,
            FilterMode::PerColumn => UiMode::Filters,
        };
    }

    /// Fire the debounced fetch once the input has been quiet long enough.
    pub fn tick(&mut self, now: Instant) -> Vec<Command> {
        if self.debouncer.fire(now) {
            self.refresh()
        } else {
            Vec::new()
        }
    }

    /// Apply a completed request.
    ///
    /// # Details
    /// Responses apply in arrival order; a late response for an older query or
    /// selection still replaces newer state. Failures keep the previous state
    /// and surface in the status bar.
    pub fn apply(&mut self, message: Message) -> Vec<Command> {
        match message {
            Message::Page(Ok(page)) => {
                tracing::debug!(rows = page.items.len(), total_pages = page.total_pages, "page loaded");
                self.set_page(page)
            }
            Message::Page(Err(e)) => {
                self.loading = false;
                self.report_failure("Failed to load rows", &e);
                Vec::new()
            }
            Message::Detail { id, result } => match result {
                Ok(detail) => {
                    tracing::debug!(%id, gene = %detail.gene_name, disease = %detail.disease_name, "detail loaded");
                    self.show_detail(detail)
                }
                Err(e) => {
                    self.report_failure(&format!("Failed to load relationship {}", id), &e);
                    Vec::new()
                }
            },
            Message::Links { side, result } => {
                match result {
                    Ok(links) => self.detail.set_links(side, links),
                    Err(e) => self.report_failure("Failed to search articles", &e),
                }
                Vec::new()
            }
            Message::Export(result) => {
                match result {
                    Ok(body) => match export::save_server_export(&self.export_dir, &body) {
                        Ok(path) => self.set_status(format!(
                            "Server export saved to {} at {}",
                            path.display(),
                            chrono::Local::now().format("%H:%M:%S")
                        )),
                        Err(e) => self.set_status(format!("Export failed: {:#}", e)),
                    },
                    Err(e) => self.report_failure("Server export failed", &e),
                }
                Vec::new()
            }
        }
    }

    fn show_detail(&mut self, detail: RelationshipDetail) -> Vec<Command> {
        let embedded = self.options.link_source == LinkSource::Embedded;
        let searches = if embedded {
            Vec::new()
        } else {
            vec![
                Command::SearchArticles {
                    side: LinkSide::Gene,
                    term: detail.gene_name.clone(),
                },
                Command::SearchArticles {
                    side: LinkSide::Disease,
                    term: detail.disease_name.clone(),
                },
            ]
        };
        self.detail.select(detail, embedded);
        searches
    }

    fn report_failure(&mut self, what: &str, error: &ApiError) {
        tracing::warn!(error = %error, "{}", what);
        self.set_status(format!("{}: {}", what, error));
    }

    /// Write the displayed rows to `data.csv`.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - Path of the written file
    pub fn export_local(&self) -> Result<PathBuf> {
        export::write_export(&self.export_dir, &self.rows)
    }

    /// Ask the server for the current page as CSV.
    pub fn export_server(&self) -> Vec<Command> {
        if self.local.is_some() {
            return Vec::new();
        }
        vec![Command::ExportCsv(self.query())]
    }

    /// Number of rows an export would contain.
    pub fn export_count(&self) -> usize {
        self.rows.len()
    }

    /// Swap the gene chart to the other series.
    pub fn flip_gene_series(&mut self) {
        let next = self.detail.gene_series.flip();
        self.detail.toggle_gene(next);
    }

    /// Swap the disease chart to the other series.
    pub fn flip_disease_series(&mut self) {
        let next = self.detail.disease_series.flip();
        self.detail.toggle_disease(next);
    }

    /// Plot series `series` on both charts.
    pub fn show_series(&mut self, series: SeriesToggle) {
        self.detail.toggle_gene(series);
        self.detail.toggle_disease(series);
    }

    /// Cycle focus: table -> gene links -> disease links -> table.
    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Table if self.options.has_detail() => Focus::GeneLinks,
            Focus::Table => Focus::Table,
            Focus::GeneLinks => Focus::DiseaseLinks,
            Focus::DiseaseLinks => Focus::Table,
        };
    }

    /// Link list with focus, if any.
    pub fn focused_links(&self) -> Option<LinkSide> {
        match self.focus {
            Focus::Table => None,
            Focus::GeneLinks => Some(LinkSide::Gene),
            Focus::DiseaseLinks => Some(LinkSide::Disease),
        }
    }

    /// Move up in the focused pane.
    pub fn focus_up(&mut self) -> Vec<Command> {
        match self.focused_links() {
            Some(side) => {
                self.detail.links_mut(side).move_up();
                Vec::new()
            }
            None => self.move_up(),
        }
    }

    /// Move down in the focused pane.
    pub fn focus_down(&mut self) -> Vec<Command> {
        match self.focused_links() {
            Some(side) => {
                self.detail.links_mut(side).move_down();
                Vec::new()
            }
            None => self.move_down(),
        }
    }

    /// URL of the selected link in the focused list.
    pub fn selected_link_url(&self) -> Option<&str> {
        let side = self.focused_links()?;
        self.detail
            .links(side)
            .selected_link()
            .map(|link| link.url.as_str())
    }

    /// Set status message.
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }
}

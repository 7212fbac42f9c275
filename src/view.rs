//! Table view configuration.
//!
//! One parameterized table component serves every explorer view; this module
//! holds the options that tell it which endpoints, columns and behaviours to use.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Which preset view to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    /// Gene–disease relationships with detail plots
    #[default]
    Relationships,
    /// Journal counts per relationship
    Journals,
    /// Rows from a local CSV file, filtered and sorted in-process
    Local,
}

/// How a column's filter text is interpreted by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Substring match
    Text,
    /// `min:max` range, either bound optional
    Numeric,
    Boolean,
}

/// Table column definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Header text
    pub name: String,
    pub kind: ColumnKind,
    /// Whether the column takes a per-column filter
    pub filterable: bool,
}

impl Column {
    pub fn new(name: &str, kind: ColumnKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            filterable: true,
        }
    }

    /// Column shown but never filtered (e.g. the row identifier).
    pub fn fixed(name: &str, kind: ColumnKind) -> Self {
        Self {
            filterable: false,
            ..Self::new(name, kind)
        }
    }
}

/// How search text reaches the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// One `search` parameter matched against all columns
    FreeText,
    /// One `search[i]` parameter per filterable column
    PerColumn,
}

/// Where the detail panel's article links come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkSource {
    /// `gene_links` / `disease_links` of the detail payload
    Embedded,
    /// Follow-up article searches on the gene and disease names
    Search,
}

/// Where the detail panel's content comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailSource {
    /// No detail panel
    None,
    /// Fetched from this endpoint path with the row id appended
    Remote(String),
    /// Built from the trailing series cells of the selected row
    Row,
}

/// Where rows come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Paginated, server-side filtered and sorted
    Remote,
    /// Full row set loaded from a CSV file
    Local(PathBuf),
}

/// Options for one table view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    /// View title shown above the table
    pub title: String,
    /// List endpoint path
    pub list_path: String,
    pub detail: DetailSource,
    /// Article search endpoint path
    pub search_path: String,
    /// Name of the sort column query parameter
    pub sort_column_param: String,
    pub filter_mode: FilterMode,
    pub columns: Vec<Column>,
    pub link_source: LinkSource,
    /// Quiet period before a search or filter edit triggers a fetch
    pub debounce: Duration,
    pub source: DataSource,
}

impl TableOptions {
    /// Gene–disease relationships view.
    pub fn relationships() -> Self {
        use ColumnKind::*;
        Self {
            title: "Relationships".to_string(),
            list_path: "/relationships".to_string(),
            detail: DetailSource::Remote("/relationships".to_string()),
            search_path: "/search".to_string(),
            sort_column_param: "sortcolumn".to_string(),
            filter_mode: FilterMode::PerColumn,
            columns: vec![
                Column::fixed("Id", Text),
                Column::new("Mesh Id", Text),
                Column::new("Disease", Text),
                Column::new("Gene", Text),
                Column::new("P2 Prob", Numeric),
                Column::new("Change Recent", Boolean),
                Column::new("Probability Change", Numeric),
                Column::new("Previous Probability", Numeric),
                Column::new("Publications", Numeric),
                Column::new("Citations", Numeric),
            ],
            link_source: LinkSource::Embedded,
            debounce: Duration::from_millis(250),
            source: DataSource::Remote,
        }
    }

    /// Journal counts view.
    pub fn journals() -> Self {
        use ColumnKind::*;
        Self {
            title: "Journals".to_string(),
            list_path: "/journals".to_string(),
            detail: DetailSource::None,
            search_path: "/search".to_string(),
            sort_column_param: "sortcol".to_string(),
            filter_mode: FilterMode::FreeText,
            columns: vec![
                Column::new("Gene Disease", Text),
                Column::new("Year", Numeric),
                Column::new("Count", Numeric),
            ],
            link_source: LinkSource::Search,
            debounce: Duration::from_millis(500),
            source: DataSource::Remote,
        }
    }

    /// Local CSV view. Columns come from the file header once it is loaded;
    /// the detail panel is drawn from the cells past them.
    pub fn local(path: PathBuf) -> Self {
        Self {
            title: "Local".to_string(),
            list_path: String::new(),
            detail: DetailSource::Row,
            search_path: "/search".to_string(),
            sort_column_param: "sortcolumn".to_string(),
            filter_mode: FilterMode::FreeText,
            columns: Vec::new(),
            link_source: LinkSource::Search,
            debounce: Duration::ZERO,
            source: DataSource::Local(path),
        }
    }

    /// Whether selecting a row loads a detail panel.
    pub fn has_detail(&self) -> bool {
        self.detail != DetailSource::None
    }

    /// Endpoint path of the remote detail fetch.
    pub fn detail_path(&self) -> Option<&str> {
        match &self.detail {
            DetailSource::Remote(path) => Some(path),
            DetailSource::None | DetailSource::Row => None,
        }
    }

    /// CSV file of the local view.
    pub fn local_path(&self) -> Option<&Path> {
        match &self.source {
            DataSource::Local(path) => Some(path),
            DataSource::Remote => None,
        }
    }

    /// Indices of columns that take a per-column filter.
    pub fn filterable_columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.filterable)
            .map(|(i, _)| i)
    }
}

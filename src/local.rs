//! In-process table source.
//!
//! Holds a full unpaginated row set loaded from a CSV file and answers
//! search and sort queries without a server.
//!
//! A record may carry more fields than the header names. Past the header
//! columns come one unplotted field, then the gene years and publication
//! counts, the disease years and publication counts, and the days and
//! occurrence counts of the relationship time series. Each of those fields
//! holds numbers separated by `;` or whitespace.

use crate::api::{Page, RelationshipDetail, Row, SeriesTable, StatSeries};
use crate::sort::{SortState, sort_rows};
use crate::view::{Column, ColumnKind};
use anyhow::{Context, Result};
use std::path::Path;

/// Full row set with its header.
#[derive(Debug, Clone, Default)]
pub struct LocalTable {
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl LocalTable {
    pub fn new(columns: Vec<Column>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Load a CSV file whose first line is the header.
    ///
    /// # Arguments
    /// * `path` - Path to the CSV file
    ///
    /// # Returns
    /// * `Result<LocalTable>` - Loaded table or error
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

        let headers = reader
            .headers()
            .with_context(|| format!("Failed to read CSV header: {}", path.display()))?
            .clone();
        if headers.is_empty() {
            anyhow::bail!("CSV header is required: {}", path.display());
        }

        let columns = headers
            .iter()
            .map(|name| Column::new(name, ColumnKind::Text))
            .collect();

        let mut rows: Vec<Row> = Vec::new();
        for record in reader.records() {
            let record = record.context("Failed to parse CSV record")?;
            rows.push(Row::new(record.iter().map(String::from).collect()));
        }

        tracing::info!(path = %path.display(), rows = rows.len(), "local table loaded");
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Filter and sort the full row set.
    ///
    /// # Arguments
    /// * `search` - Case-insensitive substring matched against the header columns
    /// * `sort` - Sorted column and direction
    ///
    /// # Returns
    /// * `Page` - All matching rows as a single page
    pub fn query(&self, search: &str, sort: Option<(usize, SortState)>) -> Page {
        let needle = search.to_lowercase();
        let shown = self.columns.len();
        let mut items: Vec<Row> = self
            .rows
            .iter()
            .filter(|row| {
                needle.is_empty()
                    || row
                        .cells()
                        .iter()
                        .take(shown)
                        .any(|cell| cell.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();

        if let Some((column, state)) = sort {
            sort_rows(&mut items, column, state);
        }

        Page {
            items,
            total_pages: 1,
        }
    }
}

/// Build the detail panel of a local row.
///
/// # Arguments
/// * `row` - Selected row
/// * `columns` - Number of header columns
///
/// # Returns
/// * `RelationshipDetail` - Gene and disease distributions and the time
///   series; links are left empty for the article searches to fill
///
/// # Details
/// The first two cells name the gene and the disease. Missing or
/// unparsable series fields yield empty series.
pub fn row_detail(row: &Row, columns: usize) -> RelationshipDetail {
    let series = |offset: usize| parse_series(row.cell(columns + offset));

    RelationshipDetail {
        gene_name: row.cell(0).to_string(),
        disease_name: row.cell(1).to_string(),
        gene_data: SeriesTable(vec![series(1), series(2)]),
        disease_data: SeriesTable(vec![series(3), series(4)]),
        stats: vec![StatSeries(
            "Time Series".to_string(),
            series(5),
            series(6),
            "Occurrences".to_string(),
        )],
        ..RelationshipDetail::default()
    }
}

/// Split a series field into values; unparsable entries become gaps.
fn parse_series(field: &str) -> Vec<Option<f64>> {
    field
        .split(|c: char| c == ';' || c.is_whitespace())
        .filter(|value| !value.is_empty())
        .map(|value| value.parse().ok())
        .collect()
}

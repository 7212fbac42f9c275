//! List request parameters.
//!
//! Serializes the table's search, filter, sort and page state into the query
//! string the list endpoint expects.

use crate::sort::SortState;
use crate::view::{ColumnKind, FilterMode, TableOptions};
use std::collections::BTreeMap;

/// Snapshot of the table state needed to request one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageQuery {
    /// Free-text search
    pub search: String,
    /// Per-column filter text by column index
    pub column_filters: BTreeMap<usize, String>,
    /// Sorted column and direction
    pub sort: Option<(usize, SortState)>,
    /// Zero-based page index
    pub page: usize,
}

impl PageQuery {
    /// Build query parameters for the list endpoint.
    ///
    /// # Arguments
    /// * `options` - View options (filter mode, columns, sort parameter name)
    ///
    /// # Returns
    /// * `Vec<(String, String)>` - Ordered key/value pairs
    ///
    /// # Details
    /// In per-column mode every filterable column is sent, empty or not; numeric
    /// columns default to the open range `:`.
    pub fn to_params(&self, options: &TableOptions) -> Vec<(String, String)> {
        let mut params = Vec::new();

        match options.filter_mode {
            FilterMode::FreeText => {
                params.push(("search".to_string(), self.search.clone()));
            }
            FilterMode::PerColumn => {
                for index in options.filterable_columns() {
                    let text = self
                        .column_filters
                        .get(&index)
                        .map(String::as_str)
                        .unwrap_or("");
                    let value = match options.columns[index].kind {
                        ColumnKind::Numeric if text.is_empty() => ":".to_string(),
                        _ => text.to_string(),
                    };
                    params.push((format!("search[{}]", index), value));
                }
            }
        }

        if let Some((column, state)) = self.sort
            && state != SortState::None
        {
            params.push((options.sort_column_param.clone(), column.to_string()));
            params.push(("sortstate".to_string(), state.wire_value().to_string()));
        }

        params.push(("page".to_string(), self.page.to_string()));
        params
    }
}

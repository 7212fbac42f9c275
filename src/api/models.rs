//! Relationship server models and data structures.
//!
//! Contains table rows, pages, relationship details and article links as the
//! server sends them.

use crate::api::error::ApiError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One record of the paginated result set.
///
/// The server sends rows as JSON arrays. Cells are kept as display strings;
/// the first cell is the row identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Value>", into = "Vec<String>")]
pub struct Row {
    cells: Vec<String>,
}

impl Row {
    /// Create a row from its cell values.
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Row identifier (first column value).
    ///
    /// # Returns
    /// * `Option<&str>` - Identifier or None for an empty row
    pub fn id(&self) -> Option<&str> {
        self.cells.first().map(String::as_str)
    }

    /// Cell values in column order.
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Cell value at `column`, empty when the row is short.
    pub fn cell(&self, column: usize) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Self {
            cells: values.iter().map(display_value).collect(),
        }
    }
}

impl From<Row> for Vec<String> {
    fn from(row: Row) -> Self {
        row.cells
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Render a JSON scalar the way it should appear in a table cell.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// One page of rows as returned by the list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Rows on this page
    pub items: Vec<Row>,
    /// Total number of pages for the current query
    pub total_pages: usize,
}

/// Time-indexed series with one x axis and several y series.
///
/// Wire form is `[x[], y1[], y2[], ...]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesTable(pub Vec<Vec<Option<f64>>>);

impl SeriesTable {
    /// Zip the x column with y column `index`, skipping missing values.
    ///
    /// # Arguments
    /// * `index` - Column index of the y series (1 for the first series)
    ///
    /// # Returns
    /// * `Vec<(f64, f64)>` - Plottable points, empty if either column is missing
    pub fn points(&self, index: usize) -> Vec<(f64, f64)> {
        match (self.0.first(), self.0.get(index)) {
            (Some(xs), Some(ys)) if index > 0 => zip_points(xs, ys),
            _ => Vec::new(),
        }
    }

    /// Number of y series available.
    pub fn series_count(&self) -> usize {
        self.0.len().saturating_sub(1)
    }
}

fn zip_points(xs: &[Option<f64>], ys: &[Option<f64>]) -> Vec<(f64, f64)> {
    xs.iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect()
}

/// One tab of the statistics panel.
///
/// Wire form is `[label, x[], y[], y_axis_label]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatSeries(
    pub String,
    pub Vec<Option<f64>>,
    pub Vec<Option<f64>>,
    pub String,
);

impl StatSeries {
    pub fn label(&self) -> &str {
        &self.0
    }

    pub fn y_axis_label(&self) -> &str {
        &self.3
    }

    /// Plottable points of this statistic.
    pub fn points(&self) -> Vec<(f64, f64)> {
        zip_points(&self.1, &self.2)
    }
}

/// Article link shown in the gene and disease lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Value>")]
pub struct Link {
    /// Article title
    pub title: String,
    /// Target URL
    pub url: String,
    /// Citation count, when the server ranks links
    pub citations: Option<String>,
    /// PubMed rank, when the server ranks links
    pub rank: Option<String>,
}

impl Link {
    /// Create an unranked link.
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            citations: None,
            rank: None,
        }
    }

    /// Label text including citation count and rank when present.
    pub fn label(&self) -> String {
        match (&self.citations, &self.rank) {
            (Some(c), Some(r)) => format!("{} ({} citations, rank {})", self.title, c, r),
            (Some(c), None) => format!("{} ({} citations)", self.title, c),
            (None, Some(r)) => format!("{} (rank {})", self.title, r),
            (None, None) => self.title.clone(),
        }
    }
}

impl TryFrom<Vec<Value>> for Link {
    type Error = ApiError;

    /// Convert a `[label, url]` or `[label, url, citations, rank]` entry.
    fn try_from(values: Vec<Value>) -> Result<Self, Self::Error> {
        let mut fields = values.iter().map(optional_value);
        let title = fields.next().flatten();
        let url = fields.next().flatten();
        let (Some(title), Some(url)) = (title, url) else {
            return Err(ApiError::InvalidLink(Value::Array(values.clone()).to_string()));
        };
        Ok(Self {
            title,
            url,
            citations: fields.next().flatten(),
            rank: fields.next().flatten(),
        })
    }
}

/// Scalar to string, treating null and the literal `"None"` as absent.
fn optional_value(value: &Value) -> Option<String> {
    match display_value(value) {
        s if s.is_empty() || s == "None" => None,
        s => Some(s),
    }
}

/// Detail payload for one relationship.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationshipDetail {
    pub gene_name: String,
    pub disease_name: String,
    /// `[years, publications, citations]`
    #[serde(default)]
    pub gene_data: SeriesTable,
    /// `[years, publications, citations]`
    #[serde(default)]
    pub disease_data: SeriesTable,
    #[serde(default)]
    pub stats: Vec<StatSeries>,
    #[serde(default, alias = "gene_articles")]
    pub gene_links: Vec<Link>,
    #[serde(default, alias = "disease_articles")]
    pub disease_links: Vec<Link>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_from_mixed_json() {
        let page: Page = serde_json::from_str(
            r#"{"items": [["12", "D001", 0.5, true, null, 1200]], "total_pages": 3}"#,
        )
        .unwrap();
        assert_eq!(page.total_pages, 3);
        let row = &page.items[0];
        assert_eq!(row.id(), Some("12"));
        assert_eq!(row.cells(), &["12", "D001", "0.5", "true", "", "1200"]);
        assert_eq!(row.cell(42), "");
    }

    #[test]
    fn test_link_shapes() {
        let links: Vec<Link> = serde_json::from_str(
            r#"[["Title A", "http://a"], ["Title B", "http://b", 17, "None"], ["C", "http://c", null, 3]]"#,
        )
        .unwrap();
        assert_eq!(links[0].label(), "Title A");
        assert_eq!(links[1].label(), "Title B (17 citations)");
        assert_eq!(links[2].label(), "C (rank 3)");
        assert_eq!(links[1].url, "http://b");
    }

    #[test]
    fn test_link_rejects_short_entry() {
        let result: Result<Vec<Link>, _> = serde_json::from_str(r#"[["only a title"]]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_detail_with_article_aliases() {
        let detail: RelationshipDetail = serde_json::from_str(
            r#"{
                "gene_name": "BRCA1",
                "disease_name": "Breast Neoplasms",
                "gene_data": [[2019, 2020], [3, 7], [10, null]],
                "disease_data": [[2020], [1], [2]],
                "stats": [["Pubs", [2020, 2021], [5, 9], "Count"]],
                "gene_articles": [["g", "http://g"]],
                "disease_articles": []
            }"#,
        )
        .unwrap();
        assert_eq!(detail.gene_links.len(), 1);
        assert_eq!(detail.gene_data.points(1), vec![(2019.0, 3.0), (2020.0, 7.0)]);
        assert_eq!(detail.gene_data.points(2), vec![(2019.0, 10.0)]);
        assert_eq!(detail.gene_data.series_count(), 2);
        assert_eq!(detail.stats[0].label(), "Pubs");
        assert_eq!(detail.stats[0].y_axis_label(), "Count");
    }

    #[test]
    fn test_series_points_out_of_range() {
        let table = SeriesTable(vec![vec![Some(1.0)]]);
        assert!(table.points(0).is_empty());
        assert!(table.points(5).is_empty());
    }
}

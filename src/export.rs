//! CSV export of the displayed rows.
//!
//! Fields are joined with commas and never quoted, so a value containing a
//! comma or newline produces a malformed line.

use crate::api::Row;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of every export.
pub const EXPORT_FILE_NAME: &str = "data.csv";

/// Serialize rows as unquoted comma-separated lines.
///
/// # Arguments
/// * `rows` - Rows in display order
///
/// # Returns
/// * `String` - One `\n`-terminated line per row; an empty row is a bare `\n`
pub fn build_csv(rows: &[Row]) -> String {
    rows.iter().fold(String::new(), |mut out, row| {
        out.push_str(&row.cells().join(","));
        out.push('\n');
        out
    })
}

/// Write the displayed rows to `data.csv` in `dir`.
///
/// # Returns
/// * `Result<PathBuf>` - Path of the written file
pub fn write_export(dir: &Path, rows: &[Row]) -> Result<PathBuf> {
    write_file(dir, &build_csv(rows))
}

/// Save the body of the server's `format=csv` response as `data.csv` in `dir`.
pub fn save_server_export(dir: &Path, body: &str) -> Result<PathBuf> {
    write_file(dir, body)
}

/// Creates the directory if it doesn't exist and overwrites earlier exports.
fn write_file(dir: &Path, body: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory: {}", dir.display()))?;

    let path = dir.join(EXPORT_FILE_NAME);
    fs::write(&path, body)
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;

    tracing::info!(path = %path.display(), bytes = body.len(), "export written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn row(cells: &[&str]) -> Row {
        cells.iter().copied().collect()
    }

    #[test]
    fn test_build_csv_joins_rows() {
        let rows = vec![row(&["1", "A"]), row(&["2", "B"])];
        assert_eq!(build_csv(&rows), "1,A\n2,B\n");
    }

    #[test]
    fn test_build_csv_empty() {
        assert_eq!(build_csv(&[]), "");
    }

    #[test]
    fn test_build_csv_does_not_quote() {
        let rows = vec![row(&["1", "Smith, J", "say \"hi\""])];
        assert_eq!(build_csv(&rows), "1,Smith, J,say \"hi\"\n");
    }

    #[test]
    fn test_build_csv_empty_rows_are_bare_newlines() {
        let rows = vec![row(&[""]), row(&["1", "A"])];
        assert_eq!(build_csv(&rows), "\n1,A\n");

        let rows = vec![Row::new(Vec::new()), row(&["1", "A"])];
        assert_eq!(build_csv(&rows), "\n1,A\n");
    }

    #[test]
    fn test_build_csv_ragged_rows() {
        let rows = vec![row(&["1", "A", "x"]), row(&["2"])];
        assert_eq!(build_csv(&rows), "1,A,x\n2\n");
    }

    #[test]
    fn test_write_export_creates_data_csv() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("exports");
        let path = write_export(&dir, &[row(&["1", "A"])]).unwrap();

        assert_eq!(path, dir.join("data.csv"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "1,A\n");
    }

    #[test]
    fn test_server_export_overwrites_previous_file() {
        let temp_dir = TempDir::new().unwrap();
        write_export(temp_dir.path(), &[row(&["old"])]).unwrap();
        let path = save_server_export(temp_dir.path(), "Id,Gene\n1,BRCA1\n").unwrap();

        assert_eq!(path, temp_dir.path().join(EXPORT_FILE_NAME));
        assert_eq!(fs::read_to_string(&path).unwrap(), "Id,Gene\n1,BRCA1\n");
    }
}

//! Row table widget rendering.
//!
//! Displays the current page with sort indicators in the header and the
//! selected row highlighted.

use crate::app::{App, Focus};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row as TableRow, StatefulWidget, Table, TableState},
};

/// Lines taken by the border and header above the first row.
const HEADER_LINES: u16 = 2;

/// Number of data rows that fit in `area`.
fn visible_rows(area: Rect) -> usize {
    area.height.saturating_sub(HEADER_LINES + 1).max(1) as usize
}

/// First displayed row so the selection stays centered.
///
/// # Arguments
/// * `selected` - Selected row index
/// * `len` - Number of rows
/// * `visible` - Rows that fit on screen
fn scroll_offset(selected: usize, len: usize, visible: usize) -> usize {
    let centered = selected.saturating_sub(visible / 2);
    centered.min(len.saturating_sub(visible))
}

/// Map a terminal row inside the table area to a row index.
///
/// # Returns
/// * `Option<usize>` - Index into `app.rows`, or None outside the data rows
pub fn row_at(app: &App, area: Rect, y: u16) -> Option<usize> {
    if y < area.y + HEADER_LINES || y >= area.y + area.height.saturating_sub(1) {
        return None;
    }
    let visible = visible_rows(area);
    let offset = scroll_offset(app.selected.unwrap_or(0), app.rows.len(), visible);
    let index = offset + (y - area.y - HEADER_LINES) as usize;
    (index < app.rows.len()).then_some(index)
}

/// Map a terminal column on the header line to a table column index.
///
/// # Details
/// Splits the inner width the same way the table widget does: equal fills
/// separated by one cell of column spacing.
pub fn column_at(app: &App, area: Rect, x: u16, y: u16) -> Option<usize> {
    let count = app.options.columns.len();
    if count == 0 || y != area.y + 1 {
        return None;
    }
    let inner = Rect::new(area.x + 1, area.y + 1, area.width.saturating_sub(2), 1);
    let cells = Layout::horizontal(vec![Constraint::Fill(1); count])
        .spacing(1)
        .split(inner);
    cells
        .iter()
        .position(|cell| x >= cell.x && x < cell.x + cell.width)
}

/// Render the row table.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// Header cells carry the column's sort glyph; the column under the sort
/// cursor is underlined. Cells past the header columns are not shown. The title shows the row count and a loading marker
/// while a page request is in flight.
pub fn render_table(app: &App, area: Rect, buf: &mut Buffer) {
    let header = TableRow::new(app.options.columns.iter().enumerate().map(|(i, column)| {
        let mut style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        if i == app.sort_cursor {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        Cell::from(Line::from(vec![
            Span::styled(column.name.clone(), style),
            Span::styled(
                format!(" {}", app.sort.state(i).symbol()),
                Style::default().fg(Color::Yellow),
            ),
        ]))
    }));

    let shown = app.options.columns.len();
    let rows: Vec<TableRow> = app
        .rows
        .iter()
        .map(|row| {
            TableRow::new(
                row.cells()
                    .iter()
                    .take(shown)
                    .map(|cell| Cell::from(cell.as_str())),
            )
        })
        .collect();

    let widths = vec![Constraint::Fill(1); app.options.columns.len().max(1)];

    let mut title = format!("{} ({} rows)", app.options.title, app.rows.len());
    if app.loading {
        title.push_str(" Loading…");
    } else if app.search_pending() {
        title.push_str(" …");
    }

    let border_style = if app.focus == Focus::Table {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .row_highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let visible = visible_rows(area);
    let mut state = match app.selected {
        Some(selected) => TableState::default()
            .with_offset(scroll_offset(selected, app.rows.len(), visible))
            .with_selected(Some(selected)),
        None => TableState::default(),
    };

    StatefulWidget::render(table, area, buf, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Page, Row};
    use crate::view::TableOptions;
    use std::path::PathBuf;

    fn app_with_rows(count: usize) -> App {
        let mut app = App::new(TableOptions::journals(), PathBuf::from("."));
        app.set_page(Page {
            items: (0..count)
                .map(|i| {
                    [i.to_string(), "2020".to_string(), "1".to_string()]
                        .into_iter()
                        .collect::<Row>()
                })
                .collect(),
            total_pages: 1,
        });
        app
    }

    #[test]
    fn test_scroll_offset_centers_and_clamps() {
        assert_eq!(scroll_offset(0, 100, 10), 0);
        assert_eq!(scroll_offset(50, 100, 10), 45);
        assert_eq!(scroll_offset(99, 100, 10), 90);
        assert_eq!(scroll_offset(3, 5, 10), 0);
    }

    #[test]
    fn test_row_at_maps_clicks() {
        let app = app_with_rows(5);
        let area = Rect::new(0, 0, 40, 12);
        assert_eq!(row_at(&app, area, 0), None);
        assert_eq!(row_at(&app, area, 1), None);
        assert_eq!(row_at(&app, area, 2), Some(0));
        assert_eq!(row_at(&app, area, 6), Some(4));
        assert_eq!(row_at(&app, area, 7), None);
        assert_eq!(row_at(&app, area, 11), None);
    }

    #[test]
    fn test_column_at_header_clicks() {
        let app = app_with_rows(1);
        let area = Rect::new(0, 0, 32, 8);
        assert_eq!(column_at(&app, area, 1, 1), Some(0));
        assert_eq!(column_at(&app, area, 30, 1), Some(2));
        assert_eq!(column_at(&app, area, 1, 2), None);
    }

    #[test]
    fn test_render_marks_sort_state() {
        let mut app = app_with_rows(2);
        app.cycle_sort(1);
        let area = Rect::new(0, 0, 60, 8);
        let mut buf = Buffer::empty(area);
        render_table(&app, area, &mut buf);

        let header: String = (0..area.width)
            .map(|x| buf[(x, 1)].symbol().to_string())
            .collect();
        assert!(header.contains("Year ▲"));
        assert!(header.contains("Count ↕"));
    }

    #[test]
    fn test_render_hides_cells_past_the_header() {
        let mut app = app_with_rows(0);
        app.set_page(Page {
            items: vec![
                ["BRCA1", "2020", "3", "2019;2020", "SERIESDATA"]
                    .into_iter()
                    .collect::<Row>(),
            ],
            total_pages: 1,
        });
        let area = Rect::new(0, 0, 80, 6);
        let mut buf = Buffer::empty(area);
        render_table(&app, area, &mut buf);

        let line: String = (0..area.width)
            .map(|x| buf[(x, 2)].symbol().to_string())
            .collect();
        assert!(line.contains("BRCA1"));
        assert!(!line.contains("SERIESDATA"));
    }
}

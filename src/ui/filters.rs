//! Filters widget rendering.
//!
//! Displays one filter field per filterable column.

use crate::app::{App, UiMode};
use crate::view::ColumnKind;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// Placeholder shown for an empty filter field.
fn placeholder(kind: ColumnKind) -> &'static str {
    match kind {
        ColumnKind::Numeric => "min:max",
        ColumnKind::Boolean => "true/false",
        ColumnKind::Text => "any",
    }
}

/// Render the filters widget.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// Shows `Column: value` for every filterable column. While editing, the
/// field under the cursor is highlighted and carries the input caret.
pub fn render_filters(app: &App, area: Rect, buf: &mut Buffer) {
    let is_active = app.mode == UiMode::Filters;
    let mut spans = Vec::new();

    for (n, index) in app.options.filterable_columns().enumerate() {
        let column = &app.options.columns[index];
        let editing = is_active && index == app.filter_column;

        if n > 0 {
            spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        }

        let label_style = if editing {
            Style::default()
                .fg(Color::Yellow)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        spans.push(Span::styled(format!("{}: ", column.name), label_style));

        match app.column_filters.get(&index).filter(|v| !v.is_empty()) {
            Some(value) => spans.push(Span::styled(
                value.clone(),
                Style::default().fg(Color::White),
            )),
            None => spans.push(Span::styled(
                placeholder(column.kind),
                Style::default().fg(Color::DarkGray),
            )),
        }
        if editing {
            spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(if is_active {
                    "Filters (ACTIVE - Tab/Shift-Tab to change column, 'Esc' to exit)"
                } else {
                    "Filters (press '/')"
                })
                .borders(Borders::ALL)
                .style(if is_active {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default()
                }),
        );

    Widget::render(paragraph, area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::TableOptions;
    use std::path::PathBuf;
    use std::time::Instant;

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        (area.y..area.y + area.height)
            .flat_map(|y| (area.x..area.x + area.width).map(move |x| (x, y)))
            .map(|pos| buf[pos].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_filters_show_values_and_placeholders() {
        let mut app = App::new(TableOptions::relationships(), PathBuf::from("."));
        app.begin_search();
        app.add_filter_char('D', Instant::now());

        let area = Rect::new(0, 0, 240, 4);
        let mut buf = Buffer::empty(area);
        render_filters(&app, area, &mut buf);
        let text = buffer_text(&buf);

        assert!(text.contains("Mesh Id: D_"));
        assert!(text.contains("P2 Prob: min:max"));
        assert!(!text.contains("Id: any | Mesh"));
    }
}

//! Free-text search bar.
//!
//! One query matched against every column; the title tracks whether the
//! typed text has been applied yet.

use crate::app::{App, UiMode};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Block title for the current search state.
///
/// # Details
/// `…` while an edit waits out the debounce or its page is loading,
/// `no matches` once a non-empty query came back empty.
fn search_title(app: &App) -> String {
    if app.search_pending() || app.loading {
        "Search …".to_string()
    } else if !app.search_query.is_empty() && app.rows.is_empty() {
        "Search (no matches)".to_string()
    } else {
        "Search".to_string()
    }
}

/// Render the search bar.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// While editing, the bar is highlighted with a cursor and an `Enter`/`Esc`
/// hint; otherwise it shows how to start a search.
pub fn render_search(app: &App, area: Rect, buf: &mut Buffer) {
    let editing = app.mode == UiMode::Search;

    let mut spans = vec![Span::styled(
        if editing { "Search: " } else { "Search (press '/'): " },
        Style::default().fg(Color::Yellow),
    )];
    if editing {
        spans.push(Span::styled(
            app.search_query.as_str(),
            Style::default().fg(Color::White),
        ));
        spans.push(Span::styled(
            "_",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::SLOW_BLINK),
        ));
        spans.push(Span::styled(
            "  Enter/Esc done",
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(Span::styled(
            app.search_query.as_str(),
            Style::default().fg(Color::Gray),
        ));
    }

    let border_style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(search_title(app))
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    Widget::render(paragraph, area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Page;
    use crate::view::TableOptions;
    use std::path::PathBuf;
    use std::time::Instant;

    fn journals() -> App {
        App::new(TableOptions::journals(), PathBuf::from("."))
    }

    #[test]
    fn test_title_marks_pending_search() {
        let mut app = journals();
        assert_eq!(search_title(&app), "Search");

        app.begin_search();
        app.add_search_char('b', Instant::now());
        assert!(app.search_pending());
        assert_eq!(search_title(&app), "Search …");
    }

    #[test]
    fn test_title_reports_no_matches() {
        let mut app = journals();
        app.search_query = "zzz".to_string();
        app.set_page(Page {
            items: Vec::new(),
            total_pages: 0,
        });
        assert_eq!(search_title(&app), "Search (no matches)");
    }

    #[test]
    fn test_render_shows_query_and_hint() {
        let mut app = journals();
        app.begin_search();
        app.add_search_char('t', Instant::now());
        let area = Rect::new(0, 0, 60, 3);
        let mut buf = Buffer::empty(area);
        render_search(&app, area, &mut buf);

        let title: String = (0..area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect();
        let input: String = (0..area.width)
            .map(|x| buf[(x, 1)].symbol().to_string())
            .collect();
        assert!(title.contains("Search …"));
        assert!(input.contains("Search: t_"));
        assert!(input.contains("Enter/Esc done"));
    }
}

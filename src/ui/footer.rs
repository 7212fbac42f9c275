//! Footer rendering: pagination controls, export counter and status line.

use crate::app::App;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

const HELP: &str = "q quit | j/k move | n/p page | h/l + s sort | / search | Tab focus | Enter open | e/E export";

fn control_style(disabled: bool) -> Style {
    if disabled {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    }
}

/// Render the footer.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// Shows `◀ prev  Page x of y  next ▶` with unavailable directions greyed
/// out, then `Export (N)`, then the status message or key help.
pub fn render_footer(app: &App, area: Rect, buf: &mut Buffer) {
    let pagination = &app.pagination;
    let status = app.status_message.as_deref().unwrap_or(HELP);

    let line = Line::from(vec![
        Span::styled("◀ prev", control_style(pagination.prev_disabled())),
        Span::raw(format!(
            "  Page {} of {}  ",
            pagination.page() + 1,
            pagination.total_pages()
        )),
        Span::styled("next ▶", control_style(pagination.next_disabled())),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Export ({})", app.export_count()),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::raw(status),
    ]);

    let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    Widget::render(paragraph, area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Page, Row};
    use crate::view::TableOptions;
    use std::path::PathBuf;

    fn footer_text(app: &App) -> String {
        let area = Rect::new(0, 0, 160, 3);
        let mut buf = Buffer::empty(area);
        render_footer(app, area, &mut buf);
        (0..area.width).map(|x| buf[(x, 1)].symbol().to_string()).collect()
    }

    #[test]
    fn test_footer_shows_page_and_export_count() {
        let mut app = App::new(TableOptions::journals(), PathBuf::from("."));
        app.set_page(Page {
            items: vec![
                ["a", "2020", "1"].into_iter().collect::<Row>(),
                ["b", "2021", "2"].into_iter().collect::<Row>(),
            ],
            total_pages: 3,
        });

        let text = footer_text(&app);
        assert!(text.contains("Page 1 of 3"));
        assert!(text.contains("Export (2)"));
    }

    #[test]
    fn test_footer_greys_out_prev_on_first_page() {
        let app = App::new(TableOptions::journals(), PathBuf::from("."));
        let area = Rect::new(0, 0, 160, 3);
        let mut buf = Buffer::empty(area);
        render_footer(&app, area, &mut buf);

        assert_eq!(buf[(1, 1)].symbol(), "◀");
        assert_eq!(buf[(1, 1)].fg, Color::DarkGray);
    }
}

//! Tabs widget rendering.
//!
//! Displays the stats tab headers of the detail panel.

use crate::app::App;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Render the stats tabs.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// One tab per stats series of the selected relationship, the active one
/// highlighted. `[` and `]` switch tabs.
pub fn render_tabs(app: &App, area: Rect, buf: &mut Buffer) {
    let labels = app.detail.stat_labels();
    let active = app.detail.active_stat();

    let mut spans = Vec::new();
    for (i, label) in labels.iter().enumerate() {
        let is_active = i == active;
        let style = if is_active {
            Style::default()
                .fg(Color::Yellow)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        if i > 0 {
            spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        }

        let tab_text = if is_active {
            format!("▶ {} ◀", label)
        } else {
            format!("  {}  ", label)
        };
        spans.push(Span::styled(tab_text, style));
    }

    if spans.is_empty() {
        spans.push(Span::styled("No stats", Style::default().fg(Color::DarkGray)));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().title("Stats ([ ])").borders(Borders::ALL))
        .alignment(Alignment::Center);

    Widget::render(paragraph, area, buf);
}

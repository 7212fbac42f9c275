//! Article link list rendering.

use crate::app::App;
use crate::detail::LinkSide;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, StatefulWidget},
};

/// Render one side's link list.
///
/// # Arguments
/// * `app` - Application state
/// * `side` - Gene or disease links
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// The selection is only drawn while the list has focus; Enter then opens
/// the highlighted link.
pub fn render_links(app: &App, side: LinkSide, area: Rect, buf: &mut Buffer) {
    let list = app.detail.links(side);
    let focused = app.focused_links() == Some(side);

    let name = app.detail.relationship().map(|r| match side {
        LinkSide::Gene => r.gene_name.as_str(),
        LinkSide::Disease => r.disease_name.as_str(),
    });
    let title = match (side, name) {
        (LinkSide::Gene, Some(name)) => format!("Gene articles: {}", name),
        (LinkSide::Disease, Some(name)) => format!("Disease articles: {}", name),
        (LinkSide::Gene, None) => "Gene articles".to_string(),
        (LinkSide::Disease, None) => "Disease articles".to_string(),
    };

    let items: Vec<ListItem> = if list.links.is_empty() {
        vec![ListItem::new("No articles")]
    } else {
        list.links.iter().map(|link| ListItem::new(link.label())).collect()
    };

    let widget = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(if focused {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default()
                }),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    if focused && !list.links.is_empty() {
        state.select(Some(list.selected));
    }

    StatefulWidget::render(widget, area, buf, &mut state);
}

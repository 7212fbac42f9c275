//! UI components module.
//!
//! Contains ratatui widgets for displaying the application interface.

pub mod detail;
pub mod filters;
pub mod footer;
pub mod links;
pub mod search;
pub mod table;
pub mod tabs;

pub use detail::render_detail;
pub use filters::render_filters;
pub use footer::render_footer;
pub use search::render_search;
pub use table::render_table;

use crate::app::App;
use crate::view::FilterMode;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

/// Screen areas of the main view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppLayout {
    /// Search bar or per-column filter bar
    pub input: Rect,
    pub table: Rect,
    /// Detail panel, for views that have one
    pub detail: Option<Rect>,
    pub footer: Rect,
}

/// Split `area` into the main view's regions.
///
/// # Details
/// Shared by rendering and mouse hit-testing so both agree on where the
/// table sits.
pub fn layout(app: &App, area: Rect) -> AppLayout {
    let input_height = match app.options.filter_mode {
        FilterMode::FreeText => 3,
        FilterMode::PerColumn => 4,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(input_height), // Search / filters
            Constraint::Min(0),               // Table and detail
            Constraint::Length(3),            // Footer
        ])
        .split(area);

    let (table, detail) = if app.options.has_detail() {
        let main = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);
        (main[0], Some(main[1]))
    } else {
        (chunks[1], None)
    };

    AppLayout {
        input: chunks[0],
        table,
        detail,
        footer: chunks[2],
    }
}

/// Render the complete UI.
pub fn render(f: &mut Frame, app: &App) {
    let areas = layout(app, f.area());
    let buf = f.buffer_mut();

    match app.options.filter_mode {
        FilterMode::FreeText => render_search(app, areas.input, buf),
        FilterMode::PerColumn => render_filters(app, areas.input, buf),
    }
    render_table(app, areas.table, buf);
    if let Some(area) = areas.detail {
        render_detail(app, area, buf);
    }
    render_footer(app, areas.footer, buf);
}

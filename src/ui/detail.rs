//! Detail panel rendering.
//!
//! Gene and disease time-series charts, the stats tabs with their chart and
//! the two article link lists. Details built from a local row draw the gene
//! and disease series as bar distributions and the stats as a scatter.

use crate::app::App;
use crate::detail::{LinkSide, SeriesToggle};
use crate::view::DetailSource;
use crate::ui::{links::render_links, tabs::render_tabs};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget},
};

/// X and Y bounds enclosing `points`.
///
/// # Details
/// The y axis always includes zero. Degenerate ranges are widened so a
/// single point still gets a drawable axis.
fn bounds(points: &[(f64, f64)]) -> ([f64; 2], [f64; 2]) {
    if points.is_empty() {
        return ([0.0, 1.0], [0.0, 1.0]);
    }

    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (0.0_f64, f64::NEG_INFINITY);
    for &(x, y) in points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if x_min == x_max {
        x_min -= 1.0;
        x_max += 1.0;
    }
    if y_max <= y_min {
        y_max = y_min + 1.0;
    }
    ([x_min, x_max], [y_min, y_max])
}

/// Axis label formatting: years and counts render without decimals.
fn axis_label(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// How the two kinds of detail are drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ChartStyle {
    series_graph: GraphType,
    series_y_title: &'static str,
    stats_graph: GraphType,
    stats_x_title: &'static str,
}

impl ChartStyle {
    fn for_source(source: &DetailSource) -> Self {
        match source {
            DetailSource::Row => Self {
                series_graph: GraphType::Bar,
                series_y_title: "Number of Publications",
                stats_graph: GraphType::Scatter,
                stats_x_title: "Day",
            },
            DetailSource::Remote(_) | DetailSource::None => Self {
                series_graph: GraphType::Line,
                series_y_title: "Count",
                stats_graph: GraphType::Line,
                stats_x_title: "Year",
            },
        }
    }

    /// Label of the gene or disease chart title.
    fn series_title(&self, side: LinkSide, name: &str) -> String {
        match (self.series_graph, side) {
            (GraphType::Bar, LinkSide::Gene) => format!("Gene Distribution: {}", name),
            (GraphType::Bar, LinkSide::Disease) => format!("Disease Distribution: {}", name),
            _ => name.to_string(),
        }
    }
}

/// Chart of one series.
///
/// # Arguments
/// * `title` - Block title
/// * `name` - Dataset legend name
/// * `graph` - Line, bar or scatter
/// * `axis_titles` - X and Y axis titles
/// * `points` - Data points
fn series_chart<'a>(
    title: Line<'a>,
    name: &'a str,
    graph: GraphType,
    axis_titles: (&'a str, &'a str),
    points: &'a [(f64, f64)],
) -> Chart<'a> {
    let (x_bounds, y_bounds) = bounds(points);
    let (x_title, y_title) = axis_titles;

    let dataset = Dataset::default()
        .name(name)
        .marker(Marker::Braille)
        .graph_type(graph)
        .style(Style::default().fg(Color::Cyan))
        .data(points);

    Chart::new(vec![dataset])
        .block(Block::default().title(title).borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .title(x_title)
                .style(Style::default().fg(Color::Gray))
                .bounds(x_bounds)
                .labels(vec![axis_label(x_bounds[0]), axis_label(x_bounds[1])]),
        )
        .y_axis(
            Axis::default()
                .title(y_title)
                .style(Style::default().fg(Color::Gray))
                .bounds(y_bounds)
                .labels(vec![axis_label(y_bounds[0]), axis_label(y_bounds[1])]),
        )
}

/// Chart title with the available series toggles, the active one highlighted.
fn toggle_title(label: &str, key: char, active: SeriesToggle, available: usize) -> Line<'static> {
    let mut spans = vec![Span::raw(format!("{} ({}) ", label, key))];
    for series in SeriesToggle::ALL
        .into_iter()
        .filter(|s| s.index() <= available)
    {
        let style = if series == active {
            Style::default()
                .fg(Color::Yellow)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!("[{}]", series.label()), style));
    }
    Line::from(spans)
}

/// Render the detail panel.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// Before any relationship is loaded a placeholder is shown instead.
pub fn render_detail(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(relationship) = app.detail.relationship() else {
        let message = match app.selected_row().and_then(|row| row.id()) {
            Some(id) => format!("Loading relationship {}…", id),
            None => "Select a relationship to see its details".to_string(),
        };
        let placeholder = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title("Details").borders(Borders::ALL));
        Widget::render(placeholder, area, buf);
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(35), // Gene / disease charts
            Constraint::Length(3),      // Stats tabs
            Constraint::Percentage(30), // Stats chart
            Constraint::Min(4),         // Link lists
        ])
        .split(area);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    let style = ChartStyle::for_source(&app.options.detail);
    let series_axes = ("Year", style.series_y_title);

    let gene_points = app.detail.gene_points();
    let gene_title = toggle_title(
        &style.series_title(LinkSide::Gene, &relationship.gene_name),
        'g',
        app.detail.gene_series,
        relationship.gene_data.series_count(),
    );
    Widget::render(
        series_chart(
            gene_title,
            app.detail.gene_series.label(),
            style.series_graph,
            series_axes,
            &gene_points,
        ),
        charts[0],
        buf,
    );

    let disease_points = app.detail.disease_points();
    let disease_title = toggle_title(
        &style.series_title(LinkSide::Disease, &relationship.disease_name),
        'd',
        app.detail.disease_series,
        relationship.disease_data.series_count(),
    );
    Widget::render(
        series_chart(
            disease_title,
            app.detail.disease_series.label(),
            style.series_graph,
            series_axes,
            &disease_points,
        ),
        charts[1],
        buf,
    );

    render_tabs(app, rows[1], buf);

    match app.detail.stat_points() {
        Some((points, y_title)) => {
            let label = app
                .detail
                .stat_labels()
                .get(app.detail.active_stat())
                .copied()
                .unwrap_or_default();
            Widget::render(
                series_chart(
                    Line::from(label),
                    label,
                    style.stats_graph,
                    (style.stats_x_title, y_title),
                    &points,
                ),
                rows[2],
                buf,
            );
        }
        None => {
            let empty = Paragraph::new("No statistics for this relationship")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL));
            Widget::render(empty, rows[2], buf);
        }
    }

    let lists = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[3]);
    render_links(app, LinkSide::Gene, lists[0], buf);
    render_links(app, LinkSide::Disease, lists[1], buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_include_zero_and_widen_single_point() {
        let (x, y) = bounds(&[(2020.0, 5.0)]);
        assert_eq!(x, [2019.0, 2021.0]);
        assert_eq!(y, [0.0, 5.0]);

        let (x, y) = bounds(&[(2019.0, 3.0), (2021.0, 9.0)]);
        assert_eq!(x, [2019.0, 2021.0]);
        assert_eq!(y, [0.0, 9.0]);
    }

    #[test]
    fn test_bounds_of_flat_zero_series() {
        let (_, y) = bounds(&[(2019.0, 0.0), (2020.0, 0.0)]);
        assert_eq!(y, [0.0, 1.0]);
    }

    #[test]
    fn test_toggle_title_hides_missing_series() {
        let title = toggle_title("BRCA1", 'g', SeriesToggle::Publications, 1);
        let text: String = title.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "BRCA1 (g) [Publications]");
    }

    #[test]
    fn test_row_detail_draws_distributions() {
        let style = ChartStyle::for_source(&DetailSource::Row);
        assert_eq!(style.series_graph, GraphType::Bar);
        assert_eq!(style.stats_graph, GraphType::Scatter);
        assert_eq!(style.stats_x_title, "Day");
        assert_eq!(
            style.series_title(LinkSide::Gene, "TP53"),
            "Gene Distribution: TP53"
        );
        assert_eq!(
            style.series_title(LinkSide::Disease, "Lung"),
            "Disease Distribution: Lung"
        );

        let remote = ChartStyle::for_source(&DetailSource::Remote("/relationships".to_string()));
        assert_eq!(remote.series_graph, GraphType::Line);
        assert_eq!(remote.series_title(LinkSide::Gene, "BRCA1"), "BRCA1");
    }

    #[test]
    fn test_render_local_row_detail() {
        use crate::api::Row;
        use crate::local::LocalTable;
        use crate::view::{Column, ColumnKind, TableOptions};
        use std::path::PathBuf;

        let row: Row = ["TP53", "Lung", "", "2019;2020", "3;8"].into_iter().collect();
        let table = LocalTable::new(
            vec![
                Column::new("Gene", ColumnKind::Text),
                Column::new("Disease", ColumnKind::Text),
            ],
            vec![row],
        );
        let mut app = App::new(TableOptions::local(PathBuf::from("genie.csv")), PathBuf::from("."))
            .with_local_table(table);
        app.refresh();

        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        render_detail(&app, area, &mut buf);

        let screen: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|pos| buf[pos].symbol().to_string())
            .collect();
        assert!(screen.contains("Gene Distribution: TP53"));
        assert!(screen.contains("Time Series"));
    }

    #[test]
    fn test_axis_label() {
        assert_eq!(axis_label(2020.0), "2020");
        assert_eq!(axis_label(1.5), "1.50");
    }
}

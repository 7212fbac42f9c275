//! Genie TUI - Terminal explorer for gene–disease relationships.
//!
//! Main entry point and event loop for the application.

mod api;
mod app;
mod config;
mod debounce;
mod detail;
mod dispatch;
mod export;
mod local;
mod logging;
mod opener;
mod pagination;
mod query;
mod sort;
mod ui;
mod view;

use api::GenieClient;
use app::{App, Command, Message, UiMode};
use config::Config;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use detail::SeriesToggle;
use dispatch::Dispatcher;
use local::LocalTable;
use opener::open_in_browser;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver};

/// How long to wait for terminal input before servicing timers and responses.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Main application entry point.
///
/// # Returns
/// * `Result<()>` - Success or error
///
/// # Details
/// Loads configuration (writing a default file on first run), sets up
/// logging, builds the view and runs the event loop. An optional first
/// argument overrides the config file path.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = match std::env::args().nth(1) {
        Some(path) => PathBuf::from(path),
        None => Config::default_config_path()?,
    };
    if !config_path.exists() {
        Config::default().save(Some(&config_path))?;
    }
    let config = Config::load(Some(&config_path))?;

    logging::init(&config.log_file_path()?, &config.log_level)?;
    tracing::info!(
        config = %config_path.display(),
        server = %config.server_url,
        view = ?config.view,
        "starting"
    );

    let options = config.table_options()?;
    let mut app = App::new(options.clone(), config.export_dir());
    if let Some(path) = options.local_path() {
        let table = LocalTable::load(path)?;
        if table.is_empty() {
            tracing::warn!(path = %path.display(), "local table has no rows");
        }
        app = app.with_local_table(table);
    }

    let client = GenieClient::new(&config.server_url, options)?;
    let (tx, mut rx) = mpsc::unbounded_channel();
    let dispatcher = Dispatcher::new(client, tx);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let result = run_app(&mut terminal, &mut app, &dispatcher, &mut rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "event loop failed");
    }
    result
}

/// Main event loop.
///
/// # Arguments
/// * `terminal` - Terminal instance
/// * `app` - Application state
/// * `dispatcher` - Runs the commands state transitions return
/// * `rx` - Completed requests
///
/// # Returns
/// * `Result<()>` - Success or error
///
/// # Details
/// Each pass draws, waits briefly for input, applies any completed
/// requests and fires the debounced search once input has gone quiet.
async fn run_app<B: api::Backend>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    dispatcher: &Dispatcher<B>,
    rx: &mut UnboundedReceiver<Message>,
) -> anyhow::Result<()> {
    // Table area, updated on each render for mouse hit-testing
    let mut table_area = Rect::default();

    dispatcher.dispatch_all(app.refresh());

    loop {
        terminal.draw(|f| {
            table_area = ui::layout(app, f.area()).table;
            ui::render(f, app);
        })?;

        if event::poll(POLL_INTERVAL)? {
            match handle_event(event::read()?, app, table_area, Instant::now()) {
                Some(commands) => dispatcher.dispatch_all(commands),
                None => break,
            }
        }

        while let Ok(message) = rx.try_recv() {
            dispatcher.dispatch_all(app.apply(message));
        }

        dispatcher.dispatch_all(app.tick(Instant::now()));
    }

    Ok(())
}

/// Route one terminal event.
///
/// # Returns
/// * `Option<Vec<Command>>` - Commands to dispatch, or None to quit
///
/// # Details
/// Key releases and repeats are ignored without leaving the loop pass, so
/// completed requests and the debounce tick are still serviced.
fn handle_event(
    event: Event,
    app: &mut App,
    table_area: Rect,
    now: Instant,
) -> Option<Vec<Command>> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(key, app, now),
        Event::Mouse(mouse) => Some(handle_mouse_event(mouse, app, table_area)),
        _ => Some(Vec::new()),
    }
}

/// Handle a key press.
///
/// # Returns
/// * `Option<Vec<Command>>` - Commands to dispatch, or None to quit
fn handle_key(key: KeyEvent, app: &mut App, now: Instant) -> Option<Vec<Command>> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    let commands = match app.mode {
        UiMode::List => match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return None,
            KeyCode::Up | KeyCode::Char('k') => app.focus_up(),
            KeyCode::Down | KeyCode::Char('j') => app.focus_down(),
            KeyCode::Char('n') | KeyCode::PageDown => app.next_page(),
            KeyCode::Char('p') | KeyCode::PageUp => app.prev_page(),
            KeyCode::Left | KeyCode::Char('h') => {
                app.prev_sort_column();
                Vec::new()
            }
            KeyCode::Right | KeyCode::Char('l') => {
                app.next_sort_column();
                Vec::new()
            }
            KeyCode::Char('s') => app.cycle_sort(app.sort_cursor),
            KeyCode::Char('/') => {
                app.begin_search();
                Vec::new()
            }
            KeyCode::Tab => {
                app.cycle_focus();
                Vec::new()
            }
            KeyCode::Enter => {
                open_selected_link(app);
                Vec::new()
            }
            KeyCode::Char('g') => {
                app.flip_gene_series();
                Vec::new()
            }
            KeyCode::Char('d') => {
                app.flip_disease_series();
                Vec::new()
            }
            KeyCode::Char('1') => {
                app.show_series(SeriesToggle::Publications);
                Vec::new()
            }
            KeyCode::Char('2') => {
                app.show_series(SeriesToggle::Citations);
                Vec::new()
            }
            KeyCode::Char('[') => {
                app.detail.prev_stat();
                Vec::new()
            }
            KeyCode::Char(']') => {
                app.detail.next_stat();
                Vec::new()
            }
            KeyCode::Home => {
                app.detail.select_stat(0);
                Vec::new()
            }
            KeyCode::End => {
                let last = app.detail.stat_labels().len().saturating_sub(1);
                app.detail.select_stat(last);
                Vec::new()
            }
            KeyCode::Char('e') => {
                match app.export_local() {
                    Ok(path) => app.set_status(format!(
                        "Exported {} rows to {}",
                        app.export_count(),
                        path.display()
                    )),
                    Err(e) => app.set_status(format!("Export failed: {:#}", e)),
                }
                Vec::new()
            }
            KeyCode::Char('E') => {
                let commands = app.export_server();
                if commands.is_empty() {
                    app.set_status("This view has no server export".to_string());
                } else {
                    app.set_status("Requesting server export...".to_string());
                }
                commands
            }
            _ => Vec::new(),
        },
        UiMode::Search => {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => app.mode = UiMode::List,
                KeyCode::Backspace => app.remove_search_char(now),
                KeyCode::Char(c) => app.add_search_char(c, now),
                _ => {}
            }
            Vec::new()
        }
        UiMode::Filters => {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => app.mode = UiMode::List,
                KeyCode::Tab => app.next_filter_column(),
                KeyCode::BackTab => app.prev_filter_column(),
                KeyCode::Backspace => app.remove_filter_char(now),
                KeyCode::Char(c) => app.add_filter_char(c, now),
                _ => {}
            }
            Vec::new()
        }
    };

    Some(commands)
}

/// Open the highlighted article of the focused link list.
fn open_selected_link(app: &mut App) {
    let Some(url) = app.selected_link_url().map(str::to_string) else {
        return;
    };
    match open_in_browser(&url) {
        Ok(()) => app.set_status(format!("Opened: {}", url)),
        Err(e) => app.set_status(format!("Failed to open link: {:#}", e)),
    }
}

/// Handle mouse events (scroll and click).
///
/// # Arguments
/// * `mouse` - Mouse event
/// * `app` - Application state
/// * `table_area` - Area of the table widget
///
/// # Returns
/// * `Vec<Command>` - Commands to dispatch
///
/// # Details
/// Scrolling moves within the focused pane. A left click on a row selects
/// it; a click on a header cycles that column's sort.
fn handle_mouse_event(mouse: MouseEvent, app: &mut App, table_area: Rect) -> Vec<Command> {
    if app.mode != UiMode::List {
        return Vec::new();
    }

    match mouse.kind {
        MouseEventKind::ScrollUp => app.focus_up(),
        MouseEventKind::ScrollDown => app.focus_down(),
        MouseEventKind::Down(MouseButton::Left)
            if mouse.column >= table_area.x
                && mouse.column < table_area.x + table_area.width =>
        {
            if let Some(column) = ui::table::column_at(app, table_area, mouse.column, mouse.row) {
                return app.cycle_sort(column);
            }
            match ui::table::row_at(app, table_area, mouse.row) {
                Some(index) => {
                    app.focus = app::Focus::Table;
                    app.select_row(index)
                }
                None => Vec::new(),
            }
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use crate::view::TableOptions;

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    fn journals() -> App {
        App::new(TableOptions::journals(), PathBuf::from("."))
    }

    #[test]
    fn test_key_release_does_not_quit() {
        let mut app = journals();
        let now = Instant::now();
        let area = Rect::new(0, 0, 80, 20);

        for kind in [KeyEventKind::Release, KeyEventKind::Repeat] {
            let handled = handle_event(key(KeyCode::Char('q'), kind), &mut app, area, now);
            assert_eq!(handled, Some(Vec::new()));
        }

        let pressed = handle_event(key(KeyCode::Char('q'), KeyEventKind::Press), &mut app, area, now);
        assert_eq!(pressed, None);
    }

    #[test]
    fn test_key_press_edits_search() {
        let mut app = journals();
        let now = Instant::now();
        let area = Rect::new(0, 0, 80, 20);

        handle_event(key(KeyCode::Char('/'), KeyEventKind::Press), &mut app, area, now);
        assert_eq!(app.mode, UiMode::Search);
        handle_event(key(KeyCode::Char('b'), KeyEventKind::Press), &mut app, area, now);
        handle_event(key(KeyCode::Char('x'), KeyEventKind::Release), &mut app, area, now);
        assert_eq!(app.search_query, "b");
        assert!(app.search_pending());
    }
}

//! Company TUI
//!
//! Terminal user interface for managing departments and employees.
//!
//! ## Layout
//!
//! - Left: Departments (selection highlighted, employee count below)
//! - Right: Employees of the selected department or of a search
//! - Bottom: Notification line, or the input line while typing
//!
//! ## Keys
//!
//! - j/k or ↑/↓: Select department
//! - a: Add department
//! - e: Add employee to the selected department
//! - /: Search departments
//! - f: Search employees
//! - r: Show employees of the selected department
//! - Esc: Reset department search, dismiss notification
//! - ?: Help
//! - q: Quit

mod app;
mod ui;

use std::fs::File;
use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use company_core::{Config, Controller, Repository, Store};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::{App, FormField, InputMode};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Run the TUI application
pub fn run(config: Config) -> Result<()> {
    // Initialize TUI logging (file-based, only if COMPANY_LOG is set)
    init_tui_logging(&config);

    let ttl = config.notification_ttl();
    let store = Store::open_with_config(config).context("Failed to open store")?;
    let mut app = App::new(Controller::new(store, ttl));

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    app.controller
        .into_repository()
        .close()
        .context("Failed to close store")?;

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.tick(Instant::now());

        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // If help is showing, any key dismisses it
                if app.show_help {
                    app.show_help = false;
                    continue;
                }

                match app.input_mode {
                    InputMode::Normal => handle_normal_mode(app, key.code, key.modifiers),
                    InputMode::Input(_) => handle_input_mode(app, key.code, key.modifiers),
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle key events in normal mode
fn handle_normal_mode<R: Repository>(app: &mut App<R>, code: KeyCode, modifiers: KeyModifiers) {
    match code {
        // Quit
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }

        KeyCode::Char('k') | KeyCode::Up => {
            app.move_up();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_down();
        }

        KeyCode::Char('a') => {
            app.enter_input_mode(FormField::DepartmentName);
        }
        KeyCode::Char('e') => {
            app.enter_input_mode(FormField::EmployeeName);
        }
        KeyCode::Char('/') => {
            app.enter_input_mode(FormField::DepartmentSearch);
        }
        KeyCode::Char('f') => {
            app.enter_input_mode(FormField::EmployeeSearch);
        }
        KeyCode::Char('r') => {
            app.refresh_employees();
        }

        KeyCode::Esc => {
            app.reset();
        }

        KeyCode::Char('?') => {
            app.toggle_help();
        }

        _ => {}
    }
}

/// Handle key events while typing on the input line
fn handle_input_mode<R: Repository>(app: &mut App<R>, code: KeyCode, modifiers: KeyModifiers) {
    match code {
        KeyCode::Esc => {
            app.exit_input_mode();
        }
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.exit_input_mode();
        }
        KeyCode::Enter => {
            app.submit();
        }
        KeyCode::Backspace => {
            app.delete_char();
        }
        KeyCode::Left => {
            app.cursor_left();
        }
        KeyCode::Right => {
            app.cursor_right();
        }
        KeyCode::Char(c) => {
            app.insert_char(c);
        }
        _ => {}
    }
}

/// Initialize logging for TUI mode
///
/// Only initializes if COMPANY_LOG environment variable is set.
/// Logs to file (config.log_file or default {data_dir}/debug.log).
fn init_tui_logging(config: &Config) {
    let Ok(log_level) = std::env::var("COMPANY_LOG") else {
        return;
    };

    let log_path = config.log_path();
    if let Err(e) = config.ensure_data_dir() {
        eprintln!("Warning: Could not create data directory: {}", e);
    }

    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter = EnvFilter::new(format!(
        "company_core={},company={}",
        log_level, log_level
    ));

    // Initialize file-based logging (ignore error if already initialized)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("TUI logging initialized to {:?}", log_path);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let store = Store::open_in_memory().unwrap();
        App::new(Controller::new(store, Duration::from_secs(3)))
    }

    fn press(app: &mut App, code: KeyCode) {
        match app.input_mode {
            InputMode::Normal => handle_normal_mode(app, code, KeyModifiers::NONE),
            InputMode::Input(_) => handle_input_mode(app, code, KeyModifiers::NONE),
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_add_department_via_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.input_mode, InputMode::Input(FormField::DepartmentName));

        // 'q' is text while typing, not quit
        type_text(&mut app, "quality");
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.controller.departments()[0].name, "quality");
    }

    #[test]
    fn test_escape_cancels_input() {
        let mut app = app();
        press(&mut app, KeyCode::Char('e'));
        type_text(&mut app, "Ada");
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.controller.notification().is_none());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = self::app();
        handle_normal_mode(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_toggle() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
    }

    #[test]
    fn test_search_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.input_mode, InputMode::Input(FormField::DepartmentSearch));
        press(&mut app, KeyCode::Esc);

        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.input_mode, InputMode::Input(FormField::EmployeeSearch));
    }
}

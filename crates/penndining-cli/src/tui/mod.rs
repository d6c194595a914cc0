//! Venue directory TUI.
//!
//! Uses `ratatui` + `crossterm` for rendering. Venue data arrives through
//! the feed loader's `watch` channel; reloads are requested over an `mpsc`
//! channel so the blocking event loop never awaits the network.

/// Directory state types.
pub mod state;
mod ui;

use std::io;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use penndining_api::feed::FeedState;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::{mpsc, watch};

use self::state::DirectoryState;

/// Runs the directory viewer until the user quits.
///
/// Blocking; call from `spawn_blocking`.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
pub fn run_directory_viewer(
    mut feed: watch::Receiver<FeedState>,
    reload: mpsc::UnboundedSender<()>,
    date: NaiveDate,
    today: NaiveDate,
) -> Result<()> {
    let mut state = DirectoryState::new(date, today);
    state.apply_feed(&feed.borrow_and_update());

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut state, &mut feed, &reload);

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop.
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut DirectoryState,
    feed: &mut watch::Receiver<FeedState>,
    reload: &mpsc::UnboundedSender<()>,
) -> Result<()> {
    loop {
        if feed.has_changed().unwrap_or(false) {
            state.apply_feed(&feed.borrow_and_update());
        }

        terminal
            .draw(|frame| ui::draw(frame, state))
            .context("failed to draw TUI")?;

        if event::poll(std::time::Duration::from_millis(100)).context("failed to poll events")?
            && let Event::Key(key) = event::read().context("failed to read event")?
            && key.kind == KeyEventKind::Press
            && handle_input(state, key.code, key.modifiers, reload)
        {
            return Ok(());
        }
    }
}

/// Handles key input. Returns `true` to exit.
fn handle_input(
    state: &mut DirectoryState,
    key: KeyCode,
    modifiers: KeyModifiers,
    reload: &mpsc::UnboundedSender<()>,
) -> bool {
    state.notice = None;
    match key {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Up | KeyCode::Char('k') => state.move_up(),
        KeyCode::Down | KeyCode::Char('j') => state.move_down(),
        KeyCode::Tab => state.toggle_section(),
        KeyCode::Left | KeyCode::Char('h') => state.prev_day(),
        KeyCode::Right | KeyCode::Char('l') => state.next_day(),
        KeyCode::Char('t') => state.go_today(),
        KeyCode::Enter | KeyCode::Char('o') => open_detail_page(state, |url| open::that(url)),
        KeyCode::Char('r') => {
            // Receiver gone means the app is shutting down.
            let _ = reload.send(());
        }
        _ => {}
    }
    false
}

/// Opens the detail page of the venue under the cursor, leaving a header
/// notice if the browser cannot be launched.
fn open_detail_page(state: &mut DirectoryState, opener: impl FnOnce(&str) -> io::Result<()>) {
    let Some(url) = state.selected_row().map(|row| row.detail_url) else {
        return;
    };
    if let Err(e) = opener(url) {
        state.notice = Some(format!("failed to open {url}: {e}"));
    }
}

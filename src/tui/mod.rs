//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm. It also
//! provides the real widgets (`TerminalWidgets`) that `core` drives through
//! its widget traits.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps until an event arrives, drains every
//! pending event through `update()`, and draws once per batch. Idle polls
//! that time out skip the redraw.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

mod component;
mod components;
mod event;
mod ui;

pub use components::TerminalWidgets;

use log::{debug, info};
use std::fmt;
use std::io::{self, stdout};
use std::time::Duration;

use crossterm::cursor::SetCursorStyle;
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::core::action::{Action, Effect, update};
use crate::core::state::App;
use crate::core::vault::NoteError;
use crate::tui::event::{poll_event_immediate, poll_event_timeout};

const IDLE_POLL: Duration = Duration::from_millis(500);

// ============================================================================
// Error Type
// ============================================================================

/// Why the event loop stopped early.
#[derive(Debug)]
pub enum RunError {
    Terminal(io::Error),
    Vault(NoteError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Terminal(e) => write!(f, "terminal error: {e}"),
            RunError::Vault(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::Terminal(e) => Some(e),
            RunError::Vault(e) => Some(e),
        }
    }
}

impl From<io::Error> for RunError {
    fn from(e: io::Error) -> Self {
        RunError::Terminal(e)
    }
}

impl From<NoteError> for RunError {
    fn from(e: NoteError) -> Self {
        RunError::Vault(e)
    }
}

// ============================================================================
// Terminal Setup
// ============================================================================

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        // Kitty keyboard protocol lets Ctrl+1..6 and Ctrl+H arrive as themselves.
        // Terminals without it ignore the request.
        execute!(
            stdout(),
            EnableBracketedPaste,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

// ============================================================================
// Event Loop
// ============================================================================

/// Take over the terminal and run until the user quits.
///
/// The terminal is restored before this returns, error or not, so the caller
/// can print diagnostics normally.
pub fn run(app: &mut App) -> Result<(), RunError> {
    let mut terminal = ratatui::init();
    let result = TerminalModeGuard::new()
        .map_err(RunError::from)
        .and_then(|_guard| event_loop(&mut terminal, app));
    ratatui::restore();
    result
}

fn event_loop(terminal: &mut DefaultTerminal, app: &mut App) -> Result<(), RunError> {
    let size = terminal.size()?;
    update(
        app,
        Action::Resize {
            width: size.width,
            height: size.height,
        },
    )?;

    let mut needs_redraw = true;
    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, app))?;
            needs_redraw = false;
        }

        let Some(first) = poll_event_timeout(IDLE_POLL)? else {
            continue;
        };
        needs_redraw = true;

        // Drain everything pending before the next draw
        let mut next = Some(first);
        while let Some(action) = next {
            if update(app, action)? == Effect::Quit {
                info!("Quit requested");
                return Ok(());
            }
            next = poll_event_immediate()?;
        }
        debug!("Redrawing in {} mode", app.mode.name());
    }
}

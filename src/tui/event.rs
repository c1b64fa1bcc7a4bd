//! Terminal events → `core::Action`.
//!
//! This is the keymap. Everything the user can press is listed here, and
//! nothing outside this file knows about crossterm key codes.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::action::{Action, Format};

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> io::Result<Option<Action>> {
    poll_event_timeout(Duration::ZERO)
}

/// Wait up to `timeout` for the next event that maps to an action.
pub fn poll_event_timeout(timeout: Duration) -> io::Result<Option<Action>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    Ok(match event::read()? {
        Event::Key(key_event) => {
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            translate_key(key_event)
        }
        Event::Paste(data) => Some(Action::Paste(data)),
        Event::Resize(width, height) => Some(Action::Resize { width, height }),
        _ => None,
    })
}

/// Map one key press to an action. Key releases map to nothing.
pub fn translate_key(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char(c) if ctrl => ctrl_binding(c.to_ascii_lowercase()),
        KeyCode::Char(c) if alt => alt_binding(c.to_ascii_lowercase()),
        KeyCode::Char(c) => Some(Action::InputChar(c)),
        KeyCode::F(1) => Some(Action::ToggleHelp),
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Esc => Some(Action::Escape),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Delete => Some(Action::Delete),
        KeyCode::Left => Some(Action::CursorLeft),
        KeyCode::Right => Some(Action::CursorRight),
        KeyCode::Up => Some(Action::CursorUp),
        KeyCode::Down => Some(Action::CursorDown),
        KeyCode::Home => Some(Action::CursorHome),
        KeyCode::End => Some(Action::CursorEnd),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::Tab => Some(Action::Tab),
        _ => None,
    }
}

fn ctrl_binding(c: char) -> Option<Action> {
    match c {
        'c' => Some(Action::Quit),
        'n' => Some(Action::NewNote),
        'l' => Some(Action::ListNotes),
        's' => Some(Action::SaveNote),
        'h' => Some(Action::ToggleHelp),
        'b' => Some(Action::Format(Format::Bullet)),
        't' => Some(Action::Format(Format::Todo)),
        'd' => Some(Action::Format(Format::ToggleTodo)),
        _ => header_binding(c),
    }
}

fn alt_binding(c: char) -> Option<Action> {
    let format = match c {
        'n' => Format::NumberedList,
        't' => Format::Table,
        'c' => Format::CodeBlock,
        'l' => Format::Link,
        'i' => Format::Image,
        'r' => Format::Rule,
        'b' => Format::Bold,
        'e' => Format::Italic,
        'k' => Format::InlineCode,
        _ => return header_binding(c),
    };
    Some(Action::Format(format))
}

/// Ctrl/Alt + 1..6 insert a header of that level.
fn header_binding(c: char) -> Option<Action> {
    match c {
        '1'..='6' => c
            .to_digit(10)
            .map(|level| Action::Format(Format::Header(level as u8))),
        _ => None,
    }
}

//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).
//! The fakes below implement the widget traits with plain strings, so state
//! machine tests run without a terminal.

use tempfile::TempDir;

use crate::core::action::{Action, update};
use crate::core::state::{App, EditorSettings};
use crate::core::vault::{ListItem, Vault};
use crate::core::widget::{LineInput, NotePicker, TextEditor, Viewport, WidgetFactory};

/// Appends typed characters, nothing else.
#[derive(Default)]
pub struct PlainInput {
    value: String,
}

impl LineInput for PlainInput {
    fn handle(&mut self, action: &Action) -> bool {
        match action {
            Action::InputChar(c) => self.value.push(*c),
            Action::Backspace => {
                self.value.pop();
            }
            _ => return false,
        }
        true
    }

    fn value(&self) -> &str {
        &self.value
    }

    fn cursor(&self) -> usize {
        self.value.chars().count()
    }

    fn char_limit(&self) -> usize {
        100
    }
}

/// Byte-cursor editor that inserts at the cursor and moves left/right.
pub struct PlainEditor {
    text: String,
    cursor: usize,
}

impl TextEditor for PlainEditor {
    fn handle(&mut self, action: &Action) -> bool {
        match action {
            Action::InputChar(c) => self.insert_str(&c.to_string()),
            Action::Paste(s) => self.insert_str(s),
            Action::Backspace => {
                if let Some(c) = self.text[..self.cursor].chars().next_back() {
                    self.cursor -= c.len_utf8();
                    self.text.remove(self.cursor);
                }
            }
            Action::CursorLeft => {
                if let Some(c) = self.text[..self.cursor].chars().next_back() {
                    self.cursor -= c.len_utf8();
                }
            }
            Action::CursorRight => {
                if let Some(c) = self.text[self.cursor..].chars().next() {
                    self.cursor += c.len_utf8();
                }
            }
            _ => return false,
        }
        true
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn set_text(&mut self, text: String, cursor: usize) {
        let mut cursor = cursor.min(text.len());
        while !text.is_char_boundary(cursor) {
            cursor -= 1;
        }
        self.text = text;
        self.cursor = cursor;
    }

    fn insert_str(&mut self, s: &str) {
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    fn resize(&mut self, _width: u16, _height: u16) {}

    fn viewport(&self) -> Viewport {
        Viewport {
            lines: self.text.split('\n').map(str::to_string).collect(),
            cursor: (0, 0),
        }
    }
}

/// Selection moves with up/down; no filtering.
pub struct PlainPicker {
    items: Vec<ListItem>,
    selected: usize,
}

impl NotePicker for PlainPicker {
    fn handle(&mut self, action: &Action) -> bool {
        match action {
            Action::CursorDown => {
                if self.selected + 1 < self.items.len() {
                    self.selected += 1;
                }
            }
            Action::CursorUp => self.selected = self.selected.saturating_sub(1),
            _ => return false,
        }
        true
    }

    fn set_items(&mut self, items: Vec<ListItem>) {
        self.items = items;
        self.selected = self.selected.min(self.items.len().saturating_sub(1));
    }

    fn items(&self) -> &[ListItem] {
        &self.items
    }

    fn visible(&self) -> Vec<&ListItem> {
        self.items.iter().collect()
    }

    fn selected_index(&self) -> Option<usize> {
        (!self.items.is_empty()).then_some(self.selected)
    }

    fn selected(&self) -> Option<&ListItem> {
        self.items.get(self.selected)
    }

    fn filter(&self) -> &str {
        ""
    }

    fn is_filtering(&self) -> bool {
        false
    }

    fn resize(&mut self, _width: u16, _height: u16) {}
}

pub struct PlainWidgets;

impl WidgetFactory for PlainWidgets {
    fn line_input(&self) -> Box<dyn LineInput> {
        Box::new(PlainInput::default())
    }

    fn text_editor(&self, content: String) -> Box<dyn TextEditor> {
        let cursor = content.len();
        Box::new(PlainEditor {
            text: content,
            cursor,
        })
    }

    fn note_picker(&self, items: Vec<ListItem>) -> Box<dyn NotePicker> {
        Box::new(PlainPicker { items, selected: 0 })
    }
}

/// Creates a test App over a fresh temporary vault.
///
/// Keep the returned `TempDir` alive for as long as the app is used.
pub fn test_app() -> (TempDir, App) {
    let dir = TempDir::new().unwrap();
    let vault = Vault::open(dir.path()).unwrap();
    let app = App::new(vault, EditorSettings::default(), Box::new(PlainWidgets));
    (dir, app)
}

/// Feeds each character of `text` through `update()`.
pub fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        update(app, Action::InputChar(c)).unwrap();
    }
}

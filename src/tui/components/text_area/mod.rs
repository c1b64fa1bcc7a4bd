//! # TextArea Component
//!
//! The note editor buffer: a soft-wrapped, scrolling, multi-line text field.
//!
//! ## Responsibilities
//!
//! - Hold the note text and a byte-offset cursor
//! - Handle editing (typing, paste, backspace, delete, tab)
//! - Handle movement (arrows over wrapped rows, Home/End, paging)
//! - Keep the cursor row inside the viewport
//!
//! Rendering lives in `EditorView`; this type only produces a [`Viewport`].

pub(crate) mod wrap;

use ratatui::layout::Rect;

use crate::core::action::Action;
use crate::core::widget::{TextEditor, Viewport};
use crate::tui::ui::editor_text_area;

use wrap::{
    Row, floor_char_boundary, layout_rows, next_char_boundary, offset_at_column,
    prev_char_boundary, row_of, str_width,
};

pub struct TextArea {
    text: String,
    /// Byte offset, always on a char boundary.
    cursor: usize,
    /// First visible row.
    scroll: usize,
    /// Text area size in cells (inside the border).
    width: u16,
    height: u16,
    tab_width: usize,
}

impl TextArea {
    const DEFAULT_WIDTH: u16 = 78;
    const DEFAULT_HEIGHT: u16 = 20;

    /// A new editor over `text` with the cursor at the top.
    pub fn new(text: String, tab_width: usize) -> Self {
        Self {
            text: normalize_newlines(&text),
            cursor: 0,
            scroll: 0,
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            tab_width,
        }
    }

    fn rows(&self) -> Vec<Row> {
        layout_rows(&self.text, self.width as usize)
    }

    fn insert(&mut self, s: &str) {
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    /// Move the cursor `delta` rows, keeping its display column.
    fn move_rows(&mut self, delta: isize) -> bool {
        let rows = self.rows();
        let current = row_of(&rows, self.cursor);
        let target = (current as isize + delta).clamp(0, rows.len() as isize - 1) as usize;
        if target == current {
            return false;
        }
        let column = str_width(&self.text[rows[current].start..self.cursor]);
        self.cursor = offset_at_column(&self.text, rows[target], column);
        true
    }

    fn line_start(&self) -> usize {
        self.text[..self.cursor].rfind('\n').map_or(0, |i| i + 1)
    }

    fn line_end(&self) -> usize {
        self.text[self.cursor..]
            .find('\n')
            .map_or(self.text.len(), |i| self.cursor + i)
    }

    /// Scroll just enough to keep the cursor row visible.
    fn scroll_to_cursor(&mut self) {
        let rows = self.rows();
        let row = row_of(&rows, self.cursor);
        let height = self.height.max(1) as usize;

        if row < self.scroll {
            self.scroll = row;
        } else if row >= self.scroll + height {
            self.scroll = row + 1 - height;
        }
        self.scroll = self.scroll.min(rows.len().saturating_sub(1));
    }
}

impl TextEditor for TextArea {
    fn handle(&mut self, action: &Action) -> bool {
        let handled = match action {
            Action::InputChar(c) => {
                let mut buf = [0u8; 4];
                self.insert(c.encode_utf8(&mut buf));
                true
            }
            Action::Paste(text) => {
                self.insert(&normalize_newlines(text));
                true
            }
            Action::Tab => {
                self.insert(&" ".repeat(self.tab_width));
                true
            }
            Action::Backspace => {
                if self.cursor > 0 {
                    let prev = prev_char_boundary(&self.text, self.cursor);
                    self.text.drain(prev..self.cursor);
                    self.cursor = prev;
                    true
                } else {
                    false
                }
            }
            Action::Delete => {
                if self.cursor < self.text.len() {
                    let next = next_char_boundary(&self.text, self.cursor);
                    self.text.drain(self.cursor..next);
                    true
                } else {
                    false
                }
            }
            Action::CursorLeft => {
                if self.cursor > 0 {
                    self.cursor = prev_char_boundary(&self.text, self.cursor);
                    true
                } else {
                    false
                }
            }
            Action::CursorRight => {
                if self.cursor < self.text.len() {
                    self.cursor = next_char_boundary(&self.text, self.cursor);
                    true
                } else {
                    false
                }
            }
            Action::CursorUp => self.move_rows(-1),
            Action::CursorDown => self.move_rows(1),
            Action::PageUp => self.move_rows(-(self.height.max(1) as isize)),
            Action::PageDown => self.move_rows(self.height.max(1) as isize),
            Action::CursorHome => {
                let start = self.line_start();
                (self.cursor != start).then(|| self.cursor = start).is_some()
            }
            Action::CursorEnd => {
                let end = self.line_end();
                (self.cursor != end).then(|| self.cursor = end).is_some()
            }
            _ => false,
        };

        if handled {
            self.scroll_to_cursor();
        }
        handled
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn set_text(&mut self, text: String, cursor: usize) {
        self.cursor = floor_char_boundary(&text, cursor);
        self.text = text;
        self.scroll_to_cursor();
    }

    fn insert_str(&mut self, s: &str) {
        self.insert(s);
        self.scroll_to_cursor();
    }

    fn resize(&mut self, width: u16, height: u16) {
        let inner = editor_text_area(Rect::new(0, 0, width, height));
        self.width = inner.width;
        self.height = inner.height;
        self.scroll_to_cursor();
    }

    fn viewport(&self) -> Viewport {
        let rows = self.rows();
        let height = self.height.max(1) as usize;
        let lines = rows
            .iter()
            .skip(self.scroll)
            .take(height)
            .map(|row| self.text[row.start..row.end].to_string())
            .collect();

        let row = row_of(&rows, self.cursor);
        let column = str_width(&self.text[rows[row].start..self.cursor]);
        let max_column = self.width.saturating_sub(1) as usize;

        Viewport {
            lines,
            cursor: (
                column.min(max_column) as u16,
                row.saturating_sub(self.scroll) as u16,
            ),
        }
    }
}

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

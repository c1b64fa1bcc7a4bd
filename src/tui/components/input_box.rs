//! # InputBox Component
//!
//! Single-line text field used for the new-note name.
//!
//! ## Responsibilities
//!
//! - Capture text input up to a character limit
//! - Handle editing (backspace, delete, cursor movement, paste)
//!
//! Enter and Esc are not handled here: the state machine owns submission.
//! The dialog that draws the field lives in `create_dialog.rs`.

use crate::core::action::Action;
use crate::core::widget::LineInput;

use super::text_area::wrap::{next_char_boundary, prev_char_boundary};

pub struct InputBox {
    buffer: String,
    /// Byte offset into `buffer`.
    pos: usize,
    char_limit: usize,
}

impl InputBox {
    pub fn new(char_limit: usize) -> Self {
        Self {
            buffer: String::new(),
            pos: 0,
            char_limit,
        }
    }

    fn remaining(&self) -> usize {
        self.char_limit.saturating_sub(self.buffer.chars().count())
    }

    fn insert(&mut self, text: &str) -> bool {
        let accepted: String = text
            .chars()
            .filter(|c| !c.is_control())
            .take(self.remaining())
            .collect();
        if accepted.is_empty() {
            return false;
        }
        self.buffer.insert_str(self.pos, &accepted);
        self.pos += accepted.len();
        true
    }
}

impl LineInput for InputBox {
    fn handle(&mut self, action: &Action) -> bool {
        match action {
            Action::InputChar(c) => {
                let mut buf = [0u8; 4];
                self.insert(c.encode_utf8(&mut buf))
            }
            Action::Paste(text) => self.insert(text),
            Action::Backspace => {
                if self.pos > 0 {
                    let prev = prev_char_boundary(&self.buffer, self.pos);
                    self.buffer.drain(prev..self.pos);
                    self.pos = prev;
                    true
                } else {
                    false
                }
            }
            Action::Delete => {
                if self.pos < self.buffer.len() {
                    let next = next_char_boundary(&self.buffer, self.pos);
                    self.buffer.drain(self.pos..next);
                    true
                } else {
                    false
                }
            }
            Action::CursorLeft => {
                if self.pos > 0 {
                    self.pos = prev_char_boundary(&self.buffer, self.pos);
                    true
                } else {
                    false
                }
            }
            Action::CursorRight => {
                if self.pos < self.buffer.len() {
                    self.pos = next_char_boundary(&self.buffer, self.pos);
                    true
                } else {
                    false
                }
            }
            Action::CursorHome => {
                self.pos = 0;
                true
            }
            Action::CursorEnd => {
                self.pos = self.buffer.len();
                true
            }
            _ => false,
        }
    }

    fn value(&self) -> &str {
        &self.buffer
    }

    fn cursor(&self) -> usize {
        self.buffer[..self.pos].chars().count()
    }

    fn char_limit(&self) -> usize {
        self.char_limit
    }
}

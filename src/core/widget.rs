//! # Widget Capabilities
//!
//! The state machine needs three editing capabilities: a single-line input,
//! a multi-line text editor and a selectable note list. It only talks to them
//! through these traits, so `core` never depends on a terminal library and
//! tests can swap in plain in-memory fakes.
//!
//! ```text
//! core::state::App ──owns──► Box<dyn WidgetFactory>
//!                                 │
//!          ┌──────────────────────┼──────────────────────┐
//!          ▼                      ▼                      ▼
//!   Box<dyn LineInput>    Box<dyn TextEditor>    Box<dyn NotePicker>
//! ```
//!
//! Every `handle()` receives the raw `Action` and returns whether it was
//! consumed.

use crate::core::action::Action;
use crate::core::vault::ListItem;

/// Single-line text input (the new-note name).
pub trait LineInput {
    fn handle(&mut self, action: &Action) -> bool;
    fn value(&self) -> &str;
    /// Cursor position in characters.
    fn cursor(&self) -> usize;
    fn char_limit(&self) -> usize;
}

/// What the renderer needs to draw an editor: the visible rows and where the
/// cursor sits inside them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    pub lines: Vec<String>,
    /// (column, row) relative to the first visible row.
    pub cursor: (u16, u16),
}

/// Multi-line note buffer with a cursor.
pub trait TextEditor {
    fn handle(&mut self, action: &Action) -> bool;
    fn text(&self) -> &str;
    /// Cursor as a byte offset into `text()`, always on a char boundary.
    fn cursor(&self) -> usize;
    /// Replace the buffer. The cursor is clamped to the new text.
    fn set_text(&mut self, text: String, cursor: usize);
    /// Insert at the cursor and move the cursor past the inserted text.
    fn insert_str(&mut self, s: &str);
    fn resize(&mut self, width: u16, height: u16);
    fn viewport(&self) -> Viewport;
}

/// Selectable, filterable list of notes.
pub trait NotePicker {
    fn handle(&mut self, action: &Action) -> bool;
    /// Replace the snapshot, keeping the selection in range.
    fn set_items(&mut self, items: Vec<ListItem>);
    fn items(&self) -> &[ListItem];
    /// Items matching the current filter, in display order.
    fn visible(&self) -> Vec<&ListItem>;
    /// Index into `visible()`.
    fn selected_index(&self) -> Option<usize>;
    fn selected(&self) -> Option<&ListItem>;
    fn filter(&self) -> &str;
    /// True while the user is typing a filter.
    fn is_filtering(&self) -> bool;
    fn resize(&mut self, width: u16, height: u16);
}

/// Builds fresh widgets whenever the state machine enters a mode.
pub trait WidgetFactory {
    fn line_input(&self) -> Box<dyn LineInput>;
    fn text_editor(&self, content: String) -> Box<dyn TextEditor>;
    fn note_picker(&self, items: Vec<ListItem>) -> Box<dyn NotePicker>;
}

//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Widgets (State + Key Handling)
//!
//! Implement the `core::widget` traits and live inside `core::state::Mode`:
//! - `InputBox`: single-line note name input (`LineInput`)
//! - `TextArea`: soft-wrapped note editor (`TextEditor`)
//! - `NoteList`: filterable note list (`NotePicker`)
//!
//! `TerminalWidgets` is the factory the state machine uses to build them.
//!
//! ### Views (Props-Based Rendering)
//!
//! Created each frame from borrowed `App` data, rendered, then dropped:
//! - `LandingPage`, `CreateDialog`, `NoteListView`, `EditorView`
//! - `StatusLine`: the shared one-row status
//! - `HelpOverlay`, `DeleteConfirm`: popups drawn over a view
//!
//! ## Props-Based Data Flow
//!
//! Views receive data as "props" (constructor arguments), never a whole `App`.
//!
//! ```rust,ignore
//! // Dependencies are explicit
//! StatusLine::new(app.status.as_ref(), "").render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs            (this file, TerminalWidgets)
//! ├── input_box.rs      (note name input)
//! ├── text_area/        (editor buffer + wrapping)
//! ├── note_list.rs      (list widget + view)
//! ├── landing.rs
//! ├── create_dialog.rs
//! ├── editor_view.rs
//! ├── status_line.rs
//! ├── help_overlay.rs
//! └── delete_confirm.rs
//! ```

mod create_dialog;
mod delete_confirm;
mod editor_view;
mod help_overlay;
mod input_box;
mod landing;
mod note_list;
mod status_line;
pub(crate) mod text_area;

pub use create_dialog::CreateDialog;
pub use delete_confirm::DeleteConfirm;
pub use editor_view::EditorView;
pub use help_overlay::HelpOverlay;
pub use input_box::InputBox;
pub use landing::LandingPage;
pub use note_list::{NoteList, NoteListView};
pub use status_line::StatusLine;
pub use text_area::TextArea;

use crate::core::config::{DEFAULT_NAME_CHAR_LIMIT, DEFAULT_TAB_WIDTH, ResolvedConfig};
use crate::core::vault::ListItem;
use crate::core::widget::{LineInput, NotePicker, TextEditor, WidgetFactory};

/// Builds the terminal widgets with the configured limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalWidgets {
    pub name_char_limit: usize,
    pub tab_width: usize,
}

impl TerminalWidgets {
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            name_char_limit: config.name_char_limit,
            tab_width: config.tab_width,
        }
    }
}

impl Default for TerminalWidgets {
    fn default() -> Self {
        Self {
            name_char_limit: DEFAULT_NAME_CHAR_LIMIT,
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }
}

impl WidgetFactory for TerminalWidgets {
    fn line_input(&self) -> Box<dyn LineInput> {
        Box::new(InputBox::new(self.name_char_limit))
    }

    fn text_editor(&self, content: String) -> Box<dyn TextEditor> {
        Box::new(TextArea::new(content, self.tab_width))
    }

    fn note_picker(&self, items: Vec<ListItem>) -> Box<dyn NotePicker> {
        Box::new(NoteList::new(items))
    }
}

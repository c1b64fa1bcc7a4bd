//! # Application State
//!
//! Everything termnote knows about the running session. Domain logic only,
//! no terminal types.
//!
//! ```text
//! App
//! ├── vault: Vault                     // where notes live
//! ├── settings: EditorSettings         // table size, code block language
//! ├── mode: Mode                       // exactly one primary view
//! │   ├── Landing
//! │   ├── CreateDialog { input }
//! │   ├── ListView { list }
//! │   └── Editing(OpenNote { handle, editor, saved })
//! ├── show_help: bool                  // overlay, Editing only
//! ├── delete_target: Option<String>    // overlay, ListView only
//! ├── status: Option<Status>           // message + severity
//! ├── dimensions: Dimensions           // last known terminal size
//! └── widgets: Box<dyn WidgetFactory>  // builds inputs, editors, lists
//! ```
//!
//! State changes only happen through `update(app, action)` in action.rs.

use log::debug;

use crate::core::markdown::DEFAULT_CODE_LANGUAGE;
use crate::core::vault::{ListItem, NoteHandle, Vault};
use crate::core::widget::{LineInput, NotePicker, TextEditor, WidgetFactory};

pub const DEFAULT_TABLE_ROWS: usize = 3;
pub const DEFAULT_TABLE_COLS: usize = 3;

/// Values the markdown shortcuts need from the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSettings {
    pub code_language: String,
    pub table_rows: usize,
    pub table_cols: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            code_language: DEFAULT_CODE_LANGUAGE.to_string(),
            table_rows: DEFAULT_TABLE_ROWS,
            table_cols: DEFAULT_TABLE_COLS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u16,
    pub height: u16,
}

/// A note loaded into the editor. Owns the file until the note is closed.
pub struct OpenNote {
    pub handle: NoteHandle,
    pub editor: Box<dyn TextEditor>,
    /// Buffer contents at the last load or save.
    pub saved: String,
}

impl OpenNote {
    pub fn new(handle: NoteHandle, content: String, widgets: &dyn WidgetFactory) -> Self {
        Self {
            handle,
            editor: widgets.text_editor(content.clone()),
            saved: content,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.editor.text() != self.saved
    }

    /// Release the file. Whatever was not saved is lost.
    pub fn close(self) {
        self.handle.close();
    }
}

pub enum Mode {
    Landing,
    CreateDialog { input: Box<dyn LineInput> },
    ListView { list: Box<dyn NotePicker> },
    Editing(OpenNote),
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Landing => "landing",
            Mode::CreateDialog { .. } => "create",
            Mode::ListView { .. } => "list",
            Mode::Editing(_) => "editing",
        }
    }
}

pub struct App {
    pub vault: Vault,
    pub settings: EditorSettings,
    pub mode: Mode,
    pub show_help: bool,
    /// Filename awaiting delete confirmation.
    pub delete_target: Option<String>,
    pub status: Option<Status>,
    pub dimensions: Dimensions,
    pub widgets: Box<dyn WidgetFactory>,
}

impl App {
    pub fn new(vault: Vault, settings: EditorSettings, widgets: Box<dyn WidgetFactory>) -> Self {
        Self {
            vault,
            settings,
            mode: Mode::Landing,
            show_help: false,
            delete_target: None,
            status: None,
            dimensions: Dimensions::default(),
            widgets,
        }
    }

    pub fn set_status(&mut self, severity: Severity, message: impl Into<String>) {
        self.status = Some(Status {
            message: message.into(),
            severity,
        });
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Store the terminal size and pass it on to the active widget.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.dimensions = Dimensions { width, height };
        match &mut self.mode {
            Mode::ListView { list } => list.resize(width, height),
            Mode::Editing(note) => note.editor.resize(width, height),
            Mode::Landing | Mode::CreateDialog { .. } => {}
        }
    }

    pub fn enter_create_dialog(&mut self) {
        self.switch_mode(Mode::CreateDialog {
            input: self.widgets.line_input(),
        });
    }

    pub fn enter_list(&mut self, items: Vec<ListItem>) {
        let mut list = self.widgets.note_picker(items);
        list.resize(self.dimensions.width, self.dimensions.height);
        self.switch_mode(Mode::ListView { list });
    }

    pub fn enter_editor(&mut self, mut note: OpenNote) {
        note.editor
            .resize(self.dimensions.width, self.dimensions.height);
        self.switch_mode(Mode::Editing(note));
    }

    fn switch_mode(&mut self, mode: Mode) {
        debug!("Mode {} -> {}", self.mode.name(), mode.name());
        self.mode = mode;
        self.show_help = false;
        self.delete_target = None;
    }
}

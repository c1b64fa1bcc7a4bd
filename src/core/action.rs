//! # Actions
//!
//! Everything that can happen in termnote becomes an `Action`.
//! User presses Ctrl+S? That's `Action::SaveNote`.
//! User types a letter? That's `Action::InputChar(c)`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state, and returns an `Effect` telling the event loop what to do next.
//!
//! ```text
//! App + Action  →  update()  →  Effect
//! ```
//!
//! Note I/O happens inside `update()` (it is small, local and synchronous).
//! Per-note failures never escape: they become a status message. The only
//! error `update()` returns is a vault that can no longer be listed.

use log::{debug, info, warn};

use crate::core::markdown;
use crate::core::state::{App, Mode, OpenNote, Severity};
use crate::core::vault::NoteError;

/// Markdown shortcuts available in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Bullet,
    Todo,
    ToggleTodo,
    Header(u8),
    NumberedList,
    Table,
    CodeBlock,
    Link,
    Image,
    Rule,
    Bold,
    Italic,
    InlineCode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Commands
    Quit,
    NewNote,
    ListNotes,
    SaveNote,
    ToggleHelp,
    Format(Format),
    Submit,
    Escape,
    Resize { width: u16, height: u16 },

    // Editing and navigation, forwarded to the active widget
    InputChar(char),
    Paste(String),
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    CursorHome,
    CursorEnd,
    PageUp,
    PageDown,
    Tab,
}

/// What the event loop should do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Result<Effect, NoteError> {
    debug!("update: {:?}", action);

    match action {
        Action::Quit => return Ok(Effect::Quit),
        Action::Resize { width, height } => {
            app.resize(width, height);
            return Ok(Effect::None);
        }
        _ => {}
    }

    if app.delete_target.is_some() {
        return confirm_delete(app, action).map(|()| Effect::None);
    }

    match action {
        Action::NewNote => new_note(app),
        Action::ListNotes => list_notes(app)?,
        Action::SaveNote => save_note(app),
        Action::ToggleHelp => {
            if matches!(app.mode, Mode::Editing(_)) {
                app.show_help = !app.show_help;
            }
        }
        Action::Format(format) => apply_format(app, format),
        Action::Escape => escape(app),
        Action::Submit => submit(app),
        other => return Ok(forward(app, other)),
    }

    Ok(Effect::None)
}

// ============================================================================
// Commands
// ============================================================================

fn new_note(app: &mut App) {
    match app.mode {
        Mode::CreateDialog { .. } => {}
        Mode::Editing(_) => refuse_while_editing(app),
        _ => {
            app.enter_create_dialog();
            app.clear_status();
        }
    }
}

fn list_notes(app: &mut App) -> Result<(), NoteError> {
    if matches!(app.mode, Mode::Editing(_)) {
        refuse_while_editing(app);
        return Ok(());
    }
    let items = app.vault.list_notes()?;
    app.enter_list(items);
    app.clear_status();
    Ok(())
}

fn refuse_while_editing(app: &mut App) {
    app.set_status(
        Severity::Warning,
        "Save (Ctrl+S) and close (Esc) the note first",
    );
}

fn save_note(app: &mut App) {
    let Mode::Editing(note) = &mut app.mode else {
        return;
    };
    let content = note.editor.text().to_string();
    let result = note.handle.save(&content);
    let filename = note.handle.filename().to_string();

    match result {
        Ok(()) => {
            note.saved = content;
            app.set_status(Severity::Success, format!("Saved {filename}"));
        }
        Err(e) => {
            warn!("Save failed: {}", e);
            app.set_status(Severity::Error, e.to_string());
        }
    }
}

/// Escape closes exactly one thing, highest priority first.
fn escape(app: &mut App) {
    if let Mode::CreateDialog { .. } = app.mode {
        app.mode = Mode::Landing;
        app.clear_status();
        return;
    }

    if app.show_help {
        app.show_help = false;
        return;
    }

    match std::mem::replace(&mut app.mode, Mode::Landing) {
        Mode::Editing(note) => {
            let filename = note.handle.filename().to_string();
            let dirty = note.is_dirty();
            note.close();
            if dirty {
                info!("Closed {} with unsaved changes discarded", filename);
                app.set_status(
                    Severity::Warning,
                    format!("Closed {filename} without saving changes"),
                );
            } else {
                app.clear_status();
            }
        }
        Mode::ListView { mut list } => {
            if list.is_filtering() {
                list.handle(&Action::Escape);
                app.mode = Mode::ListView { list };
            }
        }
        other => app.mode = other,
    }
}

fn submit(app: &mut App) {
    match &mut app.mode {
        Mode::Landing => {}
        Mode::ListView { list } => {
            if list.is_filtering() {
                list.handle(&Action::Submit);
                return;
            }
            let Some(filename) = list.selected().map(|item| item.filename.clone()) else {
                return;
            };
            match app.vault.open_note(&filename) {
                Ok((content, handle)) => {
                    app.enter_editor(OpenNote::new(handle, content, app.widgets.as_ref()));
                    app.clear_status();
                }
                Err(e) => {
                    warn!("Open failed: {}", e);
                    app.set_status(Severity::Error, e.to_string());
                }
            }
        }
        Mode::CreateDialog { input } => {
            let name = input.value().to_string();
            match app.vault.create_note(&name) {
                Ok(handle) => {
                    let filename = handle.filename().to_string();
                    app.enter_editor(OpenNote::new(handle, String::new(), app.widgets.as_ref()));
                    app.set_status(Severity::Success, format!("Created {filename}"));
                }
                Err(e) => {
                    debug!("Create rejected: {}", e);
                    app.set_status(Severity::Error, e.to_string());
                }
            }
        }
        Mode::Editing(note) => {
            let insert = markdown::continue_list(note.editor.text());
            note.editor.insert_str(&insert);
        }
    }
}

// ============================================================================
// Delete Confirmation
// ============================================================================

fn confirm_delete(app: &mut App, action: Action) -> Result<(), NoteError> {
    match action {
        Action::InputChar('y' | 'Y') => {
            let Some(filename) = app.delete_target.take() else {
                return Ok(());
            };
            match app.vault.delete_note(&filename) {
                Ok(()) => {
                    app.set_status(Severity::Success, format!("Deleted {filename}"));
                    let items = app.vault.list_notes()?;
                    if let Mode::ListView { list } = &mut app.mode {
                        list.set_items(items);
                    }
                }
                Err(e) => {
                    warn!("Delete failed: {}", e);
                    app.set_status(Severity::Error, e.to_string());
                }
            }
        }
        Action::InputChar('n' | 'N') | Action::Escape => {
            app.delete_target = None;
        }
        _ => {}
    }
    Ok(())
}

// ============================================================================
// Editor Formatting
// ============================================================================

fn apply_format(app: &mut App, format: Format) {
    let settings = app.settings.clone();
    let Mode::Editing(note) = &mut app.mode else {
        return;
    };
    let editor = &mut note.editor;
    let text = editor.text();
    let line = markdown::line_index_at_cursor(text, editor.cursor());

    let marker = match format {
        Format::Bold => Some("**"),
        Format::Italic => Some("*"),
        Format::InlineCode => Some("`"),
        _ => None,
    };

    let rewritten = match format {
        Format::Bullet => markdown::insert_bullet(text, line),
        Format::Todo => markdown::insert_todo(text, line),
        Format::ToggleTodo => markdown::toggle_todo(text, line),
        Format::Header(level) => markdown::insert_header(text, line, level),
        Format::NumberedList => markdown::insert_numbered_list(text, line),
        Format::Bold | Format::Italic | Format::InlineCode => {
            markdown::wrap_line(text, line, marker.unwrap_or_default())
        }
        Format::Table => {
            editor.insert_str(&markdown::insert_table(settings.table_rows, settings.table_cols));
            return;
        }
        Format::CodeBlock => {
            editor.insert_str(&markdown::insert_code_block(&settings.code_language));
            return;
        }
        Format::Link => {
            editor.insert_str(markdown::insert_link());
            return;
        }
        Format::Image => {
            editor.insert_str(markdown::insert_image());
            return;
        }
        Format::Rule => {
            editor.insert_str(markdown::insert_horizontal_rule());
            return;
        }
    };

    if rewritten != text {
        let line_start = line_start_offset(text, line);
        let cursor = match marker {
            Some(marker) => {
                line_start + wrapped_column(text, &rewritten, line_start, editor.cursor(), marker)
            }
            None => {
                // Prefix edits: everything after the prefix moves by the length change
                let shift = rewritten.len() as isize - text.len() as isize;
                (editor.cursor() as isize + shift).max(line_start as isize) as usize
            }
        };
        editor.set_text(rewritten, cursor);
    }
}

/// Cursor column on a line after `wrap_line` toggled `marker` around its content.
///
/// The cursor keeps its place relative to the content: it moves past the
/// opening marker when wrapping, back over it when unwrapping, and never
/// lands inside the closing marker.
fn wrapped_column(before: &str, after: &str, line_start: usize, cursor: usize, marker: &str) -> usize {
    let old_line = line_at(before, line_start);
    let new_line = line_at(after, line_start);
    let indent = old_line.len() - old_line.trim_start().len();
    let column = cursor.saturating_sub(line_start).min(old_line.len());
    if column <= indent {
        return column;
    }

    if new_line.len() > old_line.trim_end().len() {
        let content_end = indent + marker.len() + old_line.trim().len();
        (column + marker.len()).min(content_end)
    } else {
        column.saturating_sub(marker.len()).clamp(indent, new_line.len())
    }
}

/// The line of `text` that begins at byte `start`, without its newline.
fn line_at(text: &str, start: usize) -> &str {
    let rest = &text[start..];
    rest.split('\n').next().unwrap_or(rest)
}

/// Byte offset where line `line` begins.
fn line_start_offset(text: &str, line: usize) -> usize {
    if line == 0 {
        return 0;
    }
    text.match_indices('\n')
        .nth(line - 1)
        .map_or(text.len(), |(i, _)| i + 1)
}

// ============================================================================
// Widget Forwarding
// ============================================================================

fn forward(app: &mut App, action: Action) -> Effect {
    match &mut app.mode {
        Mode::Landing => {
            if action == Action::InputChar('q') {
                return Effect::Quit;
            }
        }
        Mode::ListView { list } => {
            if !list.is_filtering() {
                match action {
                    Action::InputChar('q') => return Effect::Quit,
                    Action::InputChar('d') => {
                        app.delete_target = list.selected().map(|item| item.filename.clone());
                        return Effect::None;
                    }
                    _ => {}
                }
            }
            list.handle(&action);
        }
        Mode::CreateDialog { input } => {
            input.handle(&action);
        }
        Mode::Editing(note) => {
            note.editor.handle(&action);
        }
    }
    Effect::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vault::NoteHandle;
    use crate::test_support::{test_app, type_text};
    use std::fs;

    fn press(app: &mut App, action: Action) -> Effect {
        update(app, action).unwrap()
    }

    fn editor_text(app: &App) -> &str {
        match &app.mode {
            Mode::Editing(note) => note.editor.text(),
            _ => panic!("not editing"),
        }
    }

    fn create(app: &mut App, name: &str) {
        press(app, Action::NewNote);
        type_text(app, name);
        press(app, Action::Submit);
    }

    #[test]
    fn test_starts_on_landing() {
        let (_dir, app) = test_app();
        assert!(matches!(app.mode, Mode::Landing));
        assert!(app.status.is_none());
    }

    #[test]
    fn test_quit_keys() {
        let (_dir, mut app) = test_app();
        assert_eq!(press(&mut app, Action::Quit), Effect::Quit);
        assert_eq!(press(&mut app, Action::InputChar('q')), Effect::Quit);
    }

    #[test]
    fn test_q_is_typed_inside_dialog() {
        let (_dir, mut app) = test_app();
        press(&mut app, Action::NewNote);
        assert_eq!(press(&mut app, Action::InputChar('q')), Effect::None);
        match &app.mode {
            Mode::CreateDialog { input } => assert_eq!(input.value(), "q"),
            _ => panic!("expected dialog"),
        }
    }

    #[test]
    fn test_create_note_enters_editor() {
        let (dir, mut app) = test_app();
        create(&mut app, "todo");

        assert!(matches!(app.mode, Mode::Editing(_)));
        assert_eq!(editor_text(&app), "");
        assert!(dir.path().join("todo.md").exists());
        assert_eq!(app.status.as_ref().unwrap().severity, Severity::Success);
    }

    #[test]
    fn test_create_invalid_name_stays_in_dialog() {
        let (_dir, mut app) = test_app();
        create(&mut app, "a/b");
        assert!(matches!(app.mode, Mode::CreateDialog { .. }));
        let status = app.status.as_ref().unwrap();
        assert_eq!(status.severity, Severity::Error);
        assert!(status.message.contains("invalid note name"));
    }

    #[test]
    fn test_create_empty_name_stays_in_dialog() {
        let (_dir, mut app) = test_app();
        press(&mut app, Action::NewNote);
        press(&mut app, Action::Submit);
        assert!(matches!(app.mode, Mode::CreateDialog { .. }));
        assert_eq!(app.status.as_ref().unwrap().message, "note name cannot be empty");
    }

    #[test]
    fn test_create_duplicate_reports_error() {
        let (_dir, mut app) = test_app();
        app.vault.create_note("dup").unwrap().close();
        create(&mut app, "dup");
        assert!(matches!(app.mode, Mode::CreateDialog { .. }));
        assert_eq!(app.status.as_ref().unwrap().message, "dup.md already exists");
    }

    #[test]
    fn test_escape_from_dialog_clears_status() {
        let (_dir, mut app) = test_app();
        create(&mut app, "a:b");
        assert!(app.status.is_some());
        press(&mut app, Action::Escape);
        assert!(matches!(app.mode, Mode::Landing));
        assert!(app.status.is_none());

        press(&mut app, Action::NewNote);
        match &app.mode {
            Mode::CreateDialog { input } => assert_eq!(input.value(), ""),
            _ => panic!("expected dialog"),
        }
    }

    #[test]
    fn test_save_then_escape() {
        let (dir, mut app) = test_app();
        create(&mut app, "todo");
        type_text(&mut app, "- [ ] task");
        press(&mut app, Action::SaveNote);
        assert_eq!(app.status.as_ref().unwrap().message, "Saved todo.md");
        assert!(matches!(app.mode, Mode::Editing(_)));

        type_text(&mut app, " more");
        press(&mut app, Action::Escape);
        assert!(matches!(app.mode, Mode::Landing));
        assert_eq!(app.status.as_ref().unwrap().severity, Severity::Warning);
        assert_eq!(
            fs::read_to_string(dir.path().join("todo.md")).unwrap(),
            "- [ ] task"
        );
    }

    #[test]
    fn test_save_failure_keeps_note_open() {
        let (dir, mut app) = test_app();
        create(&mut app, "locked");
        type_text(&mut app, "unsaved work");
        if let Mode::Editing(note) = &mut app.mode {
            let read_only = NoteHandle::read_only(dir.path(), "locked.md").unwrap();
            std::mem::replace(&mut note.handle, read_only).close();
        }

        press(&mut app, Action::SaveNote);
        let status = app.status.as_ref().unwrap();
        assert_eq!(status.severity, Severity::Error);
        assert!(status.message.starts_with("cannot save locked.md"));
        match &app.mode {
            Mode::Editing(note) => {
                assert_eq!(note.editor.text(), "unsaved work");
                assert!(note.is_dirty());
            }
            _ => panic!("expected the note to stay open"),
        }
    }

    #[test]
    fn test_escape_clean_note_has_no_warning() {
        let (_dir, mut app) = test_app();
        create(&mut app, "clean");
        press(&mut app, Action::Escape);
        assert!(app.status.is_none());
    }

    #[test]
    fn test_list_and_open() {
        let (_dir, mut app) = test_app();
        let mut handle = app.vault.create_note("groceries").unwrap();
        handle.save("- milk").unwrap();
        handle.close();

        press(&mut app, Action::ListNotes);
        match &app.mode {
            Mode::ListView { list } => assert_eq!(list.items().len(), 1),
            _ => panic!("expected list"),
        }

        press(&mut app, Action::Submit);
        assert_eq!(editor_text(&app), "- milk");
    }

    #[test]
    fn test_list_and_new_refused_while_editing() {
        let (_dir, mut app) = test_app();
        create(&mut app, "busy");
        press(&mut app, Action::ListNotes);
        assert!(matches!(app.mode, Mode::Editing(_)));
        assert_eq!(app.status.as_ref().unwrap().severity, Severity::Warning);
        press(&mut app, Action::NewNote);
        assert!(matches!(app.mode, Mode::Editing(_)));
    }

    #[test]
    fn test_open_missing_file_sets_error() {
        let (dir, mut app) = test_app();
        app.vault.create_note("vanishing").unwrap().close();
        press(&mut app, Action::ListNotes);
        fs::remove_file(dir.path().join("vanishing.md")).unwrap();

        press(&mut app, Action::Submit);
        assert!(matches!(app.mode, Mode::ListView { .. }));
        assert_eq!(app.status.as_ref().unwrap().severity, Severity::Error);
    }

    #[test]
    fn test_delete_flow() {
        let (dir, mut app) = test_app();
        app.vault.create_note("x").unwrap().close();
        press(&mut app, Action::ListNotes);

        press(&mut app, Action::InputChar('d'));
        assert_eq!(app.delete_target.as_deref(), Some("x.md"));
        press(&mut app, Action::InputChar('n'));
        assert!(app.delete_target.is_none());
        assert!(dir.path().join("x.md").exists());

        press(&mut app, Action::InputChar('d'));
        press(&mut app, Action::InputChar('y'));
        assert!(!dir.path().join("x.md").exists());
        assert_eq!(app.status.as_ref().unwrap().message, "Deleted x.md");
        match &app.mode {
            Mode::ListView { list } => assert!(list.items().is_empty()),
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_delete_overlay_swallows_other_keys() {
        let (dir, mut app) = test_app();
        app.vault.create_note("keep").unwrap().close();
        press(&mut app, Action::ListNotes);
        press(&mut app, Action::InputChar('d'));

        assert_eq!(press(&mut app, Action::InputChar('q')), Effect::None);
        press(&mut app, Action::Submit);
        assert!(matches!(app.mode, Mode::ListView { .. }));

        press(&mut app, Action::Escape);
        assert!(app.delete_target.is_none());
        assert!(matches!(app.mode, Mode::ListView { .. }));
        assert!(dir.path().join("keep.md").exists());
    }

    #[test]
    fn test_delete_failure_is_reported() {
        let (dir, mut app) = test_app();
        app.vault.create_note("gone").unwrap().close();
        press(&mut app, Action::ListNotes);
        press(&mut app, Action::InputChar('d'));
        fs::remove_file(dir.path().join("gone.md")).unwrap();

        press(&mut app, Action::InputChar('y'));
        assert_eq!(app.status.as_ref().unwrap().severity, Severity::Error);
        assert!(app.delete_target.is_none());
    }

    #[test]
    fn test_delete_on_empty_list_does_nothing() {
        let (_dir, mut app) = test_app();
        press(&mut app, Action::ListNotes);
        press(&mut app, Action::InputChar('d'));
        assert!(app.delete_target.is_none());
    }

    #[test]
    fn test_escape_leaves_list() {
        let (_dir, mut app) = test_app();
        press(&mut app, Action::ListNotes);
        press(&mut app, Action::Escape);
        assert!(matches!(app.mode, Mode::Landing));
    }

    #[test]
    fn test_help_toggle_only_in_editor() {
        let (_dir, mut app) = test_app();
        press(&mut app, Action::ToggleHelp);
        assert!(!app.show_help);

        create(&mut app, "help");
        press(&mut app, Action::ToggleHelp);
        assert!(app.show_help);

        // First Escape hides help, second closes the note
        press(&mut app, Action::Escape);
        assert!(!app.show_help);
        assert!(matches!(app.mode, Mode::Editing(_)));
        press(&mut app, Action::Escape);
        assert!(matches!(app.mode, Mode::Landing));
    }

    #[test]
    fn test_enter_continues_lists() {
        let (_dir, mut app) = test_app();
        create(&mut app, "list");
        type_text(&mut app, "- [x] done");
        press(&mut app, Action::Submit);
        assert_eq!(editor_text(&app), "- [x] done\n- [ ] ");

        type_text(&mut app, "next");
        press(&mut app, Action::Submit);
        press(&mut app, Action::Submit);
        assert_eq!(editor_text(&app), "- [x] done\n- [ ] next\n- [ ] \n- [ ] ");
    }

    #[test]
    fn test_format_shortcuts() {
        let (_dir, mut app) = test_app();
        create(&mut app, "fmt");
        type_text(&mut app, "task");
        press(&mut app, Action::Format(Format::Todo));
        assert_eq!(editor_text(&app), "- [ ] task");
        press(&mut app, Action::Format(Format::ToggleTodo));
        assert_eq!(editor_text(&app), "- [x] task");

        // Cursor moved with the inserted prefix, so typing continues at the end
        type_text(&mut app, "!");
        assert_eq!(editor_text(&app), "- [x] task!");

        press(&mut app, Action::Format(Format::Header(2)));
        assert_eq!(editor_text(&app), "## - [x] task!");
    }

    #[test]
    fn test_wrap_keeps_cursor_inside_content() {
        let (_dir, mut app) = test_app();
        create(&mut app, "wrap");
        type_text(&mut app, "ab");
        press(&mut app, Action::CursorLeft);

        press(&mut app, Action::Format(Format::Bold));
        assert_eq!(editor_text(&app), "**ab**");
        type_text(&mut app, "X");
        assert_eq!(editor_text(&app), "**aXb**");

        // Same shortcut again unwraps and the cursor follows the text
        press(&mut app, Action::Format(Format::Bold));
        assert_eq!(editor_text(&app), "aXb");
        type_text(&mut app, "!");
        assert_eq!(editor_text(&app), "aX!b");
    }

    #[test]
    fn test_wrap_at_line_end_stops_before_closing_marker() {
        let (_dir, mut app) = test_app();
        create(&mut app, "indent");
        type_text(&mut app, "one\n  hi");

        press(&mut app, Action::Format(Format::Italic));
        assert_eq!(editor_text(&app), "one\n  *hi*");
        type_text(&mut app, "!");
        assert_eq!(editor_text(&app), "one\n  *hi!*");

        press(&mut app, Action::Format(Format::Italic));
        assert_eq!(editor_text(&app), "one\n  hi!");
        type_text(&mut app, "?");
        assert_eq!(editor_text(&app), "one\n  hi!?");
    }

    #[test]
    fn test_format_templates_insert_at_cursor() {
        let (_dir, mut app) = test_app();
        create(&mut app, "tpl");
        press(&mut app, Action::Format(Format::Link));
        assert_eq!(editor_text(&app), "[link text](url)");
        press(&mut app, Action::Format(Format::Rule));
        assert_eq!(editor_text(&app), "[link text](url)---\n");
    }

    #[test]
    fn test_format_ignored_outside_editor() {
        let (_dir, mut app) = test_app();
        press(&mut app, Action::Format(Format::Bullet));
        assert!(matches!(app.mode, Mode::Landing));
    }

    #[test]
    fn test_resize_is_stored() {
        let (_dir, mut app) = test_app();
        press(&mut app, Action::Resize { width: 120, height: 40 });
        assert_eq!(app.dimensions.width, 120);
        assert_eq!(app.dimensions.height, 40);
    }

    #[test]
    fn test_list_failure_is_fatal() {
        let (dir, mut app) = test_app();
        fs::remove_dir_all(dir.path()).unwrap();
        let err = update(&mut app, Action::ListNotes).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_line_start_offset() {
        assert_eq!(line_start_offset("ab\ncd\nef", 0), 0);
        assert_eq!(line_start_offset("ab\ncd\nef", 1), 3);
        assert_eq!(line_start_offset("ab\ncd\nef", 2), 6);
    }
}

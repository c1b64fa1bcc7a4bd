//! Frame composition: one primary view per `Mode`, overlays drawn on top.
//!
//! The layout helpers here are shared with the widgets, which size their
//! viewports with the exact rectangles the renderer will draw into.
//!
//! ```text
//! ┌ header ─────────────────────────────┐  1 row
//! │ body                                │  rest
//! ├ status ─────────────────────────────┤  1 row
//! └ footer (shortcut hints) ────────────┘  1 row
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::Block;

use crate::core::state::{App, Mode};
use crate::tui::component::Component;
use crate::tui::components::{
    CreateDialog, DeleteConfirm, EditorView, HelpOverlay, LandingPage, NoteListView,
};

/// Splits the screen into header, body, status and footer rows.
pub fn screen_layout(area: Rect) -> [Rect; 4] {
    use Constraint::{Length, Min};
    Layout::vertical([Length(1), Min(0), Length(1), Length(1)]).areas(area)
}

/// Where the note text goes: the body minus the editor border.
pub fn editor_text_area(area: Rect) -> Rect {
    let [_, body, _, _] = screen_layout(area);
    Block::bordered().inner(body)
}

/// Where the note list goes.
pub fn list_area(area: Rect) -> Rect {
    let [_, body, _, _] = screen_layout(area);
    body
}

/// A `width` x `height` rect centered in `outer`, clamped to fit.
pub fn centered_rect(width: u16, height: u16, outer: Rect) -> Rect {
    let width = width.min(outer.width);
    let height = height.min(outer.height);
    Rect {
        x: outer.x + (outer.width - width) / 2,
        y: outer.y + (outer.height - height) / 2,
        width,
        height,
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status = app.status.as_ref();

    match &app.mode {
        Mode::Landing => LandingPage::new(status).render(frame, area),
        Mode::CreateDialog { input } => {
            LandingPage::new(None).render(frame, area);
            CreateDialog::new(input.as_ref(), status).render(frame, area);
        }
        Mode::ListView { list } => NoteListView::new(list.as_ref(), status).render(frame, area),
        Mode::Editing(note) => EditorView::new(note, status).render(frame, area),
    }

    if let Some(filename) = &app.delete_target {
        DeleteConfirm::new(filename).render(frame, area);
    }
    if app.show_help {
        HelpOverlay.render(frame, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(app: &App) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_screen_layout_rows() {
        let [header, body, status, footer] = screen_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(header.height, 1);
        assert_eq!(body.height, 21);
        assert_eq!(status.y, 22);
        assert_eq!(footer.y, 23);
    }

    #[test]
    fn test_editor_text_area_excludes_border() {
        let inner = editor_text_area(Rect::new(0, 0, 80, 24));
        assert_eq!(inner, Rect::new(1, 2, 78, 19));
    }

    #[test]
    fn test_centered_rect_clamps() {
        let outer = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_rect(10, 4, outer), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_rect(50, 50, outer), outer);
    }

    #[test]
    fn test_draw_landing() {
        let (_dir, app) = test_app();
        let text = render(&app);
        assert!(text.contains("termnote"));
        assert!(text.contains("Ctrl+N"));
    }

    #[test]
    fn test_draw_create_dialog() {
        let (_dir, mut app) = test_app();
        update(&mut app, Action::NewNote).unwrap();
        let text = render(&app);
        assert!(text.contains("New Note"));
        assert!(text.contains("0/100"));
    }

    #[test]
    fn test_draw_delete_overlay() {
        let (_dir, mut app) = test_app();
        app.vault.create_note("doomed").unwrap().close();
        update(&mut app, Action::ListNotes).unwrap();
        update(&mut app, Action::InputChar('d')).unwrap();
        let text = render(&app);
        assert!(text.contains("Delete doomed.md?"));
    }

    #[test]
    fn test_draw_editor_with_help() {
        let (_dir, mut app) = test_app();
        update(&mut app, Action::NewNote).unwrap();
        for c in "plan".chars() {
            update(&mut app, Action::InputChar(c)).unwrap();
        }
        update(&mut app, Action::Submit).unwrap();
        update(&mut app, Action::ToggleHelp).unwrap();
        let text = render(&app);
        assert!(text.contains("plan.md"));
        assert!(text.contains("Keyboard Shortcuts"));
    }
}

//! # Editor View Component
//!
//! Full-screen view of an open note: filename header with a modified marker,
//! the bordered text viewport, the status line and a row of shortcut hints.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::state::{OpenNote, Status};
use crate::tui::component::Component;
use crate::tui::components::StatusLine;
use crate::tui::ui::screen_layout;

const HINTS: &str = " Ctrl+S save  Esc close  F1 help ";

pub struct EditorView<'a> {
    note: &'a OpenNote,
    status: Option<&'a Status>,
}

impl<'a> EditorView<'a> {
    pub fn new(note: &'a OpenNote, status: Option<&'a Status>) -> Self {
        Self { note, status }
    }

    fn header(&self) -> Line<'a> {
        let mut spans = vec![
            Span::styled(" termnote ", Style::default().fg(Color::Cyan)),
            Span::styled(
                self.note.handle.filename().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ];
        if self.note.is_dirty() {
            spans.push(Span::styled(" [modified]", Style::default().fg(Color::Yellow)));
        }
        Line::from(spans)
    }
}

impl Component for EditorView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [header_area, body, status_area, footer_area] = screen_layout(area);
        frame.render_widget(self.header(), header_area);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(body);

        let viewport = self.note.editor.viewport();
        let lines: Vec<Line> = viewport.lines.into_iter().map(Line::from).collect();
        frame.render_widget(Paragraph::new(lines).block(block), body);

        let (col, row) = viewport.cursor;
        if inner.width > 0 && inner.height > 0 {
            frame.set_cursor_position((
                inner.x + col.min(inner.width - 1),
                inner.y + row.min(inner.height - 1),
            ));
        }

        StatusLine::new(self.status, "").render(frame, status_area);
        frame.render_widget(
            Line::from(HINTS).style(Style::default().fg(Color::DarkGray)),
            footer_area,
        );
    }
}

//! # Delete Confirmation Component
//!
//! Small red popup over the note list naming the file about to be removed.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};

use crate::tui::component::Component;
use crate::tui::ui::centered_rect;

pub struct DeleteConfirm<'a> {
    filename: &'a str,
}

impl<'a> DeleteConfirm<'a> {
    pub fn new(filename: &'a str) -> Self {
        Self { filename }
    }
}

impl Component for DeleteConfirm<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let question = format!("Delete {}?", self.filename);
        // Room for the question plus borders and a margin, within reason
        let width = (question.chars().count() as u16 + 6).clamp(36, 70);
        let popup = centered_rect(width, 6, area);
        frame.render_widget(Clear, popup);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Red))
            .title(" Confirm ");

        let lines = vec![
            Line::default(),
            Line::from(Span::styled(
                question,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled("y", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
                Span::raw(" delete   "),
                Span::styled("n", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" / Esc keep"),
            ]),
        ];

        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(block),
            popup,
        );
    }
}

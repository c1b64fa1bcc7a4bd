//! # Create Dialog Component
//!
//! Centered popup asking for a new note's name. Draws the injected
//! `LineInput`, a character counter, the `.md` hint and any inline error.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph};

use crate::core::state::Status;
use crate::core::widget::LineInput;
use crate::tui::component::Component;
use crate::tui::components::StatusLine;
use crate::tui::components::text_area::wrap::str_width;
use crate::tui::ui::centered_rect;

const DIALOG_WIDTH: u16 = 60;
const DIALOG_HEIGHT: u16 = 9;

pub struct CreateDialog<'a> {
    input: &'a dyn LineInput,
    status: Option<&'a Status>,
}

impl<'a> CreateDialog<'a> {
    pub fn new(input: &'a dyn LineInput, status: Option<&'a Status>) -> Self {
        Self { input, status }
    }

    /// The part of the value that fits in `width` columns with the cursor
    /// visible, and the cursor column within it.
    fn visible_value(&self, width: usize) -> (String, u16) {
        let chars: Vec<char> = self.input.value().chars().collect();
        let cursor = self.input.cursor().min(chars.len());
        let skip = cursor.saturating_sub(width.saturating_sub(1));
        let shown: String = chars[skip..].iter().collect();
        let before: String = chars[skip..cursor].iter().collect();
        (shown, str_width(&before) as u16)
    }
}

impl Component for CreateDialog<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let dialog = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, area);
        frame.render_widget(Clear, dialog);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(Span::styled(
                " New Note ",
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Line::from(" Enter create  Esc cancel ").centered())
            .padding(Padding::horizontal(1));
        let inner = block.inner(dialog);
        frame.render_widget(block, dialog);

        use Constraint::Length;
        let [label_area, field_area, counter_area, _, status_area] =
            Layout::vertical([Length(1), Length(1), Length(1), Length(1), Length(1)])
                .areas(inner);

        frame.render_widget(Line::from("Note name:"), label_area);

        let prompt = "> ";
        let field_width = (field_area.width as usize).saturating_sub(prompt.len());
        let (shown, cursor_col) = self.visible_value(field_width);
        frame.render_widget(
            Line::from(vec![
                Span::styled(prompt, Style::default().fg(Color::Cyan)),
                Span::raw(shown),
            ]),
            field_area,
        );
        frame.set_cursor_position((
            field_area.x + prompt.len() as u16 + cursor_col,
            field_area.y,
        ));

        let count = self.input.value().chars().count();
        let limit = self.input.char_limit();
        let counter_style = if count >= limit {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        frame.render_widget(
            Line::from(vec![
                Span::styled(".md is added automatically", Style::default().fg(Color::DarkGray)),
                Span::raw("   "),
                Span::styled(format!("{count}/{limit}"), counter_style),
            ]),
            counter_area,
        );

        StatusLine::new(self.status, "").render(frame, status_area);
    }
}

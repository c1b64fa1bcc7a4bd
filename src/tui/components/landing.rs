//! # Landing Page Component
//!
//! Shown at startup and whenever a note, list or dialog is closed: the app
//! name, the version and the handful of keys needed to get going.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::state::Status;
use crate::tui::component::Component;
use crate::tui::components::StatusLine;
use crate::tui::ui::screen_layout;

const SHORTCUTS: &[(&str, &str)] = &[
    ("Ctrl+N", "Create a new note"),
    ("Ctrl+L", "List all notes"),
    ("Ctrl+S", "Save current note"),
    ("Esc", "Go back / close view"),
    ("q / Ctrl+C", "Quit"),
];

pub struct LandingPage<'a> {
    status: Option<&'a Status>,
}

impl<'a> LandingPage<'a> {
    pub fn new(status: Option<&'a Status>) -> Self {
        Self { status }
    }
}

impl Component for LandingPage<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [_, body, status_area, _] = screen_layout(area);

        let mut lines = vec![
            Line::from(Span::styled(
                "termnote",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("v{}", env!("CARGO_PKG_VERSION")),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                "Markdown notes in your terminal",
                Style::default().fg(Color::DarkGray),
            )),
            Line::default(),
            Line::from(Span::styled(
                "Keyboard Shortcuts",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
        ];

        let key_width = SHORTCUTS.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
        lines.extend(SHORTCUTS.iter().map(|(key, desc)| {
            Line::from(vec![
                Span::styled(
                    format!("{key:>key_width$}  "),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("{desc:<24}"), Style::default().fg(Color::Gray)),
            ])
        }));

        let [content] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Center)
            .areas(body);

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), content);
        StatusLine::new(self.status, "").render(frame, status_area);
    }
}

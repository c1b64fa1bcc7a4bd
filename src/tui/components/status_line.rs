//! # StatusLine Component
//!
//! One-row feedback line shared by every screen.
//!
//! Shows the current status message colored by severity. With no status, it
//! falls back to a dim hint supplied by the parent (or stays blank).

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::state::{Severity, Status};
use crate::tui::component::Component;

pub struct StatusLine<'a> {
    pub status: Option<&'a Status>,
    pub hint: &'a str,
}

impl<'a> StatusLine<'a> {
    pub fn new(status: Option<&'a Status>, hint: &'a str) -> Self {
        Self { status, hint }
    }
}

pub fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::Success => Style::default().fg(Color::Green),
        Severity::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        Severity::Warning => Style::default().fg(Color::Yellow),
    }
}

impl Component for StatusLine<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = match self.status {
            Some(status) => Line::from(Span::styled(
                format!(" {}", status.message),
                severity_style(status.severity),
            )),
            None => Line::from(Span::styled(
                format!(" {}", self.hint),
                Style::default().fg(Color::DarkGray),
            )),
        };
        frame.render_widget(line, area);
    }
}

//! # Help Overlay Component
//!
//! Every editor shortcut, grouped. Toggled with F1 while a note is open
//! (Ctrl+H too, where the terminal reports it). Esc hides it before it
//! closes the note.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph};

use crate::tui::component::Component;
use crate::tui::ui::centered_rect;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Basic Commands",
        &[
            ("Ctrl+S", "Save note"),
            ("F1 / Ctrl+H", "Toggle this help"),
            ("Esc", "Close without saving"),
            ("Enter", "New line, continuing lists"),
        ],
    ),
    (
        "Markdown Formatting",
        &[
            ("Ctrl+B", "Bullet point (- )"),
            ("Ctrl+T", "Todo checkbox (- [ ] )"),
            ("Ctrl+D", "Check / uncheck todo"),
            ("Ctrl+1..6", "Header level 1 to 6"),
            ("Alt+N", "Numbered list item"),
            ("Alt+B / E / K", "Bold / italic / code line"),
        ],
    ),
    (
        "Templates",
        &[
            ("Alt+T", "Table"),
            ("Alt+C", "Code block"),
            ("Alt+L", "Link"),
            ("Alt+I", "Image"),
            ("Alt+R", "Horizontal rule"),
        ],
    ),
];

pub struct HelpOverlay;

impl HelpOverlay {
    fn lines() -> Vec<Line<'static>> {
        let key_width = SECTIONS
            .iter()
            .flat_map(|(_, items)| items.iter())
            .map(|(key, _)| key.len())
            .max()
            .unwrap_or(0);

        let mut lines = Vec::new();
        for (title, items) in SECTIONS {
            if !lines.is_empty() {
                lines.push(Line::default());
            }
            lines.push(Line::from(Span::styled(
                *title,
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )));
            for (key, desc) in *items {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{key:<key_width$}  "),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(*desc, Style::default().fg(Color::Gray)),
                ]));
            }
        }
        lines
    }
}

impl Component for HelpOverlay {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = Self::lines();
        // Content plus borders; the editor header row stays visible on 24 rows
        let height = lines.len() as u16 + 2;
        let overlay = centered_rect(56, height, area);
        frame.render_widget(Clear, overlay);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Keyboard Shortcuts ")
            .title_bottom(Line::from(" Esc or F1 to close ").centered())
            .padding(Padding::horizontal(1));

        frame.render_widget(Paragraph::new(lines).block(block), overlay);
    }
}

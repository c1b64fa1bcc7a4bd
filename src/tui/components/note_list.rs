//! # Note List Component
//!
//! Browsable, filterable list of notes in the vault.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `NoteList` lives in `Mode::ListView` and handles keys
//! - `NoteListView` is created each frame with borrowed state and draws it
//!
//! Keys while browsing: ↑/↓ or k/j move, PgUp/PgDn page, Home/End jump,
//! `/` starts a filter. While filtering, typing edits the filter, Enter keeps
//! it and Esc drops it.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem as ListRow, ListState, Padding, Paragraph};

use crate::core::action::Action;
use crate::core::state::Status;
use crate::core::vault::ListItem;
use crate::core::widget::NotePicker;
use crate::tui::component::Component;
use crate::tui::components::StatusLine;
use crate::tui::ui::{list_area, screen_layout};

/// Screen rows per entry: title + description.
const ROWS_PER_ITEM: u16 = 2;

pub struct NoteList {
    items: Vec<ListItem>,
    /// Index into the filtered view.
    selected: usize,
    filter: String,
    filtering: bool,
    page_size: usize,
}

impl NoteList {
    pub fn new(items: Vec<ListItem>) -> Self {
        Self {
            items,
            selected: 0,
            filter: String::new(),
            filtering: false,
            page_size: 10,
        }
    }

    fn matches(&self, item: &ListItem) -> bool {
        self.filter.is_empty() || item.title.to_lowercase().contains(&self.filter.to_lowercase())
    }

    fn visible_len(&self) -> usize {
        self.items.iter().filter(|item| self.matches(item)).count()
    }

    fn select(&mut self, index: usize) -> bool {
        let index = index.min(self.visible_len().saturating_sub(1));
        let moved = index != self.selected;
        self.selected = index;
        moved
    }

    fn handle_filter(&mut self, action: &Action) -> bool {
        match action {
            Action::InputChar(c) => self.filter.push(*c),
            Action::Paste(text) => self.filter.extend(text.chars().filter(|c| !c.is_control())),
            Action::Backspace => {
                self.filter.pop();
            }
            Action::Submit => {
                self.filtering = false;
                return true;
            }
            Action::Escape => {
                self.filtering = false;
                self.filter.clear();
            }
            _ => return self.handle_navigation(action),
        }
        self.selected = 0;
        true
    }

    fn handle_navigation(&mut self, action: &Action) -> bool {
        match action {
            Action::CursorUp | Action::InputChar('k') => self.select(self.selected.saturating_sub(1)),
            Action::CursorDown | Action::InputChar('j') => self.select(self.selected + 1),
            Action::PageUp => self.select(self.selected.saturating_sub(self.page_size)),
            Action::PageDown => self.select(self.selected + self.page_size),
            Action::CursorHome => self.select(0),
            Action::CursorEnd => self.select(usize::MAX),
            _ => false,
        }
    }
}

impl NotePicker for NoteList {
    fn handle(&mut self, action: &Action) -> bool {
        // Letters belong to the filter while typing one
        if self.filtering {
            return self.handle_filter(action);
        }
        match action {
            Action::InputChar('/') => {
                self.filtering = true;
                self.filter.clear();
                self.selected = 0;
                true
            }
            _ => self.handle_navigation(action),
        }
    }

    fn set_items(&mut self, items: Vec<ListItem>) {
        self.items = items;
        self.select(self.selected);
    }

    fn items(&self) -> &[ListItem] {
        &self.items
    }

    fn visible(&self) -> Vec<&ListItem> {
        self.items.iter().filter(|item| self.matches(item)).collect()
    }

    fn selected_index(&self) -> Option<usize> {
        (self.visible_len() > 0).then_some(self.selected)
    }

    fn selected(&self) -> Option<&ListItem> {
        self.visible().get(self.selected).copied()
    }

    fn filter(&self) -> &str {
        &self.filter
    }

    fn is_filtering(&self) -> bool {
        self.filtering
    }

    fn resize(&mut self, width: u16, height: u16) {
        let area = list_area(Rect::new(0, 0, width, height));
        // Borders take two rows
        let rows = area.height.saturating_sub(2) / ROWS_PER_ITEM;
        self.page_size = (rows as usize).max(1);
    }
}

/// Transient render wrapper for the note list screen.
pub struct NoteListView<'a> {
    list: &'a dyn NotePicker,
    status: Option<&'a Status>,
}

impl<'a> NoteListView<'a> {
    pub fn new(list: &'a dyn NotePicker, status: Option<&'a Status>) -> Self {
        Self { list, status }
    }

    fn header(&self) -> Line<'a> {
        let visible = self.list.visible().len();
        let total = self.list.items().len();
        let count = if visible == total {
            format!("{total} {}", if total == 1 { "note" } else { "notes" })
        } else {
            format!("{visible} of {total} notes")
        };

        let mut spans = vec![
            Span::styled(" Notes ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(count, Style::default().fg(Color::DarkGray)),
        ];
        if self.list.is_filtering() || !self.list.filter().is_empty() {
            spans.push(Span::styled(
                format!("   /{}", self.list.filter()),
                Style::default().fg(Color::Yellow),
            ));
        }
        Line::from(spans)
    }

    fn hints(&self) -> &'static str {
        if self.list.is_filtering() {
            " Enter keep filter  Esc clear filter "
        } else {
            " Enter open  / filter  d delete  Ctrl+N new  Esc back  q quit "
        }
    }
}

impl Component for NoteListView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [header_area, body, status_area, footer_area] = screen_layout(area);
        frame.render_widget(self.header(), header_area);

        let selected = self.list.selected();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title_bottom(
                Line::from(
                    selected
                        .map(|item| format!(" {} ", item.modified.format("%Y-%m-%d %H:%M")))
                        .unwrap_or_default(),
                )
                .right_aligned(),
            )
            .padding(Padding::horizontal(1));

        let visible = self.list.visible();
        if visible.is_empty() {
            let message = if self.list.items().is_empty() {
                "No notes yet. Press Ctrl+N to create one."
            } else {
                "No notes match the filter."
            };
            let empty = Paragraph::new(message)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, body);
        } else {
            let rows: Vec<ListRow> = visible
                .iter()
                .map(|item| {
                    ListRow::new(vec![
                        Line::from(Span::styled(
                            item.title.clone(),
                            Style::default().add_modifier(Modifier::BOLD),
                        )),
                        Line::from(Span::styled(
                            item.description.clone(),
                            Style::default().fg(Color::DarkGray),
                        )),
                    ])
                })
                .collect();

            let list = List::new(rows)
                .block(block)
                .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::REVERSED))
                .highlight_symbol("▌");

            let mut state = ListState::default().with_selected(self.list.selected_index());
            frame.render_stateful_widget(list, body, &mut state);
        }

        StatusLine::new(self.status, "").render(frame, status_area);
        frame.render_widget(
            Line::from(self.hints()).style(Style::default().fg(Color::DarkGray)),
            footer_area,
        );
    }
}

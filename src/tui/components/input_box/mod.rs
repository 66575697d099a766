//! # InputBox Component
//!
//! Multi-line text entry with a submit hint.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste, newline via Shift+Enter / Ctrl+J)
//! - Handle editing (backspace, delete, cursor movement)
//! - Report every text change and every submit request upward
//! - Show whether a submit would currently be accepted
//!
//! ## State Management
//!
//! The controller owns the authoritative input text. The box keeps a local
//! editing buffer (text + cursor) that reports changes up and is brought back
//! in line with [`InputBox::sync`] each frame, which is how a submit clears it.
//! `enabled` and `submit_enabled` are props copied from the controller;
//! `focused` comes from the TUI focus mode.

mod editor;
mod layout;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use editor::LineEditor;
use layout::{
    MAX_VISIBLE_LINES, TEXT_INSET_X, TEXT_INSET_Y, VERTICAL_OVERHEAD, cursor_row_col,
    inner_width, row_count, wrap_rows,
};

const SUBMIT_HINT: &str = " ⏎ Send ";
const PLACEHOLDER: &str = "Ask a question…";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The buffer now holds this text.
    Changed(String),
    /// Enter was pressed. Whether anything is sent is up to the controller.
    Submit,
}

pub struct InputBox {
    editor: LineEditor,
    /// First wrapped row shown when the text is taller than the box
    scroll_offset: u16,
    /// Accepts edits (Prop)
    pub enabled: bool,
    /// A submit would be accepted right now (Prop)
    pub submit_enabled: bool,
    /// Keyboard focus is on the box rather than the transcript (Prop)
    pub focused: bool,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            editor: LineEditor::default(),
            scroll_offset: 0,
            enabled: true,
            submit_enabled: false,
            focused: true,
        }
    }

    pub fn text(&self) -> &str {
        self.editor.text()
    }

    /// Adopt `text` from the controller if it differs from the local buffer.
    pub fn sync(&mut self, text: &str) {
        if self.editor.text() != text {
            self.editor.replace(text);
            if text.is_empty() {
                self.scroll_offset = 0;
            }
        }
    }

    /// Outer height for the current text, between one and
    /// `MAX_VISIBLE_LINES` content rows plus borders.
    pub fn calculate_height(&self, outer_width: u16) -> u16 {
        let rows = row_count(self.editor.text(), inner_width(outer_width));
        rows.min(MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    fn hint_style(&self) -> Style {
        if self.submit_enabled {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM)
        }
    }

    /// Keep the cursor row inside the visible window.
    fn follow_cursor(&mut self, cursor_row: u16, total_rows: u16) {
        if total_rows <= MAX_VISIBLE_LINES {
            self.scroll_offset = 0;
        } else if cursor_row < self.scroll_offset {
            self.scroll_offset = cursor_row;
        } else if cursor_row >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = cursor_row + 1 - MAX_VISIBLE_LINES;
        }
    }

    fn changed(&self) -> Option<InputEvent> {
        Some(InputEvent::Changed(self.editor.text().to_string()))
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = inner_width(area.width);
        let rows = wrap_rows(self.editor.text(), width);
        let (cursor_row, cursor_col) = cursor_row_col(self.editor.before_cursor(), width);
        self.follow_cursor(cursor_row, rows.len() as u16);

        let (title, border_style) = if !self.enabled {
            (
                "Waiting for UniBot…",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::DIM),
            )
        } else if self.focused {
            ("Ask UniBot", Style::default().fg(Color::Green))
        } else {
            (
                "Ask UniBot (browsing, type to return)",
                Style::default().fg(Color::Green).add_modifier(Modifier::DIM),
            )
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(title)
            .title_bottom(Line::styled(SUBMIT_HINT, self.hint_style()).right_aligned())
            .padding(Padding::horizontal(1));

        let body = if self.editor.text().is_empty() && self.enabled {
            Text::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray))
        } else {
            let visible: Vec<Line> = rows
                .into_iter()
                .skip(self.scroll_offset as usize)
                .take(MAX_VISIBLE_LINES as usize)
                .map(Line::from)
                .collect();
            Text::from(visible).style(Style::default().fg(Color::Green))
        };

        frame.render_widget(Paragraph::new(body).block(block), area);

        if self.enabled && self.focused {
            let row = cursor_row.saturating_sub(self.scroll_offset);
            frame.set_cursor_position((
                area.x + TEXT_INSET_X + cursor_col,
                area.y + TEXT_INSET_Y + row,
            ));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if !self.enabled {
            return None;
        }
        match event {
            TuiEvent::InputChar(c) => {
                self.editor.insert(c.encode_utf8(&mut [0; 4]));
                self.changed()
            }
            TuiEvent::Paste(text) => {
                // Terminals send CR line endings in pastes
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                self.editor.insert(&text);
                self.changed()
            }
            TuiEvent::Backspace => self.editor.backspace().then(|| self.changed()).flatten(),
            TuiEvent::Delete => self.editor.delete().then(|| self.changed()).flatten(),
            TuiEvent::CursorLeft => {
                self.editor.left();
                None
            }
            TuiEvent::CursorRight => {
                self.editor.right();
                None
            }
            TuiEvent::CursorHome => {
                self.editor.home();
                None
            }
            TuiEvent::CursorEnd => {
                self.editor.end();
                None
            }
            TuiEvent::Submit => Some(InputEvent::Submit),
            _ => None,
        }
    }
}

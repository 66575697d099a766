//! # TitleBar Component
//!
//! Single-line header: app name, server, startup status, and a "↓ New"
//! marker when the transcript has records below the visible window.
//!
//! Stateless. All three props are refreshed by the parent every frame:
//! - `server`: resolved base URL (configuration)
//! - `status`: result of the startup health check
//! - `has_unseen_content`: message list scroll state

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

pub struct TitleBar {
    pub server: String,
    pub status: String,
    pub has_unseen_content: bool,
}

impl TitleBar {
    pub fn new(server: impl Into<String>, status: impl Into<String>, has_unseen_content: bool) -> Self {
        Self {
            server: server.into(),
            status: status.into(),
            has_unseen_content,
        }
    }

    fn line(&self) -> Line<'_> {
        let mut spans = vec![
            Span::styled("UniBot", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                format!(" (server: {})", self.server),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        if !self.status.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.status)));
        }
        if self.has_unseen_content {
            spans.push(Span::styled(
                " | ↓ New",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ));
        }
        Line::from(spans)
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(self.line(), area);
    }
}

//! # Landing Page Component
//!
//! Shown in place of the message list until the first message is sent.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub struct LandingPage;

impl LandingPage {
    fn lines() -> Vec<Line<'static>> {
        vec![
            Line::styled(
                "Welcome to UniBot",
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ),
            Line::styled(
                "Ask anything about the university.",
                Style::default().fg(Color::Gray),
            ),
            Line::default(),
            Line::styled(
                "Enter to send · Shift+Enter for a new line · Ctrl+C to quit",
                Style::default().fg(Color::DarkGray),
            ),
            Line::styled(
                format!("v{}", env!("CARGO_PKG_VERSION")),
                Style::default().fg(Color::DarkGray),
            ),
        ]
    }
}

impl Component for LandingPage {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = Self::lines();
        let [body] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Center)
            .areas(area);

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), body);
    }
}

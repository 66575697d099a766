use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::transcript::{MessageRecord, Role};
use crate::tui::component::Component;
use crate::tui::markup;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders a single transcript record.
///
/// `Message` is created fresh each frame by the parent `MessageList`.
/// The role picks the border label and color; the time label sits on the
/// right of the top border.
///
/// User records are shown as typed. Bot records carry formatter markup and
/// go through [`markup::render`].
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub record: &'a MessageRecord,
}

impl<'a> Message<'a> {
    pub fn new(record: &'a MessageRecord) -> Self {
        Self { record }
    }

    /// Styled body text for a record.
    pub fn body(record: &MessageRecord) -> Text<'static> {
        let style = role_style(record.role());
        match record.role() {
            Role::User => Text::styled(record.content().to_string(), style),
            Role::Bot => markup::render(record.content(), style),
        }
    }

    /// Calculate the height required for this record given a width.
    ///
    /// Uses `textwrap` on each rendered line so the height is known before
    /// rendering. The options must match ratatui's `Paragraph` wrapping.
    pub fn calculate_height(record: &MessageRecord, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding; still occupy a row.
            return 1;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines: usize = Self::body(record)
            .lines
            .iter()
            .map(|line| textwrap::wrap(&markup::plain(line), &options).len().max(1))
            .sum();

        // Pathologically long answers saturate rather than wrap around
        u16::try_from(lines.max(1))
            .unwrap_or(u16::MAX)
            .saturating_add(VERTICAL_OVERHEAD)
    }
}

pub fn role_style(role: Role) -> Style {
    match role {
        Role::User => Style::default().fg(Color::Green),
        Role::Bot => Style::default().fg(Color::Blue),
    }
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = role_style(self.record.role());
        let border_style = style.add_modifier(Modifier::DIM);

        let block = Block::bordered()
            .title(self.record.role().label())
            .title_top(Line::from(self.record.timestamp()).right_aligned())
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(Self::body(self.record))
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

/// `Message` is stateless; rendering is delegated to the [`Widget`] impl.
impl<'a> Component for Message<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

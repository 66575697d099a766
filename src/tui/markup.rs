//! Transcript markup → ratatui `Text` renderer.
//!
//! Understands exactly what `core::formatter` produces: `<br>`, `<strong>`,
//! `<em>` and their closers. Anything else that looks like a tag, and any
//! closer without an open partner, is shown as literal text.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

#[derive(Clone, Copy)]
enum Token {
    Break,
    Open(Modifier),
    Close(Modifier),
}

const TAGS: &[(&str, Token)] = &[
    ("<br>", Token::Break),
    ("<strong>", Token::Open(Modifier::BOLD)),
    ("</strong>", Token::Close(Modifier::BOLD)),
    ("<em>", Token::Open(Modifier::ITALIC)),
    ("</em>", Token::Close(Modifier::ITALIC)),
];

/// Parse markup into styled text on top of `base`.
///
/// Returns owned text (`'static`) so callers aren't constrained by input lifetime.
pub fn render(markup: &str, base: Style) -> Text<'static> {
    let mut w = Writer::new(base);
    let mut rest = markup;

    while let Some(start) = rest.find('<') {
        w.push_str(&rest[..start]);
        let tail = &rest[start..];
        match TAGS.iter().find(|(tag, _)| tail.starts_with(tag)) {
            Some((tag, token)) => {
                w.apply(*token, tag);
                rest = &tail[tag.len()..];
            }
            None => {
                w.push_str("<");
                rest = &tail[1..];
            }
        }
    }
    w.push_str(rest);
    w.finish()
}

struct Writer {
    base: Style,
    /// Open inline modifiers, innermost last.
    open: Vec<Modifier>,
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
}

impl Writer {
    fn new(base: Style) -> Self {
        Self {
            base,
            open: Vec::new(),
            lines: Vec::new(),
            current: Vec::new(),
        }
    }

    fn style(&self) -> Style {
        self.open
            .iter()
            .fold(self.base, |style, m| style.add_modifier(*m))
    }

    fn push_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        // Merge with the previous span when the style hasn't changed
        let style = self.style();
        if let Some(last) = self.current.last_mut()
            && last.style == style
        {
            last.content.to_mut().push_str(s);
            return;
        }
        self.current.push(Span::styled(s.to_string(), style));
    }

    fn apply(&mut self, token: Token, literal: &str) {
        match token {
            Token::Break => {
                let line = Line::from(std::mem::take(&mut self.current));
                self.lines.push(line);
            }
            Token::Open(m) => self.open.push(m),
            Token::Close(m) => match self.open.iter().rposition(|open| *open == m) {
                Some(idx) => {
                    self.open.remove(idx);
                }
                None => self.push_str(literal),
            },
        }
    }

    fn finish(mut self) -> Text<'static> {
        let line = Line::from(std::mem::take(&mut self.current));
        self.lines.push(line);
        Text::from(self.lines)
    }
}

/// Concatenated content of a line, without styling.
pub fn plain(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

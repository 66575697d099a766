//! # Answer Formatter
//!
//! Turns raw answer text from the backend into the small markup subset the
//! transcript understands:
//!
//! | Raw            | Markup                  |
//! |----------------|-------------------------|
//! | `\n`           | `<br>`                  |
//! | `**text**`     | `<strong>text</strong>` |
//! | `*text*`       | `<em>text</em>`         |
//! | `- ` line lead | `• `                    |
//!
//! Rules run in that order, each one over the output of the previous one.
//! Nothing else is escaped: answer text comes from our own backend and is
//! passed through as-is. The terminal renderer (`tui::markup`) shows any tag
//! it doesn't know literally.

use std::sync::LazyLock;

use regex::Regex;

pub const LINE_BREAK: &str = "<br>";
pub const BULLET: &str = "•";

static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*(.*?)\*\*").expect("BOLD_RE is a valid static regex pattern")
});

static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*(.+?)\*").expect("ITALIC_RE is a valid static regex pattern")
});

/// Format raw answer text into transcript markup.
///
/// An empty bold pair (`****`) becomes an empty `<strong></strong>` so its
/// asterisks can't feed the italic rule. Italic needs at least one character,
/// so a lone `**` stays literal, as does any marker without a closing partner.
pub fn format(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let formatted = raw.replace('\n', LINE_BREAK);
    let formatted = BOLD_RE.replace_all(&formatted, "<strong>${1}</strong>");
    // Bold has already consumed its `**` pairs, so only single markers remain.
    let formatted = ITALIC_RE.replace_all(&formatted, "<em>${1}</em>");
    bullet_lines(&formatted)
}

/// Replace a leading `- ` with a bullet on every line of already-broken text.
fn bullet_lines(text: &str) -> String {
    text.split(LINE_BREAK)
        .map(|line| match line.strip_prefix("- ") {
            Some(rest) if !rest.is_empty() => format!("{BULLET} {rest}"),
            _ => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join(LINE_BREAK)
}

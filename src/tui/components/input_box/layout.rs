//! Wrapping and cursor geometry for the input box.
//!
//! Everything here is pure so the box can size itself before rendering and
//! place the terminal cursor on the same wrapped layout it draws.

use unicode_width::UnicodeWidthStr;

/// Border (2) + padding (2) consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Content lines shown before the box starts scrolling internally
pub(super) const MAX_VISIBLE_LINES: u16 = 5;
/// Left border + left padding
pub(super) const TEXT_INSET_X: u16 = 2;
/// Top border
pub(super) const TEXT_INSET_Y: u16 = 1;

pub(super) fn inner_width(outer_width: u16) -> u16 {
    outer_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

fn wrap_options(width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(width.max(1) as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Wrap `text` into display rows. Every logical line yields at least one
/// row, so a trailing newline shows up as an empty last row.
pub(super) fn wrap_rows(text: &str, width: u16) -> Vec<String> {
    let options = wrap_options(width);
    text.split('\n')
        .flat_map(|line| {
            let rows = textwrap::wrap(line, &options);
            if rows.is_empty() {
                vec![String::new()]
            } else {
                rows.into_iter().map(|row| row.into_owned()).collect()
            }
        })
        .collect()
}

pub(super) fn row_count(text: &str, width: u16) -> u16 {
    wrap_rows(text, width).len().max(1) as u16
}

/// Row and column of the insertion point, `before` being the buffer text up
/// to the cursor.
pub(super) fn cursor_row_col(before: &str, width: u16) -> (u16, u16) {
    let (earlier, current) = match before.rfind('\n') {
        Some(i) => (&before[..i], &before[i + 1..]),
        None => ("", before),
    };

    let rows_above = if before.contains('\n') {
        row_count(earlier, width)
    } else {
        0
    };

    let segments = textwrap::wrap(current, wrap_options(width));
    let last = segments.len().saturating_sub(1);
    // Wrapping drops the spaces at break points, so measure the tail
    // rather than the last segment.
    let consumed: usize = segments.iter().take(last).map(|s| s.width()).sum();
    let col = current.width().saturating_sub(consumed) as u16;

    (rows_above + last as u16, col.min(width))
}

pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(text.len())
}

//! Sanitized markup → ratatui `Text` renderer.
//!
//! Reads what `core::sanitize` writes: `<br>` and raw newlines start a new
//! line, and entities are decoded back to the characters they stand for.
//! Nothing else is interpreted, so text the user typed to look like markup
//! comes out exactly as typed.

use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};

use crate::core::sanitize::{LINE_BREAK, unescape};

/// Splits markup into display lines, already unescaped.
pub fn lines(markup: &str) -> Vec<String> {
    markup
        .split(LINE_BREAK)
        .flat_map(|chunk| chunk.split('\n'))
        .map(unescape)
        .collect()
}

/// Renders markup as owned, uniformly styled `Text`.
pub fn render(markup: &str, style: Style) -> Text<'static> {
    let lines: Vec<Line<'static>> = lines(markup)
        .into_iter()
        .map(|line| Line::from(Span::styled(line, style)))
        .collect();
    Text::from(lines)
}

/// Reads the plain text back out of rendered `Text`, one `\n` per line.
pub fn plain_text(text: &Text<'_>) -> String {
    text.lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

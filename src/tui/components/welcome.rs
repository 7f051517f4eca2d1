//! # Welcome Panel Component
//!
//! The permanent first entry of the transcript: a greeting followed by a
//! numbered list of suggested questions.
//!
//! Suggestions are clickable. The panel's row layout is computed up front
//! ([`WelcomeLayout`]) so the parent can hit-test a click against the same
//! rows the panel is drawn on.

use std::ops::Range;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::transcript::Welcome;
use crate::tui::component::Component;

const CONTENT_PAD_H: u16 = 1;
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Top border row; content starts below it.
const TOP_OFFSET: u16 = 1;
const SUGGESTIONS_HEADING: &str = "Suggested questions:";

/// Row layout of the panel, relative to its top edge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WelcomeLayout {
    pub height: u16,
    pub greeting: Range<u16>,
    pub heading: Option<u16>,
    /// One row range per suggestion, in order.
    pub suggestions: Vec<Range<u16>>,
}

impl WelcomeLayout {
    pub fn compute(welcome: &Welcome, width: u16) -> Self {
        let inner = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if inner == 0 {
            return Self {
                height: 1,
                ..Default::default()
            };
        }

        let options = textwrap::Options::new(inner as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);
        let rows = |text: &str| -> u16 {
            text.split('\n')
                .map(|line| textwrap::wrap(line, &options).len().max(1) as u16)
                .sum()
        };

        let mut y = TOP_OFFSET;
        let greeting = y..y + rows(&welcome.text);
        y = greeting.end;

        let mut heading = None;
        let mut suggestions = Vec::with_capacity(welcome.suggestions.len());
        if !welcome.suggestions.is_empty() {
            // Blank spacer row, then the heading
            y += 1;
            heading = Some(y);
            y += 1;
            for (i, suggestion) in welcome.suggestions.iter().enumerate() {
                let span = y..y + rows(&suggestion_line(i, suggestion));
                y = span.end;
                suggestions.push(span);
            }
        }

        Self {
            height: y + 1, // bottom border
            greeting,
            heading,
            suggestions,
        }
    }

    /// Which suggestion (if any) occupies `row` (relative to the panel top).
    pub fn suggestion_at(&self, row: u16) -> Option<usize> {
        self.suggestions.iter().position(|span| span.contains(&row))
    }
}

fn suggestion_line(index: usize, text: &str) -> String {
    format!("{}. {}", index + 1, text)
}

/// Stateless welcome panel.
pub struct WelcomePanel<'a> {
    pub welcome: &'a Welcome,
    /// Suggestion currently highlighted via Tab, if any.
    pub highlighted: Option<usize>,
}

impl<'a> WelcomePanel<'a> {
    pub fn new(welcome: &'a Welcome, highlighted: Option<usize>) -> Self {
        Self {
            welcome,
            highlighted,
        }
    }
}

impl<'a> Widget for WelcomePanel<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let layout = WelcomeLayout::compute(self.welcome, area.width);
        let accent = Style::default().fg(Color::Yellow);

        let block = Block::bordered()
            .title("welcome")
            .border_type(BorderType::Rounded)
            .border_style(accent.add_modifier(Modifier::DIM))
            .title_style(accent)
            .padding(Padding::horizontal(CONTENT_PAD_H));
        let inner = block.inner(area);
        block.render(area, buf);

        // Each piece gets exactly the rows the layout gave it
        let row_rect = |rows: &Range<u16>| -> Rect {
            let top = area.y + rows.start;
            let bottom = (area.y + rows.end).min(inner.bottom());
            Rect::new(inner.x, top, inner.width, bottom.saturating_sub(top))
        };

        Paragraph::new(self.welcome.text.as_str())
            .style(accent)
            .wrap(Wrap { trim: true })
            .render(row_rect(&layout.greeting), buf);

        if let Some(heading) = layout.heading {
            Paragraph::new(SUGGESTIONS_HEADING)
                .style(Style::default().fg(Color::DarkGray))
                .render(row_rect(&(heading..heading + 1)), buf);
        }

        for (i, (suggestion, rows)) in self
            .welcome
            .suggestions
            .iter()
            .zip(&layout.suggestions)
            .enumerate()
        {
            let style = if self.highlighted == Some(i) {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED)
            };
            Paragraph::new(suggestion_line(i, suggestion))
                .style(style)
                .wrap(Wrap { trim: true })
                .render(row_rect(rows), buf);
        }
    }
}

impl<'a> Component for WelcomePanel<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(
            WelcomePanel {
                welcome: self.welcome,
                highlighted: self.highlighted,
            },
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn welcome(suggestions: &[&str]) -> Welcome {
        Welcome::new(
            "Hi there",
            suggestions.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_layout_rows() {
        let layout = WelcomeLayout::compute(&welcome(&["One?", "Two?"]), 40);
        // border, greeting, spacer, heading, 2 suggestions, border
        assert_eq!(layout.greeting, 1..2);
        assert_eq!(layout.heading, Some(3));
        assert_eq!(layout.suggestions, vec![4..5, 5..6]);
        assert_eq!(layout.height, 7);
    }

    #[test]
    fn test_layout_without_suggestions() {
        let layout = WelcomeLayout::compute(&welcome(&[]), 40);
        assert_eq!(layout.heading, None);
        assert!(layout.suggestions.is_empty());
        assert_eq!(layout.height, 3);
    }

    #[test]
    fn test_layout_wrapped_suggestion_spans_rows() {
        // inner width 10: "2. a long question" wraps over two rows
        let layout = WelcomeLayout::compute(&welcome(&["short", "a long question"]), 14);
        let second = &layout.suggestions[1];
        assert_eq!(second.end - second.start, 2);
        assert_eq!(layout.suggestion_at(second.start + 1), Some(1));
    }

    #[test]
    fn test_suggestion_at_misses_other_rows() {
        let layout = WelcomeLayout::compute(&welcome(&["One?"]), 40);
        assert_eq!(layout.suggestion_at(0), None);
        assert_eq!(layout.suggestion_at(layout.greeting.start), None);
        assert_eq!(layout.suggestion_at(layout.suggestions[0].start), Some(0));
    }

    #[test]
    fn test_render_lists_suggestions() {
        let w = welcome(&["How long is it?", "Where do I submit?"]);
        let height = WelcomeLayout::compute(&w, 50).height;
        let mut terminal = Terminal::new(TestBackend::new(50, height)).unwrap();
        terminal
            .draw(|f| f.render_widget(WelcomePanel::new(&w, Some(1)), f.area()))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Hi there"));
        assert!(text.contains("1. How long is it?"));
        assert!(text.contains("2. Where do I submit?"));
    }
}

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::transcript::{Message, Sender};
use crate::tui::component::Component;
use crate::tui::markup;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders one transcript message as a bubble.
///
/// `MessageView` is a **transient component**: it's created fresh each frame
/// with the data it needs to render and holds no mutable state.
///
/// User bubbles are green and titled on the right, bot bubbles blue and
/// titled on the left. The timestamp sits in the bottom border.
///
/// The body goes through `render_markup()` and back through
/// [`markup::render`], so what's on screen is always the sanitized form.
///
/// [`calculate_height`](Self::calculate_height) predicts rendered height with
/// `textwrap` options that match ratatui's `Paragraph` wrapping, so the parent
/// list can lay out the scroll view without rendering first.
#[derive(Clone, Copy)]
pub struct MessageView<'a> {
    pub message: &'a Message,
}

impl<'a> MessageView<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self { message }
    }

    /// Calculate the height required for this message given a width.
    pub fn calculate_height(message: &Message, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding
            return 1;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let content_lines: usize = markup::lines(&message.render_markup())
            .iter()
            .map(|line| textwrap::wrap(line, &options).len().max(1))
            .sum();

        (content_lines as u16).max(1) + VERTICAL_OVERHEAD
    }
}

pub(crate) fn sender_label(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "you",
        Sender::Bot => "bot",
    }
}

pub(crate) fn sender_style(sender: Sender) -> Style {
    match sender {
        Sender::User => Style::default().fg(Color::Green),
        Sender::Bot => Style::default().fg(Color::Blue),
    }
}

impl<'a> Widget for MessageView<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let sender = self.message.sender();
        let style = sender_style(sender);
        let border_style = style.add_modifier(Modifier::DIM);

        let alignment = match sender {
            Sender::User => Alignment::Right,
            Sender::Bot => Alignment::Left,
        };

        let block = Block::bordered()
            .title(sender_label(sender))
            .title_alignment(alignment)
            .title_bottom(self.message.timestamp())
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        let text = markup::render(&self.message.render_markup(), style);
        Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

impl<'a> Component for MessageView<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};

use crate::core::transcript::Sender;
use crate::tui::components::message::{sender_label, sender_style};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Fixed height: one content row plus borders.
pub const TYPING_HEIGHT: u16 = 3;

/// Bot-styled bubble shown while a reply is outstanding.
pub struct TypingIndicator {
    pub spinner_frame: usize,
}

impl TypingIndicator {
    pub fn new(spinner_frame: usize) -> Self {
        Self { spinner_frame }
    }

    fn glyph(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
    }
}

impl Widget for TypingIndicator {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = sender_style(Sender::Bot);
        let dim = style.add_modifier(Modifier::DIM);
        let block = Block::bordered()
            .title(sender_label(Sender::Bot))
            .border_type(BorderType::Rounded)
            .border_style(dim)
            .title_style(dim)
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        block.render(area, buf);

        let line = Line::from(vec![
            Span::styled(self.glyph(), style),
            Span::styled(" typing", Style::default().add_modifier(Modifier::ITALIC)),
        ]);
        Paragraph::new(line).render(inner, buf);
    }
}

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{MessageList, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

const KEY_HINTS: &str =
    "Enter send · Shift+Enter newline · Tab suggestions · F1 welcome · Ctrl+L clear · Esc quit";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    tui.input_box.busy = app.is_busy();
    let input_height = tui.input_box.calculate_height(frame.area().width);
    let layout = Layout::vertical([Length(1), Min(0), Length(input_height), Length(1)]);
    let [title_area, main_area, input_area, hint_area] = layout.areas(frame.area());

    MessageList::new(
        &mut tui.message_list,
        &app.transcript,
        app.is_busy(),
        tui.selected_suggestion,
        spinner_frame,
    )
    .render(frame, main_area);

    TitleBar::new(
        app.endpoint.clone(),
        app.status_message.clone(),
        tui.message_list.has_unseen_content,
    )
    .render(frame, title_area);

    tui.input_box.render(frame, input_area);

    frame.render_widget(
        Span::styled(KEY_HINTS, Style::default().fg(Color::DarkGray)),
        hint_area,
    );
}

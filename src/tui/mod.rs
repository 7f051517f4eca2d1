//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Busy** (reply outstanding): draws every ~80ms so the typing spinner moves.
//! - **Idle**: sleeps up to 500ms and only redraws on events, resizes or
//!   replies arriving from the background task.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

mod component;
mod components;
mod event;
pub mod markup;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, reply_action, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, Ticket};
use crate::responder::Responder;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    /// Suggestion last copied into the input via Tab or click
    pub selected_suggestion: Option<usize>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
            selected_suggestion: None,
        }
    }

    /// Highlight suggestion `index` and copy its text into the input box.
    fn pick_suggestion(&mut self, app: &App, index: usize) {
        if let Some(text) = app.transcript.welcome().suggestions.get(index) {
            self.selected_suggestion = Some(index);
            self.input_box.set_text(text.clone());
        }
    }

    /// Step through suggestions with Tab / Shift+Tab, wrapping at either end.
    fn cycle_suggestion(&mut self, app: &App, forward: bool) {
        let welcome = app.transcript.welcome();
        let count = welcome.suggestions.len();
        if !welcome.visible || count == 0 {
            return;
        }
        let next = match (self.selected_suggestion, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
        };
        self.pick_suggestion(app, next);
    }
}

/// What the event loop must do after one `TuiEvent`.
#[derive(Debug, Clone, PartialEq)]
enum Dispatch {
    Continue,
    Quit,
    Spawn { ticket: Ticket, message: String },
}

fn dispatch(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Dispatch {
    match event {
        TuiEvent::Resize => Dispatch::Continue,
        TuiEvent::Quit => match update(app, Action::Quit) {
            Effect::Quit => Dispatch::Quit,
            _ => Dispatch::Continue,
        },
        TuiEvent::ClearChat => {
            update(app, Action::Clear);
            tui.message_list.reset();
            tui.selected_suggestion = None;
            Dispatch::Continue
        }
        TuiEvent::ToggleWelcome => {
            update(app, Action::ToggleWelcome);
            Dispatch::Continue
        }
        TuiEvent::NextSuggestion => {
            tui.cycle_suggestion(app, true);
            Dispatch::Continue
        }
        TuiEvent::PrevSuggestion => {
            tui.cycle_suggestion(app, false);
            Dispatch::Continue
        }
        TuiEvent::MouseClick(column, row) => {
            if let Some(index) = tui.message_list.suggestion_at(column, row) {
                debug!("Suggestion {} clicked", index);
                tui.pick_suggestion(app, index);
            }
            Dispatch::Continue
        }
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.message_list.handle_event(&event);
            Dispatch::Continue
        }
        _ => match tui.input_box.handle_event(&event) {
            Some(InputEvent::Submit(text)) => match update(app, Action::Submit(text)) {
                Effect::SpawnRequest { ticket, message } => {
                    // Only an accepted submission empties the input
                    tui.input_box.clear();
                    tui.selected_suggestion = None;
                    Dispatch::Spawn { ticket, message }
                }
                Effect::Quit => Dispatch::Quit,
                Effect::None => Dispatch::Continue,
            },
            Some(InputEvent::ContentChanged) | None => Dispatch::Continue,
        },
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets Shift+Enter through; terminals without
        // it ignore the request
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

pub fn run(responder: Arc<dyn Responder>, config: &ResolvedConfig) -> std::io::Result<()> {
    info!("Starting chat UI against {} ({})", config.endpoint, responder.name());
    let mut app = App::from_config(responder, config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Replies from background tasks
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true;

    'event_loop: loop {
        let animating = app.is_busy();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Drain every pending event before the next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match dispatch(&mut app, &mut tui, event) {
                Dispatch::Continue => {}
                Dispatch::Quit => break 'event_loop,
                Dispatch::Spawn { ticket, message } => {
                    spawn_request(app.responder.clone(), ticket, message, tx.clone());
                }
            }
        }

        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if update(&mut app, action) == Effect::Quit {
                break 'event_loop;
            }
        }
    }

    ratatui::restore();
    info!("Chat UI closed");
    Ok(())
}

/// Runs one send cycle in the background and posts its outcome back to the
/// event loop. Exactly one action is sent per ticket.
fn spawn_request(
    responder: Arc<dyn Responder>,
    ticket: Ticket,
    message: String,
    tx: mpsc::Sender<Action>,
) -> tokio::task::JoinHandle<()> {
    info!("Spawning request for ticket {} via {}", ticket, responder.name());
    tokio::spawn(async move {
        let result = responder.send(&message).await;
        if tx.send(reply_action(ticket, result)).is_err() {
            warn!("Failed to deliver reply for ticket {}: receiver dropped", ticket);
        }
    })
}

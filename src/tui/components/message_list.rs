//! # MessageList Component
//!
//! Scrollable view of the transcript: the welcome panel (when visible), every
//! message in order, and a typing indicator while a reply is outstanding.
//!
//! ## Responsibilities
//!
//! - Lay out and draw the transcript entries
//! - Keep the newest entry in view when the transcript changes
//! - Cache message heights (messages never change once appended)
//! - Hit-test clicks against the welcome panel's suggestions
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the transcript (props).
//! `Component::render` takes `&mut self`, so the layout cache and scroll
//! state are updated during the render pass, like ratatui's `StatefulWidget`.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::transcript::Transcript;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::MessageView;
use crate::tui::components::typing::{TYPING_HEIGHT, TypingIndicator};
use crate::tui::components::welcome::{WelcomeLayout, WelcomePanel};
use crate::tui::event::TuiEvent;

/// One drawable row group in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    Welcome,
    Message(usize),
    Typing,
}

fn entries(transcript: &Transcript, is_busy: bool) -> Vec<Entry> {
    let mut entries = Vec::with_capacity(transcript.len() + 2);
    if transcript.welcome().visible {
        entries.push(Entry::Welcome);
    }
    entries.extend((0..transcript.len()).map(Entry::Message));
    if is_busy {
        entries.push(Entry::Typing);
    }
    entries
}

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Content exists below the viewport (drives the "↓ New" marker)
    pub has_unseen_content: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Screen area of the last render, for hit testing
    pub area: Rect,
    /// Welcome layout of the last render; `None` while hidden
    pub welcome_layout: Option<WelcomeLayout>,
    last_revision: Option<u64>,
    was_busy: bool,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true,
            has_unseen_content: false,
            viewport_height: 0,
            area: Rect::default(),
            welcome_layout: None,
            last_revision: None,
            was_busy: false,
        }
    }

    /// Drop cached heights and return to the top. Called when the
    /// transcript is cleared.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn total_height(&self) -> u16 {
        self.layout.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.total_height().saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Clamp scroll and re-engage auto-scroll if the user has reached the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.total_height().saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Map a screen position to the suggestion drawn there, if any.
    pub fn suggestion_at(&self, column: u16, row: u16) -> Option<usize> {
        let layout = self.welcome_layout.as_ref()?;
        if !self.area.contains(Position { x: column, y: row }) {
            return None;
        }
        // Welcome is always the first entry, at content row 0
        let content_row = (row - self.area.y).saturating_add(self.scroll_state.offset().y);
        if content_row >= layout.height {
            return None;
        }
        layout.suggestion_at(content_row)
    }

    /// Any transcript mutation or busy flip pulls the view to the newest entry.
    fn follow_changes(&mut self, revision: u64, is_busy: bool) {
        if self.last_revision != Some(revision) || self.was_busy != is_busy {
            self.stick_to_bottom = true;
        }
        self.last_revision = Some(revision);
        self.was_busy = is_busy;
    }
}

/// Scrollable transcript view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub transcript: &'a Transcript,
    pub is_busy: bool,
    /// Suggestion highlighted in the welcome panel
    pub highlighted: Option<usize>,
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        transcript: &'a Transcript,
        is_busy: bool,
        highlighted: Option<usize>,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            transcript,
            is_busy,
            highlighted,
            spinner_frame,
        }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar safe area
        let messages = self.transcript.messages();
        let entries = entries(self.transcript, self.is_busy);

        self.state.follow_changes(self.transcript.revision(), self.is_busy);
        self.state.area = area;

        // 1. Update message height cache
        let layout = &mut self.state.layout;
        let reusable = layout.reusable_count(messages.len(), content_width);
        layout.message_heights.truncate(reusable);
        for message in messages.iter().skip(layout.message_heights.len()) {
            layout
                .message_heights
                .push(MessageView::calculate_height(message, content_width));
        }
        layout.update_metadata(messages.len(), content_width);

        // 2. Per-entry heights (welcome and typing are cheap to recompute)
        self.state.welcome_layout = self
            .transcript
            .welcome()
            .visible
            .then(|| WelcomeLayout::compute(self.transcript.welcome(), content_width));
        let heights: Vec<u16> = entries
            .iter()
            .map(|entry| match entry {
                Entry::Welcome => self
                    .state
                    .welcome_layout
                    .as_ref()
                    .map_or(0, |layout| layout.height),
                Entry::Message(i) => self.state.layout.message_heights[*i],
                Entry::Typing => TYPING_HEIGHT,
            })
            .collect();
        self.state.layout.rebuild_prefix_heights(&heights);
        let total_height = self.state.total_height();

        self.state.viewport_height = area.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = self.state.layout.visible_range(scroll_offset, area.height);

        // 3. Render visible entries into a ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = if visible_range.start > 0 {
            self.state.layout.prefix_heights[visible_range.start - 1]
        } else {
            0
        };

        for i in visible_range {
            let height = heights[i];
            let rect = Rect::new(0, y_offset, content_width, height);
            match entries[i] {
                Entry::Welcome => scroll_view.render_widget(
                    WelcomePanel::new(self.transcript.welcome(), self.highlighted),
                    rect,
                ),
                Entry::Message(m) => scroll_view.render_widget(MessageView::new(&messages[m]), rect),
                Entry::Typing => {
                    scroll_view.render_widget(TypingIndicator::new(self.spinner_frame), rect)
                }
            }
            y_offset += height;
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);

        // 4. Unseen content indicator
        let current_offset = self.state.scroll_state.offset().y;
        self.state.has_unseen_content = !self.state.stick_to_bottom
            && current_offset < total_height.saturating_sub(area.height);
    }
}

impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Cached layout measurements
pub struct LayoutCache {
    /// Height per transcript message, valid for `content_width`
    pub message_heights: Vec<u16>,
    /// Running bottom edge of every entry (welcome, messages, typing)
    pub prefix_heights: Vec<u16>,
    message_count: usize,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            message_heights: Vec::new(),
            prefix_heights: Vec::new(),
            message_count: 0,
            content_width: 0,
        }
    }

    /// How many cached message heights are still valid.
    pub fn reusable_count(&self, message_count: usize, content_width: u16) -> usize {
        if self.content_width != content_width {
            return 0;
        }
        // Fewer messages than cached means the transcript was cleared
        if message_count < self.message_count {
            return 0;
        }
        self.message_heights.len().min(message_count)
    }

    pub fn update_metadata(&mut self, message_count: usize, content_width: u16) {
        self.message_count = message_count;
        self.content_width = content_width;
    }

    pub fn rebuild_prefix_heights(&mut self, heights: &[u16]) {
        self.prefix_heights = heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}

//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Created fresh each frame from the data they draw:
//! - `TitleBar`: endpoint, status line and the "↓ New" marker
//! - `MessageView`: one transcript message as a bubble
//! - `WelcomePanel`: greeting plus clickable suggestions
//! - `TypingIndicator`: spinner bubble while a reply is outstanding
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep state across frames and handle `TuiEvent`s:
//! - `InputBox`: question entry with cursor and internal scrolling
//! - `MessageList`: scrollable transcript with a height cache
//!
//! Components receive external data as props rather than reaching into
//! `App`, which keeps each one testable against a `TestBackend`.
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs
//! ├── message.rs
//! ├── welcome.rs
//! ├── typing.rs
//! ├── message_list.rs
//! └── input_box/
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod input_box;
pub mod message;
pub mod message_list;
pub mod typing;
pub mod welcome;

pub use input_box::{InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};

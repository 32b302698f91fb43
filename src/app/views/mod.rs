//! # Views Module
//!
//! Screen composition and the renderer that writes it to the terminal.

pub mod ansi_escape_codes;
pub mod layout;
pub mod terminal_renderer;

pub use layout::{compose_screen, LineStyle, PaneGeometry, Screen, ScreenLine};
pub use terminal_renderer::{TerminalRenderer, ViewRenderer};

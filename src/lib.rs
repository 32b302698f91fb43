//! # postline - Terminal Client for Users, Posts and Comments
//!
//! Pick a user, browse their posts, read a post's comments, and add or
//! remove comments against a JSON REST backend.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    Events    ┌──────────────┐   Completions  ┌────────────┐
//! │    View     │◄─────────────│  ViewModel   │◄───────────────│ ApiService │
//! │             │              │              │                │            │
//! │ - Layout    │              │ - Selection  │   Requests     │ - Backend  │
//! │ - Renderer  │              │ - Sessions   │───────────────►│ - tokio    │
//! └─────────────┘              └──────────────┘                └────────────┘
//!                                      ▲
//!                                      │ Commands
//!                                      ▼
//!                               ┌──────────────┐
//!                               │  Controller  │
//!                               │              │
//!                               │ - Input      │
//!                               │   Mapping    │
//!                               │ - Event Loop │
//!                               └──────────────┘
//! ```
//!
//! Every request carries a [`RequestTag`]; completions for a selection that
//! is no longer current are dropped instead of applied.

pub mod app;
pub mod cmd_args;
pub mod config;
pub mod logging;

// Re-export main types for easy access
pub use app::*;

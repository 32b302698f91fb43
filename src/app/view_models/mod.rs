//! # ViewModel Module
//!
//! Presentation state split by responsibility:
//! - `core`: the ViewModel coordinator and completion routing
//! - `navigation`: cursors, focus and row activation
//! - `selection`: the active user and post
//! - `posts`: users and posts fetch state
//! - `comments`: the comment session of the open post

mod comments;
mod core;
mod navigation;
mod posts;
mod selection;

pub use self::core::{ListCursors, ViewModel};
pub use comments::{CommentSession, CommentsState, RemovalState, COMMENTS_ERROR_MESSAGE};
pub use posts::{ListPhase, PostsState, UsersState, LIST_ERROR_MESSAGE};
pub use selection::{Selection, SelectionChange};

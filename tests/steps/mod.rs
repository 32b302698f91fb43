//! Step definitions for Cucumber tests
//!
//! - `browsing` - backend setup, startup, user and post selection, screen checks
//! - `comments` - comment list, form input and comment mutations

pub mod browsing;
pub mod comments;

//! # Events Module
//!
//! Re-exports all event system components organized by category.

pub mod api_events;
pub mod types;
pub mod view_events;

pub use api_events::{ApiCompletion, ApiRequest};
pub use types::{Flow, Focus, RequestTag};
pub use view_events::{Pane, ViewEvent};

//! # Core Event Types
//!
//! Request tags used to match asynchronous completions against the selection
//! they were issued for, and the focus regions of the screen.

use crate::app::models::EntityId;

/// Logical flow a request belongs to. Loading and error state is scoped per flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flow {
    Users,
    Posts,
    Comments,
    CommentMutation,
}

/// Identifies the selection an asynchronous request was issued for
///
/// `target` is the selected entity (user for posts, post for comments) and
/// `generation` the selection counter at issue time. A completion whose tag
/// differs from the current one is stale and must be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTag {
    pub flow: Flow,
    pub target: Option<EntityId>,
    pub generation: u64,
}

impl RequestTag {
    pub fn new(flow: Flow, target: Option<EntityId>, generation: u64) -> Self {
        Self {
            flow,
            target,
            generation,
        }
    }

    /// Whether this tag was issued for `target` during `generation`, whatever the flow
    pub fn matches(&self, target: Option<EntityId>, generation: u64) -> bool {
        self.target == target && self.generation == generation
    }
}

/// Focusable region of the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Users,
    Posts,
    Comments,
    Form,
}

impl Focus {
    /// Next list region in Tab order. The form is entered explicitly, never by Tab.
    pub fn next(self) -> Self {
        match self {
            Focus::Users => Focus::Posts,
            Focus::Posts => Focus::Comments,
            Focus::Comments | Focus::Form => Focus::Users,
        }
    }

    /// Previous list region in Tab order
    pub fn previous(self) -> Self {
        match self {
            Focus::Users => Focus::Comments,
            Focus::Posts => Focus::Users,
            Focus::Comments | Focus::Form => Focus::Posts,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Focus::Users => "USERS",
            Focus::Posts => "POSTS",
            Focus::Comments => "COMMENTS",
            Focus::Form => "FORM",
        }
    }
}

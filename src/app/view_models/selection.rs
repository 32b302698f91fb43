//! # Selection State
//!
//! Which user and which post are active. Selecting a user always clears the
//! post, so a selected post belongs to the selected user's posts.

use crate::app::models::EntityId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    user_id: Option<EntityId>,
    post_id: Option<EntityId>,
}

/// What a selection operation changed; drives the dependent resets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionChange {
    pub user_changed: bool,
    pub post_changed: bool,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_id(&self) -> Option<EntityId> {
        self.user_id
    }

    pub fn post_id(&self) -> Option<EntityId> {
        self.post_id
    }

    pub fn is_post_selected(&self, post_id: EntityId) -> bool {
        self.post_id == Some(post_id)
    }

    /// Make `user_id` the active user and clear the post selection
    pub fn select_user(&mut self, user_id: EntityId) -> SelectionChange {
        let change = SelectionChange {
            user_changed: self.user_id != Some(user_id),
            post_changed: self.post_id.is_some(),
        };
        self.user_id = Some(user_id);
        self.post_id = None;
        change
    }

    /// Open `post_id`, or close it when it is already open
    pub fn toggle_post(&mut self, post_id: EntityId) -> SelectionChange {
        self.post_id = if self.post_id == Some(post_id) {
            None
        } else {
            Some(post_id)
        };
        SelectionChange {
            user_changed: false,
            post_changed: true,
        }
    }
}

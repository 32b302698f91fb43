//! # Cursor and Focus Management
//!
//! List cursors, Tab focus cycling and the "activate the row under the
//! cursor" operations that the key commands map to.

use super::core::ViewModel;
use crate::app::events::{ApiRequest, Focus, Pane, ViewEvent};
use crate::app::models::EntityId;

impl ViewModel {
    /// Move the cursor of the focused list by `delta` rows, clamped to the list
    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.focused_list_len();
        let cursor = match self.focus {
            Focus::Users => &mut self.cursors.user,
            Focus::Posts => &mut self.cursors.post,
            Focus::Comments => &mut self.cursors.comment,
            Focus::Form => return,
        };

        let moved = clamp_index(cursor.saturating_add_signed(delta), len);
        if moved != *cursor {
            *cursor = moved;
            let pane = if self.focus == Focus::Users || self.focus == Focus::Posts {
                Pane::Left
            } else {
                Pane::Right
            };
            self.emit_view_event(ViewEvent::PaneRedrawRequired { pane });
        }
    }

    /// Tab / Shift-Tab through the list regions
    ///
    /// The comments region is skipped while no post is open. Leaving the form
    /// with Tab keeps it open; the draft survives until Esc or a post change.
    pub fn cycle_focus(&mut self, forward: bool) {
        let step = |focus: Focus| if forward { focus.next() } else { focus.previous() };

        let mut focus = step(self.focus);
        if focus == Focus::Comments && self.selection.post_id().is_none() {
            focus = step(focus);
        }

        if focus != self.focus {
            tracing::debug!("Focus {:?} -> {:?}", self.focus, focus);
            self.focus = focus;
            self.emit_view_event(ViewEvent::FullRedrawRequired);
        }
    }

    /// Enter on the focused row: select a user or toggle a post
    pub fn activate(&mut self) -> Vec<ApiRequest> {
        match self.focus {
            Focus::Users => match self.users.users().get(self.cursors.user) {
                Some(user) => {
                    let user_id = user.id;
                    self.select_user(user_id)
                }
                None => Vec::new(),
            },
            Focus::Posts => match self.posts.posts().get(self.cursors.post) {
                Some(post) => {
                    let post_id = post.id;
                    self.toggle_post(post_id)
                }
                None => Vec::new(),
            },
            Focus::Comments => Vec::new(),
            Focus::Form => self.submit_comment(),
        }
    }

    /// Delete the comment under the cursor
    pub fn delete_at_cursor(&mut self) -> Vec<ApiRequest> {
        if self.focus != Focus::Comments {
            return Vec::new();
        }
        match self.comments.comments().get(self.cursors.comment) {
            Some(comment) => {
                let comment_id = comment.id;
                self.delete_comment(comment_id)
            }
            None => Vec::new(),
        }
    }

    /// Comment id under the cursor, when the comments region is focused
    pub fn comment_at_cursor(&self) -> Option<EntityId> {
        if self.focus != Focus::Comments {
            return None;
        }
        self.comments
            .comments()
            .get(self.cursors.comment)
            .map(|comment| comment.id)
    }

    fn focused_list_len(&self) -> usize {
        match self.focus {
            Focus::Users => self.users.users().len(),
            Focus::Posts => self.posts.posts().len(),
            Focus::Comments => self.comments.comments().len(),
            Focus::Form => 0,
        }
    }

    /// Keep every cursor inside its list after the lists changed
    pub(super) fn clamp_cursors(&mut self) {
        self.cursors.user = clamp_index(self.cursors.user, self.users.users().len());
        self.cursors.post = clamp_index(self.cursors.post, self.posts.posts().len());
        self.cursors.comment = clamp_index(self.cursors.comment, self.comments.comments().len());
    }

    /// Move focus off regions that no longer exist
    pub(super) fn normalize_focus(&mut self) {
        let focus = match self.focus {
            Focus::Form if self.comments.form().is_none() => {
                if self.selection.post_id().is_some() {
                    Focus::Comments
                } else {
                    Focus::Posts
                }
            }
            Focus::Comments if self.selection.post_id().is_none() => Focus::Posts,
            focus => focus,
        };
        self.focus = focus;
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

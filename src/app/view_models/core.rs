//! # Core ViewModel Structure
//!
//! The central coordinator: owns selection, list fetch state and the comment
//! session, turns user intents into tagged [`ApiRequest`]s and folds
//! [`ApiCompletion`]s back into state.

use super::comments::CommentSession;
use super::posts::{PostsState, UsersState};
use super::selection::Selection;
use crate::app::events::{ApiCompletion, ApiRequest, Focus, Pane, ViewEvent};
use crate::app::models::{EntityId, FormField, Post, User};
use std::time::Instant;

/// Cursor rows of the three lists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListCursors {
    pub user: usize,
    pub post: usize,
    pub comment: usize,
}

#[derive(Debug)]
pub struct ViewModel {
    pub(super) users: UsersState,
    pub(super) posts: PostsState,
    pub(super) selection: Selection,
    pub(super) comments: CommentSession,
    pub(super) focus: Focus,
    pub(super) cursors: ListCursors,
    terminal_size: (u16, u16),
    base_url: String,
    pending_view_events: Vec<ViewEvent>,
}

impl ViewModel {
    pub fn new() -> Self {
        Self {
            users: UsersState::new(),
            posts: PostsState::new(),
            selection: Selection::new(),
            comments: CommentSession::new(),
            focus: Focus::Users,
            cursors: ListCursors::default(),
            terminal_size: (80, 24),
            base_url: String::new(),
            pending_view_events: Vec::new(),
        }
    }

    // === Lifecycle ===

    /// Fetch the users once, when the shell is mounted
    pub fn start(&mut self) -> Vec<ApiRequest> {
        self.emit_view_event(ViewEvent::FullRedrawRequired);
        vec![self.users.begin_load()]
    }

    /// Apply a completion from the dispatcher. Returns false for stale ones.
    pub fn apply_completion(&mut self, completion: ApiCompletion, now: Instant) -> bool {
        let applied = match completion {
            ApiCompletion::UsersLoaded { tag, result } => {
                let applied = self.users.apply(tag, result, now);
                self.clamp_cursors();
                if applied {
                    self.emit_view_event(ViewEvent::PaneRedrawRequired { pane: Pane::Left });
                }
                applied
            }
            ApiCompletion::PostsLoaded { tag, result } => {
                let applied = self.posts.apply(tag, result, now);
                self.clamp_cursors();
                if applied {
                    self.emit_view_event(ViewEvent::PaneRedrawRequired { pane: Pane::Left });
                }
                applied
            }
            ApiCompletion::CommentsLoaded { tag, result } => {
                let applied = self.comments.apply_loaded(tag, result);
                self.after_comments_changed(applied)
            }
            ApiCompletion::CommentCreated { tag, result } => {
                let applied = self.comments.apply_created(tag, result);
                self.after_comments_changed(applied)
            }
            ApiCompletion::CommentDeleted {
                tag,
                comment_id,
                result,
            } => {
                let applied = self.comments.apply_deleted(tag, comment_id, result, now);
                self.after_comments_changed(applied)
            }
        };

        if applied {
            self.emit_view_event(ViewEvent::StatusBarUpdateRequired);
        }
        applied
    }

    /// Advance banner and rollback timers
    pub fn tick(&mut self, now: Instant) -> bool {
        let left_changed = self.users.tick(now) | self.posts.tick(now);
        let right_changed = self.comments.tick(now);

        if left_changed {
            self.emit_view_event(ViewEvent::PaneRedrawRequired { pane: Pane::Left });
        }
        if right_changed {
            self.clamp_cursors();
            self.emit_view_event(ViewEvent::PaneRedrawRequired { pane: Pane::Right });
        }
        left_changed || right_changed
    }

    fn after_comments_changed(&mut self, applied: bool) -> bool {
        if applied {
            self.normalize_focus();
            self.clamp_cursors();
            self.emit_view_event(ViewEvent::PaneRedrawRequired { pane: Pane::Right });
        }
        applied
    }

    // === Selection ===

    /// Select a user; clears the post selection and its comments, then
    /// fetches the user's posts when the user actually changed
    pub fn select_user(&mut self, user_id: EntityId) -> Vec<ApiRequest> {
        let change = self.selection.select_user(user_id);
        let mut requests = Vec::new();

        if change.post_changed {
            requests.extend(self.comments.switch_post(None));
            self.cursors.comment = 0;
        }
        if change.user_changed {
            tracing::debug!("User {user_id} selected");
            requests.push(self.posts.begin_load(user_id));
            self.cursors.post = 0;
        }

        self.normalize_focus();
        self.emit_view_event(ViewEvent::FullRedrawRequired);
        requests
    }

    /// Open or close a post of the current list
    pub fn toggle_post(&mut self, post_id: EntityId) -> Vec<ApiRequest> {
        if self.posts.find(post_id).is_none() {
            tracing::warn!("Post {post_id} is not in the current list");
            return Vec::new();
        }

        self.selection.toggle_post(post_id);
        let requests: Vec<ApiRequest> = self
            .comments
            .switch_post(self.selection.post_id())
            .into_iter()
            .collect();
        self.cursors.comment = 0;

        self.normalize_focus();
        self.emit_view_event(ViewEvent::FullRedrawRequired);
        requests
    }

    // === Comments ===

    /// Open the form, or focus it again when it is already open
    pub fn open_comment_form(&mut self) -> bool {
        if self.comments.form().is_some() {
            self.focus = Focus::Form;
            self.emit_right_pane_update();
            return true;
        }
        if !self.comments.open_form() {
            return false;
        }
        self.focus = Focus::Form;
        self.emit_right_pane_update();
        true
    }

    pub fn close_comment_form(&mut self) -> bool {
        if !self.comments.close_form() {
            return false;
        }
        self.normalize_focus();
        self.emit_right_pane_update();
        true
    }

    pub fn insert_form_char(&mut self, ch: char) {
        if let Some(draft) = self.comments.form_mut() {
            draft.push_char(ch);
            self.emit_view_event(ViewEvent::PaneRedrawRequired { pane: Pane::Right });
        }
    }

    pub fn delete_form_char(&mut self) {
        if let Some(draft) = self.comments.form_mut() {
            draft.pop_char();
            self.emit_view_event(ViewEvent::PaneRedrawRequired { pane: Pane::Right });
        }
    }

    pub fn focus_next_form_field(&mut self) {
        if let Some(draft) = self.comments.form_mut() {
            draft.focus_next_field();
            self.emit_view_event(ViewEvent::PaneRedrawRequired { pane: Pane::Right });
        }
    }

    pub fn set_form_field(&mut self, field: FormField, value: &str) {
        if let Some(draft) = self.comments.form_mut() {
            draft.set_value(field, value);
            self.emit_view_event(ViewEvent::PaneRedrawRequired { pane: Pane::Right });
        }
    }

    pub fn clear_comment_form(&mut self) {
        if let Some(draft) = self.comments.form_mut() {
            draft.clear();
            self.emit_view_event(ViewEvent::PaneRedrawRequired { pane: Pane::Right });
        }
    }

    pub fn submit_comment(&mut self) -> Vec<ApiRequest> {
        let request = self.comments.submit();
        self.emit_view_event(ViewEvent::PaneRedrawRequired { pane: Pane::Right });
        request.into_iter().collect()
    }

    pub fn delete_comment(&mut self, comment_id: EntityId) -> Vec<ApiRequest> {
        let request = self.comments.delete(comment_id);
        if request.is_some() {
            self.clamp_cursors();
            self.emit_view_event(ViewEvent::PaneRedrawRequired { pane: Pane::Right });
        }
        request.into_iter().collect()
    }

    // === Accessors ===

    pub fn users(&self) -> &UsersState {
        &self.users
    }

    pub fn posts(&self) -> &PostsState {
        &self.posts
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn comments(&self) -> &CommentSession {
        &self.comments
    }

    pub fn selected_user(&self) -> Option<&User> {
        self.selection
            .user_id()
            .and_then(|user_id| self.users.find(user_id))
    }

    pub fn selected_post(&self) -> Option<&Post> {
        self.selection
            .post_id()
            .and_then(|post_id| self.posts.find(post_id))
    }

    /// Loading indicator of the left pane: users or posts fetch in flight
    pub fn is_loading(&self) -> bool {
        self.users.is_loading() || self.posts.is_loading()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn cursors(&self) -> ListCursors {
        self.cursors
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    pub fn update_terminal_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
        self.emit_view_event(ViewEvent::FullRedrawRequired);
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_base_url<S: Into<String>>(&mut self, base_url: S) {
        self.base_url = base_url.into();
    }

    // === View events ===

    pub(super) fn emit_view_event(&mut self, event: ViewEvent) {
        if !self.pending_view_events.contains(&event) {
            self.pending_view_events.push(event);
        }
    }

    fn emit_right_pane_update(&mut self) {
        self.emit_view_event(ViewEvent::PaneRedrawRequired { pane: Pane::Right });
        self.emit_view_event(ViewEvent::StatusBarUpdateRequired);
    }

    /// Drain view events accumulated since the last call
    pub fn collect_pending_view_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.pending_view_events)
    }
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::new()
    }
}

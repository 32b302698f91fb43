//! # Comment Session Controller
//!
//! Owns the comments of the selected post: loading them, optimistic delete
//! with delayed rollback, and the new-comment form.
//!
//! Every post selection change starts a new session. Requests carry the
//! session's tag and completions from an older session are dropped, so a
//! comment list only ever holds comments of the selected post.

use crate::app::events::{ApiRequest, Flow, RequestTag};
use crate::app::models::{expire_banner, Banner, Comment, CommentDraft, EntityId, NewComment};
use crate::app::services::{validate_draft, NetworkError};
use crate::config::{DELETE_ERROR_DISPLAY, DELETE_ROLLBACK_DELAY};
use std::time::Instant;

pub const COMMENTS_ERROR_MESSAGE: &str = "Something went wrong";

/// Observable state of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentsState {
    Idle,
    Loading,
    Loaded,
    LoadError,
    FormOpen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Loading,
    Loaded,
    LoadError,
}

/// Where an optimistic removal stands
///
/// `Pending` → removed (confirmed) on success, or `RollbackScheduled` on
/// failure; once `due` passes the comment is appended back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalState {
    Pending,
    RollbackScheduled { due: Instant },
}

#[derive(Debug, Clone)]
struct Removal {
    comment: Comment,
    state: RemovalState,
}

#[derive(Debug, Clone)]
pub struct CommentSession {
    post_id: Option<EntityId>,
    generation: u64,
    phase: Phase,
    comments: Vec<Comment>,
    form: Option<CommentDraft>,
    removals: Vec<Removal>,
    mutation_error: Option<Banner>,
}

impl CommentSession {
    pub fn new() -> Self {
        Self {
            post_id: None,
            generation: 0,
            phase: Phase::Idle,
            comments: Vec::new(),
            form: None,
            removals: Vec::new(),
            mutation_error: None,
        }
    }

    fn tag(&self, flow: Flow) -> RequestTag {
        RequestTag::new(flow, self.post_id, self.generation)
    }

    fn is_current(&self, tag: RequestTag) -> bool {
        let current = tag.matches(self.post_id, self.generation);
        if !current {
            tracing::debug!(
                "Dropping stale comments completion {:?} (current post {:?}, generation {})",
                tag,
                self.post_id,
                self.generation
            );
        }
        current
    }

    /// Start a session for `post_id`, or go idle for `None`
    ///
    /// The error flag, the comments, the form and pending removals of the
    /// previous post are all dropped before the fetch request is built.
    pub fn switch_post(&mut self, post_id: Option<EntityId>) -> Option<ApiRequest> {
        self.phase = Phase::Idle;
        self.comments.clear();
        self.form = None;
        self.removals.clear();
        self.generation += 1;
        self.post_id = post_id;

        let post_id = post_id?;
        self.phase = Phase::Loading;
        tracing::debug!("Loading comments for post {post_id} (generation {})", self.generation);
        Some(ApiRequest::LoadComments {
            tag: self.tag(Flow::Comments),
            post_id,
        })
    }

    /// Apply a comments fetch. Returns false when it was stale.
    pub fn apply_loaded(
        &mut self,
        tag: RequestTag,
        result: Result<Vec<Comment>, NetworkError>,
    ) -> bool {
        if !self.is_current(tag) {
            return false;
        }

        match result {
            Ok(comments) => {
                tracing::info!(
                    "Loaded {} comment(s) for post {:?}",
                    comments.len(),
                    self.post_id
                );
                self.comments = comments;
                self.phase = Phase::Loaded;
            }
            Err(error) => {
                tracing::warn!("Failed to load comments for post {:?}: {error}", self.post_id);
                self.comments.clear();
                self.phase = Phase::LoadError;
            }
        }
        true
    }

    /// Open the new-comment form. Opening an open form does nothing.
    pub fn open_form(&mut self) -> bool {
        if !self.can_write() {
            return false;
        }
        self.form = Some(CommentDraft::new());
        true
    }

    /// Close and discard the form
    pub fn close_form(&mut self) -> bool {
        self.form.take().is_some()
    }

    pub fn form(&self) -> Option<&CommentDraft> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut CommentDraft> {
        self.form.as_mut()
    }

    /// Validate the form and build the create request
    ///
    /// Blank fields are marked invalid and nothing is sent. A form that is
    /// already submitting ignores further submits.
    pub fn submit(&mut self) -> Option<ApiRequest> {
        let post_id = self.post_id?;
        let tag = self.tag(Flow::CommentMutation);
        let draft = self.form.as_mut()?;

        if draft.is_submitting() {
            return None;
        }

        if let Err(error) = validate_draft(draft) {
            tracing::debug!("Comment form rejected: {error}");
            draft.mark_invalid(error.fields());
            return None;
        }

        draft.set_submitting(true);
        Some(ApiRequest::CreateComment {
            tag,
            comment: NewComment {
                post_id,
                name: draft.name.clone(),
                email: draft.email.clone(),
                body: draft.body.clone(),
            },
        })
    }

    /// Apply a create completion. Returns false when it was stale.
    ///
    /// On failure the whole view is considered unreliable: comments are
    /// discarded, the form is closed and the load error is shown.
    pub fn apply_created(&mut self, tag: RequestTag, result: Result<Comment, NetworkError>) -> bool {
        if !self.is_current(tag) {
            return false;
        }

        match result {
            Ok(comment) => {
                tracing::info!("Comment {} added to post {}", comment.id, comment.post_id);
                self.comments.push(comment);
                if let Some(draft) = self.form.as_mut() {
                    draft.reset_after_submit();
                }
            }
            Err(error) => {
                tracing::warn!("Failed to add comment to post {:?}: {error}", self.post_id);
                self.comments.clear();
                self.removals.clear();
                self.form = None;
                self.phase = Phase::LoadError;
            }
        }
        true
    }

    /// Optimistically remove a comment and build the delete request
    pub fn delete(&mut self, comment_id: EntityId) -> Option<ApiRequest> {
        let index = self.comments.iter().position(|c| c.id == comment_id)?;
        let comment = self.comments.remove(index);
        self.removals.push(Removal {
            comment,
            state: RemovalState::Pending,
        });

        Some(ApiRequest::DeleteComment {
            tag: self.tag(Flow::CommentMutation),
            comment_id,
        })
    }

    /// Apply a delete completion. Returns false when it was stale.
    pub fn apply_deleted(
        &mut self,
        tag: RequestTag,
        comment_id: EntityId,
        result: Result<(), NetworkError>,
        now: Instant,
    ) -> bool {
        if !self.is_current(tag) {
            return false;
        }

        let Some(index) = self
            .removals
            .iter()
            .position(|r| r.comment.id == comment_id && r.state == RemovalState::Pending)
        else {
            return false;
        };

        match result {
            Ok(()) => {
                tracing::info!("Comment {comment_id} deleted");
                self.removals.remove(index);
            }
            Err(error) => {
                tracing::warn!("Failed to delete comment {comment_id}: {error}");
                self.removals[index].state = RemovalState::RollbackScheduled {
                    due: now + DELETE_ROLLBACK_DELAY,
                };
            }
        }
        true
    }

    pub fn removal_state(&self, comment_id: EntityId) -> Option<RemovalState> {
        self.removals
            .iter()
            .find(|r| r.comment.id == comment_id)
            .map(|r| r.state)
    }

    /// Advance timers: expire the mutation banner and roll back due removals
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = expire_banner(&mut self.mutation_error, now);

        let (due, waiting): (Vec<Removal>, Vec<Removal>) = std::mem::take(&mut self.removals)
            .into_iter()
            .partition(|r| {
                matches!(r.state, RemovalState::RollbackScheduled { due } if due <= now)
            });
        self.removals = waiting;

        for removal in due {
            tracing::debug!("Rolling back removal of comment {}", removal.comment.id);
            self.comments.push(removal.comment);
            self.mutation_error = Some(Banner::timed(
                COMMENTS_ERROR_MESSAGE,
                now,
                DELETE_ERROR_DISPLAY,
            ));
            changed = true;
        }

        changed
    }

    pub fn state(&self) -> CommentsState {
        if self.form.is_some() {
            return CommentsState::FormOpen;
        }
        match self.phase {
            Phase::Idle => CommentsState::Idle,
            Phase::Loading => CommentsState::Loading,
            Phase::Loaded => CommentsState::Loaded,
            Phase::LoadError => CommentsState::LoadError,
        }
    }

    pub fn post_id(&self) -> Option<EntityId> {
        self.post_id
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn has_load_error(&self) -> bool {
        self.phase == Phase::LoadError
    }

    pub fn mutation_error(&self) -> Option<&Banner> {
        self.mutation_error.as_ref()
    }

    /// "Write a comment" is offered
    pub fn can_write(&self) -> bool {
        self.form.is_none() && self.phase == Phase::Loaded
    }
}

impl Default for CommentSession {
    fn default() -> Self {
        Self::new()
    }
}

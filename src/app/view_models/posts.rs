//! # Users and Posts Orchestration
//!
//! Fetch state of the user list (loaded once on start) and of the post list
//! of the selected user. Each fetch bumps a generation so that answers for an
//! older selection are ignored.

use crate::app::events::{ApiRequest, Flow, RequestTag};
use crate::app::models::{expire_banner, Banner, EntityId, Post, User};
use crate::app::services::NetworkError;
use crate::config::LIST_ERROR_DISPLAY;
use std::time::Instant;

pub const LIST_ERROR_MESSAGE: &str = "Something went wrong!";

/// Fetch phase of a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone)]
pub struct UsersState {
    phase: ListPhase,
    users: Vec<User>,
    generation: u64,
    error: Option<Banner>,
}

impl UsersState {
    pub fn new() -> Self {
        Self {
            phase: ListPhase::Idle,
            users: Vec::new(),
            generation: 0,
            error: None,
        }
    }

    pub fn begin_load(&mut self) -> ApiRequest {
        self.generation += 1;
        self.phase = ListPhase::Loading;
        ApiRequest::LoadUsers {
            tag: RequestTag::new(Flow::Users, None, self.generation),
        }
    }

    /// Apply a users completion. Returns false when it was stale.
    pub fn apply(
        &mut self,
        tag: RequestTag,
        result: Result<Vec<User>, NetworkError>,
        now: Instant,
    ) -> bool {
        if !tag.matches(None, self.generation) {
            tracing::debug!("Dropping stale users response {:?}", tag);
            return false;
        }

        match result {
            Ok(users) => {
                tracing::info!("Loaded {} user(s)", users.len());
                self.users = users;
                self.phase = ListPhase::Loaded;
            }
            Err(error) => {
                tracing::warn!("Failed to load users: {error}");
                self.phase = ListPhase::Failed;
                self.error = Some(Banner::timed(LIST_ERROR_MESSAGE, now, LIST_ERROR_DISPLAY));
            }
        }
        true
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        expire_banner(&mut self.error, now)
    }

    pub fn phase(&self) -> ListPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == ListPhase::Loading
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn find(&self, user_id: EntityId) -> Option<&User> {
        self.users.iter().find(|user| user.id == user_id)
    }

    pub fn error(&self) -> Option<&Banner> {
        self.error.as_ref()
    }
}

impl Default for UsersState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct PostsState {
    phase: ListPhase,
    posts: Vec<Post>,
    user_id: Option<EntityId>,
    generation: u64,
    error: Option<Banner>,
}

impl PostsState {
    pub fn new() -> Self {
        Self {
            phase: ListPhase::Idle,
            posts: Vec::new(),
            user_id: None,
            generation: 0,
            error: None,
        }
    }

    /// Start a fetch cycle for `user_id`
    ///
    /// The previous user's posts are dropped before the request is built, so
    /// they can never be displayed for the new user.
    pub fn begin_load(&mut self, user_id: EntityId) -> ApiRequest {
        self.posts.clear();
        self.generation += 1;
        self.user_id = Some(user_id);
        self.phase = ListPhase::Loading;
        ApiRequest::LoadPosts {
            tag: RequestTag::new(Flow::Posts, Some(user_id), self.generation),
            user_id,
        }
    }

    /// Apply a posts completion. Returns false when it was stale.
    pub fn apply(
        &mut self,
        tag: RequestTag,
        result: Result<Vec<Post>, NetworkError>,
        now: Instant,
    ) -> bool {
        if !tag.matches(self.user_id, self.generation) {
            tracing::debug!(
                "Dropping stale posts response {:?} (current user {:?}, generation {})",
                tag,
                self.user_id,
                self.generation
            );
            return false;
        }

        match result {
            Ok(posts) => {
                tracing::info!("Loaded {} post(s) for user {:?}", posts.len(), self.user_id);
                self.posts = posts;
                self.phase = ListPhase::Loaded;
            }
            Err(error) => {
                tracing::warn!("Failed to load posts for user {:?}: {error}", self.user_id);
                self.phase = ListPhase::Failed;
                self.error = Some(Banner::timed(LIST_ERROR_MESSAGE, now, LIST_ERROR_DISPLAY));
            }
        }
        true
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        expire_banner(&mut self.error, now)
    }

    pub fn phase(&self) -> ListPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == ListPhase::Loading
    }

    /// The latest completed fetch returned no posts
    pub fn has_no_posts(&self) -> bool {
        self.phase == ListPhase::Loaded && self.posts.is_empty()
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn find(&self, post_id: EntityId) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == post_id)
    }

    pub fn user_id(&self) -> Option<EntityId> {
        self.user_id
    }

    pub fn error(&self) -> Option<&Banner> {
        self.error.as_ref()
    }
}

impl Default for PostsState {
    fn default() -> Self {
        Self::new()
    }
}

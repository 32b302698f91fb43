//! # Backend
//!
//! Typed resource operations over the three collections. The trait is the
//! seam between the dispatcher and the network so tests can swap in an
//! in-memory backend.

use super::api::{NetworkError, RestClient};
use crate::app::models::{Comment, EntityId, NewComment, Post, User};
use async_trait::async_trait;

pub const USERS_PATH: &str = "/users";
pub const POSTS_PATH: &str = "/posts";
pub const COMMENTS_PATH: &str = "/comments";

/// Resource operations the application needs from the API
#[async_trait]
pub trait Backend: Send + Sync {
    async fn users(&self) -> Result<Vec<User>, NetworkError>;

    async fn posts_for_user(&self, user_id: EntityId) -> Result<Vec<Post>, NetworkError>;

    async fn comments_for_post(&self, post_id: EntityId) -> Result<Vec<Comment>, NetworkError>;

    async fn create_comment(&self, comment: &NewComment) -> Result<Comment, NetworkError>;

    async fn delete_comment(&self, comment_id: EntityId) -> Result<(), NetworkError>;
}

#[async_trait]
impl Backend for RestClient {
    async fn users(&self) -> Result<Vec<User>, NetworkError> {
        self.list(USERS_PATH, &[]).await
    }

    async fn posts_for_user(&self, user_id: EntityId) -> Result<Vec<Post>, NetworkError> {
        self.list(POSTS_PATH, &[("userId", user_id.to_string())])
            .await
    }

    async fn comments_for_post(&self, post_id: EntityId) -> Result<Vec<Comment>, NetworkError> {
        self.list(COMMENTS_PATH, &[("postId", post_id.to_string())])
            .await
    }

    async fn create_comment(&self, comment: &NewComment) -> Result<Comment, NetworkError> {
        self.create(COMMENTS_PATH, comment).await
    }

    async fn delete_comment(&self, comment_id: EntityId) -> Result<(), NetworkError> {
        self.remove(&format!("{COMMENTS_PATH}/{comment_id}")).await
    }
}

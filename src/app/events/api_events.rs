//! # API Events
//!
//! Requests the view model asks the dispatcher to perform, and the tagged
//! completions that come back once the backend answered.

use super::types::RequestTag;
use crate::app::models::{Comment, EntityId, NewComment, Post, User};
use crate::app::services::NetworkError;

/// Backend call requested by the view model
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    LoadUsers {
        tag: RequestTag,
    },
    LoadPosts {
        tag: RequestTag,
        user_id: EntityId,
    },
    LoadComments {
        tag: RequestTag,
        post_id: EntityId,
    },
    CreateComment {
        tag: RequestTag,
        comment: NewComment,
    },
    DeleteComment {
        tag: RequestTag,
        comment_id: EntityId,
    },
}

impl ApiRequest {
    pub fn tag(&self) -> RequestTag {
        match self {
            ApiRequest::LoadUsers { tag }
            | ApiRequest::LoadPosts { tag, .. }
            | ApiRequest::LoadComments { tag, .. }
            | ApiRequest::CreateComment { tag, .. }
            | ApiRequest::DeleteComment { tag, .. } => *tag,
        }
    }
}

/// Outcome of an [`ApiRequest`], carrying the tag it was issued with
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCompletion {
    UsersLoaded {
        tag: RequestTag,
        result: Result<Vec<User>, NetworkError>,
    },
    PostsLoaded {
        tag: RequestTag,
        result: Result<Vec<Post>, NetworkError>,
    },
    CommentsLoaded {
        tag: RequestTag,
        result: Result<Vec<Comment>, NetworkError>,
    },
    CommentCreated {
        tag: RequestTag,
        result: Result<Comment, NetworkError>,
    },
    CommentDeleted {
        tag: RequestTag,
        comment_id: EntityId,
        result: Result<(), NetworkError>,
    },
}

impl ApiCompletion {
    pub fn tag(&self) -> RequestTag {
        match self {
            ApiCompletion::UsersLoaded { tag, .. }
            | ApiCompletion::PostsLoaded { tag, .. }
            | ApiCompletion::CommentsLoaded { tag, .. }
            | ApiCompletion::CommentCreated { tag, .. }
            | ApiCompletion::CommentDeleted { tag, .. } => *tag,
        }
    }

    pub fn is_error(&self) -> bool {
        match self {
            ApiCompletion::UsersLoaded { result, .. } => result.is_err(),
            ApiCompletion::PostsLoaded { result, .. } => result.is_err(),
            ApiCompletion::CommentsLoaded { result, .. } => result.is_err(),
            ApiCompletion::CommentCreated { result, .. } => result.is_err(),
            ApiCompletion::CommentDeleted { result, .. } => result.is_err(),
        }
    }
}

//! # API Dispatcher
//!
//! Runs backend calls on tokio tasks and hands the tagged completions back
//! to the single-threaded event loop through a channel.

use super::backend::Backend;
use crate::app::events::{ApiCompletion, ApiRequest};
use std::sync::Arc;
use tokio::sync::mpsc;

const COMPLETION_CHANNEL_CAPACITY: usize = 64;

/// Service for executing backend requests without blocking the UI loop
pub struct ApiService {
    /// Backend every request is sent to
    backend: Arc<dyn Backend>,
    /// Channel for receiving async completions
    completion_receiver: mpsc::Receiver<ApiCompletion>,
    /// Channel sender cloned into each spawned task
    completion_sender: mpsc::Sender<ApiCompletion>,
    /// Requests spawned but not yet received back
    in_flight: usize,
}

impl ApiService {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        let (completion_sender, completion_receiver) = mpsc::channel(COMPLETION_CHANNEL_CAPACITY);
        Self {
            backend,
            completion_receiver,
            completion_sender,
            in_flight: 0,
        }
    }

    /// Number of requests whose completion has not been received yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Execute a request asynchronously
    ///
    /// This spawns a tokio task that executes the request and sends the
    /// completion back through the internal channel.
    pub fn dispatch(&mut self, request: ApiRequest) {
        tracing::debug!("Dispatching {:?}", request);
        let backend = Arc::clone(&self.backend);
        let sender = self.completion_sender.clone();
        self.in_flight += 1;

        tokio::spawn(async move {
            let completion = execute(backend.as_ref(), request).await;
            // Receiver might have been dropped on shutdown
            let _ = sender.send(completion).await;
        });
    }

    pub fn dispatch_all(&mut self, requests: Vec<ApiRequest>) {
        for request in requests {
            self.dispatch(request);
        }
    }

    /// Check if there is a completion ready (non-blocking)
    pub fn poll_completion(&mut self) -> Option<ApiCompletion> {
        let completion = self.completion_receiver.try_recv().ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(completion)
    }

    /// Wait for the next completion
    pub async fn next_completion(&mut self) -> Option<ApiCompletion> {
        let completion = self.completion_receiver.recv().await?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(completion)
    }
}

/// Perform a single request against `backend` and wrap the outcome with its tag
pub async fn execute(backend: &dyn Backend, request: ApiRequest) -> ApiCompletion {
    let completion = match request {
        ApiRequest::LoadUsers { tag } => ApiCompletion::UsersLoaded {
            tag,
            result: backend.users().await,
        },
        ApiRequest::LoadPosts { tag, user_id } => ApiCompletion::PostsLoaded {
            tag,
            result: backend.posts_for_user(user_id).await,
        },
        ApiRequest::LoadComments { tag, post_id } => ApiCompletion::CommentsLoaded {
            tag,
            result: backend.comments_for_post(post_id).await,
        },
        ApiRequest::CreateComment { tag, comment } => ApiCompletion::CommentCreated {
            tag,
            result: backend.create_comment(&comment).await,
        },
        ApiRequest::DeleteComment { tag, comment_id } => ApiCompletion::CommentDeleted {
            tag,
            comment_id,
            result: backend.delete_comment(comment_id).await,
        },
    };

    if completion.is_error() {
        tracing::warn!("Backend call failed: {:?}", completion);
    }
    completion
}

//! # Models
//!
//! Plain data owned by the view models: backend resources, the comment draft
//! and timed banners.

pub mod banner;
pub mod draft;
pub mod resources;

pub use banner::{expire_banner, Banner};
pub use draft::{CommentDraft, FormField, InvalidFields};
pub use resources::{Comment, EntityId, NewComment, Post, User};

//! # Resource Models
//!
//! Records returned by the backend. They are plain data: once fetched they are
//! never mutated, only replaced wholesale by a newer fetch.

use serde::{Deserialize, Serialize};

/// Identifier shared by every resource collection
pub type EntityId = u64;

/// A user that can be picked in the selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// A post written by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: EntityId,
    pub user_id: EntityId,
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// A comment attached to a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: EntityId,
    pub post_id: EntityId,
    pub name: String,
    pub email: String,
    pub body: String,
}

/// Payload of `POST /comments`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub post_id: EntityId,
    pub name: String,
    pub email: String,
    pub body: String,
}

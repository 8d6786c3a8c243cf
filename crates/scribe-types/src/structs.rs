//! Entity records held by the store.
//!
//! Entities are immutable once created. Relationships are stored as ids on
//! the dependent side only: a [`Post`] knows its author, a [`Comment`] knows
//! its author and post, and a [`User`] knows nothing about either.

use serde::{Deserialize, Serialize};

use crate::ids::{CommentId, PostId, UserId};

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Engine-assigned identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address, unique across all users (exact match).
    pub email: String,
    /// Age in years. Conventionally 18 to 72, not enforced.
    pub age: Option<u32>,
}

/// A post written by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Engine-assigned identifier.
    pub id: PostId,
    /// Post title.
    pub title: String,
    /// Post body text.
    pub body: String,
    /// Whether the post accepts comments.
    pub published: bool,
    /// The user who wrote the post.
    pub author: UserId,
}

/// A comment left by a user on a published post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Engine-assigned identifier.
    pub id: CommentId,
    /// Comment text.
    pub text: String,
    /// The user who wrote the comment.
    pub author: UserId,
    /// The post the comment is attached to.
    pub post: PostId,
}

/// Entities that reference the user who wrote them.
pub trait Authored {
    /// The id of the authoring user.
    fn author(&self) -> UserId;
}

impl Authored for Post {
    fn author(&self) -> UserId {
        self.author
    }
}

impl Authored for Comment {
    fn author(&self) -> UserId {
        self.author
    }
}

/// Entities addressable by a typed id.
pub trait Identified {
    /// The id type for this entity.
    type Id: Copy + Eq + core::fmt::Display;

    /// This entity's id.
    fn id(&self) -> Self::Id;
}

impl Identified for User {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }
}

impl Identified for Post {
    type Id = PostId;

    fn id(&self) -> PostId {
        self.id
    }
}

impl Identified for Comment {
    type Id = CommentId;

    fn id(&self) -> CommentId {
        self.id
    }
}

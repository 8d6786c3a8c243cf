//! The entity store: three independent collections in process memory.
//!
//! [`EntityStore`] is pure storage. It does not validate references or
//! uniqueness; the mutation engine does that before calling in. The store
//! is an owned value, constructed once at startup and passed by reference
//! to whoever needs it.

use scribe_types::{Comment, Post, User};

use crate::collection::Collection;

/// All users, posts, and comments currently alive.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EntityStore {
    /// Users in insertion order.
    users: Collection<User>,
    /// Posts in insertion order.
    posts: Collection<Post>,
    /// Comments in insertion order.
    comments: Collection<Comment>,
}

impl EntityStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self {
            users: Collection::new(),
            posts: Collection::new(),
            comments: Collection::new(),
        }
    }

    /// The user collection.
    pub const fn users(&self) -> &Collection<User> {
        &self.users
    }

    /// The post collection.
    pub const fn posts(&self) -> &Collection<Post> {
        &self.posts
    }

    /// The comment collection.
    pub const fn comments(&self) -> &Collection<Comment> {
        &self.comments
    }

    /// Mutable access to the user collection.
    pub const fn users_mut(&mut self) -> &mut Collection<User> {
        &mut self.users
    }

    /// Mutable access to the post collection.
    pub const fn posts_mut(&mut self) -> &mut Collection<Post> {
        &mut self.posts
    }

    /// Mutable access to the comment collection.
    pub const fn comments_mut(&mut self) -> &mut Collection<Comment> {
        &mut self.comments
    }

    /// Number of entities in each collection.
    pub fn counts(&self) -> StoreCounts {
        StoreCounts {
            users: self.users.len(),
            posts: self.posts.len(),
            comments: self.comments.len(),
        }
    }
}

/// A point-in-time count of each collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct StoreCounts {
    /// Number of users.
    pub users: usize,
    /// Number of posts.
    pub posts: usize,
    /// Number of comments.
    pub comments: usize,
}

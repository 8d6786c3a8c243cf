//! The bundle exchanged between a sample-data generator and the engine.

use serde::{Deserialize, Serialize};

use crate::structs::{Comment, Post, User};

/// Pre-built entities used to populate an empty store at startup.
///
/// Records carry the ids their generator assigned. The engine validates the
/// whole bundle before loading any of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedData {
    /// Users, in the order they should be inserted.
    pub users: Vec<User>,
    /// Posts, each referencing a user in `users`.
    pub posts: Vec<Post>,
    /// Comments, each referencing a user in `users` and a published post
    /// in `posts`.
    pub comments: Vec<Comment>,
}

impl SeedData {
    /// Whether the bundle contains no entities at all.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.posts.is_empty() && self.comments.is_empty()
    }
}

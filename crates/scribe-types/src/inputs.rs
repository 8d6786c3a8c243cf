//! Argument bundles for the `create*` mutations.
//!
//! Callers never supply ids for the entity being created; the engine
//! assigns them. References to other entities are supplied as typed ids and
//! validated by the mutation engine.

use serde::{Deserialize, Serialize};

use crate::ids::{CommentId, PostId, UserId};
use crate::structs::{Comment, Post, User};

/// Fields for creating a [`User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserInput {
    /// Display name.
    pub name: String,
    /// Email address. Must not already be in use.
    pub email: String,
    /// Optional age in years.
    #[serde(default)]
    pub age: Option<u32>,
}

impl CreateUserInput {
    /// Build the user record under the given id.
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            age: self.age,
        }
    }
}

/// Fields for creating a [`Post`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePostInput {
    /// Post title.
    pub title: String,
    /// Post body text.
    pub body: String,
    /// Whether the post is published.
    pub published: bool,
    /// Author. Must reference an existing user.
    pub author: UserId,
}

impl CreatePostInput {
    /// Build the post record under the given id.
    pub fn into_post(self, id: PostId) -> Post {
        Post {
            id,
            title: self.title,
            body: self.body,
            published: self.published,
            author: self.author,
        }
    }
}

/// Fields for creating a [`Comment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCommentInput {
    /// Comment text.
    pub text: String,
    /// Author. Must reference an existing user.
    pub author: UserId,
    /// Target post. Must reference an existing published post.
    pub post: PostId,
}

impl CreateCommentInput {
    /// Build the comment record under the given id.
    pub fn into_comment(self, id: CommentId) -> Comment {
        Comment {
            id,
            text: self.text,
            author: self.author,
            post: self.post,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_input_age_defaults_to_none() {
        let parsed: Result<CreateUserInput, _> =
            serde_json::from_str(r#"{"name":"Ada","email":"ada@example.com"}"#);
        let input = parsed.ok();
        assert_eq!(input.as_ref().map(|i| i.age), Some(None));
        assert_eq!(input.map(|i| i.name), Some(String::from("Ada")));
    }

    #[test]
    fn comment_input_keeps_references() {
        let author = UserId::new();
        let post = PostId::new();
        let id = CommentId::new();
        let comment = CreateCommentInput {
            text: String::from("hi"),
            author,
            post,
        }
        .into_comment(id);
        assert_eq!(comment.id, id);
        assert_eq!(comment.author, author);
        assert_eq!(comment.post, post);
    }
}

//! Wire format for requests read from stdin.
//!
//! Each line is one JSON object tagged by `op`:
//!
//! ```json
//! {"op": "users", "query": "ada", "select": ["name", {"posts": ["title"]}]}
//! {"op": "createComment", "data": {"text": "hi", "author": "...", "post": "..."}}
//! {"op": "deletePost", "id": "...", "select": ["title"]}
//! ```

use std::collections::BTreeMap;

use scribe_types::{
    CommentId, CreateCommentInput, CreatePostInput, CreateUserInput, PostId, UserId,
};
use serde::Deserialize;

/// One requested field: a scalar name, or a relation with its own
/// sub-selection (`{"posts": ["title"]}`).
///
/// A bare relation name selects all scalar fields of the related entities.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Field {
    /// A field name with no sub-selection.
    Scalar(String),
    /// Relation names mapped to the fields wanted from each.
    Nested(BTreeMap<String, Vec<Field>>),
}

#[cfg(test)]
impl Field {
    /// A bare field name.
    pub fn scalar(name: &str) -> Self {
        Self::Scalar(name.to_owned())
    }

    /// A single relation with a sub-selection.
    pub fn nested(name: &str, fields: Vec<Self>) -> Self {
        Self::Nested(BTreeMap::from([(name.to_owned(), fields)]))
    }
}

/// A query or mutation, tagged by `op`.
///
/// An absent or empty `select` returns every scalar field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Request {
    /// List users, optionally filtered by name.
    Users {
        /// Case-insensitive substring of the user's name.
        #[serde(default)]
        query: Option<String>,
        /// Fields to return for each user.
        #[serde(default)]
        select: Vec<Field>,
    },
    /// List posts, optionally filtered by title or body.
    Posts {
        /// Case-insensitive substring of the title or body.
        #[serde(default)]
        query: Option<String>,
        /// Fields to return for each post.
        #[serde(default)]
        select: Vec<Field>,
    },
    /// List every comment.
    Comments {
        /// Fields to return for each comment.
        #[serde(default)]
        select: Vec<Field>,
    },
    /// Create a user.
    CreateUser {
        /// The new user's fields.
        data: CreateUserInput,
        /// Fields to return for the created user.
        #[serde(default)]
        select: Vec<Field>,
    },
    /// Delete a user and everything that depends on them.
    DeleteUser {
        /// The user to delete.
        id: UserId,
        /// Fields to return for the deleted user.
        #[serde(default)]
        select: Vec<Field>,
    },
    /// Create a post.
    CreatePost {
        /// The new post's fields.
        data: CreatePostInput,
        /// Fields to return for the created post.
        #[serde(default)]
        select: Vec<Field>,
    },
    /// Delete a post and its comments.
    DeletePost {
        /// The post to delete.
        id: PostId,
        /// Fields to return for the deleted post.
        #[serde(default)]
        select: Vec<Field>,
    },
    /// Create a comment on a published post.
    CreateComment {
        /// The new comment's fields.
        data: CreateCommentInput,
        /// Fields to return for the created comment.
        #[serde(default)]
        select: Vec<Field>,
    },
    /// Delete a comment.
    DeleteComment {
        /// The comment to delete.
        id: CommentId,
        /// Fields to return for the deleted comment.
        #[serde(default)]
        select: Vec<Field>,
    },
}

impl Request {
    /// The wire name of this request's operation.
    pub const fn op(&self) -> &'static str {
        match self {
            Self::Users { .. } => "users",
            Self::Posts { .. } => "posts",
            Self::Comments { .. } => "comments",
            Self::CreateUser { .. } => "createUser",
            Self::DeleteUser { .. } => "deleteUser",
            Self::CreatePost { .. } => "createPost",
            Self::DeletePost { .. } => "deletePost",
            Self::CreateComment { .. } => "createComment",
            Self::DeleteComment { .. } => "deleteComment",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn parses_query_with_nested_selection() {
        let request: Request = serde_json::from_str(
            r#"{"op":"users","query":"ad","select":["name",{"posts":["title",{"comments":[]}]}]}"#,
        )
        .unwrap();
        assert_eq!(
            request,
            Request::Users {
                query: Some(String::from("ad")),
                select: vec![
                    Field::scalar("name"),
                    Field::nested(
                        "posts",
                        vec![Field::scalar("title"), Field::nested("comments", vec![])]
                    ),
                ],
            }
        );
        assert_eq!(request.op(), "users");
    }

    #[test]
    fn select_and_query_are_optional() {
        let request: Request = serde_json::from_str(r#"{"op":"posts"}"#).unwrap();
        assert_eq!(
            request,
            Request::Posts {
                query: None,
                select: vec![],
            }
        );
    }

    #[test]
    fn parses_mutation_payloads() {
        let author = UserId::new();
        let line = format!(
            r#"{{"op":"createPost","data":{{"title":"t","body":"b","published":true,"author":"{author}"}}}}"#
        );
        let request: Request = serde_json::from_str(&line).unwrap();
        let Request::CreatePost { data, select } = request else {
            panic!("expected createPost");
        };
        assert_eq!(data.author, author);
        assert!(data.published);
        assert!(select.is_empty());
    }

    #[test]
    fn unknown_op_is_rejected() {
        let result: Result<Request, _> = serde_json::from_str(r#"{"op":"dropTables"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn malformed_id_is_rejected() {
        let result: Result<Request, _> =
            serde_json::from_str(r#"{"op":"deleteUser","id":"not-a-uuid"}"#);
        assert!(result.is_err());
    }
}

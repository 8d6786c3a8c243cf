//! Enumerations shared across crates for reporting which entity an
//! operation touched.

use serde::{Deserialize, Serialize};

use crate::ids::{CommentId, PostId, UserId};

/// The three entity collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// A [`User`](crate::User).
    User,
    /// A [`Post`](crate::Post).
    Post,
    /// A [`Comment`](crate::Comment).
    Comment,
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::User => "user",
            Self::Post => "post",
            Self::Comment => "comment",
        };
        f.write_str(name)
    }
}

/// A typed reference to a single entity of any kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id")]
pub enum EntityRef {
    /// Reference to a user.
    User(UserId),
    /// Reference to a post.
    Post(PostId),
    /// Reference to a comment.
    Comment(CommentId),
}

impl EntityRef {
    /// Which collection the referenced entity lives in.
    pub const fn kind(self) -> EntityKind {
        match self {
            Self::User(_) => EntityKind::User,
            Self::Post(_) => EntityKind::Post,
            Self::Comment(_) => EntityKind::Comment,
        }
    }
}

impl core::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::User(id) => write!(f, "user {id}"),
            Self::Post(id) => write!(f, "post {id}"),
            Self::Comment(id) => write!(f, "comment {id}"),
        }
    }
}

impl From<UserId> for EntityRef {
    fn from(id: UserId) -> Self {
        Self::User(id)
    }
}

impl From<PostId> for EntityRef {
    fn from(id: PostId) -> Self {
        Self::Post(id)
    }
}

impl From<CommentId> for EntityRef {
    fn from(id: CommentId) -> Self {
        Self::Comment(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_ref_reports_kind() {
        assert_eq!(EntityRef::from(UserId::new()).kind(), EntityKind::User);
        assert_eq!(EntityRef::from(PostId::new()).kind(), EntityKind::Post);
        assert_eq!(EntityRef::from(CommentId::new()).kind(), EntityKind::Comment);
    }

    #[test]
    fn entity_ref_display_names_the_collection() {
        let id = PostId::new();
        assert_eq!(EntityRef::Post(id).to_string(), format!("post {id}"));
    }
}

//! Error types for the `scribe-engine` crate.
//!
//! All fallible engine operations return [`EngineError`] through the
//! [`EngineResult`] alias. Every variant is a recoverable caller error: the
//! operation that produced it made no change to the store.

use scribe_types::{EntityRef, PostId, UserId};

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Why a comment's references were rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceProblem {
    /// No post with the given id exists.
    PostMissing,
    /// The post exists but is not published.
    PostUnpublished,
    /// No user with the given id exists.
    AuthorMissing,
}

impl core::fmt::Display for ReferenceProblem {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let text = match self {
            Self::PostMissing => "post does not exist",
            Self::PostUnpublished => "post is not published",
            Self::AuthorMissing => "author does not exist",
        };
        f.write_str(text)
    }
}

/// Errors that can occur during queries, resolution, and mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// A user with this email already exists.
    #[error("email already taken: {email}")]
    DuplicateEmail {
        /// The rejected email address.
        email: String,
    },

    /// A post referenced an author that does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// A comment referenced a missing or unpublished post, or a missing
    /// author.
    #[error("invalid reference for comment on post {post} by user {author}: {problem}")]
    InvalidReference {
        /// The post the comment targeted.
        post: PostId,
        /// The author the comment named.
        author: UserId,
        /// Which reference was rejected.
        problem: ReferenceProblem,
    },

    /// The addressed entity does not exist.
    #[error("{0} not found")]
    NotFound(EntityRef),

    /// Two records in a seed bundle share an id.
    #[error("duplicate id in seed data: {0}")]
    DuplicateId(EntityRef),
}

impl EngineError {
    /// Stable machine-readable name of the error kind.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::DuplicateEmail { .. } => "DuplicateEmail",
            Self::UserNotFound(_) => "UserNotFound",
            Self::InvalidReference { .. } => "InvalidReference",
            Self::NotFound(_) => "NotFound",
            Self::DuplicateId(_) => "DuplicateId",
        }
    }

    /// Construct a [`EngineError::DuplicateEmail`].
    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
        }
    }

    /// Construct a [`EngineError::NotFound`] from any typed id.
    pub fn not_found(id: impl Into<EntityRef>) -> Self {
        Self::NotFound(id.into())
    }
}

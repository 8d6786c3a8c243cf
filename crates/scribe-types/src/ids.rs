//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Users, posts, and comments each get their own id type so a post id can
//! never be passed where a user id is expected. Ids are assigned by the
//! engine at creation time (or by the seed generator) using UUID v7, which
//! is unique within the process and never reused.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Declares one or more UUID newtypes that serialize as a bare UUID string
/// and parse from their display form.
macro_rules! define_ids {
    ($($(#[$meta:meta])* $name:ident;)+) => {$(
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// A fresh, time-ordered id.
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// The underlying UUID.
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl core::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }
    )+};
}

define_ids! {
    /// Identifies a user.
    UserId;
    /// Identifies a post.
    PostId;
    /// Identifies a comment.
    CommentId;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ids_are_distinct() {
        let a = UserId::new();
        let b = UserId::new();
        assert_ne!(a, b);
        assert_ne!(*a.as_uuid(), Uuid::nil());
    }

    #[test]
    fn id_serializes_as_bare_uuid_string() {
        let id = PostId::new();
        let json = serde_json::to_string(&id).ok();
        assert_eq!(json, Some(format!("\"{id}\"")));
    }

    #[test]
    fn id_parses_from_display_form() {
        let id = CommentId::new();
        let parsed: Result<CommentId, _> = id.to_string().parse();
        assert_eq!(parsed.ok(), Some(id));
        assert!("not-a-uuid".parse::<CommentId>().is_err());
    }
}

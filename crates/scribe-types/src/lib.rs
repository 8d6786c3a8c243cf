//! Shared type definitions for the Scribe data layer.
//!
//! This crate is the single source of truth for the entity records, their
//! identifiers, and the argument bundles accepted by the mutation engine.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for user, post, and comment ids
//! - [`structs`] -- The `User`, `Post`, and `Comment` records
//! - [`inputs`] -- Argument bundles for the `create*` mutations
//! - [`enums`] -- Entity kinds and typed cross-collection references
//! - [`seed`] -- The startup bundle a sample-data generator hands the engine

pub mod enums;
pub mod ids;
pub mod inputs;
pub mod seed;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{EntityKind, EntityRef};
pub use ids::{CommentId, PostId, UserId};
pub use inputs::{CreateCommentInput, CreatePostInput, CreateUserInput};
pub use seed::SeedData;
pub use structs::{Authored, Comment, Identified, Post, User};

//! Relation resolution, queries, and integrity-checked mutations for the
//! Scribe data layer.
//!
//! The engine operates on an [`EntityStore`] it does not own. Callers
//! construct the store once at startup, optionally populate it with
//! [`load_seed`], and then hand borrowed views to the query and mutation
//! engines (or share it across tasks through [`SharedStore`]).
//!
//! # Invariants
//!
//! After every successful mutation:
//!
//! 1. Every user email is unique.
//! 2. Every post's author exists.
//! 3. Every comment's author and post exist.
//! 4. No comment outlives the post or user it depends on.
//!
//! A failed mutation changes nothing.
//!
//! # Modules
//!
//! - [`error`] -- [`EngineError`] and the [`EngineResult`] alias.
//! - [`resolver`] -- [`RelationResolver`], one method per relationship.
//! - [`query`] -- [`QueryEngine`], filtered listing.
//! - [`mutation`] -- [`MutationEngine`] and the two-phase [`CascadePlan`].
//! - [`seed`] -- [`load_seed`], validated bulk loading at startup.
//! - [`shared`] -- [`SharedStore`], the single lock for concurrent callers.
//!
//! [`EntityStore`]: scribe_store::EntityStore

pub mod error;
pub mod mutation;
pub mod query;
pub mod resolver;
pub mod seed;
pub mod shared;

pub use error::{EngineError, EngineResult, ReferenceProblem};
pub use mutation::{CascadePlan, MutationEngine};
pub use query::QueryEngine;
pub use resolver::RelationResolver;
pub use seed::load_seed;
pub use shared::SharedStore;

//! In-memory entity storage for the Scribe data layer.
//!
//! Holds the user, post, and comment collections for the lifetime of the
//! process. Nothing here validates or cascades; that belongs to the engine.
//!
//! # Modules
//!
//! - [`collection`] -- [`Collection`], one ordered list of entities with
//!   `insert`, `remove_where`, and `all`.
//! - [`store`] -- [`EntityStore`], the three collections bundled together.

pub mod collection;
pub mod store;

pub use collection::Collection;
pub use store::{EntityStore, StoreCounts};

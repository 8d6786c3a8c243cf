//! Sample-data generation for the Scribe data layer.
//!
//! This crate is the data-generation collaborator the engine consumes at
//! startup: it produces a [`SeedData`] bundle of users, posts, and comments
//! that already satisfies every referential rule, for
//! `scribe_engine::load_seed` to validate and load.
//!
//! # Modules
//!
//! - [`config`] -- [`SeedConfig`], counts and knobs from `scribe-config.yaml`.
//! - [`generator`] -- [`generate`], the random generator itself.
//!
//! [`SeedData`]: scribe_types::SeedData

pub mod config;
pub mod generator;

pub use config::SeedConfig;
pub use generator::{generate, generate_with_rng};

//! Configuration for the sample-data generator.
//!
//! Mirrors the `seed` section of `scribe-config.yaml`. Every field has a
//! default, so an absent section yields 10 users, 50 posts, and 100
//! comments.

use serde::Deserialize;

/// How much sample data to generate and how.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeedConfig {
    /// Number of users to generate.
    #[serde(default = "default_users")]
    pub users: u32,

    /// Number of posts to generate.
    #[serde(default = "default_posts")]
    pub posts: u32,

    /// Number of comments to generate.
    #[serde(default = "default_comments")]
    pub comments: u32,

    /// Probability in `[0, 1]` that a generated post is published.
    #[serde(default = "default_published_ratio")]
    pub published_ratio: f64,

    /// Youngest generated age (inclusive).
    #[serde(default = "default_min_age")]
    pub min_age: u32,

    /// Oldest generated age (inclusive).
    #[serde(default = "default_max_age")]
    pub max_age: u32,

    /// Domain used for generated email addresses.
    #[serde(default = "default_email_domain")]
    pub email_domain: String,

    /// Fixed RNG seed for reproducible data. Random when absent.
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            users: default_users(),
            posts: default_posts(),
            comments: default_comments(),
            published_ratio: default_published_ratio(),
            min_age: default_min_age(),
            max_age: default_max_age(),
            email_domain: default_email_domain(),
            rng_seed: None,
        }
    }
}

const fn default_users() -> u32 {
    10
}

const fn default_posts() -> u32 {
    50
}

const fn default_comments() -> u32 {
    100
}

const fn default_published_ratio() -> f64 {
    0.5
}

const fn default_min_age() -> u32 {
    18
}

const fn default_max_age() -> u32 {
    72
}

fn default_email_domain() -> String {
    String::from("example.com")
}

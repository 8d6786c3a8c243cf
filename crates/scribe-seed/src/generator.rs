//! Random sample-data generation.
//!
//! Produces users with unique emails, posts by randomly chosen users, and
//! comments by randomly chosen users on randomly chosen published posts.
//! The output always satisfies the engine's referential rules, so it can be
//! handed straight to `load_seed`.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use scribe_types::{Comment, CommentId, Post, PostId, SeedData, User, UserId};
use tracing::{info, warn};

use crate::config::SeedConfig;

// -----------------------------------------------------------------------
// Word pools
// -----------------------------------------------------------------------

/// First names for generated users. Names may repeat; emails never do.
const NAME_POOL: &[&str] = &[
    "Ada", "Bram", "Cleo", "Dara", "Emil", "Faye", "Gus", "Hana", "Ivo", "Jude",
    "Kira", "Lev", "Mina", "Noor", "Otto", "Pia", "Quin", "Rosa", "Sami", "Tove",
    "Uma", "Vik", "Wren", "Xia", "Yara", "Zeno",
];

/// Filler words for titles, bodies, and comment text.
const LOREM: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit",
    "sed", "do", "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore",
    "magna", "aliqua", "enim", "ad", "minim", "veniam", "quis", "nostrud",
    "exercitation", "ullamco", "laboris", "nisi", "aliquip", "ex", "ea", "commodo",
    "consequat", "duis", "aute", "irure", "in", "reprehenderit", "voluptate",
    "velit", "esse", "cillum", "fugiat", "nulla", "pariatur",
];

/// Words in a generated post title.
const TITLE_WORDS: usize = 2;
/// Words in a generated comment.
const COMMENT_WORDS: usize = 10;
/// Paragraphs in a generated post body.
const BODY_PARAGRAPHS: usize = 2;

// -----------------------------------------------------------------------
// Entry points
// -----------------------------------------------------------------------

/// Generate sample data, seeding the RNG from `config.rng_seed` when set.
pub fn generate(config: &SeedConfig) -> SeedData {
    let mut rng = config
        .rng_seed
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
    generate_with_rng(config, &mut rng)
}

/// Generate sample data from the given RNG.
pub fn generate_with_rng<R: Rng>(config: &SeedConfig, rng: &mut R) -> SeedData {
    let users = generate_users(config, rng);
    let posts = generate_posts(config, &users, rng);
    let comments = generate_comments(config, &users, &posts, rng);
    info!(
        users = users.len(),
        posts = posts.len(),
        comments = comments.len(),
        "sample data generated"
    );
    SeedData {
        users,
        posts,
        comments,
    }
}

// -----------------------------------------------------------------------
// Per-collection generation
// -----------------------------------------------------------------------

fn generate_users<R: Rng>(config: &SeedConfig, rng: &mut R) -> Vec<User> {
    let (min_age, max_age) = if config.min_age <= config.max_age {
        (config.min_age, config.max_age)
    } else {
        (config.max_age, config.min_age)
    };
    (0..config.users)
        .map(|n| {
            let name = NAME_POOL.choose(rng).copied().unwrap_or("user");
            User {
                id: UserId::new(),
                name: name.to_owned(),
                // The index suffix keeps emails unique even when names repeat.
                email: format!("{}.{n}@{}", name.to_lowercase(), config.email_domain),
                age: Some(rng.random_range(min_age..=max_age)),
            }
        })
        .collect()
}

fn generate_posts<R: Rng>(config: &SeedConfig, users: &[User], rng: &mut R) -> Vec<Post> {
    if users.is_empty() {
        if config.posts > 0 {
            warn!(requested = config.posts, "no users to author posts, skipping posts");
        }
        return Vec::new();
    }
    let ratio = if (0.0..=1.0).contains(&config.published_ratio) {
        config.published_ratio
    } else {
        warn!(
            published_ratio = config.published_ratio,
            "published_ratio outside [0, 1], using 0.5"
        );
        0.5
    };
    (0..config.posts)
        .filter_map(|_| {
            let author = users.choose(rng)?.id;
            Some(Post {
                id: PostId::new(),
                title: sentence(rng, TITLE_WORDS),
                body: paragraphs(rng, BODY_PARAGRAPHS),
                published: rng.random_bool(ratio),
                author,
            })
        })
        .collect()
}

fn generate_comments<R: Rng>(
    config: &SeedConfig,
    users: &[User],
    posts: &[Post],
    rng: &mut R,
) -> Vec<Comment> {
    let published: Vec<PostId> = posts.iter().filter(|p| p.published).map(|p| p.id).collect();
    if published.is_empty() || users.is_empty() {
        if config.comments > 0 {
            warn!(
                requested = config.comments,
                "no published posts to comment on, skipping comments"
            );
        }
        return Vec::new();
    }
    (0..config.comments)
        .filter_map(|_| {
            let author = users.choose(rng)?.id;
            let post = *published.choose(rng)?;
            Some(Comment {
                id: CommentId::new(),
                text: sentence(rng, COMMENT_WORDS),
                author,
                post,
            })
        })
        .collect()
}

// -----------------------------------------------------------------------
// Text helpers
// -----------------------------------------------------------------------

/// A capitalized sentence of `words` filler words ending in a period.
fn sentence<R: Rng>(rng: &mut R, words: usize) -> String {
    let mut text = LOREM
        .choose_multiple(rng, words)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    if let Some(first) = text.get(..1) {
        let upper = first.to_uppercase();
        text.replace_range(..1, &upper);
    }
    text.push('.');
    text
}

/// `count` paragraphs of three to five sentences, separated by blank lines.
fn paragraphs<R: Rng>(rng: &mut R, count: usize) -> String {
    (0..count)
        .map(|_| {
            let sentences = rng.random_range(3..=5_usize);
            (0..sentences)
                .map(|_| {
                    let words = rng.random_range(4..=9_usize);
                    sentence(rng, words)
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

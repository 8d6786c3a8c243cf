//! Startup population of the store from generated sample data.
//!
//! A [`SeedData`] bundle is checked against the same rules the mutation
//! engine enforces (unique emails, existing authors, comments only on
//! published posts) plus id uniqueness, since seed records arrive with ids
//! already assigned. Records are staged on a copy of the store and the copy
//! is swapped in only when every record passes.

use scribe_store::{EntityStore, StoreCounts};
use scribe_types::SeedData;
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::mutation::check_comment_references;

/// Load `seed` into `store`.
///
/// Users are loaded first, then posts, then comments, so every record may
/// reference anything earlier in the bundle or already in the store.
///
/// # Errors
///
/// Returns the first violation found:
/// [`EngineError::DuplicateId`], [`EngineError::DuplicateEmail`],
/// [`EngineError::UserNotFound`], or [`EngineError::InvalidReference`].
/// On error `store` is unchanged.
pub fn load_seed(store: &mut EntityStore, seed: SeedData) -> EngineResult<StoreCounts> {
    let mut staged = store.clone();

    for user in seed.users {
        if staged.users().contains(user.id) {
            return Err(EngineError::DuplicateId(user.id.into()));
        }
        if staged.users().any(|u| u.email == user.email) {
            return Err(EngineError::duplicate_email(user.email));
        }
        staged.users_mut().insert(user);
    }

    for post in seed.posts {
        if staged.posts().contains(post.id) {
            return Err(EngineError::DuplicateId(post.id.into()));
        }
        if !staged.users().contains(post.author) {
            return Err(EngineError::UserNotFound(post.author));
        }
        staged.posts_mut().insert(post);
    }

    for comment in seed.comments {
        if staged.comments().contains(comment.id) {
            return Err(EngineError::DuplicateId(comment.id.into()));
        }
        if let Some(problem) = check_comment_references(&staged, comment.author, comment.post) {
            return Err(EngineError::InvalidReference {
                post: comment.post,
                author: comment.author,
                problem,
            });
        }
        staged.comments_mut().insert(comment);
    }

    *store = staged;
    let counts = store.counts();
    info!(
        users = counts.users,
        posts = counts.posts,
        comments = counts.comments,
        "seed data loaded"
    );
    Ok(counts)
}

//! Relationship resolution between entities.
//!
//! [`RelationResolver`] has one method per relationship field. The dispatch
//! layer calls these explicitly for whichever relationship fields a caller
//! selected; nothing is discovered by field name. Resolution never mutates
//! the store.
//!
//! All methods are linear scans over the target collection and return
//! results in that collection's insertion order.

use scribe_store::EntityStore;
use scribe_types::{Authored, Comment, Post, User};

use crate::error::{EngineError, EngineResult};

/// Computes related entities on demand.
pub trait RelationResolver {
    /// The user who wrote a post or comment.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] if the author reference is
    /// dangling, which means the store's integrity has been broken.
    fn author_of(&self, item: &dyn Authored) -> EngineResult<&User>;

    /// The post a comment is attached to.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] if the post reference is dangling.
    fn post_of(&self, comment: &Comment) -> EngineResult<&Post>;

    /// Every post written by `user`.
    fn posts_of(&self, user: &User) -> Vec<&Post>;

    /// Every comment written by `user`.
    fn comments_of_user(&self, user: &User) -> Vec<&Comment>;

    /// Every comment attached to `post`.
    fn comments_of_post(&self, post: &Post) -> Vec<&Comment>;
}

impl RelationResolver for EntityStore {
    fn author_of(&self, item: &dyn Authored) -> EngineResult<&User> {
        let author = item.author();
        self.users().get(author).ok_or_else(|| {
            tracing::error!(user_id = %author, "dangling author reference");
            EngineError::not_found(author)
        })
    }

    fn post_of(&self, comment: &Comment) -> EngineResult<&Post> {
        self.posts().get(comment.post).ok_or_else(|| {
            tracing::error!(
                comment_id = %comment.id,
                post_id = %comment.post,
                "dangling post reference"
            );
            EngineError::not_found(comment.post)
        })
    }

    fn posts_of(&self, user: &User) -> Vec<&Post> {
        self.posts().iter().filter(|p| p.author == user.id).collect()
    }

    fn comments_of_user(&self, user: &User) -> Vec<&Comment> {
        self.comments().iter().filter(|c| c.author == user.id).collect()
    }

    fn comments_of_post(&self, post: &Post) -> Vec<&Comment> {
        self.comments().iter().filter(|c| c.post == post.id).collect()
    }
}

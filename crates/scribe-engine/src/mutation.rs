//! Integrity-checked create and delete operations.
//!
//! Every operation validates against the current store before writing
//! anything, so a rejected call leaves the store exactly as it found it.
//!
//! Deletes that cascade run in two phases. First a [`CascadePlan`] is
//! computed from an immutable view: the target, the posts it owns, and the
//! comments that depend on either. Then every removal in the plan is
//! applied. Comment selection depends on the full set of removed post ids,
//! so posts are always planned before comments.

use std::collections::BTreeSet;

use scribe_store::EntityStore;
use scribe_types::{
    Comment, CommentId, CreateCommentInput, CreatePostInput, CreateUserInput, Post, PostId,
    User, UserId,
};
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult, ReferenceProblem};

/// Entities a delete will remove, computed before anything is removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadePlan {
    /// The user being deleted, if the delete targets a user.
    pub user: Option<UserId>,
    /// Posts to remove: the target post, or every post by the target user.
    pub posts: BTreeSet<PostId>,
    /// Comments to remove: those on a removed post or by the target user.
    pub comments: BTreeSet<CommentId>,
}

impl CascadePlan {
    /// Plan the removal of `user` and everything that depends on it.
    pub fn for_user(store: &EntityStore, user: UserId) -> Self {
        let posts: BTreeSet<PostId> = store
            .posts()
            .iter()
            .filter(|p| p.author == user)
            .map(|p| p.id)
            .collect();
        let comments = store
            .comments()
            .iter()
            .filter(|c| c.author == user || posts.contains(&c.post))
            .map(|c| c.id)
            .collect();
        Self {
            user: Some(user),
            posts,
            comments,
        }
    }

    /// Plan the removal of `post` and its comments.
    pub fn for_post(store: &EntityStore, post: PostId) -> Self {
        let comments = store
            .comments()
            .iter()
            .filter(|c| c.post == post)
            .map(|c| c.id)
            .collect();
        Self {
            user: None,
            posts: BTreeSet::from([post]),
            comments,
        }
    }

    /// Apply every removal in the plan, returning what was removed.
    fn apply(&self, store: &mut EntityStore) -> Removed {
        let users = match self.user {
            Some(id) => store.users_mut().remove_where(|u| u.id == id),
            None => Vec::new(),
        };
        let posts = store
            .posts_mut()
            .remove_where(|p| self.posts.contains(&p.id));
        let comments = store
            .comments_mut()
            .remove_where(|c| self.comments.contains(&c.id));
        Removed {
            users,
            posts,
            comments,
        }
    }
}

/// Entities removed by an applied [`CascadePlan`].
#[derive(Debug)]
struct Removed {
    users: Vec<User>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
}

/// Validated writes against the store.
#[derive(Debug)]
pub struct MutationEngine<'a> {
    store: &'a mut EntityStore,
}

impl<'a> MutationEngine<'a> {
    /// Create a mutation engine over `store`.
    pub const fn new(store: &'a mut EntityStore) -> Self {
        Self { store }
    }

    /// Read-only view of the store, for resolving relationships on a
    /// mutation's result before the lock is released.
    pub const fn view(&self) -> &EntityStore {
        &*self.store
    }

    /// Create a user with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DuplicateEmail`] if another user already has
    /// exactly this email.
    pub fn create_user(&mut self, input: CreateUserInput) -> EngineResult<User> {
        if self.store.users().any(|u| u.email == input.email) {
            debug!(email = %input.email, "create_user rejected: email taken");
            return Err(EngineError::duplicate_email(input.email));
        }
        let user = input.into_user(UserId::new());
        self.store.users_mut().insert(user.clone());
        info!(user_id = %user.id, "user created");
        Ok(user)
    }

    /// Delete a user along with their posts, their comments, and every
    /// comment on their posts.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] if no user has this id.
    pub fn delete_user(&mut self, id: UserId) -> EngineResult<User> {
        if !self.store.users().contains(id) {
            return Err(EngineError::not_found(id));
        }
        let plan = CascadePlan::for_user(&*self.store, id);
        let removed = plan.apply(&mut *self.store);
        info!(
            user_id = %id,
            removed_posts = removed.posts.len(),
            removed_comments = removed.comments.len(),
            "user deleted"
        );
        removed
            .users
            .into_iter()
            .next()
            .ok_or_else(|| EngineError::not_found(id))
    }

    /// Create a post with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UserNotFound`] if the author does not exist.
    pub fn create_post(&mut self, input: CreatePostInput) -> EngineResult<Post> {
        if !self.store.users().contains(input.author) {
            debug!(user_id = %input.author, "create_post rejected: unknown author");
            return Err(EngineError::UserNotFound(input.author));
        }
        let post = input.into_post(PostId::new());
        self.store.posts_mut().insert(post.clone());
        info!(
            post_id = %post.id,
            user_id = %post.author,
            published = post.published,
            "post created"
        );
        Ok(post)
    }

    /// Delete a post and every comment attached to it.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] if no post has this id.
    pub fn delete_post(&mut self, id: PostId) -> EngineResult<Post> {
        if !self.store.posts().contains(id) {
            return Err(EngineError::not_found(id));
        }
        let plan = CascadePlan::for_post(&*self.store, id);
        let removed = plan.apply(&mut *self.store);
        info!(
            post_id = %id,
            removed_comments = removed.comments.len(),
            "post deleted"
        );
        removed
            .posts
            .into_iter()
            .next()
            .ok_or_else(|| EngineError::not_found(id))
    }

    /// Create a comment with a fresh id. Comments may only be attached to
    /// published posts.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidReference`] if the post is missing or
    /// unpublished, or if the author is missing. The post is checked first.
    pub fn create_comment(&mut self, input: CreateCommentInput) -> EngineResult<Comment> {
        if let Some(problem) = check_comment_references(&*self.store, input.author, input.post) {
            debug!(
                user_id = %input.author,
                post_id = %input.post,
                %problem,
                "create_comment rejected"
            );
            return Err(EngineError::InvalidReference {
                post: input.post,
                author: input.author,
                problem,
            });
        }
        let comment = input.into_comment(CommentId::new());
        self.store.comments_mut().insert(comment.clone());
        info!(comment_id = %comment.id, post_id = %comment.post, "comment created");
        Ok(comment)
    }

    /// Delete a single comment. Nothing depends on comments, so nothing
    /// cascades.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] if no comment has this id.
    pub fn delete_comment(&mut self, id: CommentId) -> EngineResult<Comment> {
        let comment = self
            .store
            .comments_mut()
            .remove_where(|c| c.id == id)
            .into_iter()
            .next()
            .ok_or_else(|| EngineError::not_found(id))?;
        info!(comment_id = %id, "comment deleted");
        Ok(comment)
    }
}

/// Check a comment's post and author references against `store`.
///
/// Returns the first problem found, or `None` if both references are valid.
pub(crate) fn check_comment_references(
    store: &EntityStore,
    author: UserId,
    post: PostId,
) -> Option<ReferenceProblem> {
    match store.posts().get(post) {
        None => return Some(ReferenceProblem::PostMissing),
        Some(p) if !p.published => return Some(ReferenceProblem::PostUnpublished),
        Some(_) => {}
    }
    if store.users().contains(author) {
        None
    } else {
        Some(ReferenceProblem::AuthorMissing)
    }
}

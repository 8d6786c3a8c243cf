//! Read-only listing over the store.
//!
//! Filters are case-insensitive substring matches. An absent filter and an
//! empty filter both return the whole collection in insertion order.
//!
//! Post listing does not hide unpublished posts, even though comments can
//! only be attached to published ones.

use scribe_store::EntityStore;
use scribe_types::{Comment, Post, User};

/// Read-only view of the store for list queries.
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    store: &'a EntityStore,
}

impl<'a> QueryEngine<'a> {
    /// Create a query engine over `store`.
    pub const fn new(store: &'a EntityStore) -> Self {
        Self { store }
    }

    /// Users whose name contains `filter`, ignoring case.
    pub fn list_users(&self, filter: Option<&str>) -> Vec<&'a User> {
        let Some(needle) = normalize(filter) else {
            return self.store.users().iter().collect();
        };
        self.store
            .users()
            .iter()
            .filter(|u| contains_ignore_case(&u.name, &needle))
            .collect()
    }

    /// Posts whose title or body contains `filter`, ignoring case.
    pub fn list_posts(&self, filter: Option<&str>) -> Vec<&'a Post> {
        let Some(needle) = normalize(filter) else {
            return self.store.posts().iter().collect();
        };
        self.store
            .posts()
            .iter()
            .filter(|p| {
                contains_ignore_case(&p.title, &needle) || contains_ignore_case(&p.body, &needle)
            })
            .collect()
    }

    /// Every comment.
    pub fn list_comments(&self) -> Vec<&'a Comment> {
        self.store.comments().iter().collect()
    }
}

/// Lowercased filter text, or `None` when there is nothing to filter by.
fn normalize(filter: Option<&str>) -> Option<String> {
    filter
        .filter(|f| !f.is_empty())
        .map(str::to_lowercase)
}

fn contains_ignore_case(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}

#[cfg(test)]
mod tests {
    use scribe_types::{CommentId, PostId, UserId};

    use super::*;

    fn store() -> EntityStore {
        let mut store = EntityStore::new();
        let names = ["Alice", "alfred", "Bob"];
        for name in names {
            store.users_mut().insert(User {
                id: UserId::new(),
                name: name.to_owned(),
                email: format!("{name}@example.com"),
                age: None,
            });
        }
        let author = store.users().all().first().map(|u| u.id).unwrap_or_default();
        let posts = [
            ("Rust Tips", "borrowing explained", true),
            ("Gardening", "tomatoes and RUSTy tools", false),
            ("Cooking", "pasta", true),
        ];
        for (title, body, published) in posts {
            store.posts_mut().insert(Post {
                id: PostId::new(),
                title: title.to_owned(),
                body: body.to_owned(),
                published,
                author,
            });
        }
        if let Some(post) = store.posts().all().first().map(|p| p.id) {
            store.comments_mut().insert(Comment {
                id: CommentId::new(),
                text: String::from("nice"),
                author,
                post,
            });
        }
        store
    }

    fn user_names(users: &[&User]) -> Vec<String> {
        users.iter().map(|u| u.name.clone()).collect()
    }

    fn post_titles(posts: &[&Post]) -> Vec<String> {
        posts.iter().map(|p| p.title.clone()).collect()
    }

    #[test]
    fn list_users_without_filter_returns_all_in_order() {
        let store = store();
        let q = QueryEngine::new(&store);
        assert_eq!(user_names(&q.list_users(None)), vec!["Alice", "alfred", "Bob"]);
    }

    #[test]
    fn list_users_filters_case_insensitively() {
        let store = store();
        let q = QueryEngine::new(&store);
        assert_eq!(user_names(&q.list_users(Some("AL"))), vec!["Alice", "alfred"]);
        assert!(q.list_users(Some("zed")).is_empty());
    }

    #[test]
    fn list_posts_matches_title_or_body_including_unpublished() {
        let store = store();
        let q = QueryEngine::new(&store);
        assert_eq!(
            post_titles(&q.list_posts(Some("rust"))),
            vec!["Rust Tips", "Gardening"]
        );
        assert_eq!(post_titles(&q.list_posts(Some("PASTA"))), vec!["Cooking"]);
    }

    #[test]
    fn empty_filter_equals_no_filter() {
        let store = store();
        let q = QueryEngine::new(&store);
        assert_eq!(q.list_posts(Some("")), q.list_posts(None));
        assert_eq!(q.list_posts(None).len(), 3);
        assert_eq!(q.list_users(Some("")), q.list_users(None));
    }

    #[test]
    fn list_comments_returns_everything() {
        let store = store();
        let q = QueryEngine::new(&store);
        assert_eq!(q.list_comments().len(), 1);
    }
}

//! A single lock around the whole store for concurrent callers.
//!
//! All three collections sit behind one [`RwLock`]. A mutation holds the
//! write lock from validation through the last cascaded removal, so no
//! reader can observe a half-applied cascade. Closures passed to
//! [`SharedStore::read`] and [`SharedStore::mutate`] run synchronously while
//! the lock is held and must not block.

use std::sync::Arc;

use scribe_store::{EntityStore, StoreCounts};
use tokio::sync::RwLock;

use crate::mutation::MutationEngine;
use crate::query::QueryEngine;

/// Cloneable handle to the process-wide store.
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    inner: Arc<RwLock<EntityStore>>,
}

impl SharedStore {
    /// Take ownership of `store` and share it.
    pub fn new(store: EntityStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Run `f` against the store under the read lock.
    ///
    /// The store itself implements
    /// [`RelationResolver`](crate::RelationResolver), so `f` can list with a
    /// [`QueryEngine`] and then resolve relationships on the results.
    pub async fn read<F, T>(&self, f: F) -> T
    where
        F: FnOnce(QueryEngine<'_>, &EntityStore) -> T,
    {
        let guard = self.inner.read().await;
        f(QueryEngine::new(&guard), &guard)
    }

    /// Run `f` with a [`MutationEngine`] under the write lock.
    pub async fn mutate<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut MutationEngine<'_>) -> T,
    {
        let mut guard = self.inner.write().await;
        let mut engine = MutationEngine::new(&mut guard);
        f(&mut engine)
    }

    /// Current size of each collection.
    pub async fn counts(&self) -> StoreCounts {
        self.inner.read().await.counts()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use scribe_types::{CreatePostInput, CreateUserInput};

    use super::*;
    use crate::resolver::RelationResolver;

    #[tokio::test]
    async fn mutations_are_visible_to_later_reads() {
        let shared = SharedStore::default();
        let user = shared
            .mutate(|m| {
                m.create_user(CreateUserInput {
                    name: String::from("Ada"),
                    email: String::from("ada@x.com"),
                    age: Some(36),
                })
            })
            .await
            .unwrap();
        shared
            .mutate(|m| {
                m.create_post(CreatePostInput {
                    title: String::from("Notes"),
                    body: String::from("body"),
                    published: true,
                    author: user.id,
                })
            })
            .await
            .unwrap();

        let titles = shared
            .read(|q, resolver| {
                q.list_users(Some("ada"))
                    .into_iter()
                    .flat_map(|u| resolver.posts_of(u))
                    .map(|p| p.title.clone())
                    .collect::<Vec<_>>()
            })
            .await;
        assert_eq!(titles, vec![String::from("Notes")]);
    }

    #[tokio::test]
    async fn concurrent_writers_never_duplicate_an_email() {
        let shared = SharedStore::default();
        let mut handles = Vec::new();
        for n in 0..16_u32 {
            let shared = shared.clone();
            handles.push(tokio::spawn(async move {
                shared
                    .mutate(|m| {
                        m.create_user(CreateUserInput {
                            name: format!("user{n}"),
                            email: String::from("same@x.com"),
                            age: None,
                        })
                    })
                    .await
                    .is_ok()
            }));
        }
        let mut outcomes = Vec::new();
        for handle in handles {
            outcomes.push(handle.await.unwrap());
        }
        assert_eq!(outcomes.iter().filter(|ok| **ok).count(), 1);
        assert_eq!(shared.counts().await.users, 1);
    }
}

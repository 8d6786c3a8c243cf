//! A single ordered, append/remove-capable entity collection.
//!
//! Entities are kept in insertion order. Lookups are linear scans; there is
//! no id index.

use scribe_types::Identified;

/// An ordered collection of entities of one kind.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Collection<T> {
    /// Entities in insertion order.
    items: Vec<T>,
}

impl<T> Collection<T> {
    /// Create an empty collection.
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append an entity. No validation is performed.
    pub fn insert(&mut self, item: T) {
        self.items.push(item);
    }

    /// Remove every entity matching `predicate` and return them in their
    /// original insertion order. Survivors keep their relative order.
    pub fn remove_where<F>(&mut self, mut predicate: F) -> Vec<T>
    where
        F: FnMut(&T) -> bool,
    {
        let (removed, kept): (Vec<T>, Vec<T>) =
            core::mem::take(&mut self.items).into_iter().partition(|item| predicate(item));
        self.items = kept;
        removed
    }

    /// All entities in insertion order.
    pub fn all(&self) -> &[T] {
        &self.items
    }

    /// Iterate over entities in insertion order.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// The first entity matching `predicate`.
    pub fn find<F>(&self, mut predicate: F) -> Option<&T>
    where
        F: FnMut(&T) -> bool,
    {
        self.items.iter().find(|item| predicate(*item))
    }

    /// Whether any entity matches `predicate`.
    pub fn any<F>(&self, predicate: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        self.items.iter().any(predicate)
    }

    /// Number of entities held.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection holds no entities.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Identified> Collection<T> {
    /// Look up an entity by id.
    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.find(|item| item.id() == id)
    }

    /// Whether an entity with this id is present.
    pub fn contains(&self, id: T::Id) -> bool {
        self.any(|item| item.id() == id)
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use scribe_types::{User, UserId};

    use super::*;

    fn user(name: &str) -> User {
        User {
            id: UserId::new(),
            name: name.to_owned(),
            email: format!("{name}@example.com"),
            age: None,
        }
    }

    #[test]
    fn insert_preserves_order() {
        let mut users = Collection::new();
        users.insert(user("a"));
        users.insert(user("b"));
        users.insert(user("c"));
        let names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn remove_where_returns_removed_in_order_and_keeps_rest() {
        let mut users = Collection::new();
        for name in ["a", "bb", "c", "dd", "e"] {
            users.insert(user(name));
        }
        let removed = users.remove_where(|u| u.name.len() == 2);
        let removed_names: Vec<&str> = removed.iter().map(|u| u.name.as_str()).collect();
        let kept_names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(removed_names, vec!["bb", "dd"]);
        assert_eq!(kept_names, vec!["a", "c", "e"]);
    }

    #[test]
    fn remove_where_without_match_is_a_no_op() {
        let mut users = Collection::new();
        users.insert(user("a"));
        let before = users.clone();
        assert!(users.remove_where(|_| false).is_empty());
        assert_eq!(users, before);
    }

    #[test]
    fn get_and_contains_by_id() {
        let mut users = Collection::new();
        let alice = user("alice");
        let id = alice.id;
        users.insert(alice);
        assert!(users.contains(id));
        assert_eq!(users.get(id).map(|u| u.name.as_str()), Some("alice"));
        assert!(!users.contains(UserId::new()));
    }
}

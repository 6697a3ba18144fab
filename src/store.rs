//! Identity lookup collaborator
//!
//! The chain asks one question of the identity store: does a record exist
//! for this id. Implementations over real databases live outside this
//! crate; the in-memory store covers tests and embedded use.

use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity record attached to a request on successful authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
}

impl User {
    pub fn new(id: Uuid, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }
}

/// Read-only identity lookup used by the authenticator.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Option<User>;
}

/// Lock-free in-memory identity store.
#[derive(Debug, Default)]
pub struct InMemoryIdentityStore {
    users: DashMap<Uuid, User>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user: User) {
        self.users.insert(user.id, user);
    }

    pub fn remove(&self, id: Uuid) {
        self.users.remove(&id);
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn find_by_id(&self, id: Uuid) -> Option<User> {
        self.users.get(&id).map(|entry| entry.value().clone())
    }
}

/// Parse a user identifier as stored in session state.
///
/// Identifiers are written as 32 hex chars; the hyphenated UUID form is
/// accepted as well.
pub fn parse_user_id(raw: &str) -> Option<Uuid> {
    Uuid::try_parse(raw).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = InMemoryIdentityStore::new();
        let user = User::new(Uuid::new_v4(), "alice");
        store.insert(user.clone());

        assert_eq!(store.find_by_id(user.id).await, Some(user));
    }

    #[tokio::test]
    async fn test_find_missing() {
        let store = InMemoryIdentityStore::new();

        assert_eq!(store.find_by_id(Uuid::new_v4()).await, None);
    }

    #[tokio::test]
    async fn test_remove() {
        let store = InMemoryIdentityStore::new();
        let user = User::new(Uuid::new_v4(), "alice");
        store.insert(user.clone());
        store.remove(user.id);

        assert!(store.is_empty());
        assert_eq!(store.find_by_id(user.id).await, None);
    }

    #[test]
    fn test_parse_user_id_simple_hex() {
        let id = Uuid::new_v4();
        assert_eq!(parse_user_id(&id.simple().to_string()), Some(id));
    }

    #[test]
    fn test_parse_user_id_hyphenated() {
        let id = Uuid::new_v4();
        assert_eq!(parse_user_id(&id.to_string()), Some(id));
    }

    #[test]
    fn test_parse_user_id_rejects_garbage() {
        assert_eq!(parse_user_id("not-an-id"), None);
        assert_eq!(parse_user_id(""), None);
    }
}

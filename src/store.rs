//! In-memory resource store for user records.
//!
//! Records are open JSON objects. The store owns the `id` field: it is
//! assigned on create from a counter that only ever grows, and it is
//! re-applied after every update so clients cannot change it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::StoreError;

/// Name of the store-owned identifier field.
pub const ID_FIELD: &str = "id";

/// Open set of fields supplied by a client.
pub type Fields = Map<String, Value>;

/// A single user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct User(Fields);

impl User {
    /// `id` leads the record, followed by the client's fields in order.
    fn new(id: u64, fields: Fields) -> Self {
        let mut record = Fields::with_capacity(fields.len() + 1);
        record.insert(ID_FIELD.to_string(), Value::from(id));
        record.extend(fields.into_iter().filter(|(k, _)| k != ID_FIELD));
        Self(record)
    }

    /// The store-assigned id.
    pub fn id(&self) -> Option<u64> {
        self.0.get(ID_FIELD).and_then(Value::as_u64)
    }

    /// Look up a field by name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}

#[derive(Debug)]
struct Inner {
    users: Vec<User>,
    last_id: u64,
}

/// Shared handle to the user collection.
///
/// Cloning is cheap; all clones see the same records.
#[derive(Debug, Clone)]
pub struct UserStore {
    inner: Arc<RwLock<Inner>>,
}

impl UserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                users: Vec::new(),
                last_id: 0,
            })),
        }
    }

    /// Insert a new record and return it with its assigned id.
    pub async fn create(&self, fields: Fields) -> User {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let user = User::new(inner.last_id, fields);
        inner.users.push(user.clone());
        debug!(id = inner.last_id, total = inner.users.len(), "user created");
        user
    }

    /// All records in insertion order.
    pub async fn list(&self) -> Vec<User> {
        self.inner.read().await.users.clone()
    }

    /// Merge `fields` into the record with the given id.
    pub async fn update(&self, id: u64, fields: Fields) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;
        let user = inner
            .users
            .iter_mut()
            .find(|u| u.id() == Some(id))
            .ok_or(StoreError::NotFound { id: Some(id) })?;

        user.0.extend(fields);
        user.0.insert(ID_FIELD.to_string(), Value::from(id));
        debug!(id, "user updated");
        Ok(user.clone())
    }

    /// Remove the record with the given id. Absent ids are not an error.
    pub async fn delete(&self, id: u64) {
        let mut inner = self.inner.write().await;
        let before = inner.users.len();
        inner.users.retain(|u| u.id() != Some(id));
        debug!(id, removed = before - inner.users.len(), "user delete");
    }

    /// Number of records currently held.
    pub async fn len(&self) -> usize {
        self.inner.read().await.users.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

//! Object storage contract.
//!
//! Uploaded images are handed to a hosted bucket which answers with a
//! durable public URL. Retrying a failed `put` is always safe: every call
//! stores under a fresh key.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

use crate::error::StorageError;

/// Binary object storage returning public URLs
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Stores `bytes` and returns the public URL of the stored object.
    async fn put(&self, bytes: Vec<u8>, suggested_name: &str) -> Result<String, StorageError>;
}

/// An object held by [`InMemoryObjectStorage`]
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub key: String,
    pub bytes: Vec<u8>,
}

/// In-memory bucket for development and tests
pub struct InMemoryObjectStorage {
    base_url: String,
    objects: RwLock<HashMap<String, StoredObject>>,
    available: AtomicBool,
}

impl InMemoryObjectStorage {
    /// Create an empty bucket serving URLs under `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            objects: RwLock::new(HashMap::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Simulate an outage (`false`) or recovery (`true`)
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Look up an object by its public URL
    pub fn get(&self, url: &str) -> Option<StoredObject> {
        self.objects.read().get(url).cloned()
    }

    /// Number of stored objects
    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    /// Check whether the bucket is empty
    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }
}

impl Default for InMemoryObjectStorage {
    fn default() -> Self {
        Self::new("memory://images")
    }
}

/// Keeps `[A-Za-z0-9._-]`, replacing everything else with `-`.
fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "object".to_string()
    } else {
        cleaned
    }
}

#[async_trait]
impl ObjectStorage for InMemoryObjectStorage {
    async fn put(&self, bytes: Vec<u8>, suggested_name: &str) -> Result<String, StorageError> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable);
        }
        if bytes.is_empty() {
            return Err(StorageError::Rejected {
                name: suggested_name.to_string(),
                reason: "empty upload".to_string(),
            });
        }

        let key = format!("{}-{}", Uuid::new_v4(), sanitize_name(suggested_name));
        let url = format!("{}/{}", self.base_url, key);
        tracing::debug!("Stored {} bytes as {}", bytes.len(), key);
        self.objects
            .write()
            .insert(url.clone(), StoredObject { key, bytes });
        Ok(url)
    }
}

//! Key/value storage abstraction used to persist rate snapshots

use anyhow::Result;
use async_trait::async_trait;

/// A named collection of opaque values.
#[async_trait]
pub trait KeyValueCollection: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()>;
}

//! Rate source abstraction

use super::error::Result;
use super::snapshot::RateSnapshot;
use async_trait::async_trait;

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches the latest published rate table.
    async fn fetch_latest(&self) -> Result<RateSnapshot>;
}

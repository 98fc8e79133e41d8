//! Loads, persists and refreshes the daily rate snapshot.

use crate::core::cache::KeyValueCollection;
use crate::core::error::Result;
use crate::core::rates::RateProvider;
use crate::core::snapshot::{Clock, RateSnapshot, SystemClock};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

/// Key of the persisted snapshot inside its collection.
pub const SNAPSHOT_KEY: &str = "latest_rates";

/// Holds the current rate snapshot and keeps it fresh for the day.
pub struct RateStore<P: RateProvider> {
    provider: P,
    collection: Arc<dyn KeyValueCollection>,
    clock: Box<dyn Clock>,
    current: RwLock<Option<Arc<RateSnapshot>>>,
    // Serialises fetches so only one request is ever in flight
    fetch_lock: Mutex<()>,
}

impl<P: RateProvider> RateStore<P> {
    pub fn new(provider: P, collection: Arc<dyn KeyValueCollection>) -> Self {
        Self::with_clock(provider, collection, Box::new(SystemClock))
    }

    pub fn with_clock(
        provider: P,
        collection: Arc<dyn KeyValueCollection>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            provider,
            collection,
            clock,
            current: RwLock::new(None),
            fetch_lock: Mutex::new(()),
        }
    }

    /// Whether a snapshot has been loaded. Presentation shows a loading
    /// indicator while this is false.
    pub async fn is_loaded(&self) -> bool {
        self.current.read().await.is_some()
    }

    pub async fn current(&self) -> Option<Arc<RateSnapshot>> {
        self.current.read().await.clone()
    }

    /// Returns a snapshot that is fresh for today, fetching one if needed.
    ///
    /// When a refresh fails but an older snapshot is available, the older
    /// snapshot is returned and the failure is logged.
    pub async fn get_rates(&self) -> Result<Arc<RateSnapshot>> {
        let today = self.clock.today();
        if let Some(snapshot) = self.fresh_in_memory(today).await {
            return Ok(snapshot);
        }

        let _guard = self.fetch_lock.lock().await;
        // Another caller may have refreshed while we waited
        if let Some(snapshot) = self.fresh_in_memory(today).await {
            return Ok(snapshot);
        }

        let fallback = match self.current().await {
            Some(snapshot) => Some(snapshot),
            None => self.load_persisted().await,
        };

        if let Some(snapshot) = &fallback {
            if !snapshot.is_stale(today) {
                debug!(date = %snapshot.date(), "Using persisted rates");
                self.replace(Arc::clone(snapshot)).await;
                return Ok(Arc::clone(snapshot));
            }
            info!(date = %snapshot.date(), "Cached rates are stale, refreshing");
        }

        match self.fetch_and_store().await {
            Ok(snapshot) => Ok(snapshot),
            Err(e) => match fallback {
                Some(stale) => {
                    warn!(error = %e, date = %stale.date(), "Refresh failed, keeping stale rates");
                    self.replace(Arc::clone(&stale)).await;
                    Ok(stale)
                }
                None => Err(e),
            },
        }
    }

    /// Fetches new rates regardless of freshness. The previous snapshot is
    /// kept if the fetch fails.
    pub async fn refresh(&self) -> Result<Arc<RateSnapshot>> {
        let _guard = self.fetch_lock.lock().await;
        self.fetch_and_store().await
    }

    async fn fresh_in_memory(&self, today: chrono::NaiveDate) -> Option<Arc<RateSnapshot>> {
        self.current
            .read()
            .await
            .as_ref()
            .filter(|snapshot| !snapshot.is_stale(today))
            .cloned()
    }

    async fn load_persisted(&self) -> Option<Arc<RateSnapshot>> {
        let bytes = match self.collection.get(SNAPSHOT_KEY).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!("No persisted rates");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "Failed to read persisted rates");
                return None;
            }
        };

        match RateSnapshot::from_json(&bytes) {
            Ok(snapshot) => Some(Arc::new(snapshot)),
            Err(e) => {
                warn!(error = %e, "Discarding unreadable persisted rates");
                None
            }
        }
    }

    async fn fetch_and_store(&self) -> Result<Arc<RateSnapshot>> {
        let snapshot = Arc::new(self.provider.fetch_latest().await?);
        info!(base = %snapshot.base(), date = %snapshot.date(), "Fetched rates");

        match snapshot.to_json() {
            Ok(bytes) => {
                if let Err(e) = self.collection.put(SNAPSHOT_KEY, bytes).await {
                    warn!(error = %e, "Failed to persist rates");
                }
            }
            Err(e) => warn!(error = %e, "Failed to encode rates"),
        }

        self.replace(Arc::clone(&snapshot)).await;
        Ok(snapshot)
    }

    async fn replace(&self, snapshot: Arc<RateSnapshot>) {
        *self.current.write().await = Some(snapshot);
    }
}

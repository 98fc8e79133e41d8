pub mod disk;
pub mod memory;

use crate::core::cache::KeyValueCollection;
use disk::DiskCollection;
use fjall::{Keyspace, PartitionCreateOptions};
use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, RwLock},
};
use tracing::{debug, warn};

/// A thread-safe store of named collections persisted in one fjall keyspace.
pub struct KeyValueStore {
    collections: RwLock<HashMap<String, Arc<dyn KeyValueCollection>>>,
    keyspace: Option<Keyspace>,
}

impl KeyValueStore {
    /// Opens a store whose collections live under `data_path/cache`.
    pub fn open(data_path: &Path) -> Self {
        let cache_dir = data_path.join("cache");
        let keyspace = match fjall::Config::new(&cache_dir).open() {
            Ok(keyspace) => {
                debug!("Opened cache keyspace at {}", cache_dir.display());
                Some(keyspace)
            }
            Err(e) => {
                warn!(error = %e, "Failed to open cache at {}", cache_dir.display());
                None
            }
        };

        Self {
            collections: RwLock::new(HashMap::new()),
            keyspace,
        }
    }

    /// Returns the collection called `name`, opening it on first use. `None`
    /// when the keyspace or partition could not be opened.
    pub fn collection(&self, name: &str) -> Option<Arc<dyn KeyValueCollection>> {
        let mut collections = self
            .collections
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(collection) = collections.get(name) {
            return Some(Arc::clone(collection));
        }

        let keyspace = self.keyspace.as_ref()?;
        let collection: Arc<dyn KeyValueCollection> =
            match keyspace.open_partition(name, PartitionCreateOptions::default()) {
                Ok(partition) => Arc::new(DiskCollection::new(keyspace.clone(), partition)),
                Err(e) => {
                    warn!(error = %e, "Failed to open cache partition {}", name);
                    return None;
                }
            };
        collections.insert(name.to_string(), Arc::clone(&collection));
        Some(collection)
    }
}

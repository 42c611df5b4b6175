use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use super::{StoreBuilder, StoreConfig};
use crate::collection::{Collection, CollectionConfig};
use crate::common::{ReadExecutor, WriteExecutor};
use crate::errors::{ErrorKind, StoreError, StoreResult};

/// A registry of named collections.
///
/// `Store` is the entry point of the crate. It is cheap to clone and every
/// clone refers to the same set of collections. The name registry has its own
/// lock, so creating or deleting a collection never waits on operations running
/// against collection handles obtained earlier.
///
/// Deleting a collection only unregisters it. Handles already held by callers
/// keep working on the detached collection until they are dropped.
///
/// # Examples
///
/// ```rust,ignore
/// use docstore::{doc, store::Store, collection::CollectionConfig};
///
/// let store = Store::new();
/// let users = store.create_collection("users", CollectionConfig::default())?;
/// users.put(doc! { id: "1", name: "Ann" })?;
/// assert_eq!(store.get_collection("users")?.num_documents(), 1);
/// ```
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    config: StoreConfig,
    collections: RwLock<HashMap<String, Collection>>,
}

impl Store {
    /// Creates an empty store with no snapshot file.
    pub fn new() -> Store {
        Store::with_config(StoreConfig::default())
    }

    /// Starts configuring a store.
    pub fn builder() -> StoreBuilder {
        StoreBuilder::new()
    }

    pub(crate) fn with_config(config: StoreConfig) -> Store {
        Store {
            inner: Arc::new(StoreInner {
                config,
                collections: RwLock::new(HashMap::new()),
            }),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    /// Creates and registers an empty collection.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::CollectionAlreadyExists] if the name is taken.
    pub fn create_collection(&self, name: &str, config: CollectionConfig) -> StoreResult<Collection> {
        let mut collections = self.inner.collections.write();
        if collections.contains_key(name) {
            log::error!("A collection with name {} already exists", name);
            return Err(StoreError::new(
                &format!("Collection '{}' already exists", name),
                ErrorKind::CollectionAlreadyExists,
            ));
        }

        let collection = Collection::new(name, config);
        collections.insert(name.to_string(), collection.clone());
        log::info!(
            "Created collection '{}' keyed on '{}'",
            name,
            collection.config().primary_key()
        );
        Ok(collection)
    }

    /// Returns a handle to the collection registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::CollectionNotFound] if there is none.
    pub fn get_collection(&self, name: &str) -> StoreResult<Collection> {
        self.inner
            .collections
            .read_with(|collections| collections.get(name).cloned())
            .ok_or_else(|| collection_not_found(name))
    }

    /// Unregisters the collection `name`.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::CollectionNotFound] if there is none.
    pub fn delete_collection(&self, name: &str) -> StoreResult<()> {
        let removed = self
            .inner
            .collections
            .write_with(|collections| collections.remove(name));

        match removed {
            Some(collection) => {
                log::info!(
                    "Deleted collection '{}' holding {} documents",
                    name,
                    collection.num_documents()
                );
                Ok(())
            }
            None => Err(collection_not_found(name)),
        }
    }

    pub fn has_collection(&self, name: &str) -> bool {
        self.inner
            .collections
            .read_with(|collections| collections.contains_key(name))
    }

    /// Names of all registered collections, sorted.
    pub fn list_collections(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .inner
            .collections
            .read_with(|collections| collections.keys().cloned().collect());
        names.sort();
        names
    }

    pub fn num_collections(&self) -> usize {
        self.inner.collections.read_with(|collections| collections.len())
    }

    // Handles sorted by name, taken under one read lock.
    pub(crate) fn collections_sorted(&self) -> Vec<Collection> {
        let mut collections: Vec<Collection> = self
            .inner
            .collections
            .read_with(|collections| collections.values().cloned().collect());
        collections.sort_by(|a, b| a.name().cmp(b.name()));
        collections
    }
}

impl Default for Store {
    fn default() -> Self {
        Store::new()
    }
}

impl Debug for Store {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("collections", &self.list_collections())
            .field("snapshot_path", &self.inner.config.snapshot_path())
            .finish()
    }
}

fn collection_not_found(name: &str) -> StoreError {
    log::warn!("Collection '{}' not found", name);
    StoreError::new(
        &format!("Collection '{}' not found", name),
        ErrorKind::CollectionNotFound,
    )
}

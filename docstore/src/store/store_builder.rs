use std::path::PathBuf;

use super::{ProvisionedCollection, Store, StoreConfig};
use crate::collection::CollectionConfig;
use crate::errors::{ErrorKind, StoreError, StoreResult};

/// Fluent builder for a [Store].
///
/// Configuration mistakes are recorded as they happen and reported by
/// [StoreBuilder::open], so calls can be chained without checking each one.
///
/// # Examples
///
/// ```rust,ignore
/// use docstore::{store::Store, collection::CollectionConfig};
///
/// let store = Store::builder()
///     .snapshot_file("data/store.json")
///     .collection("users", CollectionConfig::new("email")?)
///     .index("users", "name")
///     .open()?;
/// ```
#[derive(Debug, Default)]
pub struct StoreBuilder {
    error: Option<StoreError>,
    snapshot_path: Option<PathBuf>,
    collections: Vec<ProvisionedCollection>,
}

impl StoreBuilder {
    pub fn new() -> Self {
        StoreBuilder::default()
    }

    /// Restores the store from `path` on open if the file exists, and makes
    /// [Store::save] write there.
    #[cfg(feature = "serde")]
    pub fn snapshot_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }

    /// Ensures a collection named `name` exists once the store is open.
    pub fn collection(mut self, name: &str, config: CollectionConfig) -> Self {
        if self.error.is_none() && self.find(name).is_some() {
            log::error!("Collection {} is already provisioned", name);
            self.error = Some(StoreError::new(
                &format!("Collection '{}' is provisioned twice", name),
                ErrorKind::InvalidConfiguration,
            ));
        }
        if self.error.is_none() {
            self.collections.push(ProvisionedCollection::new(name, config));
        }
        self
    }

    /// Ensures an index over `field_name` exists on a provisioned collection
    /// once the store is open.
    pub fn index(mut self, collection: &str, field_name: &str) -> Self {
        if self.error.is_some() {
            return self;
        }
        match self.collections.iter_mut().find(|c| c.name() == collection) {
            Some(provisioned) => {
                provisioned.add_index(field_name);
            }
            None => {
                log::error!("Cannot index {}, collection {} is not provisioned", field_name, collection);
                self.error = Some(StoreError::new(
                    &format!("Collection '{}' must be provisioned before it is indexed", collection),
                    ErrorKind::InvalidConfiguration,
                ));
            }
        }
        self
    }

    /// Opens the store.
    ///
    /// The snapshot file, when configured and present, is loaded first.
    /// Provisioned collections missing from it are created, and then every
    /// provisioned index is built.
    pub fn open(self) -> StoreResult<Store> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let config = StoreConfig::new(self.snapshot_path, self.collections);
        let store = Store::with_config(config.clone());

        restore_snapshot(&store, &config)?;

        for provisioned in config.collections() {
            let collection = match store.get_collection(provisioned.name()) {
                Ok(existing) => {
                    if existing.config() != provisioned.config() {
                        log::warn!(
                            "Collection {} was restored keyed on '{}', ignoring configured '{}'",
                            provisioned.name(),
                            existing.config().primary_key(),
                            provisioned.config().primary_key()
                        );
                    }
                    existing
                }
                Err(_) => store.create_collection(provisioned.name(), provisioned.config().clone())?,
            };

            for field_name in provisioned.indexes() {
                if !collection.has_index(field_name) {
                    collection.create_index(field_name)?;
                }
            }
        }

        Ok(store)
    }

    fn find(&self, name: &str) -> Option<&ProvisionedCollection> {
        self.collections.iter().find(|c| c.name() == name)
    }
}

#[cfg(feature = "serde")]
fn restore_snapshot(store: &Store, config: &StoreConfig) -> StoreResult<()> {
    if let Some(path) = config.snapshot_path() {
        if path.exists() {
            let bytes = super::snapshot::read_file(path)?;
            super::snapshot::restore(store, &bytes)?;
            log::info!("Restored store from {}", path.display());
        } else {
            log::info!("Snapshot {} does not exist yet, starting empty", path.display());
        }
    }
    Ok(())
}

#[cfg(not(feature = "serde"))]
fn restore_snapshot(_store: &Store, _config: &StoreConfig) -> StoreResult<()> {
    Ok(())
}

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::collection::CollectionConfig;

/// A collection the store creates when it is opened, together with the fields
/// to index on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedCollection {
    name: String,
    config: CollectionConfig,
    indexes: Vec<String>,
}

impl ProvisionedCollection {
    pub(crate) fn new(name: &str, config: CollectionConfig) -> Self {
        ProvisionedCollection {
            name: name.to_string(),
            config,
            indexes: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &CollectionConfig {
        &self.config
    }

    /// Indexed field names, in the order they were requested.
    pub fn indexes(&self) -> &[String] {
        &self.indexes
    }

    pub(crate) fn add_index(&mut self, field_name: &str) -> bool {
        if self.indexes.iter().any(|name| name == field_name) {
            return false;
        }
        self.indexes.push(field_name.to_string());
        true
    }
}

/// Settings a [crate::store::Store] was opened with.
///
/// The configuration is frozen once the store is open; clones share it.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    inner: Arc<StoreConfigInner>,
}

#[derive(Debug, Default)]
struct StoreConfigInner {
    snapshot_path: Option<PathBuf>,
    collections: Vec<ProvisionedCollection>,
}

impl StoreConfig {
    pub(crate) fn new(
        snapshot_path: Option<PathBuf>,
        collections: Vec<ProvisionedCollection>,
    ) -> Self {
        StoreConfig {
            inner: Arc::new(StoreConfigInner {
                snapshot_path,
                collections,
            }),
        }
    }

    /// File the store is restored from on open and saved to by
    /// [crate::store::Store::save], if any.
    pub fn snapshot_path(&self) -> Option<&Path> {
        self.inner.snapshot_path.as_deref()
    }

    pub fn collections(&self) -> &[ProvisionedCollection] {
        &self.inner.collections
    }
}

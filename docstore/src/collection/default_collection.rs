use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use super::{CollectionConfig, Document, QueryOptions};
use crate::common::{Field, ReadExecutor, WriteExecutor};
use crate::errors::{ErrorKind, StoreError, StoreResult};
use crate::index::SortedIndex;

/// A keyed collection of documents with optional secondary indexes.
///
/// `Collection` is a handle: clones share the same documents and indexes, so a
/// collection fetched from a [crate::store::Store] can be passed to as many
/// threads as needed.
///
/// # Concurrency
///
/// The document map and the index set sit behind two independent
/// reader/writer locks. Reads (`get`, `list`, `query`) run concurrently; a write
/// excludes everything else on the lock it holds. A `put` or `delete` first
/// updates the document map and releases it, then updates the indexes, so a
/// reader may briefly see a new document before the indexes reflect it (or an
/// index entry for a document that was just deleted). Callers that need both
/// views to move together must coordinate externally.
///
/// When both locks are needed, the index lock is always taken first. Index
/// maintenance re-reads the key's current document under that order, which
/// keeps racing writers to the same key from leaving a stale entry behind.
///
/// # Examples
///
/// ```rust,ignore
/// use docstore::{doc, collection::QueryOptions};
///
/// let users = store.create_collection("users", CollectionConfig::default())?;
/// users.put(doc! { id: "1", name: "Ann" })?;
/// users.create_index("name")?;
/// let found = users.query("name", &QueryOptions::new().min("A").max("B"))?;
/// ```
#[derive(Clone)]
pub struct Collection {
    inner: Arc<CollectionInner>,
}

struct CollectionInner {
    name: String,
    config: CollectionConfig,
    documents: RwLock<HashMap<String, Document>>,
    indexes: RwLock<HashMap<String, SortedIndex>>,
}

impl Collection {
    pub(crate) fn new(name: &str, config: CollectionConfig) -> Self {
        Collection {
            inner: Arc::new(CollectionInner {
                name: name.to_string(),
                config,
                documents: RwLock::new(HashMap::new()),
                indexes: RwLock::new(HashMap::new()),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn config(&self) -> &CollectionConfig {
        &self.inner.config
    }

    /// Inserts `document`, or replaces the document already stored under the
    /// same primary key, then brings every secondary index up to date.
    ///
    /// # Errors
    ///
    /// * [ErrorKind::MissingPrimaryKeyField] if the primary key field is absent
    /// * [ErrorKind::InvalidPrimaryKeyType] if it is not a string
    /// * [ErrorKind::EmptyPrimaryKey] if it is an empty string
    pub fn put(&self, document: Document) -> StoreResult<()> {
        let key = self.primary_key_of(&document)?;

        let replaced = self
            .inner
            .documents
            .write_with(|documents| documents.insert(key.clone(), document).is_some());

        if replaced {
            log::debug!("Replaced document '{}' in collection '{}'", key, self.inner.name);
        } else {
            log::debug!("Added document '{}' to collection '{}'", key, self.inner.name);
        }

        self.sync_indexes(&key);
        Ok(())
    }

    /// Returns a copy of the document stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::DocumentNotFound] if there is none.
    pub fn get(&self, key: &str) -> StoreResult<Document> {
        self.inner
            .documents
            .read_with(|documents| documents.get(key).cloned())
            .ok_or_else(|| self.document_not_found(key))
    }

    /// Returns whether a document is stored under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.inner
            .documents
            .read_with(|documents| documents.contains_key(key))
    }

    /// Removes the document stored under `key` and purges it from every index.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::DocumentNotFound] if there is none.
    pub fn delete(&self, key: &str) -> StoreResult<()> {
        let removed = self
            .inner
            .documents
            .write_with(|documents| documents.remove(key).is_some());

        if !removed {
            return Err(self.document_not_found(key));
        }

        log::debug!("Deleted document '{}' from collection '{}'", key, self.inner.name);
        self.sync_indexes(key);
        Ok(())
    }

    /// Returns a copy of every document, in no particular order.
    ///
    /// An empty collection yields an empty vector; this never fails.
    pub fn list(&self) -> Vec<Document> {
        self.inner
            .documents
            .read_with(|documents| documents.values().cloned().collect())
    }

    /// Same as [Collection::list].
    pub fn get_all(&self) -> Vec<Document> {
        self.list()
    }

    /// Number of documents currently stored.
    pub fn num_documents(&self) -> usize {
        self.inner.documents.read_with(|documents| documents.len())
    }

    /// Creates a sorted index over the string field `field_name`, built from
    /// the current documents.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::IndexAlreadyExists] if the field is already indexed.
    pub fn create_index(&self, field_name: &str) -> StoreResult<()> {
        let mut indexes = self.inner.indexes.write();
        if indexes.contains_key(field_name) {
            log::error!(
                "Index on '{}' already exists in collection '{}'",
                field_name,
                self.inner.name
            );
            return Err(StoreError::new(
                &format!("Index on '{}' already exists", field_name),
                ErrorKind::IndexAlreadyExists,
            ));
        }

        let index = self
            .inner
            .documents
            .read_with(|documents| SortedIndex::build(field_name, documents.iter()));

        log::info!(
            "Created index on '{}' in collection '{}' with {} entries",
            field_name,
            self.inner.name,
            index.len()
        );
        indexes.insert(field_name.to_string(), index);
        Ok(())
    }

    /// Drops the index over `field_name`.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::IndexNotFound] if the field is not indexed.
    pub fn delete_index(&self, field_name: &str) -> StoreResult<()> {
        let removed = self
            .inner
            .indexes
            .write_with(|indexes| indexes.remove(field_name).is_some());

        if !removed {
            return Err(self.index_not_found(field_name));
        }

        log::info!("Deleted index on '{}' in collection '{}'", field_name, self.inner.name);
        Ok(())
    }

    pub fn has_index(&self, field_name: &str) -> bool {
        self.inner
            .indexes
            .read_with(|indexes| indexes.contains_key(field_name))
    }

    /// Names of the indexed fields, sorted.
    pub fn list_indexes(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .inner
            .indexes
            .read_with(|indexes| indexes.keys().cloned().collect());
        names.sort();
        names
    }

    /// Returns copies of the documents whose indexed `field_name` value lies
    /// within the bounds of `options`, ascending by that value unless a
    /// descending order is requested.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::IndexNotFound] if the field is not indexed.
    pub fn query(&self, field_name: &str, options: &QueryOptions) -> StoreResult<Vec<Document>> {
        let mut result = self.inner.indexes.read_with(|indexes| {
            indexes.get(field_name).map(|index| {
                index
                    .range(options.min_value(), options.max_value())
                    .iter()
                    .map(|entry| entry.document.clone())
                    .collect::<Vec<_>>()
            })
        })
        .ok_or_else(|| self.index_not_found(field_name))?;

        if options.sort_order().is_descending() {
            result.reverse();
        }
        Ok(result)
    }

    fn primary_key_of(&self, document: &Document) -> StoreResult<String> {
        let field_name = self.inner.config.primary_key();
        match document.get(field_name) {
            None => {
                log::error!(
                    "Document is missing primary key field '{}' for collection '{}'",
                    field_name,
                    self.inner.name
                );
                Err(StoreError::new(
                    &format!("Missing primary key field '{}'", field_name),
                    ErrorKind::MissingPrimaryKeyField,
                ))
            }
            Some(Field::String(key)) if key.is_empty() => {
                log::error!("Primary key field '{}' is empty", field_name);
                Err(StoreError::new(
                    &format!("Primary key field '{}' cannot be empty", field_name),
                    ErrorKind::EmptyPrimaryKey,
                ))
            }
            Some(Field::String(key)) => Ok(key.clone()),
            Some(other) => {
                log::error!(
                    "Primary key field '{}' must be a string, found {}",
                    field_name,
                    other.kind()
                );
                Err(StoreError::new(
                    &format!("Primary key field '{}' must be a string, found {}", field_name, other.kind()),
                    ErrorKind::InvalidPrimaryKeyType,
                ))
            }
        }
    }

    // Brings every index in line with whatever is stored under `key` right now.
    fn sync_indexes(&self, key: &str) {
        let mut indexes = self.inner.indexes.write();
        if indexes.is_empty() {
            return;
        }

        let current = self
            .inner
            .documents
            .read_with(|documents| documents.get(key).cloned());

        for index in indexes.values_mut() {
            match &current {
                Some(document) => index.upsert(key, document),
                None => {
                    index.remove(key);
                }
            }
            debug_assert!(index.is_consistent(), "index '{}' is inconsistent", index.field_name());
        }
    }

    fn document_not_found(&self, key: &str) -> StoreError {
        log::warn!("Document '{}' not found in collection '{}'", key, self.inner.name);
        StoreError::new(
            &format!("Document '{}' not found", key),
            ErrorKind::DocumentNotFound,
        )
    }

    fn index_not_found(&self, field_name: &str) -> StoreError {
        log::warn!(
            "Index on '{}' not found in collection '{}'",
            field_name,
            self.inner.name
        );
        StoreError::new(
            &format!("Index on '{}' not found", field_name),
            ErrorKind::IndexNotFound,
        )
    }
}

impl Debug for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("name", &self.inner.name)
            .field("primary_key", &self.inner.config.primary_key())
            .field("documents", &self.num_documents())
            .field("indexes", &self.list_indexes())
            .finish()
    }
}

//! JSON snapshots of a whole store.
//!
//! ```json
//! {"collections": {"users": {
//!     "config": {"primaryKey": "id"},
//!     "documents": {"1": {"fields": {
//!         "id":  {"type": "string", "value": "1"},
//!         "age": {"type": "number", "value": 30}
//!     }}}
//! }}}
//! ```
//!
//! Array and object values are written as plain JSON under their tag. Indexes
//! are not part of a snapshot and have to be created again after a restore.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::Store;
use crate::collection::{CollectionConfig, Document};
use crate::common::{Field, FieldKind};
use crate::errors::{ErrorKind, StoreError, StoreResult};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreSnapshot {
    #[serde(default)]
    collections: BTreeMap<String, CollectionSnapshot>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CollectionSnapshot {
    config: ConfigSnapshot,
    #[serde(default)]
    documents: BTreeMap<String, DocumentSnapshot>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigSnapshot {
    primary_key: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct DocumentSnapshot {
    #[serde(default)]
    fields: BTreeMap<String, FieldSnapshot>,
}

#[derive(Debug, Serialize, Deserialize)]
struct FieldSnapshot {
    #[serde(rename = "type")]
    kind: String,
    value: Value,
}

impl Store {
    /// Serializes every collection and document into the snapshot format.
    pub fn dump(&self) -> StoreResult<Vec<u8>> {
        let snapshot = capture(self)?;
        let bytes = serde_json::to_vec(&snapshot).map_err(|err| {
            log::error!("Failed to encode store snapshot: {}", err);
            StoreError::from(err)
        })?;
        log::debug!(
            "Dumped {} collections into {} bytes",
            snapshot.collections.len(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// Writes [Store::dump] to `path`, replacing any existing file.
    pub fn dump_to_file(&self, path: impl AsRef<Path>) -> StoreResult<()> {
        let path = path.as_ref();
        let bytes = self.dump()?;
        fs::write(path, bytes).map_err(|err| {
            log::error!("Failed to write snapshot to {}: {}", path.display(), err);
            StoreError::from(err)
        })?;
        log::info!("Saved store snapshot to {}", path.display());
        Ok(())
    }

    /// Writes a snapshot to the file the store was configured with.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::InvalidConfiguration] if no snapshot file is set.
    pub fn save(&self) -> StoreResult<()> {
        match self.config().snapshot_path() {
            Some(path) => self.dump_to_file(path),
            None => {
                log::error!("Cannot save store, no snapshot file is configured");
                Err(StoreError::new(
                    "No snapshot file is configured",
                    ErrorKind::InvalidConfiguration,
                ))
            }
        }
    }

    /// Rebuilds a store from bytes produced by [Store::dump].
    ///
    /// # Errors
    ///
    /// * [ErrorKind::EncodingError] for malformed JSON or a document whose
    ///   stored key disagrees with its primary key field
    /// * [ErrorKind::UnsupportedFieldType] for an unknown type tag
    /// * any error [crate::collection::Collection::put] reports for a document
    pub fn from_dump(bytes: &[u8]) -> StoreResult<Store> {
        let store = Store::new();
        restore(&store, bytes)?;
        Ok(store)
    }

    /// Reads `path` and rebuilds a store from its contents.
    pub fn from_file(path: impl AsRef<Path>) -> StoreResult<Store> {
        let path = path.as_ref();
        let bytes = read_file(path)?;
        let store = Store::from_dump(&bytes)?;
        log::info!("Restored store from {}", path.display());
        Ok(store)
    }
}

pub(crate) fn read_file(path: &Path) -> StoreResult<Vec<u8>> {
    fs::read(path).map_err(|err| {
        log::error!("Failed to read snapshot {}: {}", path.display(), err);
        StoreError::new_with_cause(
            &format!("Failed to read snapshot {}", path.display()),
            ErrorKind::IOError,
            StoreError::from(err),
        )
    })
}

/// Loads every collection in `bytes` into `store`. Collections that already
/// exist in `store` are rejected with [ErrorKind::CollectionAlreadyExists].
pub(crate) fn restore(store: &Store, bytes: &[u8]) -> StoreResult<()> {
    let snapshot: StoreSnapshot = serde_json::from_slice(bytes).map_err(|err| {
        log::error!("Failed to decode store snapshot: {}", err);
        StoreError::from(err)
    })?;

    for (name, collection_snapshot) in snapshot.collections {
        let config = CollectionConfig::new(&collection_snapshot.config.primary_key)?;
        let collection = store.create_collection(&name, config)?;

        for (key, document_snapshot) in collection_snapshot.documents {
            let document = decode_document(document_snapshot)?;
            if document.get_str(collection.config().primary_key()) != Some(key.as_str()) {
                log::error!(
                    "Document stored under '{}' in collection '{}' carries a different primary key",
                    key,
                    name
                );
                return Err(StoreError::new(
                    &format!("Document '{}' in collection '{}' has a mismatched primary key", key, name),
                    ErrorKind::EncodingError,
                ));
            }
            collection.put(document)?;
        }

        log::debug!(
            "Restored collection '{}' with {} documents",
            name,
            collection.num_documents()
        );
    }
    Ok(())
}

fn capture(store: &Store) -> StoreResult<StoreSnapshot> {
    let mut collections = BTreeMap::new();
    for collection in store.collections_sorted() {
        let primary_key = collection.config().primary_key().to_string();
        let mut documents = BTreeMap::new();
        for document in collection.list() {
            let Some(key) = document.get_str(&primary_key).map(str::to_string) else {
                continue;
            };
            documents.insert(key, encode_document(&document)?);
        }
        collections.insert(
            collection.name().to_string(),
            CollectionSnapshot {
                config: ConfigSnapshot { primary_key },
                documents,
            },
        );
    }
    Ok(StoreSnapshot { collections })
}

fn encode_document(document: &Document) -> StoreResult<DocumentSnapshot> {
    let mut fields = BTreeMap::new();
    for (name, field) in document.iter() {
        fields.insert(
            name.clone(),
            FieldSnapshot {
                kind: field.kind().name().to_string(),
                value: field.to_json()?,
            },
        );
    }
    Ok(DocumentSnapshot { fields })
}

fn decode_document(snapshot: DocumentSnapshot) -> StoreResult<Document> {
    let mut document = Document::new();
    for (name, field_snapshot) in snapshot.fields {
        let kind = FieldKind::from_name(&field_snapshot.kind)?;
        let field = Field::from_json(field_snapshot.value)?;
        if field.kind() != kind {
            log::error!(
                "Field '{}' is tagged {} but holds a {} value",
                name,
                kind,
                field.kind()
            );
            return Err(StoreError::new(
                &format!("Field '{}' is tagged {} but holds a {} value", name, kind, field.kind()),
                ErrorKind::EncodingError,
            ));
        }
        document.put(name, field);
    }
    Ok(document)
}

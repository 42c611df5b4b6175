//! Store factory functions for benchmarks

use docstore::collection::{Collection, CollectionConfig, Document};
use docstore::errors::StoreResult;
use docstore::store::Store;
use std::path::{Path, PathBuf};
use std::sync::Once;
use uuid::Uuid;

static LOGGER: Once = Once::new();

/// Installs `env_logger` once per process. Set `RUST_LOG` to see store logs
/// while benchmarking.
pub fn init_logging() {
    LOGGER.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Context holding a store and, when it has one, its snapshot file
pub struct BenchContext {
    store: Store,
    snapshot_path: Option<PathBuf>,
}

impl BenchContext {
    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }

    /// The `bench` collection, created on first use.
    pub fn collection(&self) -> StoreResult<Collection> {
        match self.store.get_collection("bench") {
            Ok(collection) => Ok(collection),
            Err(_) => self.store.create_collection("bench", CollectionConfig::default()),
        }
    }
}

impl Drop for BenchContext {
    fn drop(&mut self) {
        if let Some(ref path) = self.snapshot_path {
            let _ = std::fs::remove_file(path);
        }
    }
}

/// Create an empty store
pub fn create_store() -> StoreResult<BenchContext> {
    init_logging();
    Ok(BenchContext {
        store: Store::new(),
        snapshot_path: None,
    })
}

/// Create an empty store backed by a unique snapshot file in the temp directory
pub fn create_snapshot_store() -> StoreResult<BenchContext> {
    init_logging();
    let path = std::env::temp_dir().join(format!("docstore_bench_{}.json", Uuid::new_v4()));
    let store = Store::builder().snapshot_file(&path).open()?;
    Ok(BenchContext {
        store,
        snapshot_path: Some(path),
    })
}

/// Create a store whose `bench` collection already holds `docs`, with an index
/// on every field in `indexes`
pub fn create_populated_store(docs: &[Document], indexes: &[&str]) -> StoreResult<BenchContext> {
    let ctx = create_store()?;
    let collection = ctx.collection()?;
    for document in docs {
        collection.put(document.clone())?;
    }
    for field_name in indexes {
        collection.create_index(field_name)?;
    }
    log::debug!(
        "Prepared bench store with {} documents and {} indexes",
        collection.num_documents(),
        indexes.len()
    );
    Ok(ctx)
}

//! # docstore - Embeddable Document Store
//!
//! `docstore` keeps semi-structured documents in memory, grouped into named
//! collections. Each collection is keyed by a configurable primary key field
//! and can maintain sorted secondary indexes over string fields for ordered
//! range queries. A generic LRU cache ships alongside for callers that want to
//! front hot lookups.
//!
//! ## Key Features
//!
//! - **Typed fields**: a closed set of value kinds (string, number, bool, array, object)
//! - **Copy semantics**: every read hands out an independent document
//! - **Sorted indexes**: kept in order on every write, queried by binary search
//! - **Concurrent access**: reader/writer locks per collection, shareable handles
//! - **Snapshots**: best-effort JSON dumps of a whole store (`serde` feature)
//! - **LRU cache**: O(1) get/put with recency-ordered eviction
//! - **Commands**: JSON request/response dispatch for network front ends (`serde` feature)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docstore::doc;
//! use docstore::collection::{CollectionConfig, QueryOptions};
//! use docstore::store::Store;
//!
//! # fn main() -> docstore::errors::StoreResult<()> {
//! let store = Store::new();
//! let users = store.create_collection("users", CollectionConfig::default())?;
//!
//! users.put(doc! { id: "1", name: "Carol" })?;
//! users.put(doc! { id: "2", name: "Alice" })?;
//! users.create_index("name")?;
//!
//! let sorted = users.query("name", &QueryOptions::new().min("A").max("C"))?;
//! assert_eq!(sorted[0].get_str("id"), Some("2"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`cache`] - Least-recently-used caches
//! - [`collection`] - Documents, collections and query options
//! - [`common`] - Field values, sort order and lock helpers
//! - [`errors`] - Error types and result definitions
//! - `protocol` - JSON commands dispatched against a store
//! - [`store`] - The collection registry, its builder and snapshots

pub mod cache;
pub mod collection;
pub mod common;
pub mod errors;
pub(crate) mod index;
#[cfg(feature = "serde")]
pub mod protocol;
pub mod store;

pub use collection::{Collection, CollectionConfig, Document, QueryOptions};
pub use common::{Field, FieldKind, SortOrder};
pub use errors::{ErrorKind, StoreError, StoreResult};
pub use store::Store;

#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    colog::init();
}

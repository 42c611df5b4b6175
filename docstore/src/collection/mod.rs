//! Documents, collections and the options that drive collection queries.

mod default_collection;
mod collection_config;
mod document;
mod query_options;

pub use default_collection::*;
pub use collection_config::*;
pub use document::*;
pub use query_options::*;

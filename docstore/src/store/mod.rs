//! The collection registry and the pieces that open, configure and snapshot it.
mod default_store;
#[cfg(feature = "serde")]
mod snapshot;
mod store_builder;
mod store_config;

pub use default_store::*;
pub use store_builder::*;
pub use store_config::*;

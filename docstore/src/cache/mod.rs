//! Fixed-capacity least-recently-used caches.
mod lru_cache;
mod shared_lru_cache;

pub use lru_cache::*;
pub use shared_lru_cache::*;

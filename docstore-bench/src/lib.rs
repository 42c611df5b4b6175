//! Benchmark support for `docstore`: generated documents and ready-made
//! stores that clean up after themselves.

pub mod data_gen;
pub mod stores;

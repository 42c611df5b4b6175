mod store_builder_test;
mod store_test;
mod snapshot_test;

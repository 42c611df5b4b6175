mod collection_test;
mod query_test;

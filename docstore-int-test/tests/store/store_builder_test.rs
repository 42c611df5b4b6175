use docstore::collection::{CollectionConfig, QueryOptions};
use docstore::doc;
use docstore::errors::ErrorKind;
use docstore::store::Store;
use docstore_int_test::test_util::{cleanup, create_test_context, ids, run_test};

#[test]
fn test_builder_provisions_schema() {
    run_test(
        create_test_context,
        |_ctx| {
            let store = Store::builder()
                .collection("users", CollectionConfig::default())
                .index("users", "last_name")
                .index("users", "first_name")
                .open()?;

            let users = store.get_collection("users")?;
            assert_eq!(users.list_indexes(), vec!["first_name", "last_name"]);
            assert_eq!(store.config().collections()[0].indexes(), &["last_name", "first_name"]);

            users.put(doc! { id: "1", last_name: "Zed" })?;
            users.put(doc! { id: "2", last_name: "Ada" })?;
            assert_eq!(ids(&users.query("last_name", &QueryOptions::new())?), vec!["2", "1"]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_builder_reports_configuration_errors() {
    run_test(
        create_test_context,
        |_ctx| {
            let err = Store::builder()
                .collection("users", CollectionConfig::default())
                .index("orders", "total")
                .open()
                .unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::InvalidConfiguration);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_context_store_starts_empty() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            assert_eq!(store.num_collections(), 0);
            assert_eq!(store.config().snapshot_path(), Some(ctx.snapshot_path()));
            assert!(!ctx.snapshot_path().exists());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_restored_collection_keeps_its_primary_key() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            let users = store.create_collection("users", CollectionConfig::new("email")?)?;
            users.put(doc! { email: "a@x" })?;
            store.save()?;

            let reopened = Store::builder()
                .snapshot_file(ctx.snapshot_path())
                .collection("users", CollectionConfig::default())
                .open()?;
            let users = reopened.get_collection("users")?;
            assert_eq!(users.config().primary_key(), "email");
            assert!(users.contains("a@x"));
            Ok(())
        },
        cleanup,
    )
}

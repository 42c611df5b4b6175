use docstore::collection::CollectionConfig;
use docstore::doc;
use docstore::errors::ErrorKind;
use docstore_int_test::test_util::{cleanup, create_test_context, run_test};

#[test]
fn test_create_and_get_collection() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            store.create_collection("users", CollectionConfig::default())?;
            store.create_collection("orders", CollectionConfig::new("order_id")?)?;

            assert!(store.has_collection("users"));
            assert_eq!(store.num_collections(), 2);
            assert_eq!(store.list_collections(), vec!["orders", "users"]);
            assert_eq!(store.get_collection("orders")?.config().primary_key(), "order_id");
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_collection_name_is_unique() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            let users = store.create_collection("users", CollectionConfig::default())?;
            users.put(doc! { id: "1" })?;

            let err = store
                .create_collection("users", CollectionConfig::default())
                .unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::CollectionAlreadyExists);
            assert_eq!(store.get_collection("users")?.num_documents(), 1);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_delete_collection() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            store.create_collection("users", CollectionConfig::default())?;
            store.delete_collection("users")?;

            assert!(!store.has_collection("users"));
            assert_eq!(
                store.get_collection("users").unwrap_err().kind(),
                &ErrorKind::CollectionNotFound
            );
            assert_eq!(
                store.delete_collection("users").unwrap_err().kind(),
                &ErrorKind::CollectionNotFound
            );
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_store_clones_share_registry() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            let other = store.clone();
            other.create_collection("users", CollectionConfig::default())?;
            assert!(store.has_collection("users"));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_registry_changes_do_not_block_existing_handles() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            let users = store.create_collection("users", CollectionConfig::default())?;
            users.create_index("name")?;

            store.create_collection("other", CollectionConfig::default())?;
            store.delete_collection("users")?;

            users.put(doc! { id: "1", name: "Ann" })?;
            assert_eq!(users.get("1")?.get_str("name"), Some("Ann"));
            assert_eq!(store.list_collections(), vec!["other"]);
            Ok(())
        },
        cleanup,
    )
}

use docstore::collection::{CollectionConfig, QueryOptions};
use docstore::common::Field;
use docstore::doc;
use docstore::errors::ErrorKind;
use docstore::store::Store;
use docstore_int_test::test_util::{
    cleanup, create_test_context, create_test_docs, ids, insert_test_documents, random_path, run_test,
};
use std::fs;

#[test]
fn test_dump_and_restore() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            let users = store.create_collection("users", CollectionConfig::default())?;
            insert_test_documents(&users)?;
            let orders = store.create_collection("orders", CollectionConfig::new("order_id")?)?;
            orders.put(doc! { order_id: "o-1", total: 12.5 })?;

            let restored = Store::from_dump(&store.dump()?)?;
            assert_eq!(restored.list_collections(), vec!["orders", "users"]);

            let users = restored.get_collection("users")?;
            for expected in create_test_docs() {
                let id = expected.get_str("id").unwrap_or_default().to_string();
                assert_eq!(users.get(&id)?, expected);
            }

            let orders = restored.get_collection("orders")?;
            assert_eq!(orders.config().primary_key(), "order_id");
            assert_eq!(orders.get("o-1")?.get("total"), Some(&Field::Number(12.5)));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_save_and_reopen() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            let users = store.create_collection("users", CollectionConfig::default())?;
            insert_test_documents(&users)?;
            users.create_index("city")?;
            store.save()?;
            assert!(ctx.snapshot_path().exists());

            let reopened = Store::builder()
                .snapshot_file(ctx.snapshot_path())
                .collection("users", CollectionConfig::default())
                .index("users", "city")
                .collection("audit", CollectionConfig::default())
                .open()?;

            assert_eq!(reopened.list_collections(), vec!["audit", "users"]);
            let users = reopened.get_collection("users")?;
            assert_eq!(users.num_documents(), 4);
            assert_eq!(ids(&users.query("city", &QueryOptions::new())?), vec!["2", "1", "3"]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_restore_does_not_rebuild_indexes() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            let users = store.create_collection("users", CollectionConfig::default())?;
            insert_test_documents(&users)?;
            users.create_index("city")?;
            store.dump_to_file(ctx.snapshot_path())?;

            let restored = Store::from_file(ctx.snapshot_path())?;
            let users = restored.get_collection("users")?;
            assert!(users.list_indexes().is_empty());
            assert_eq!(
                users.query("city", &QueryOptions::new()).unwrap_err().kind(),
                &ErrorKind::IndexNotFound
            );
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_restore_from_bad_input() {
    run_test(
        create_test_context,
        |ctx| {
            assert_eq!(Store::from_dump(b"{}")?.num_collections(), 0);
            assert_eq!(
                Store::from_dump(b"{invalid json").unwrap_err().kind(),
                &ErrorKind::EncodingError
            );
            assert_eq!(
                Store::from_file(random_path()).unwrap_err().kind(),
                &ErrorKind::IOError
            );

            fs::write(ctx.snapshot_path(), "{invalid json")?;
            assert_eq!(
                Store::from_file(ctx.snapshot_path()).unwrap_err().kind(),
                &ErrorKind::EncodingError
            );
            let err = Store::builder()
                .snapshot_file(ctx.snapshot_path())
                .open()
                .unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::EncodingError);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_restore_hand_written_snapshot() {
    run_test(
        create_test_context,
        |ctx| {
            let snapshot = r#"{"collections": {"users": {
                "config": {"primaryKey": "id"},
                "documents": {
                    "1": {"fields": {
                        "id": {"type": "string", "value": "1"},
                        "name": {"type": "string", "value": "Alice"}
                    }},
                    "2": {"fields": {
                        "id": {"type": "string", "value": "2"},
                        "age": {"type": "number", "value": 30},
                        "admin": {"type": "bool", "value": false},
                        "roles": {"type": "array", "value": ["a", "b"]},
                        "meta": {"type": "object", "value": {"level": 3}}
                    }}
                }
            }}}"#;
            fs::write(ctx.snapshot_path(), snapshot)?;

            let store = Store::from_file(ctx.snapshot_path())?;
            let users = store.get_collection("users")?;
            assert_eq!(users.get("1")?, doc! { id: "1", name: "Alice" });

            let second = users.get("2")?;
            assert_eq!(second.get("age"), Some(&Field::Number(30.0)));
            assert_eq!(second.get("admin"), Some(&Field::Bool(false)));
            assert_eq!(second.get("roles"), Some(&Field::from(vec!["a", "b"])));
            let level = second
                .get("meta")
                .and_then(Field::as_object)
                .and_then(|meta| meta.get("level"))
                .and_then(Field::as_number);
            assert_eq!(level, Some(3.0));
            Ok(())
        },
        cleanup,
    )
}

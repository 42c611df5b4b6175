use docstore::collection::CollectionConfig;
use docstore::common::Field;
use docstore::doc;
use docstore_int_test::test_util::{cleanup, create_test_context, create_test_docs, insert_test_documents, run_test};

#[test]
fn test_put_and_get() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.store().create_collection("test", CollectionConfig::default())?;
            insert_test_documents(&collection)?;

            assert_eq!(collection.num_documents(), 4);
            for expected in create_test_docs() {
                let id = expected.get_str("id").unwrap_or_default().to_string();
                assert_eq!(collection.get(&id)?, expected);
            }
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_put_replaces_whole_document() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.store().create_collection("test", CollectionConfig::default())?;
            collection.put(doc! { id: "1", first_name: "fn1", age: 30 })?;
            collection.put(doc! { id: "1", last_name: "ln1" })?;

            let document = collection.get("1")?;
            assert_eq!(collection.num_documents(), 1);
            assert!(!document.contains_field("first_name"));
            assert!(!document.contains_field("age"));
            assert_eq!(document.get_str("last_name"), Some("ln1"));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_get_returns_copy() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.store().create_collection("test", CollectionConfig::default())?;
            collection.put(doc! { id: "1", tags: vec!["a"] })?;

            let mut copy = collection.get("1")?;
            copy.put("tags", vec!["a", "b", "c"]);
            copy.put("extra", true);

            let stored = collection.get("1")?;
            assert_eq!(stored, doc! { id: "1", tags: vec!["a"] });
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_list_documents() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.store().create_collection("test", CollectionConfig::default())?;
            assert!(collection.list().is_empty());
            assert!(collection.get_all().is_empty());

            insert_test_documents(&collection)?;
            let mut ages: Vec<f64> = collection
                .list()
                .iter()
                .filter_map(|d| d.get("age").and_then(Field::as_number))
                .collect();
            ages.sort_by(|a, b| a.total_cmp(b));
            assert_eq!(ages, vec![19.0, 25.0, 31.0, 47.0]);
            assert_eq!(collection.get_all().len(), 4);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_delete_document() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.store().create_collection("test", CollectionConfig::default())?;
            insert_test_documents(&collection)?;

            collection.delete("2")?;
            assert_eq!(collection.num_documents(), 3);
            assert!(!collection.contains("2"));
            assert!(collection.get("2").is_err());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_custom_primary_key() {
    run_test(
        create_test_context,
        |ctx| {
            let config = CollectionConfig::new("email")?;
            let collection = ctx.store().create_collection("users", config)?;
            collection.put(doc! { email: "ann@example.com", id: 7 })?;

            assert_eq!(collection.config().primary_key(), "email");
            assert_eq!(collection.get("ann@example.com")?.get("id"), Some(&Field::Number(7.0)));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_handles_share_state() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            let first = store.create_collection("test", CollectionConfig::default())?;
            let second = store.get_collection("test")?;

            first.put(doc! { id: "1" })?;
            second.put(doc! { id: "2" })?;
            second.create_index("id")?;

            assert_eq!(first.num_documents(), 2);
            assert!(first.has_index("id"));
            Ok(())
        },
        cleanup,
    )
}

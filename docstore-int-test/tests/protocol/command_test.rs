use docstore::collection::CollectionConfig;
use docstore::protocol::{Request, Status};
use docstore::store::Store;
use docstore_int_test::test_util::{cleanup, create_test_context, run_test};

#[test]
fn test_commands_survive_save_and_reopen() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            for line in [
                r#"{"command": "create_collection", "payload": {"name": "users"}}"#,
                r#"{"command": "put_document", "payload": {"collection": "users", "document": {"id": "1", "city": "Berlin"}}}"#,
                r#"{"command": "put_document", "payload": {"collection": "users", "document": {"id": "2", "city": "Amsterdam"}}}"#,
            ] {
                let response = store.execute_json(line)?;
                assert!(response.starts_with(r#"{"status":"ok""#), "{}", response);
            }
            store.save()?;

            let reopened = Store::builder()
                .snapshot_file(ctx.snapshot_path())
                .collection("users", CollectionConfig::default())
                .open()?;
            assert_eq!(reopened.get_collection("users")?.num_documents(), 2);
            let response = reopened.execute(Request::CreateIndex {
                collection: "users".to_string(),
                field: "city".to_string(),
            });
            assert!(response.is_ok());

            let response = reopened.execute(Request::Query {
                collection: "users".to_string(),
                field: "city".to_string(),
                descending: false,
                min: None,
                max: None,
            });
            let ids: Vec<&str> = response
                .result
                .as_ref()
                .and_then(|result| result["documents"].as_array())
                .map(|documents| documents.iter().filter_map(|d| d["id"].as_str()).collect())
                .unwrap_or_default();
            assert_eq!(ids, vec!["2", "1"]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_failed_command_leaves_store_unchanged() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            store.execute_json(r#"{"command": "create_collection", "payload": {"name": "users"}}"#)?;

            let response = store.execute_json(
                r#"{"command": "put_document", "payload": {"collection": "users", "document": {"name": "x"}}}"#,
            )?;
            assert!(response.contains(r#""status":"error""#));
            assert!(response.contains("MissingPrimaryKeyField"));

            let response = store.execute(Request::DeleteCollection { name: "orders".to_string() });
            assert_eq!(response.status, Status::Error);
            assert_eq!(response.error_kind(), Some("CollectionNotFound"));

            assert_eq!(store.list_collections(), vec!["users"]);
            assert_eq!(store.get_collection("users")?.num_documents(), 0);
            Ok(())
        },
        cleanup,
    )
}

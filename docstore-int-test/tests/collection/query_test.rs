use docstore::collection::{between, order_by, CollectionConfig, QueryOptions};
use docstore::common::SortOrder;
use docstore::doc;
use docstore_int_test::test_util::{cleanup, create_test_context, ids, insert_test_documents, run_test};

#[test]
fn test_query_orders_by_indexed_value() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.store().create_collection("test", CollectionConfig::default())?;
            collection.put(doc! { id: "1", tag: "b" })?;
            collection.put(doc! { id: "2", tag: "a" })?;
            collection.create_index("tag")?;

            assert_eq!(ids(&collection.query("tag", &QueryOptions::new())?), vec!["2", "1"]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_query_descending() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.store().create_collection("test", CollectionConfig::default())?;
            insert_test_documents(&collection)?;
            collection.create_index("city")?;

            let ascending = collection.query("city", &order_by(SortOrder::Ascending))?;
            let descending = collection.query("city", &order_by(SortOrder::Descending))?;
            let mut reversed = descending.clone();
            reversed.reverse();
            assert_eq!(ascending, reversed);
            assert_eq!(ids(&descending), vec!["3", "1", "2"]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_query_with_bounds() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.store().create_collection("test", CollectionConfig::default())?;
            insert_test_documents(&collection)?;
            collection.create_index("city")?;

            // inclusive on both ends, prefixes compare lower
            let result = collection.query("city", &between("Amsterdam", "C"))?;
            assert_eq!(ids(&result), vec!["2", "1"]);

            let result = collection.query("city", &QueryOptions::new().min("B"))?;
            assert_eq!(ids(&result), vec!["1", "3"]);

            let result = collection.query("city", &QueryOptions::new().max("Berlin").descending())?;
            assert_eq!(ids(&result), vec!["1", "2"]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_query_empty_ranges() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.store().create_collection("test", CollectionConfig::default())?;
            assert!(collection.query("city", &QueryOptions::new()).is_err());

            collection.create_index("city")?;
            assert!(collection.query("city", &QueryOptions::new())?.is_empty());

            insert_test_documents(&collection)?;
            assert!(collection.query("city", &between("X", "Z"))?.is_empty());
            assert!(collection.query("city", &between("Z", "A"))?.is_empty());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_query_matches_filtered_scan() {
    run_test(
        create_test_context,
        |ctx| {
            let collection = ctx.store().create_collection("test", CollectionConfig::default())?;
            collection.create_index("word")?;
            let words = ["pear", "apple", "fig", "kiwi", "Banana", "apple", "date", "lime"];
            for (i, word) in words.iter().enumerate() {
                collection.put(doc! { id: i.to_string(), word: *word })?;
            }
            collection.put(doc! { id: "n", word: 3 })?;

            let (min, max) = ("b", "kiwi");
            let mut expected: Vec<String> = collection
                .list()
                .iter()
                .filter_map(|d| d.get_str("word").map(str::to_string))
                .filter(|w| w.as_str() >= min && w.as_str() <= max)
                .collect();
            expected.sort();

            let actual: Vec<String> = collection
                .query("word", &between(min, max))?
                .iter()
                .filter_map(|d| d.get_str("word").map(str::to_string))
                .collect();
            assert_eq!(actual, expected);
            assert_eq!(actual, vec!["date", "fig", "kiwi"]);
            Ok(())
        },
        cleanup,
    )
}

use docstore::collection::{Collection, Document};
use docstore::doc;
use docstore::errors::StoreResult;
use docstore::store::Store;
use std::backtrace::Backtrace;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::time::Instant;
use std::{env, fs};

/// Runs `test` against the context produced by `before`, then always runs
/// `after`, even if the test failed or panicked.
pub fn run_test<T, B, A>(before: B, test: T, after: A)
where
    T: Fn(TestContext) -> StoreResult<()>,
    B: Fn() -> StoreResult<TestContext>,
    A: Fn(TestContext) -> StoreResult<()>,
{
    let start_time = Instant::now();
    let ctx = match before() {
        Ok(ctx) => ctx,
        Err(e) => panic!("Before run failed: {:?}", e),
    };

    let test_ctx = ctx.clone();
    let result = panic::catch_unwind(AssertUnwindSafe(move || test(test_ctx)));
    let after_result = after(ctx);
    let elapsed = start_time.elapsed();

    match result {
        Ok(Ok(())) => {
            if let Err(e) = after_result {
                panic!("After run failed: {:?}", e);
            }
        }
        Ok(Err(e)) => {
            eprintln!("\n==================== TEST FAILED ====================");
            eprintln!("Failed after {:?}", elapsed);
            eprintln!("Backtrace:\n{}", Backtrace::capture());
            eprintln!("=====================================================\n");
            panic!("Test failed: {:?}", e);
        }
        Err(panic_err) => {
            let err_msg = if let Some(s) = panic_err.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_err.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            panic!("Test panicked after {:?}: {}", elapsed, err_msg);
        }
    }
}

#[derive(Clone)]
pub struct TestContext {
    snapshot_path: PathBuf,
    store: Store,
}

impl TestContext {
    pub fn new(snapshot_path: PathBuf, store: Store) -> Self {
        Self {
            snapshot_path,
            store,
        }
    }

    /// Snapshot file the store was opened with. It does not exist until
    /// something saves to it.
    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    pub fn store(&self) -> Store {
        self.store.clone()
    }
}

pub fn random_path() -> PathBuf {
    let id = uuid::Uuid::new_v4();
    env::temp_dir().join(format!("docstore-{}.json", id))
}

pub fn create_test_context() -> StoreResult<TestContext> {
    let path = random_path();
    let store = Store::builder().snapshot_file(&path).open()?;
    Ok(TestContext::new(path, store))
}

pub fn cleanup(ctx: TestContext) -> StoreResult<()> {
    let path = ctx.snapshot_path();
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}

pub fn create_test_docs() -> Vec<Document> {
    vec![
        doc! {
            id: "1",
            first_name: "fn1",
            last_name: "ln1",
            city: "Berlin",
            age: 31,
            tags: vec!["a", "b"],
        },
        doc! {
            id: "2",
            first_name: "fn2",
            last_name: "ln2",
            city: "Amsterdam",
            age: 25,
            active: true,
        },
        doc! {
            id: "3",
            first_name: "fn3",
            last_name: "ln2",
            city: "Copenhagen",
            age: 47,
        },
        doc! {
            id: "4",
            first_name: "fn4",
            city: 10115,
            age: 19,
        },
    ]
}

pub fn insert_test_documents(collection: &Collection) -> StoreResult<()> {
    for document in create_test_docs() {
        collection.put(document)?;
    }
    Ok(())
}

/// Primary keys of `documents`, in order.
pub fn ids(documents: &[Document]) -> Vec<String> {
    documents
        .iter()
        .filter_map(|d| d.get_str("id").map(str::to_string))
        .collect()
}

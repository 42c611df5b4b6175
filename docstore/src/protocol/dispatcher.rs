use serde_json::{json, Value};

use super::{Request, Response};
use crate::collection::{CollectionConfig, Document, QueryOptions};
use crate::errors::{ErrorKind, StoreError, StoreResult};
use crate::store::Store;

impl Store {
    /// Runs `request` against this store. Failures never escape as `Err`;
    /// they come back as an error [Response].
    pub fn execute(&self, request: Request) -> Response {
        let command = request.name();
        log::debug!("Executing command '{}'", command);
        match self.dispatch(request) {
            Ok(response) => response,
            Err(err) => {
                log::warn!("Command '{}' failed: {}", command, err);
                Response::error(&err)
            }
        }
    }

    /// Parses one JSON request, executes it and encodes the response.
    ///
    /// A request that cannot be parsed, including an unknown command, yields an
    /// error response of kind `EncodingError`.
    pub fn execute_json(&self, request: &str) -> StoreResult<String> {
        let response = match serde_json::from_str::<Request>(request) {
            Ok(request) => self.execute(request),
            Err(err) => {
                log::error!("Invalid command: {}", err);
                Response::error(&StoreError::new(
                    &format!("Invalid command: {}", err),
                    ErrorKind::EncodingError,
                ))
            }
        };
        serde_json::to_string(&response).map_err(|err| {
            log::error!("Failed to encode response: {}", err);
            StoreError::from(err)
        })
    }

    fn dispatch(&self, request: Request) -> StoreResult<Response> {
        match request {
            Request::CreateCollection { name, config } => {
                let config = match config {
                    Some(config) => CollectionConfig::new(&config.primary_key)?,
                    None => CollectionConfig::default(),
                };
                self.create_collection(&name, config)?;
                Ok(Response::message(format!("Collection '{}' created", name)))
            }
            Request::DeleteCollection { name } => {
                self.delete_collection(&name)?;
                Ok(Response::message(format!("Collection '{}' deleted", name)))
            }
            Request::ListCollections => Ok(Response::ok(json!({
                "collections": self.list_collections()
            }))),
            Request::PutDocument { collection, document } => {
                let target = self.get_collection(&collection)?;
                let document = Document::from_json(document)?;
                let key = document
                    .get_str(target.config().primary_key())
                    .map(str::to_string);
                target.put(document)?;
                Ok(Response::ok(json!({
                    "message": format!("Document stored in collection '{}'", collection),
                    "key": key,
                })))
            }
            Request::GetDocument { collection, key } => {
                let document = self.get_collection(&collection)?.get(&key)?;
                Ok(Response::ok(json!({ "document": document.to_json()? })))
            }
            Request::DeleteDocument { collection, key } => {
                self.get_collection(&collection)?.delete(&key)?;
                Ok(Response::message(format!(
                    "Document '{}' deleted from collection '{}'",
                    key, collection
                )))
            }
            Request::ListDocuments { collection } => {
                let documents = self.get_collection(&collection)?.list();
                Ok(Response::ok(json!({ "documents": documents_to_json(&documents)? })))
            }
            Request::CreateIndex { collection, field } => {
                self.get_collection(&collection)?.create_index(&field)?;
                Ok(Response::message(format!(
                    "Index on '{}' created in collection '{}'",
                    field, collection
                )))
            }
            Request::DeleteIndex { collection, field } => {
                self.get_collection(&collection)?.delete_index(&field)?;
                Ok(Response::message(format!(
                    "Index on '{}' deleted from collection '{}'",
                    field, collection
                )))
            }
            Request::Query {
                collection,
                field,
                descending,
                min,
                max,
            } => {
                let mut options = QueryOptions::new();
                if descending {
                    options = options.descending();
                }
                if let Some(min) = min {
                    options = options.min(min);
                }
                if let Some(max) = max {
                    options = options.max(max);
                }
                let documents = self.get_collection(&collection)?.query(&field, &options)?;
                Ok(Response::ok(json!({ "documents": documents_to_json(&documents)? })))
            }
        }
    }
}

fn documents_to_json(documents: &[Document]) -> StoreResult<Vec<Value>> {
    documents.iter().map(Document::to_json).collect()
}

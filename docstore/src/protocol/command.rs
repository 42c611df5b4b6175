use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::StoreError;

/// A single command addressed to a [Store](crate::store::Store).
///
/// On the wire a request is `{"command": "<name>", "payload": {...}}`;
/// `list_collections` carries no payload.
///
/// ```json
/// {"command": "put_document", "payload": {"collection": "users", "document": {"id": "1"}}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", content = "payload", rename_all = "snake_case")]
pub enum Request {
    CreateCollection {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        config: Option<ConfigPayload>,
    },
    DeleteCollection {
        name: String,
    },
    ListCollections,
    PutDocument {
        collection: String,
        document: Value,
    },
    GetDocument {
        collection: String,
        key: String,
    },
    DeleteDocument {
        collection: String,
        key: String,
    },
    ListDocuments {
        collection: String,
    },
    CreateIndex {
        collection: String,
        field: String,
    },
    DeleteIndex {
        collection: String,
        field: String,
    },
    Query {
        collection: String,
        field: String,
        #[serde(default)]
        descending: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<String>,
    },
}

impl Request {
    /// The wire name of the command.
    pub fn name(&self) -> &'static str {
        match self {
            Request::CreateCollection { .. } => "create_collection",
            Request::DeleteCollection { .. } => "delete_collection",
            Request::ListCollections => "list_collections",
            Request::PutDocument { .. } => "put_document",
            Request::GetDocument { .. } => "get_document",
            Request::DeleteDocument { .. } => "delete_document",
            Request::ListDocuments { .. } => "list_documents",
            Request::CreateIndex { .. } => "create_index",
            Request::DeleteIndex { .. } => "delete_index",
            Request::Query { .. } => "query",
        }
    }
}

/// Collection settings accepted by `create_collection`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigPayload {
    pub primary_key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Error,
}

/// Failure details of an error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
    /// Name of the [ErrorKind](crate::errors::ErrorKind), e.g. `"DocumentNotFound"`.
    pub kind: String,
}

/// The outcome of a [Request]: `{"status": "ok", "result": ...}` or
/// `{"status": "error", "error": {"message", "kind"}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorPayload>,
}

impl Response {
    pub fn ok(result: Value) -> Response {
        Response {
            status: Status::Ok,
            result: Some(result),
            error: None,
        }
    }

    pub(crate) fn message(message: String) -> Response {
        Response::ok(json!({ "message": message }))
    }

    pub fn error(err: &StoreError) -> Response {
        Response {
            status: Status::Error,
            result: None,
            error: Some(ErrorPayload {
                message: err.message().to_string(),
                kind: format!("{:?}", err.kind()),
            }),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }

    /// The error kind name, if this is an error response.
    pub fn error_kind(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.kind.as_str())
    }
}

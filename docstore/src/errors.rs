use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::common::{atomic, Atomic};

/// Error kinds for document store operations.
///
/// The first group is reported by the store core itself; every variant there is an
/// expected, recoverable condition. The second group only originates at the
/// boundaries (configuration, JSON adapters and snapshot files).
///
/// # Examples
///
/// ```rust,ignore
/// use docstore::errors::{ErrorKind, StoreError, StoreResult};
///
/// fn example() -> StoreResult<()> {
///     Err(StoreError::new("Index not found", ErrorKind::IndexNotFound))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Collection registry
    /// A collection with the same name is already registered
    CollectionAlreadyExists,
    /// No collection is registered under the given name
    CollectionNotFound,

    // Documents
    /// No document is stored under the given primary key
    DocumentNotFound,
    /// The document has no field named after the configured primary key
    MissingPrimaryKeyField,
    /// The primary key field exists but is not a string
    InvalidPrimaryKeyType,
    /// The primary key field is a string but it is empty
    EmptyPrimaryKey,

    // Secondary indexes
    /// An index on the field already exists
    IndexAlreadyExists,
    /// No index exists on the field
    IndexNotFound,

    // Boundary errors
    /// A configuration value is not acceptable
    InvalidConfiguration,
    /// A foreign value cannot be represented as a field
    UnsupportedFieldType,
    /// Error encoding or decoding a snapshot
    EncodingError,
    /// Error reading or writing a snapshot file
    IOError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::CollectionAlreadyExists => write!(f, "Collection already exists"),
            ErrorKind::CollectionNotFound => write!(f, "Collection not found"),
            ErrorKind::DocumentNotFound => write!(f, "Document not found"),
            ErrorKind::MissingPrimaryKeyField => write!(f, "Missing primary key field"),
            ErrorKind::InvalidPrimaryKeyType => write!(f, "Invalid primary key type"),
            ErrorKind::EmptyPrimaryKey => write!(f, "Empty primary key"),
            ErrorKind::IndexAlreadyExists => write!(f, "Index already exists"),
            ErrorKind::IndexNotFound => write!(f, "Index not found"),
            ErrorKind::InvalidConfiguration => write!(f, "Invalid configuration"),
            ErrorKind::UnsupportedFieldType => write!(f, "Unsupported field type"),
            ErrorKind::EncodingError => write!(f, "Encoding error"),
            ErrorKind::IOError => write!(f, "IO error"),
        }
    }
}

/// Error type of every fallible store operation.
///
/// A `StoreError` carries a message, an [ErrorKind] callers can match on, an
/// optional cause and a backtrace captured at construction. The backtrace is
/// captured unresolved and only symbolized when the error is debug-printed.
///
/// # Examples
///
/// ```rust,ignore
/// use docstore::errors::{ErrorKind, StoreError};
///
/// let cause = StoreError::new("permission denied", ErrorKind::IOError);
/// let err = StoreError::new_with_cause("Failed to write snapshot", ErrorKind::IOError, cause);
/// assert!(std::error::Error::source(&err).is_some());
/// ```
#[derive(Clone)]
pub struct StoreError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<StoreError>>,
    backtrace: Atomic<Backtrace>,
}

impl StoreError {
    /// Creates a new `StoreError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        StoreError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: atomic(Backtrace::new_unresolved()),
        }
    }

    /// Creates a new `StoreError` wrapping the error that caused it.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: StoreError) -> Self {
        StoreError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: atomic(Backtrace::new_unresolved()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&StoreError> {
        self.cause.as_deref()
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{} ({})\nCaused by: {:?}", self.message, self.error_kind, cause),
            None => {
                let mut backtrace = self.backtrace.write();
                backtrace.resolve();
                write!(f, "{} ({})\n{:?}", self.message, self.error_kind, *backtrace)
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::new(&format!("IO error: {}", err), ErrorKind::IOError)
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::new(&format!("JSON error: {}", err), ErrorKind::EncodingError)
    }
}

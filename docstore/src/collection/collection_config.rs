use crate::errors::{ErrorKind, StoreError, StoreResult};

/// Name of the primary key field used when none is configured.
pub const DEFAULT_PRIMARY_KEY: &str = "id";

/// Immutable configuration of a collection.
///
/// The only setting is the name of the field that holds each document's
/// primary key. It is fixed when the collection is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionConfig {
    primary_key: String,
}

impl CollectionConfig {
    /// Creates a configuration keyed on `primary_key`.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::InvalidConfiguration] if the name is empty.
    pub fn new(primary_key: &str) -> StoreResult<CollectionConfig> {
        if primary_key.is_empty() {
            log::error!("Primary key field name cannot be empty");
            return Err(StoreError::new(
                "Primary key field name cannot be empty",
                ErrorKind::InvalidConfiguration,
            ));
        }
        Ok(CollectionConfig {
            primary_key: primary_key.to_string(),
        })
    }

    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }
}

impl Default for CollectionConfig {
    fn default() -> Self {
        CollectionConfig {
            primary_key: DEFAULT_PRIMARY_KEY.to_string(),
        }
    }
}

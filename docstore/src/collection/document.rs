use im::OrdMap;

use crate::common::Field;
use std::fmt::{Debug, Formatter};

/// A semi-structured document: a flat mapping from field name to [Field].
///
/// Documents are value types. The backing map is a persistent ordered map
/// (`im::OrdMap`), so a clone costs O(1) and shares structure with the source;
/// mutating either copy afterwards never affects the other. The collection
/// relies on this to hand out independent copies on every read without paying
/// for a deep copy.
///
/// # Examples
///
/// ```rust,ignore
/// use docstore::doc;
///
/// let mut user = doc! { id: "1", name: "Alice", age: 30 };
/// user.put("active", true);
/// assert_eq!(user.get("name").and_then(|f| f.as_str()), Some("Alice"));
/// ```
#[derive(Clone, PartialEq, Default)]
pub struct Document {
    data: OrdMap<String, Field>,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Document { data: OrdMap::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of fields in this document.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Associates `value` with `name`, returning the field previously stored
    /// under that name.
    pub fn put(&mut self, name: impl Into<String>, value: impl Into<Field>) -> Option<Field> {
        self.data.insert(name.into(), value.into())
    }

    /// Builder-style variant of [Document::put].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Field>) -> Self {
        self.put(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.data.get(name)
    }

    /// Returns the value of `name` if, and only if, it is a string field.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.data.get(name).and_then(Field::as_str)
    }

    pub fn remove(&mut self, name: &str) -> Option<Field> {
        self.data.remove(name)
    }

    pub fn contains_field(&self, name: &str) -> bool {
        self.data.contains_key(name)
    }

    /// Field names in ascending order.
    pub fn fields(&self) -> Vec<String> {
        self.data.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Field)> {
        self.data.iter()
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.data.iter()).finish()
    }
}

impl<K: Into<String>, V: Into<Field>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut doc = Document::new();
        for (k, v) in iter {
            doc.put(k, v);
        }
        doc
    }
}

#[cfg(feature = "serde")]
mod json {
    use super::Document;
    use crate::common::Field;
    use crate::errors::{ErrorKind, StoreError, StoreResult};
    use serde_json::{Map, Value};

    impl Document {
        /// Builds a document from a JSON object, converting every member once.
        ///
        /// # Errors
        ///
        /// Returns [ErrorKind::UnsupportedFieldType] if `value` is not an
        /// object or any member cannot be represented as a [Field].
        pub fn from_json(value: Value) -> StoreResult<Document> {
            match value {
                Value::Object(map) => {
                    let mut doc = Document::new();
                    for (name, member) in map {
                        let field = Field::from_json(member).map_err(|err| {
                            StoreError::new_with_cause(
                                &format!("Field '{}' cannot be converted", name),
                                ErrorKind::UnsupportedFieldType,
                                err,
                            )
                        })?;
                        doc.put(name, field);
                    }
                    Ok(doc)
                }
                other => {
                    log::error!("A document must be a JSON object, found {}", other);
                    Err(StoreError::new(
                        "A document must be a JSON object",
                        ErrorKind::UnsupportedFieldType,
                    ))
                }
            }
        }

        /// Converts this document into a plain JSON object.
        pub fn to_json(&self) -> StoreResult<Value> {
            let mut map = Map::with_capacity(self.size());
            for (name, field) in self.iter() {
                map.insert(name.clone(), field.to_json()?);
            }
            Ok(Value::Object(map))
        }
    }
}

/// Creates a [Document] from `name: value` pairs.
///
/// Names are identifiers or string literals; values are any expression with an
/// `Into<Field>` conversion.
///
/// ```rust,ignore
/// let d = doc! { id: "42", "display name": "Bob", score: 7 };
/// ```
#[macro_export]
macro_rules! doc {
    () => {
        $crate::collection::Document::new()
    };

    ($($key:tt : $value:expr),* $(,)?) => {
        {
            let mut doc = $crate::collection::Document::new();
            $(
                doc.put($crate::doc_key!($key), $value);
            )*
            doc
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! doc_key {
    ($key:literal) => {
        $key
    };
    ($key:ident) => {
        stringify!($key)
    };
}

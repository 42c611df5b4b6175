use crate::errors::{ErrorKind, StoreError, StoreResult};
use std::collections::BTreeMap;
use std::fmt::{Debug, Display, Formatter};

/// The type tag of a [Field].
///
/// Each kind has a stable lower-case name (`"string"`, `"number"`, `"bool"`,
/// `"array"`, `"object"`) that is used by the snapshot format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    String,
    Number,
    Bool,
    Array,
    Object,
}

impl FieldKind {
    /// Returns the stable name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Bool => "bool",
            FieldKind::Array => "array",
            FieldKind::Object => "object",
        }
    }

    /// Parses a kind from its stable name.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::UnsupportedFieldType] for any other name.
    pub fn from_name(name: &str) -> StoreResult<FieldKind> {
        match name {
            "string" => Ok(FieldKind::String),
            "number" => Ok(FieldKind::Number),
            "bool" => Ok(FieldKind::Bool),
            "array" => Ok(FieldKind::Array),
            "object" => Ok(FieldKind::Object),
            other => {
                log::error!("Unsupported field type '{}'", other);
                Err(StoreError::new(
                    &format!("Unsupported field type '{}'", other),
                    ErrorKind::UnsupportedFieldType,
                ))
            }
        }
    }
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A typed document value.
///
/// `Field` is a closed sum type over exactly five kinds. The variant is the
/// type tag, so a field whose value disagrees with its kind cannot be built.
/// Conversion from foreign representations (JSON) happens once, at the
/// boundary, through [Field::from_json]; the store core only ever sees
/// `Field`s.
///
/// # Usage
///
/// ```text
/// let name: Field = "Alice".into();
/// let age = Field::from(30);
/// let tags = Field::from(vec!["a", "b"]);
/// assert_eq!(name.kind(), FieldKind::String);
/// assert_eq!(age.as_number(), Some(30.0));
/// ```
#[derive(Clone, PartialEq)]
pub enum Field {
    /// A UTF-8 string. The only kind that can serve as a primary key or be
    /// indexed.
    String(String),
    /// A number, always held as a 64-bit float.
    Number(f64),
    /// A boolean.
    Bool(bool),
    /// An ordered list of fields.
    Array(Vec<Field>),
    /// A nested mapping from name to field.
    Object(BTreeMap<String, Field>),
}

impl Field {
    pub fn kind(&self) -> FieldKind {
        match self {
            Field::String(_) => FieldKind::String,
            Field::Number(_) => FieldKind::Number,
            Field::Bool(_) => FieldKind::Bool,
            Field::Array(_) => FieldKind::Array,
            Field::Object(_) => FieldKind::Object,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Field::String(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Field::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Field::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Field::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Field>> {
        match self {
            Field::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Field>> {
        match self {
            Field::Object(o) => Some(o),
            _ => None,
        }
    }
}

impl Debug for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::String(s) => write!(f, "String({:?})", s),
            Field::Number(n) => write!(f, "Number({})", n),
            Field::Bool(b) => write!(f, "Bool({})", b),
            Field::Array(a) => f.debug_list().entries(a.iter()).finish(),
            Field::Object(o) => f.debug_map().entries(o.iter()).finish(),
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::String(s) => write!(f, "{:?}", s),
            Field::Number(n) => write!(f, "{}", n),
            Field::Bool(b) => write!(f, "{}", b),
            Field::Array(a) => {
                write!(f, "[")?;
                for (i, item) in a.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Field::Object(o) => {
                write!(f, "{{")?;
                for (i, (name, item)) in o.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}: {}", name, item)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Field::String(value.to_string())
    }
}

impl From<String> for Field {
    fn from(value: String) -> Self {
        Field::String(value)
    }
}

impl From<&String> for Field {
    fn from(value: &String) -> Self {
        Field::String(value.clone())
    }
}

impl From<bool> for Field {
    fn from(value: bool) -> Self {
        Field::Bool(value)
    }
}

macro_rules! number_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Field {
                fn from(value: $t) -> Self {
                    Field::Number(value as f64)
                }
            }
        )*
    };
}

number_from!(i8, u8, i16, u16, i32, u32, i64, u64, isize, usize, f32, f64);

impl<T: Into<Field>> From<Vec<T>> for Field {
    fn from(value: Vec<T>) -> Self {
        Field::Array(value.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Field>> for Field {
    fn from(value: BTreeMap<String, Field>) -> Self {
        Field::Object(value)
    }
}

#[cfg(feature = "serde")]
mod json {
    use super::Field;
    use crate::errors::{ErrorKind, StoreError, StoreResult};
    use serde_json::{Map, Number, Value};
    use std::collections::BTreeMap;

    // Integral numbers that f64 represents exactly are written without a
    // fraction, so `30` survives a round trip as `30` rather than `30.0`.
    const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

    impl Field {
        /// Converts a JSON value into a field.
        ///
        /// # Errors
        ///
        /// Returns [ErrorKind::UnsupportedFieldType] for `null`, at any depth.
        pub fn from_json(value: Value) -> StoreResult<Field> {
            match value {
                Value::String(s) => Ok(Field::String(s)),
                Value::Number(n) => match n.as_f64() {
                    Some(f) => Ok(Field::Number(f)),
                    None => {
                        log::error!("Number {} cannot be represented as a field", n);
                        Err(StoreError::new(
                            &format!("Number {} cannot be represented as a field", n),
                            ErrorKind::UnsupportedFieldType,
                        ))
                    }
                },
                Value::Bool(b) => Ok(Field::Bool(b)),
                Value::Array(items) => items
                    .into_iter()
                    .map(Field::from_json)
                    .collect::<StoreResult<Vec<_>>>()
                    .map(Field::Array),
                Value::Object(map) => map
                    .into_iter()
                    .map(|(k, v)| Field::from_json(v).map(|f| (k, f)))
                    .collect::<StoreResult<BTreeMap<_, _>>>()
                    .map(Field::Object),
                Value::Null => {
                    log::error!("Null values are not supported as fields");
                    Err(StoreError::new(
                        "Null values are not supported as fields",
                        ErrorKind::UnsupportedFieldType,
                    ))
                }
            }
        }

        /// Converts this field into a JSON value.
        ///
        /// # Errors
        ///
        /// Returns [ErrorKind::EncodingError] for non-finite numbers, which JSON
        /// cannot represent.
        pub fn to_json(&self) -> StoreResult<Value> {
            match self {
                Field::String(s) => Ok(Value::String(s.clone())),
                Field::Number(n) => number_to_json(*n).map(Value::Number),
                Field::Bool(b) => Ok(Value::Bool(*b)),
                Field::Array(items) => items
                    .iter()
                    .map(Field::to_json)
                    .collect::<StoreResult<Vec<_>>>()
                    .map(Value::Array),
                Field::Object(map) => map
                    .iter()
                    .map(|(k, v)| v.to_json().map(|j| (k.clone(), j)))
                    .collect::<StoreResult<Map<_, _>>>()
                    .map(Value::Object),
            }
        }
    }

    fn number_to_json(n: f64) -> StoreResult<Number> {
        if n.fract() == 0.0 && n.abs() <= MAX_EXACT_INT {
            return Ok(Number::from(n as i64));
        }
        Number::from_f64(n).ok_or_else(|| {
            log::error!("Number {} cannot be encoded as JSON", n);
            StoreError::new(
                &format!("Number {} cannot be encoded as JSON", n),
                ErrorKind::EncodingError,
            )
        })
    }
}

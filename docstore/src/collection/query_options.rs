use crate::common::SortOrder;

/// Options for [crate::collection::Collection::query].
///
/// Both bounds are inclusive and compared byte-lexicographically against the
/// indexed string value. A missing bound leaves that side of the range open.
///
/// ```rust,ignore
/// let options = QueryOptions::new().min("b").max("d").descending();
/// let docs = collection.query("tag", &options)?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub(crate) sort_order: SortOrder,
    pub(crate) min_value: Option<String>,
    pub(crate) max_value: Option<String>,
}

/// Options selecting every indexed document in the given order.
pub fn order_by(sort_order: SortOrder) -> QueryOptions {
    QueryOptions {
        sort_order,
        min_value: None,
        max_value: None,
    }
}

/// Options selecting documents whose indexed value lies in `[min, max]`.
pub fn between(min: impl Into<String>, max: impl Into<String>) -> QueryOptions {
    QueryOptions::new().min(min).max(max)
}

impl QueryOptions {
    pub fn new() -> QueryOptions {
        QueryOptions::default()
    }

    pub fn ascending(mut self) -> QueryOptions {
        self.sort_order = SortOrder::Ascending;
        self
    }

    pub fn descending(mut self) -> QueryOptions {
        self.sort_order = SortOrder::Descending;
        self
    }

    /// Inclusive lower bound.
    pub fn min(mut self, min: impl Into<String>) -> QueryOptions {
        self.min_value = Some(min.into());
        self
    }

    /// Inclusive upper bound.
    pub fn max(mut self, max: impl Into<String>) -> QueryOptions {
        self.max_value = Some(max.into());
        self
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn min_value(&self) -> Option<&str> {
        self.min_value.as_deref()
    }

    pub fn max_value(&self) -> Option<&str> {
        self.max_value.as_deref()
    }
}

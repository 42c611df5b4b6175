use crate::collection::Document;
use itertools::Itertools;

/// One row of a [SortedIndex]: the primary key, the indexed string value and
/// a copy of the document it was taken from.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct IndexEntry {
    pub(crate) key: String,
    pub(crate) value: String,
    pub(crate) document: Document,
}

/// A secondary index over one string-valued field.
///
/// Entries are kept in a contiguous vector sorted ascending by the indexed
/// value (byte-lexicographic). A document takes part only while it carries a
/// string field named after the index; documents without it, or with a
/// non-string value, are absent.
///
/// Positions are found by binary search and entries are spliced in place, so an
/// update is O(log n) to locate plus O(n) to shift. Entries with equal values
/// keep their insertion order: a new entry goes after all existing equal ones.
#[derive(Debug)]
pub(crate) struct SortedIndex {
    field_name: String,
    entries: Vec<IndexEntry>,
}

impl SortedIndex {
    #[cfg(test)]
    pub(crate) fn new(field_name: &str) -> Self {
        SortedIndex {
            field_name: field_name.to_string(),
            entries: Vec::new(),
        }
    }

    /// Builds an index from the current contents of a collection in
    /// O(n log n). Ties are ordered by primary key.
    pub(crate) fn build<'a>(
        field_name: &str,
        documents: impl Iterator<Item = (&'a String, &'a Document)>,
    ) -> Self {
        let entries = documents
            .filter_map(|(key, document)| {
                document.get_str(field_name).map(|value| IndexEntry {
                    key: key.clone(),
                    value: value.to_string(),
                    document: document.clone(),
                })
            })
            .sorted_by(|a, b| a.value.cmp(&b.value).then_with(|| a.key.cmp(&b.key)))
            .collect();

        SortedIndex {
            field_name: field_name.to_string(),
            entries,
        }
    }

    pub(crate) fn field_name(&self) -> &str {
        &self.field_name
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replaces whatever entry `key` had with one for `document`.
    ///
    /// If the document no longer carries a string field for this index, the
    /// key simply drops out of it.
    pub(crate) fn upsert(&mut self, key: &str, document: &Document) {
        self.remove(key);

        let Some(value) = document.get_str(&self.field_name) else {
            log::debug!(
                "Document '{}' has no string field '{}', leaving it out of the index",
                key,
                self.field_name
            );
            return;
        };

        let position = self.entries.partition_point(|entry| entry.value.as_str() <= value);
        self.entries.insert(
            position,
            IndexEntry {
                key: key.to_string(),
                value: value.to_string(),
                document: document.clone(),
            },
        );
        self.assert_ordered_around(position);
    }

    /// Removes the entry for `key`, returning whether one was present.
    pub(crate) fn remove(&mut self, key: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.key != key);
        self.entries.len() != before
    }

    /// Returns the entries whose value lies within the inclusive bounds, in
    /// ascending order. Bounds are located by binary search, O(log n + k).
    pub(crate) fn range(&self, min: Option<&str>, max: Option<&str>) -> &[IndexEntry] {
        let start = match min {
            Some(min) => self.entries.partition_point(|entry| entry.value.as_str() < min),
            None => 0,
        };
        let end = match max {
            Some(max) => self.entries.partition_point(|entry| entry.value.as_str() <= max),
            None => self.entries.len(),
        };

        if start >= end {
            return &[];
        }
        &self.entries[start..end]
    }

    #[cfg(test)]
    pub(crate) fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// True when the entries are non-decreasing by value and every key occurs
    /// at most once.
    pub(crate) fn is_consistent(&self) -> bool {
        let ordered = self
            .entries
            .iter()
            .tuple_windows()
            .all(|(a, b)| a.value <= b.value);
        let unique = self.entries.iter().map(|entry| &entry.key).all_unique();
        ordered && unique
    }

    // An out-of-order neighbour can only come from a bug in this module.
    fn assert_ordered_around(&self, position: usize) {
        let entry = &self.entries[position];
        let prev_ok = position == 0 || self.entries[position - 1].value <= entry.value;
        let next_ok = position + 1 >= self.entries.len() || entry.value <= self.entries[position + 1].value;
        if !(prev_ok && next_ok) {
            log::error!(
                "Index '{}' is out of order around position {} (key '{}')",
                self.field_name,
                position,
                entry.key
            );
        }
        debug_assert!(prev_ok && next_ok, "index '{}' lost its sort order", self.field_name);
    }
}

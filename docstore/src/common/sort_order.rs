/// Direction in which a query walks a secondary index.
///
/// `Ascending` yields entries from the smallest field value to the largest using
/// byte-lexicographic string comparison; `Descending` yields exactly the reverse
/// sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Smallest to largest
    #[default]
    Ascending,
    /// Largest to smallest
    Descending,
}

impl SortOrder {
    pub fn is_descending(&self) -> bool {
        matches!(self, SortOrder::Descending)
    }
}

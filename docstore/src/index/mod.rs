//! Secondary indexes over string-valued document fields.

mod sorted_index;

pub(crate) use sorted_index::*;

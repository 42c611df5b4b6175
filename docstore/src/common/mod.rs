mod field;
mod sort_order;
mod util;

pub use field::*;
pub use sort_order::*;
pub use util::*;

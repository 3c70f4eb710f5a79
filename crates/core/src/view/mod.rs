//! Derived-view engine: filter state, sorting and progressive reveal.
//!
//! Everything here is pure and synchronous; it is recomputed from the
//! full accumulated ticket collection on every call.

mod engine;
mod filters;

pub use engine::{compute_visible, count_matching, SortMode, INITIAL_REVEAL, REVEAL_STEP};
pub use filters::{FilterId, FilterOption, FilterSet};

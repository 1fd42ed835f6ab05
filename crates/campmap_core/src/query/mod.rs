//! Pure read operations over campground records.
//!
//! # Responsibility
//! - Facet extraction, predicate filtering, lookup and ranking.
//!
//! # Invariants
//! - Inputs are never mutated; outputs borrow from the caller's records.
//! - Every ordering operation is a stable sort.

pub mod facets;
pub mod filter;
pub mod ranking;

pub use facets::{unique_amenities, unique_kinds, unique_regions};
pub use filter::{by_kind, filter, find_by_id, FilterCriteria};
pub use ranking::{
    recommendation_score, recommended, sort_by_price_ascending, sort_by_rating_descending,
    DEFAULT_RECOMMENDED_LIMIT,
};

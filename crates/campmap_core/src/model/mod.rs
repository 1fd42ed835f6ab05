//! Campground domain model.
//!
//! # Responsibility
//! - Define the single catalog record and its closed vocabularies.
//!
//! # Invariants
//! - Records are immutable after load; no component mutates them.

pub mod campground;
pub mod taxonomy;

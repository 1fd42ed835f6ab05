//! Presentation-free view models for the listing and detail pages.

pub mod detail;
pub mod listing;

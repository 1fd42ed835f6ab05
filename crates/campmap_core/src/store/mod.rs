//! Record store over the embedded regional datasets.
//!
//! # Responsibility
//! - Own every campground record for the life of the process.
//! - Expose read-only borrows to query utilities and views.

pub mod campground_store;

//! Map integration over an external, asynchronously loaded widget.
//!
//! # Responsibility
//! - Load the widget script once per process and report availability.
//! - Place one marker per visible campground and route marker clicks.
//!
//! # Invariants
//! - The widget itself is opaque; only [`widget::MapWidget`] is relied upon.
//! - All mutation happens on the caller's thread in response to discrete
//!   events; the loader is the only shared state.

pub mod adapter;
pub mod geolocation;
pub mod loader;
pub mod viewport;
pub mod widget;

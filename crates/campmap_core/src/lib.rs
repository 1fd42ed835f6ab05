//! Core logic for the campground map catalog.
//! Owns the record store, query utilities, map integration and page models.

pub mod config;
pub mod logging;
pub mod map;
pub mod model;
pub mod query;
pub mod store;
pub mod view;

pub use config::{ConfigError, MapConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use map::adapter::{MapAdapter, MapLocation};
pub use map::geolocation::{FixedGeolocator, GeolocationError, Geolocator};
pub use map::loader::{CapabilityState, InjectError, LoadStatus, ScriptInjector, WidgetLoader};
pub use map::widget::{
    MapOptions, MapType, MapWidget, MarkerHandle, MarkerOptions, RecordingProvider,
    RecordingWidget, WidgetError, WidgetProvider,
};
pub use model::campground::{CampgroundId, CampgroundRecord, CampgroundValidationError, LatLng};
pub use model::taxonomy::{Amenity, CampgroundKind, Region, Selector, Vocabulary};
pub use query::{
    by_kind, filter, find_by_id, recommendation_score, recommended, sort_by_price_ascending,
    sort_by_rating_descending, unique_amenities, unique_kinds, unique_regions, FilterCriteria,
    DEFAULT_RECOMMENDED_LIMIT,
};
pub use store::campground_store::{CampgroundStore, CatalogError, CatalogResult, StoreIssue};
pub use view::detail::{
    AmenityBadge, CampgroundDetail, ContactKind, ContactLine, DetailPage, Gallery,
};
pub use view::listing::{ListingCard, ListingState, ListingTab, SortOrder};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

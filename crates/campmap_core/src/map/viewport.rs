//! Fixed per-region default viewports.
//!
//! Values are literal constants; unknown selectors fall back to the
//! all-regions viewport.

use crate::model::campground::LatLng;
use crate::model::taxonomy::{Region, Selector};

/// Zoom used when the widget reports no current zoom.
pub const FALLBACK_ZOOM: u8 = 7;
/// Zoom for a single-campground detail map.
pub const DETAIL_ZOOM: u8 = 14;
/// Zoom applied after a successful "locate me".
pub const LOCATE_ZOOM: u8 = 12;

/// Map center plus zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: u8,
}

impl Viewport {
    pub const fn new(lat: f64, lng: f64, zoom: u8) -> Self {
        Self {
            center: LatLng { lat, lng },
            zoom,
        }
    }
}

const ALL_REGIONS: Viewport = Viewport::new(55.7558, 37.6173, 7);
const MOSCOW: Viewport = Viewport::new(55.7558, 37.6173, 8);
const TVER: Viewport = Viewport::new(56.8587, 35.9208, 8);
const KALUGA: Viewport = Viewport::new(54.5293, 36.2754, 8);

pub fn viewport_for(selector: Selector<Region>) -> Viewport {
    match selector {
        Selector::All => ALL_REGIONS,
        Selector::Only(Region::Moscow) => MOSCOW,
        Selector::Only(Region::Tver) => TVER,
        Selector::Only(Region::Kaluga) => KALUGA,
    }
}

/// Resolves a raw selector string; anything unrecognized maps to all regions.
pub fn viewport_for_name(name: &str) -> Viewport {
    viewport_for(Selector::parse_or_all(name))
}

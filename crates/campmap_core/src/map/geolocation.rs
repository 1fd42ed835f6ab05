//! Optional device-position capability for "locate me".

use crate::model::campground::LatLng;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeolocationError {
    /// The host has no geolocation capability at all.
    Unsupported,
    /// The capability exists but the position request failed.
    Failed(String),
}

impl Display for GeolocationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unsupported => write!(f, "geolocation is not supported"),
            Self::Failed(reason) => write!(f, "geolocation service failed: {reason}"),
        }
    }
}

impl Error for GeolocationError {}

/// Source of the visitor's current position.
pub trait Geolocator {
    fn current_position(&self) -> Result<LatLng, GeolocationError>;
}

/// Geolocator that always answers with one fixed position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedGeolocator(pub LatLng);

impl Geolocator for FixedGeolocator {
    fn current_position(&self) -> Result<LatLng, GeolocationError> {
        Ok(self.0)
    }
}

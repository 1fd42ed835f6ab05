//! Campground domain record.
//!
//! # Responsibility
//! - Define the canonical record rendered by listing, map and detail views.
//! - Provide invariant checks for records authored by hand.
//!
//! # Invariants
//! - `id` is unique across the whole catalog.
//! - Coordinates are valid WGS84 degrees.
//! - `rating` stays within `0..=5`, `price_per_day` is finite and non-negative.

use crate::model::taxonomy::{Amenity, CampgroundKind, Region};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Upper bound of the rating scale.
pub const MAX_RATING: f64 = 5.0;

/// Stable identifier of a campground, e.g. `camping-4`.
pub type CampgroundId = String;

/// Geographic point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Validation error for hand-authored campground records.
#[derive(Debug, Clone, PartialEq)]
pub enum CampgroundValidationError {
    EmptyId,
    EmptyName { id: CampgroundId },
    InvalidCoordinates { id: CampgroundId, lat: f64, lng: f64 },
    InvalidPrice { id: CampgroundId, price: f64 },
    InvalidRating { id: CampgroundId, rating: f64 },
    InvalidEmail { id: CampgroundId, email: String },
}

impl Display for CampgroundValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "campground id must not be empty"),
            Self::EmptyName { id } => write!(f, "campground `{id}` has an empty name"),
            Self::InvalidCoordinates { id, lat, lng } => {
                write!(f, "campground `{id}` has invalid coordinates ({lat}, {lng})")
            }
            Self::InvalidPrice { id, price } => {
                write!(f, "campground `{id}` has invalid price per day {price}")
            }
            Self::InvalidRating { id, rating } => {
                write!(f, "campground `{id}` rating {rating} is outside 0..=5")
            }
            Self::InvalidEmail { id, email } => {
                write!(f, "campground `{id}` has malformed contact email `{email}`")
            }
        }
    }
}

impl Error for CampgroundValidationError {}

/// One campground's full attribute set.
///
/// Serialized field names follow the camelCase layout of the embedded
/// regional datasets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampgroundRecord {
    pub id: CampgroundId,
    pub name: String,
    /// Short teaser shown on listing cards; searchable.
    pub description: String,
    /// Multi-paragraph text for the detail page.
    pub full_description: String,
    pub region: Region,
    pub region_name: String,
    /// Free-text address; searchable.
    pub location: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "type")]
    pub kind: CampgroundKind,
    pub amenities: Vec<Amenity>,
    pub price_per_day: f64,
    pub rating: f64,
    #[serde(rename = "reviews")]
    pub review_count: u32,
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_hours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nearby_attractions: Option<Vec<String>>,
}

impl CampgroundRecord {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    pub fn has_amenity(&self, amenity: Amenity) -> bool {
        self.amenities.contains(&amenity)
    }

    /// Checks record-level invariants.
    ///
    /// Identifier uniqueness is a catalog-level property and is checked by
    /// the store audit instead.
    pub fn validate(&self) -> Result<(), CampgroundValidationError> {
        if self.id.trim().is_empty() {
            return Err(CampgroundValidationError::EmptyId);
        }
        if self.name.trim().is_empty() {
            return Err(CampgroundValidationError::EmptyName {
                id: self.id.clone(),
            });
        }
        if !self.position().is_valid() {
            return Err(CampgroundValidationError::InvalidCoordinates {
                id: self.id.clone(),
                lat: self.lat,
                lng: self.lng,
            });
        }
        if !self.price_per_day.is_finite() || self.price_per_day < 0.0 {
            return Err(CampgroundValidationError::InvalidPrice {
                id: self.id.clone(),
                price: self.price_per_day,
            });
        }
        if !(0.0..=MAX_RATING).contains(&self.rating) {
            return Err(CampgroundValidationError::InvalidRating {
                id: self.id.clone(),
                rating: self.rating,
            });
        }
        if let Some(email) = self.contact_email.as_deref() {
            if !EMAIL_RE.is_match(email) {
                return Err(CampgroundValidationError::InvalidEmail {
                    id: self.id.clone(),
                    email: email.to_string(),
                });
            }
        }
        Ok(())
    }
}

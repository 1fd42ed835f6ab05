//! Predicate filtering and identifier lookup.
//!
//! # Invariants
//! - A record passes only when every supplied criterion matches.
//! - Output keeps the input's relative order.
//! - Text search is case-insensitive and looks at name, short description
//!   and location only.

use crate::model::campground::CampgroundRecord;
use crate::model::taxonomy::{Amenity, CampgroundKind, Region, Selector};
use serde::{Deserialize, Serialize};

/// Optional-field filter query.
///
/// Absent selectors and the `"all"` value both match everything. Price
/// bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterCriteria {
    pub region: Selector<Region>,
    #[serde(alias = "type")]
    pub kind: Selector<CampgroundKind>,
    #[serde(alias = "amenities")]
    pub amenity: Selector<Amenity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(alias = "searchQuery", skip_serializing_if = "Option::is_none")]
    pub search_text: Option<String>,
}

impl FilterCriteria {
    /// Creates criteria that match every record.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region(mut self, region: impl Into<Selector<Region>>) -> Self {
        self.region = region.into();
        self
    }

    pub fn kind(mut self, kind: impl Into<Selector<CampgroundKind>>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn amenity(mut self, amenity: impl Into<Selector<Amenity>>) -> Self {
        self.amenity = amenity.into();
        self
    }

    pub fn min_price(mut self, min_price: f64) -> Self {
        self.min_price = Some(min_price);
        self
    }

    pub fn max_price(mut self, max_price: f64) -> Self {
        self.max_price = Some(max_price);
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    /// Returns whether no criterion narrows the result.
    pub fn is_unrestricted(&self) -> bool {
        self.region == Selector::All
            && self.kind == Selector::All
            && self.amenity == Selector::All
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.search_text.as_deref().map_or(true, str::is_empty)
    }

    /// Evaluates every supplied criterion against one record.
    pub fn matches(&self, record: &CampgroundRecord) -> bool {
        self.matches_with_query(record, self.normalized_query().as_deref())
    }

    fn normalized_query(&self) -> Option<String> {
        self.search_text.as_deref().map(str::to_lowercase)
    }

    fn matches_with_query(&self, record: &CampgroundRecord, query: Option<&str>) -> bool {
        if !self.region.accepts(record.region) || !self.kind.accepts(record.kind) {
            return false;
        }
        if let Some(amenity) = self.amenity.value() {
            if !record.has_amenity(amenity) {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| record.price_per_day < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| record.price_per_day > max) {
            return false;
        }
        match query {
            Some(query) => [&record.name, &record.description, &record.location]
                .iter()
                .any(|field| field.to_lowercase().contains(query)),
            None => true,
        }
    }
}

/// Returns records passing every criterion, in input order.
pub fn filter<'a, I>(records: I, criteria: &FilterCriteria) -> Vec<&'a CampgroundRecord>
where
    I: IntoIterator<Item = &'a CampgroundRecord>,
{
    let query = criteria.normalized_query();
    records
        .into_iter()
        .filter(|record| criteria.matches_with_query(record, query.as_deref()))
        .collect()
}

/// Linear lookup by identifier equality.
///
/// Returns `None` when absent; callers render a dedicated not-found state.
pub fn find_by_id<'a, I>(records: I, id: &str) -> Option<&'a CampgroundRecord>
where
    I: IntoIterator<Item = &'a CampgroundRecord>,
{
    records.into_iter().find(|record| record.id == id)
}

pub fn by_kind<'a, I>(records: I, kind: CampgroundKind) -> Vec<&'a CampgroundRecord>
where
    I: IntoIterator<Item = &'a CampgroundRecord>,
{
    records
        .into_iter()
        .filter(|record| record.kind == kind)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::FilterCriteria;
    use crate::model::taxonomy::{Amenity, CampgroundKind, Region, Selector};

    #[test]
    fn default_criteria_are_unrestricted() {
        assert!(FilterCriteria::new().is_unrestricted());
        assert!(FilterCriteria::new().search("").is_unrestricted());
        assert!(!FilterCriteria::new().min_price(0.0).is_unrestricted());
    }

    #[test]
    fn deserializes_legacy_field_names_and_all_values() {
        let criteria: FilterCriteria = serde_json::from_value(serde_json::json!({
            "region": "all",
            "type": "cabin",
            "amenities": "wifi",
            "searchQuery": "Озеро",
            "maxPrice": 2000
        }))
        .expect("criteria should decode");

        assert_eq!(criteria.region, Selector::All);
        assert_eq!(criteria.kind, Selector::Only(CampgroundKind::Cabin));
        assert_eq!(criteria.amenity, Selector::Only(Amenity::Wifi));
        assert_eq!(criteria.search_text.as_deref(), Some("Озеро"));
        assert_eq!(criteria.max_price, Some(2000.0));
        assert_eq!(criteria.min_price, None);
    }

    #[test]
    fn rejects_unknown_region_value() {
        let err = serde_json::from_value::<FilterCriteria>(serde_json::json!({
            "region": "siberia"
        }))
        .expect_err("unknown region must fail");
        assert!(err.to_string().contains("unknown region `siberia`"));
    }

    #[test]
    fn null_selectors_match_everything() {
        let criteria: FilterCriteria = serde_json::from_value(serde_json::json!({
            "region": null,
            "type": null,
            "amenities": ""
        }))
        .expect("null criteria should decode");
        assert!(criteria.is_unrestricted());
    }

    #[test]
    fn builder_sets_selectors() {
        let criteria = FilterCriteria::new()
            .region(Region::Kaluga)
            .kind(CampgroundKind::Tent);
        assert_eq!(criteria.region, Selector::Only(Region::Kaluga));
        assert_eq!(criteria.kind, Selector::Only(CampgroundKind::Tent));
    }
}

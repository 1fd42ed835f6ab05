//! Listing page view model.
//!
//! # Responsibility
//! - Hold the visitor's filter, sort and tab selection.
//! - Project the visible subset into cards and map locations.
//!
//! # Invariants
//! - Cards and map locations are always derived from the same visible set.

use crate::map::adapter::MapLocation;
use crate::model::campground::CampgroundRecord;
use crate::query::{filter, sort_by_price_ascending, sort_by_rating_descending, FilterCriteria};
use serde::{Deserialize, Serialize};

/// Which half of the listing page is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingTab {
    #[default]
    Map,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Catalog order.
    #[default]
    AsListed,
    Rating,
    Price,
}

/// Formats a daily price as shown on cards, e.g. `от 500 ₽ / день`.
pub fn price_label(price_per_day: f64) -> String {
    format!("от {price_per_day:.0} ₽ / день")
}

/// Summary card for one campground.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingCard {
    pub id: String,
    pub name: String,
    pub region_name: String,
    pub location: String,
    pub description: String,
    pub kind_label: &'static str,
    pub rating: f64,
    pub review_count: u32,
    pub price_per_day: f64,
    pub cover_image: Option<String>,
}

impl ListingCard {
    pub fn price_label(&self) -> String {
        price_label(self.price_per_day)
    }
}

impl From<&CampgroundRecord> for ListingCard {
    fn from(record: &CampgroundRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            region_name: record.region_name.clone(),
            location: record.location.clone(),
            description: record.description.clone(),
            kind_label: record.kind.display_name(),
            rating: record.rating,
            review_count: record.review_count,
            price_per_day: record.price_per_day,
            cover_image: record.images.first().cloned(),
        }
    }
}

/// Filter, sort and tab state of the listing page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingState {
    pub criteria: FilterCriteria,
    pub sort: SortOrder,
    pub tab: ListingTab,
}

impl ListingState {
    pub fn new(criteria: FilterCriteria) -> Self {
        Self {
            criteria,
            ..Self::default()
        }
    }

    /// Records passing the criteria, in the selected order.
    pub fn visible<'a>(&self, records: &'a [CampgroundRecord]) -> Vec<&'a CampgroundRecord> {
        let matching = filter(records, &self.criteria);
        match self.sort {
            SortOrder::AsListed => matching,
            SortOrder::Rating => sort_by_rating_descending(matching),
            SortOrder::Price => sort_by_price_ascending(matching),
        }
    }

    pub fn cards(&self, records: &[CampgroundRecord]) -> Vec<ListingCard> {
        self.visible(records)
            .into_iter()
            .map(ListingCard::from)
            .collect()
    }

    /// Marker locations for the map tab.
    pub fn map_locations(&self, records: &[CampgroundRecord]) -> Vec<MapLocation> {
        self.visible(records)
            .into_iter()
            .map(MapLocation::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{price_label, ListingState, ListingTab, SortOrder};

    #[test]
    fn price_label_drops_fraction() {
        assert_eq!(price_label(500.0), "от 500 ₽ / день");
        assert_eq!(price_label(1200.4), "от 1200 ₽ / день");
    }

    #[test]
    fn state_decodes_with_defaults() {
        let state: ListingState = serde_json::from_value(serde_json::json!({
            "sort": "price",
            "criteria": { "region": "tver" }
        }))
        .expect("state should decode");
        assert_eq!(state.sort, SortOrder::Price);
        assert_eq!(state.tab, ListingTab::Map);
    }
}

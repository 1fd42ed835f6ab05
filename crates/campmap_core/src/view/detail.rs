//! Detail page view model.
//!
//! # Responsibility
//! - Resolve the requested campground exactly once, at mount.
//! - Produce a dedicated not-found page instead of an empty one.
//! - Expose detail sections and the image gallery cursor.

use crate::map::adapter::MapAdapter;
use crate::map::widget::WidgetProvider;
use crate::model::campground::CampgroundRecord;
use crate::model::taxonomy::Amenity;
use crate::query::find_by_id;
use crate::store::campground_store::CampgroundStore;
use crate::view::listing::price_label;
use log::warn;
use std::sync::Arc;

/// Outcome of mounting the detail page for one identifier.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailPage<'a> {
    Found(CampgroundDetail<'a>),
    NotFound { requested_id: String },
}

impl<'a> DetailPage<'a> {
    /// Looks `id` up once and builds the page.
    pub fn mount(store: &'a CampgroundStore, id: &str) -> Self {
        match find_by_id(store.records(), id) {
            Some(record) => Self::Found(CampgroundDetail::new(record)),
            None => {
                warn!("event=detail_lookup module=view status=error reason=not_found id={id}");
                Self::NotFound {
                    requested_id: id.to_string(),
                }
            }
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Icon and label for one amenity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmenityBadge {
    pub icon: &'static str,
    pub label: &'static str,
}

impl From<Amenity> for AmenityBadge {
    fn from(amenity: Amenity) -> Self {
        Self {
            icon: amenity.icon(),
            label: amenity.label(),
        }
    }
}

/// Kind of contact channel listed on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Phone,
    Email,
    Website,
    WorkingHours,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactLine<'a> {
    pub kind: ContactKind,
    pub value: &'a str,
}

/// Found-state content of the detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct CampgroundDetail<'a> {
    pub record: &'a CampgroundRecord,
    pub gallery: Gallery<'a>,
}

impl<'a> CampgroundDetail<'a> {
    pub fn new(record: &'a CampgroundRecord) -> Self {
        Self {
            record,
            gallery: Gallery::new(&record.images),
        }
    }

    pub fn kind_label(&self) -> &'static str {
        self.record.kind.display_name()
    }

    pub fn price_label(&self) -> String {
        price_label(self.record.price_per_day)
    }

    pub fn amenity_badges(&self) -> Vec<AmenityBadge> {
        self.record
            .amenities
            .iter()
            .copied()
            .map(AmenityBadge::from)
            .collect()
    }

    /// Present contact channels, in display order.
    pub fn contacts(&self) -> Vec<ContactLine<'a>> {
        let record = self.record;
        [
            (ContactKind::Phone, record.contact_phone.as_deref()),
            (ContactKind::Email, record.contact_email.as_deref()),
            (ContactKind::Website, record.website.as_deref()),
            (ContactKind::WorkingHours, record.working_hours.as_deref()),
        ]
        .into_iter()
        .filter_map(|(kind, value)| value.map(|value| ContactLine { kind, value }))
        .collect()
    }

    /// House rules; empty when none are published.
    pub fn rules(&self) -> &'a [String] {
        self.record.rules.as_deref().unwrap_or_default()
    }

    pub fn nearby_attractions(&self) -> &'a [String] {
        self.record.nearby_attractions.as_deref().unwrap_or_default()
    }

    /// Detail map centered on this campground with a single marker.
    pub fn map_adapter(
        &self,
        container: impl Into<String>,
        provider: Arc<dyn WidgetProvider>,
    ) -> MapAdapter {
        MapAdapter::focused(container, provider, self.record)
    }
}

/// Cursor over a campground's images.
///
/// Previous/next stop at the ends instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gallery<'a> {
    images: &'a [String],
    active: usize,
}

impl<'a> Gallery<'a> {
    pub fn new(images: &'a [String]) -> Self {
        Self { images, active: 0 }
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_image(&self) -> Option<&'a str> {
        self.images.get(self.active).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.active > 0
    }

    pub fn has_next(&self) -> bool {
        self.active + 1 < self.images.len()
    }

    /// Moves back one image; returns `false` at the first image.
    pub fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.active -= 1;
        true
    }

    /// Moves forward one image; returns `false` at the last image.
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.active += 1;
        true
    }

    /// Jumps to `index`; out-of-range indexes are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.images.len() {
            return false;
        }
        self.active = index;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::Gallery;

    #[test]
    fn gallery_clamps_at_both_ends() {
        let images = vec!["a".to_string(), "b".to_string()];
        let mut gallery = Gallery::new(&images);

        assert!(!gallery.previous());
        assert!(gallery.next());
        assert_eq!(gallery.active_image(), Some("b"));
        assert!(!gallery.next());
        assert_eq!(gallery.active_index(), 1);
    }

    #[test]
    fn gallery_select_ignores_out_of_range() {
        let images = vec!["a".to_string()];
        let mut gallery = Gallery::new(&images);
        assert!(!gallery.select(3));
        assert!(gallery.select(0));
        assert_eq!(gallery.active_image(), Some("a"));
    }

    #[test]
    fn empty_gallery_has_no_active_image() {
        let gallery = Gallery::new(&[]);
        assert!(gallery.is_empty());
        assert_eq!(gallery.active_image(), None);
        assert!(!gallery.has_next());
    }
}

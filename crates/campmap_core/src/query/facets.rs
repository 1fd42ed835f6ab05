//! Distinct values present in a record sequence.

use crate::model::campground::CampgroundRecord;
use crate::model::taxonomy::{Amenity, CampgroundKind, Region};
use std::collections::BTreeSet;

pub fn unique_regions<'a, I>(records: I) -> BTreeSet<Region>
where
    I: IntoIterator<Item = &'a CampgroundRecord>,
{
    records.into_iter().map(|record| record.region).collect()
}

pub fn unique_kinds<'a, I>(records: I) -> BTreeSet<CampgroundKind>
where
    I: IntoIterator<Item = &'a CampgroundRecord>,
{
    records.into_iter().map(|record| record.kind).collect()
}

/// Union of every record's amenity tags.
pub fn unique_amenities<'a, I>(records: I) -> BTreeSet<Amenity>
where
    I: IntoIterator<Item = &'a CampgroundRecord>,
{
    records
        .into_iter()
        .flat_map(|record| record.amenities.iter().copied())
        .collect()
}

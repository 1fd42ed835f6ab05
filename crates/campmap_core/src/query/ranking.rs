//! Sorting and recommendation ranking.
//!
//! # Invariants
//! - All sorts are stable: equal keys keep their input order.
//! - Floating-point keys are compared with `f64::total_cmp`, so the order is
//!   total even for unexpected NaN values.

use crate::model::campground::CampgroundRecord;
use std::cmp::Ordering;

/// Number of recommendations shown when the caller has no preference.
pub const DEFAULT_RECOMMENDED_LIMIT: usize = 3;

/// Composite popularity score: `rating * log10(review_count + 1)`.
pub fn recommendation_score(record: &CampgroundRecord) -> f64 {
    record.rating * (f64::from(record.review_count) + 1.0).log10()
}

pub fn sort_by_rating_descending<'a, I>(records: I) -> Vec<&'a CampgroundRecord>
where
    I: IntoIterator<Item = &'a CampgroundRecord>,
{
    sorted_by(records, |a, b| b.rating.total_cmp(&a.rating))
}

pub fn sort_by_price_ascending<'a, I>(records: I) -> Vec<&'a CampgroundRecord>
where
    I: IntoIterator<Item = &'a CampgroundRecord>,
{
    sorted_by(records, |a, b| a.price_per_day.total_cmp(&b.price_per_day))
}

/// Top `limit` records by descending [`recommendation_score`].
pub fn recommended<'a, I>(records: I, limit: usize) -> Vec<&'a CampgroundRecord>
where
    I: IntoIterator<Item = &'a CampgroundRecord>,
{
    let mut scored = records
        .into_iter()
        .map(|record| (recommendation_score(record), record))
        .collect::<Vec<_>>();
    scored.sort_by(|(a, _), (b, _)| b.total_cmp(a));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, record)| record)
        .collect()
}

fn sorted_by<'a, I, F>(records: I, compare: F) -> Vec<&'a CampgroundRecord>
where
    I: IntoIterator<Item = &'a CampgroundRecord>,
    F: FnMut(&&'a CampgroundRecord, &&'a CampgroundRecord) -> Ordering,
{
    let mut sorted = records.into_iter().collect::<Vec<_>>();
    sorted.sort_by(compare);
    sorted
}

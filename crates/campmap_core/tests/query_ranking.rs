use campmap_core::{
    recommendation_score, recommended, sort_by_price_ascending, sort_by_rating_descending,
    Amenity, CampgroundKind, CampgroundRecord, CampgroundStore, Region,
    DEFAULT_RECOMMENDED_LIMIT,
};

fn record(id: &str, rating: f64, review_count: u32, price_per_day: f64) -> CampgroundRecord {
    CampgroundRecord {
        id: id.to_string(),
        name: format!("Кемпинг {id}"),
        description: String::new(),
        full_description: String::new(),
        region: Region::Moscow,
        region_name: Region::Moscow.display_name().to_string(),
        location: String::new(),
        lat: 55.75,
        lng: 37.61,
        kind: CampgroundKind::Tent,
        amenities: vec![Amenity::Water],
        price_per_day,
        rating,
        review_count,
        images: Vec::new(),
        contact_phone: None,
        contact_email: None,
        website: None,
        working_hours: None,
        rules: None,
        nearby_attractions: None,
    }
}

fn ids(records: &[&CampgroundRecord]) -> Vec<String> {
    records.iter().map(|record| record.id.clone()).collect()
}

#[test]
fn recommended_orders_by_composite_score() {
    let records = vec![
        record("a", 4.5, 132, 450.0),
        record("b", 4.9, 203, 1200.0),
        record("c", 4.6, 78, 200.0),
    ];

    let top = recommended(&records, 3);
    assert_eq!(ids(&top), vec!["b", "a", "c"]);

    let scores = top
        .iter()
        .map(|record| recommendation_score(record))
        .collect::<Vec<_>>();
    assert!((scores[0] - 4.9 * 204f64.log10()).abs() < 1e-12);
    assert!((scores[1] - 4.5 * 133f64.log10()).abs() < 1e-12);
    assert!((scores[2] - 4.6 * 79f64.log10()).abs() < 1e-12);
    assert!(scores[0] > 11.3 && scores[1] > 9.55 && scores[2] > 8.72);
}

#[test]
fn recommended_over_kaluga_fixture_matches_literal_scenario() {
    let store = CampgroundStore::builtin().expect("embedded datasets decode");
    let top = recommended(store.regional(Region::Kaluga), DEFAULT_RECOMMENDED_LIMIT);
    assert_eq!(ids(&top), vec!["camping-5", "camping-4", "camping-8"]);
}

#[test]
fn recommended_truncates_to_limit_and_input_size() {
    let records = vec![
        record("a", 4.0, 10, 100.0),
        record("b", 5.0, 10, 100.0),
        record("c", 3.0, 10, 100.0),
        record("d", 4.5, 10, 100.0),
    ];
    assert_eq!(ids(&recommended(&records, 3)), vec!["b", "d", "a"]);
    assert_eq!(recommended(&records[..2], 3).len(), 2);
    assert!(recommended(&records, 0).is_empty());
}

#[test]
fn recommended_scores_zero_reviews_as_zero_and_keeps_ties_in_order() {
    let records = vec![
        record("new", 5.0, 0, 100.0),
        record("x", 4.0, 9, 100.0),
        record("y", 4.0, 9, 100.0),
    ];
    assert_eq!(recommendation_score(&records[0]), 0.0);
    assert_eq!(ids(&recommended(&records, 3)), vec!["x", "y", "new"]);
}

#[test]
fn rating_sort_is_stable_and_idempotent() {
    let records = vec![
        record("first", 4.5, 1, 100.0),
        record("top", 4.9, 1, 100.0),
        record("second", 4.5, 1, 100.0),
        record("low", 3.0, 1, 100.0),
        record("third", 4.5, 1, 100.0),
    ];

    let sorted = sort_by_rating_descending(&records);
    assert_eq!(ids(&sorted), vec!["top", "first", "second", "third", "low"]);

    let resorted = sort_by_rating_descending(sorted.iter().copied());
    assert_eq!(ids(&resorted), ids(&sorted));
}

#[test]
fn price_sort_is_ascending_and_stable() {
    let records = vec![
        record("mid", 4.0, 1, 500.0),
        record("cheap", 4.0, 1, 200.0),
        record("mid-2", 4.0, 1, 500.0),
        record("pricey", 4.0, 1, 2500.0),
    ];
    assert_eq!(
        ids(&sort_by_price_ascending(&records)),
        vec!["cheap", "mid", "mid-2", "pricey"]
    );
}

#[test]
fn ranking_never_mutates_input() {
    let records = vec![
        record("a", 3.0, 5, 900.0),
        record("b", 5.0, 50, 100.0),
    ];
    let snapshot = records.clone();

    let _ = sort_by_rating_descending(&records);
    let _ = sort_by_price_ascending(&records);
    let _ = recommended(&records, 1);

    assert_eq!(records, snapshot);
}

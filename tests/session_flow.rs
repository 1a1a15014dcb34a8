//! End-to-end coverage of the search session: the store, pipeline,
//! debouncer, address synchronizer, markers, and visible-set reporter
//! working together the way the map page drives them.

use std::time::{Duration, Instant};

use homescout::{
    Bounds, FilterPatch, Listing, ListingId, MemoryNavigator, Navigator, SearchEvent,
    SearchSession, SortKey, StaticSource,
};

fn sample_listings() -> Vec<Listing> {
    serde_json::from_value(serde_json::json!([
        {
            "id": 1,
            "price": 100.0,
            "type": "apartment",
            "city": "Berlin",
            "lng": 13.40,
            "lat": 52.52,
            "bedrooms": 2,
            "createdAt": 2_000,
            "amenities": { "furnished": true }
        },
        {
            "id": 2,
            "price": 50.0,
            "type": "house",
            "city": "Potsdam",
            "lng": 13.06,
            "lat": 52.40,
            "bedrooms": 4,
            "createdAt": 3_000
        },
        {
            "id": "3",
            "price": 100.0,
            "type": "apartment",
            "city": "Berlin-Spandau",
            "createdAt": 1_000
        }
    ]))
    .expect("sample listings")
}

fn session() -> SearchSession<MemoryNavigator> {
    let mut session = SearchSession::new(MemoryNavigator::default());
    session.load_from(&StaticSource::new(sample_listings()));
    session
}

fn ids(listings: &[&Listing]) -> Vec<String> {
    listings.iter().map(|l| l.id.to_string()).collect()
}

#[test]
fn type_filter_narrows_to_exact_matches() {
    let mut session = session();
    session.dispatch(SearchEvent::FiltersPatched(
        FilterPatch::default().property_type("apartment"),
    ));
    assert_eq!(ids(&session.filtered_listings()), ["1", "3"]);
}

#[test]
fn price_ascending_reorders_without_filtering() {
    let mut session = session();
    session.dispatch(SearchEvent::SortChanged(SortKey::PriceAsc));
    assert_eq!(ids(&session.filtered_listings()), ["2", "1", "3"]);
}

#[test]
fn equal_prices_keep_snapshot_order() {
    let mut session = session();
    session.dispatch(SearchEvent::SortChanged(SortKey::PriceAsc));
    // Listings 1 and 3 share a price; 1 precedes 3 in the snapshot.
    assert_eq!(ids(&session.filtered_listings()), ["2", "1", "3"]);

    session.dispatch(SearchEvent::SortChanged(SortKey::PriceDesc));
    assert_eq!(ids(&session.filtered_listings()), ["1", "3", "2"]);
}

#[test]
fn initial_address_hydrates_filters_and_sort() {
    let mut session = SearchSession::new(MemoryNavigator::new("min=100&sort=priceDesc"));
    session.load_from(&StaticSource::new(sample_listings()));

    assert_eq!(session.state().filters.price_min, Some(100.0));
    assert_eq!(session.state().sort_key, SortKey::PriceDesc);
    assert_eq!(ids(&session.filtered_listings()), ["1", "3"]);
    // Hydration reads the address; it never writes it.
    assert_eq!(session.navigator().replacements(), 0);
}

#[test]
fn city_filter_appears_in_the_address() {
    let mut session = session();
    session.dispatch(SearchEvent::FiltersPatched(FilterPatch::default().city("Berlin")));
    assert_eq!(session.navigator().query(), "city=Berlin");
}

#[test]
fn address_round_trip_reproduces_the_state() {
    let mut session = session();
    session.dispatch(SearchEvent::FiltersPatched(
        FilterPatch::default().city("Berlin").price_min(80.0).price_max(150.0),
    ));
    session.dispatch(SearchEvent::SortChanged(SortKey::Newest));
    session.dispatch(SearchEvent::QueryTextChanged("mitte".into()));

    let serialized = session.navigator().query();
    let filters = session.state().filters.clone();

    // Feed the serialized address back as an external navigation.
    let replacements = session.navigator().replacements();
    session.dispatch(SearchEvent::NavigationChanged(serialized.clone()));

    assert_eq!(session.state().filters, filters);
    assert_eq!(session.state().sort_key, SortKey::Newest);
    assert_eq!(session.state().query_text, "mitte");
    // The round trip is a fixed point: no further address writes.
    assert_eq!(session.navigator().replacements(), replacements);
    assert_eq!(session.navigator().query(), serialized);
}

#[test]
fn unrecognized_address_keys_survive_state_writes() {
    let mut session = SearchSession::new(MemoryNavigator::new("ref=newsletter"));
    session.load_from(&StaticSource::new(sample_listings()));
    session.dispatch(SearchEvent::FiltersPatched(FilterPatch::default().city("Berlin")));

    assert_eq!(session.navigator().query(), "ref=newsletter&city=Berlin");
}

#[test]
fn viewport_bursts_collapse_to_the_last_rectangle() {
    let mut session = session();
    let start = Instant::now();

    let rectangles = [
        Bounds::new(0.0, 1.0, 0.0, 1.0),
        Bounds::new(5.0, 6.0, 5.0, 6.0),
        Bounds::new(13.0, 14.0, 52.0, 53.0),
    ];
    for (i, bounds) in rectangles.into_iter().enumerate() {
        session.dispatch_at(
            SearchEvent::ViewportChanged(bounds),
            start + Duration::from_millis(10 * i as u64),
        );
    }

    // Quiet period (120ms) counted from the last event at t=20ms.
    session.tick_at(start + Duration::from_millis(130));
    assert_eq!(session.state().bounds, None);

    session.tick_at(start + Duration::from_millis(141));
    assert_eq!(session.state().bounds, Some(Bounds::new(13.0, 14.0, 52.0, 53.0)));
}

#[test]
fn edge_coordinates_count_as_visible() {
    let mut session = SearchSession::new(MemoryNavigator::default());
    let listing: Listing = serde_json::from_value(serde_json::json!({
        "id": 9, "price": 10.0, "type": "apartment", "city": "X",
        "lng": 10.0, "lat": 50.0
    }))
    .expect("listing");
    session.load_from(&StaticSource::new(vec![listing]));

    let start = Instant::now();
    session.dispatch_at(
        SearchEvent::ViewportChanged(Bounds::new(10.0, 11.0, 50.0, 51.0)),
        start,
    );
    session.tick_at(start + Duration::from_millis(200));

    assert_eq!(ids(&session.visible_listings()), ["9"]);
}

#[test]
fn search_in_area_gates_the_pipeline_but_the_list_always_narrows() {
    let mut session = session();
    let start = Instant::now();

    // A viewport around Berlin proper: listing 1 is inside, listing 2 is
    // in Potsdam, listing 3 has no coordinates at all.
    session.dispatch_at(
        SearchEvent::ViewportChanged(Bounds::new(13.2, 13.6, 52.45, 52.60)),
        start,
    );
    session.tick_at(start + Duration::from_millis(200));

    // Toggle off: the full filtered set stands, the list narrows anyway.
    assert_eq!(session.filtered_listings().len(), 3);
    assert_eq!(ids(&session.visible_listings()), ["1"]);

    session.dispatch(SearchEvent::SearchInAreaToggled(true));
    assert_eq!(ids(&session.filtered_listings()), ["1"]);

    // Toggling back off restores the wider set.
    session.dispatch(SearchEvent::SearchInAreaToggled(false));
    assert_eq!(session.filtered_listings().len(), 3);
}

#[test]
fn markers_track_hover_across_heterogeneous_id_types() {
    let mut session = session();

    // Listing 1's id arrived as a number; hover with a string-sourced id.
    session.dispatch(SearchEvent::HoverEntered(ListingId::new("1")));
    let highlighted: Vec<_> = session
        .markers()
        .iter()
        .filter(|marker| marker.highlighted)
        .collect();
    assert_eq!(highlighted.len(), 1);
    assert_eq!(highlighted[0].id, ListingId::from(1_i64));

    // Stale leave from another marker changes nothing.
    session.dispatch(SearchEvent::HoverLeft(ListingId::new("2")));
    assert_eq!(session.state().active_id, Some(ListingId::new("1")));
}

#[test]
fn unlocated_listings_stay_in_results_but_off_the_map() {
    let mut session = session();
    session.dispatch(SearchEvent::FiltersPatched(
        FilterPatch::default().property_type("apartment"),
    ));

    // Listing 3 matches the filter but has no coordinates: present in the
    // filtered output, absent from the markers.
    assert_eq!(session.filtered_listings().len(), 2);
    assert_eq!(session.markers().len(), 1);
}

#[test]
fn amenity_and_bedroom_filters_compose() {
    let mut session = session();
    session.dispatch(SearchEvent::FiltersPatched(
        FilterPatch::default().furnished(true).beds_min(2),
    ));
    assert_eq!(ids(&session.filtered_listings()), ["1"]);
}

#[test]
fn inverted_price_range_yields_an_empty_result_not_an_error() {
    let mut session = session();
    session.dispatch(SearchEvent::FiltersPatched(
        FilterPatch::default().price_min(500.0).price_max(100.0),
    ));
    assert!(session.filtered_listings().is_empty());
    assert!(session.visible_listings().is_empty());
}

//! Behaviour tests for JSON catalog loading and lookup.

use rstest::{fixture, rstest};
use tripsmith_core::{PoiCatalog, PoiId};
use tripsmith_data::JsonCatalog;

const CATALOG: &str = r#"{
    "Chennai": [
        {
            "id": "marina-beach",
            "name": "Marina Beach",
            "latitude": 13.0487,
            "longitude": 80.2824,
            "category": "beach",
            "tags": ["beach", "sunset"]
        },
        {
            "id": "elliots-beach",
            "name": "Elliot's Beach",
            "latitude": 13.0003,
            "longitude": 80.2718,
            "category": "beach",
            "tags": "beach, relaxation"
        },
        {
            "id": "no-coordinates",
            "name": "Phantom Pier",
            "category": "beach"
        }
    ]
}"#;

#[fixture]
fn catalog() -> JsonCatalog {
    JsonCatalog::from_str(CATALOG).expect("catalog should parse")
}

#[rstest]
fn accepts_both_array_and_comma_string_tags(catalog: JsonCatalog) {
    let pois = catalog
        .pois_in_categories("Chennai", &["beach".to_owned()])
        .expect("lookup should succeed");

    let marina = pois
        .iter()
        .find(|poi| poi.id == PoiId::new("marina-beach"))
        .expect("marina should load");
    assert_eq!(marina.tags, vec!["beach", "sunset"]);

    let elliots = pois
        .iter()
        .find(|poi| poi.id == PoiId::new("elliots-beach"))
        .expect("elliots should load");
    assert_eq!(elliots.tags, vec!["beach", "relaxation"]);
}

#[rstest]
fn drops_records_without_coordinates(catalog: JsonCatalog) {
    let pois = catalog
        .pois_in_categories("Chennai", &["beach".to_owned()])
        .expect("lookup should succeed");
    assert_eq!(pois.len(), 2);
    assert!(pois.iter().all(|poi| poi.id != PoiId::new("no-coordinates")));
}

#[rstest]
#[case("Chennai")]
#[case("chennai")]
#[case("CHENNAI")]
fn city_lookup_ignores_case(catalog: JsonCatalog, #[case] city: &str) {
    let pois = catalog
        .pois_in_categories(city, &["beach".to_owned()])
        .expect("lookup should succeed");
    assert_eq!(pois.len(), 2);
}

#[rstest]
fn id_lookup_preserves_request_order(catalog: JsonCatalog) {
    let ids = [PoiId::new("elliots-beach"), PoiId::new("marina-beach")];
    let pois = catalog
        .pois_by_ids("Chennai", &ids)
        .expect("lookup should succeed");
    let found: Vec<&PoiId> = pois.iter().map(|poi| &poi.id).collect();
    assert_eq!(found, vec![&ids[0], &ids[1]]);
}

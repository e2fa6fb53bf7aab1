//! End-to-end behaviour tests: JSON catalog to itinerary JSON through
//! the facade.

use std::collections::HashSet;

use rstest::{fixture, rstest};
use tripsmith_engine::{JsonCatalog, PoiId, TripPlanner, TripRequest};

const CATALOG: &str = r#"{
    "Chennai": [
        {
            "id": "fort-st-george",
            "name": "Fort St. George",
            "latitude": 13.0796,
            "longitude": 80.2875,
            "category": "heritage",
            "tags": ["fort", "colonial", "british"],
            "entry_fee": 15,
            "visit_minutes": 90,
            "rating": 4.4
        },
        {
            "id": "government-museum",
            "name": "Government Museum",
            "latitude": 13.0702,
            "longitude": 80.2599,
            "category": "museum",
            "tags": "british, colonial",
            "entry_fee": 20,
            "visit_minutes": 120,
            "rating": 4.5
        },
        {
            "id": "kapaleeshwarar-temple",
            "name": "Kapaleeshwarar Temple",
            "latitude": 13.0337,
            "longitude": 80.2698,
            "category": "temple",
            "tags": ["dravidian", "shiva"],
            "visit_minutes": 60,
            "rating": 4.6
        },
        {
            "id": "santhome-basilica",
            "name": "Santhome Basilica",
            "latitude": 13.0336,
            "longitude": 80.2781,
            "category": "heritage",
            "tags": ["colonial"],
            "visit_minutes": 45,
            "rating": 4.5
        },
        {
            "id": "egmore-museum",
            "name": "Egmore Museum Complex",
            "latitude": 13.0732,
            "longitude": 80.2572,
            "category": "museum",
            "tags": ["british"],
            "entry_fee": 30,
            "visit_minutes": 90,
            "rating": 4.3
        },
        {
            "id": "vivekananda-house",
            "name": "Vivekananda House",
            "latitude": 13.0475,
            "longitude": 80.2793,
            "category": "heritage",
            "tags": ["colonial"],
            "entry_fee": 20,
            "visit_minutes": 60,
            "rating": 4.4
        }
    ]
}"#;

#[fixture]
fn catalog() -> JsonCatalog {
    JsonCatalog::from_str(CATALOG).expect("catalog should parse")
}

#[rstest]
fn plans_a_two_day_trip_without_repeating_stops(catalog: JsonCatalog) {
    let planner = TripPlanner::new(&catalog);
    let itinerary = planner
        .plan(&TripRequest::new("pkg-heritage").with_days(2))
        .expect("plan should succeed");

    assert_eq!(itinerary.day_count, 2);
    assert!(!itinerary.days[0].slots.is_empty());

    let mut seen: HashSet<&PoiId> = HashSet::new();
    for day in &itinerary.days {
        for slot in &day.slots {
            assert!(seen.insert(&slot.poi_id), "repeated stop {:?}", slot.poi_id);
        }
    }
}

#[rstest]
fn itinerary_serialises_to_the_documented_shape(catalog: JsonCatalog) {
    let planner = TripPlanner::new(&catalog);
    let itinerary = planner
        .plan(&TripRequest::new("pkg-heritage"))
        .expect("plan should succeed");
    let json = serde_json::to_value(&itinerary).expect("itinerary should serialise");

    assert_eq!(json["city"], "Chennai");
    assert_eq!(json["package_name"], "Heritage & History");
    assert_eq!(json["day_count"], 1);
    assert!(json["trip_id"].is_string());
    assert!(json["cost"]["grand_total"].is_number());
    assert!(json["summary"].is_string());
    let days = json["days"].as_array().expect("days array");
    assert_eq!(days.len(), 1);
    let slot = &days[0]["slots"][0];
    assert!(slot["arrival"].is_string());
    assert!(slot["slot_cost"].is_number());
}

#[rstest]
fn chat_planning_defaults_without_a_generator(catalog: JsonCatalog) {
    let planner = TripPlanner::new(&catalog);
    let itinerary = planner
        .plan_from_chat("somewhere historic please")
        .expect("plan should succeed");

    assert_eq!(itinerary.day_count, 1);
    assert_eq!(itinerary.summary, tripsmith_core::DEFAULT_SUMMARY);
}

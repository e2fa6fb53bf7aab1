//! Behaviour tests driving the planner through its collaborator seams.

use std::collections::HashSet;

use geo::Coord;
use rstest::{fixture, rstest};
use tripsmith_core::{
    CatalogError, MatrixError, Poi, PoiCatalog, PoiId, RouteMetrics, RoutingProvider,
    TransportMode, TripPlanner, TripRequest, DEFAULT_SUMMARY,
};

struct FixedCatalog {
    pois: Vec<Poi>,
}

impl PoiCatalog for FixedCatalog {
    fn pois_in_categories(
        &self,
        _city: &str,
        categories: &[String],
    ) -> Result<Vec<Poi>, CatalogError> {
        Ok(self
            .pois
            .iter()
            .filter(|poi| categories.iter().any(|cat| *cat == poi.category))
            .cloned()
            .collect())
    }

    fn pois_by_ids(&self, _city: &str, ids: &[PoiId]) -> Result<Vec<Poi>, CatalogError> {
        Ok(ids
            .iter()
            .filter_map(|id| self.pois.iter().find(|poi| &poi.id == id).cloned())
            .collect())
    }
}

struct OfflineRouting;

impl RoutingProvider for OfflineRouting {
    fn duration_matrix(
        &self,
        _coords: &[Coord<f64>],
        _mode: TransportMode,
    ) -> Result<Vec<Vec<f64>>, MatrixError> {
        Err(MatrixError::Service {
            message: "routing offline".to_owned(),
        })
    }

    fn route_metrics(
        &self,
        _coords: &[Coord<f64>],
        _mode: TransportMode,
    ) -> Result<RouteMetrics, MatrixError> {
        Err(MatrixError::Service {
            message: "routing offline".to_owned(),
        })
    }
}

#[fixture]
fn catalog() -> FixedCatalog {
    let pois = (0..8)
        .map(|i| {
            let offset = 0.01 * f64::from(i);
            Poi::new(
                format!("heritage-{i}"),
                format!("Heritage Site {i}"),
                Coord {
                    x: 80.25 + offset,
                    y: 13.05 + offset,
                },
                "heritage",
            )
            .with_rating(4.5)
            .with_entry_fee(20.0)
            .with_visit_minutes(60)
        })
        .collect();
    FixedCatalog { pois }
}

#[rstest]
fn consecutive_days_never_share_a_stop(catalog: FixedCatalog) {
    let planner = TripPlanner::new(&catalog);
    let itinerary = planner
        .plan(&TripRequest::new("pkg-heritage").with_days(2))
        .expect("plan should succeed");

    let day_one: HashSet<&PoiId> = itinerary.days[0].poi_ids().collect();
    let day_two: HashSet<&PoiId> = itinerary.days[1].poi_ids().collect();
    assert!(!day_one.is_empty());
    assert!(day_one.is_disjoint(&day_two));
}

#[rstest]
fn failed_routing_degrades_to_a_full_plan(catalog: FixedCatalog) {
    let routing = OfflineRouting;
    let planner = TripPlanner::new(&catalog).with_routing(&routing);
    let itinerary = planner
        .plan(&TripRequest::new("pkg-heritage"))
        .expect("plan should succeed");

    assert!(!itinerary.days[0].slots.is_empty());
    assert_eq!(itinerary.summary, DEFAULT_SUMMARY);
}

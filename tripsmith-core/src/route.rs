//! Greedy nearest-neighbour route ordering.
//!
//! A heuristic, not an optimiser: from the origin, repeatedly hop to the
//! unvisited POI with the lowest travel time. Ties go to the first
//! minimum in list order, which keeps the ordering deterministic for a
//! fixed matrix.

use geo::Coord;

use crate::poi::Poi;
use crate::transport::TransportMode;
use crate::travel::{MatrixSource, RoutingProvider, TravelMatrix};

/// POIs reordered into a visiting sequence, with the provenance of the
/// travel matrix that drove the ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedRoute {
    /// POIs in visiting order.
    pub pois: Vec<Poi>,
    /// Which path produced the travel matrix.
    pub matrix_source: MatrixSource,
}

/// Order `pois` into a visiting sequence starting from `origin`.
///
/// Builds the coordinate list `[origin, poi_1..poi_n]`, computes the
/// travel matrix (service or geometric fallback), then walks greedily.
/// Empty input yields an empty route.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use tripsmith_core::{order_route_greedy, Poi, TransportMode};
///
/// let origin = Coord { x: 80.2707, y: 13.0827 };
/// let near = Poi::new("near", "Near", Coord { x: 80.2717, y: 13.0837 }, "park");
/// let far = Poi::new("far", "Far", Coord { x: 80.4, y: 13.3 }, "park");
/// let route = order_route_greedy(vec![far, near], origin, TransportMode::Auto, None);
/// assert_eq!(route.pois[0].id.as_str(), "near");
/// ```
#[must_use]
pub fn order_route_greedy(
    pois: Vec<Poi>,
    origin: Coord<f64>,
    mode: TransportMode,
    provider: Option<&dyn RoutingProvider>,
) -> OrderedRoute {
    let coords: Vec<Coord<f64>> = std::iter::once(origin)
        .chain(pois.iter().map(|poi| poi.location))
        .collect();
    let matrix = TravelMatrix::compute(provider, &coords, mode);

    // Pair each POI with its matrix column (origin occupies column 0).
    let mut remaining: Vec<(usize, Poi)> = pois.into_iter().enumerate().collect();
    let mut ordered = Vec::with_capacity(remaining.len());
    let mut current = 0_usize;

    while !remaining.is_empty() {
        let mut best_slot = 0_usize;
        for slot in 1..remaining.len() {
            let candidate = matrix.minutes_between(current, remaining[slot].0 + 1);
            let incumbent = matrix.minutes_between(current, remaining[best_slot].0 + 1);
            if candidate < incumbent {
                best_slot = slot;
            }
        }
        let (index, poi) = remaining.remove(best_slot);
        current = index + 1;
        ordered.push(poi);
    }

    OrderedRoute {
        pois: ordered,
        matrix_source: matrix.source().clone(),
    }
}

//! Travel matrices with a deterministic great-circle fallback.

use geo::Coord;

use crate::transport::TransportMode;

use super::error::MatrixError;
use super::provider::RoutingProvider;

/// Mean Earth radius in kilometres, as used by the haversine formula.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Assumed average speed for the geometric fallback, in km/h.
pub const FALLBACK_SPEED_KMH: f64 = 20.0;

/// Why the geometric fallback was used instead of the routing service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// No routing provider was configured.
    NoProvider,
    /// Fewer than two coordinates; the service cannot be queried.
    TooFewCoordinates,
    /// The provider was queried and failed.
    ProviderFailed(MatrixError),
}

/// Which path produced a travel matrix or route summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixSource {
    /// The external routing service answered.
    Service,
    /// The deterministic great-circle fallback was used.
    GreatCircle(FallbackReason),
}

impl MatrixSource {
    /// Whether the fallback produced this result.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::GreatCircle(_))
    }
}

/// Square matrix of travel minutes over a coordinate list.
///
/// Index 0 is by convention the trip origin. The matrix is scoped to one
/// scheduling call; it is never persisted.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use tripsmith_core::{TransportMode, TravelMatrix};
///
/// let coords = [
///     Coord { x: 80.2707, y: 13.0827 },
///     Coord { x: 80.2496, y: 13.0604 },
/// ];
/// let matrix = TravelMatrix::compute(None, &coords, TransportMode::Auto);
/// assert!(matrix.source().is_fallback());
/// // Roughly 4.3 km apart; about 13 minutes at 20 km/h.
/// let minutes = matrix.minutes_between(0, 1);
/// assert!((minutes - 12.9).abs() < 0.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TravelMatrix {
    minutes: Vec<Vec<f64>>,
    source: MatrixSource,
}

impl TravelMatrix {
    /// Build a matrix for `coords`, preferring `provider` and falling back
    /// to the great-circle computation on any failure.
    ///
    /// The fallback is unconditional and silent towards the caller; the
    /// reason is recorded in [`TravelMatrix::source`] for observability.
    #[must_use]
    pub fn compute(
        provider: Option<&dyn RoutingProvider>,
        coords: &[Coord<f64>],
        mode: TransportMode,
    ) -> Self {
        if coords.len() < 2 {
            return Self {
                minutes: geometric_matrix(coords),
                source: MatrixSource::GreatCircle(FallbackReason::TooFewCoordinates),
            };
        }
        let Some(provider) = provider else {
            return Self {
                minutes: geometric_matrix(coords),
                source: MatrixSource::GreatCircle(FallbackReason::NoProvider),
            };
        };
        match provider.duration_matrix(coords, mode) {
            Ok(minutes) if is_square(&minutes, coords.len()) => Self {
                minutes,
                source: MatrixSource::Service,
            },
            Ok(_) => {
                log::warn!("routing service returned a non-square matrix; using fallback");
                Self {
                    minutes: geometric_matrix(coords),
                    source: MatrixSource::GreatCircle(FallbackReason::ProviderFailed(
                        MatrixError::Malformed {
                            message: "matrix dimensions do not match the request".to_owned(),
                        },
                    )),
                }
            }
            Err(err) => {
                log::warn!("routing service unavailable ({err}); using fallback");
                Self {
                    minutes: geometric_matrix(coords),
                    source: MatrixSource::GreatCircle(FallbackReason::ProviderFailed(err)),
                }
            }
        }
    }

    /// Travel minutes from one coordinate index to another.
    ///
    /// Out-of-range indices are unreachable and report infinity.
    #[must_use]
    pub fn minutes_between(&self, from: usize, to: usize) -> f64 {
        self.minutes
            .get(from)
            .and_then(|row| row.get(to))
            .copied()
            .unwrap_or(f64::INFINITY)
    }

    /// Number of coordinates covered by the matrix.
    #[must_use]
    pub fn len(&self) -> usize {
        self.minutes.len()
    }

    /// Whether the matrix covers no coordinates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.minutes.is_empty()
    }

    /// Which path produced the matrix.
    #[must_use]
    pub const fn source(&self) -> &MatrixSource {
        &self.source
    }
}

/// Summary distance and duration for an ordered route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummary {
    /// Total distance in kilometres, rounded to two decimals.
    pub distance_km: f64,
    /// Total duration in minutes, rounded to one decimal.
    pub duration_mins: f64,
    /// Which path produced the summary.
    pub source: MatrixSource,
}

/// Summarise an ordered route, preferring the provider's directions
/// endpoint and falling back to consecutive great-circle legs.
#[must_use]
pub fn route_summary(
    provider: Option<&dyn RoutingProvider>,
    coords: &[Coord<f64>],
    mode: TransportMode,
) -> RouteSummary {
    if coords.len() < 2 {
        return geometric_summary(coords, FallbackReason::TooFewCoordinates);
    }
    let Some(provider) = provider else {
        return geometric_summary(coords, FallbackReason::NoProvider);
    };
    match provider.route_metrics(coords, mode) {
        Ok(metrics) => RouteSummary {
            distance_km: round2(metrics.distance_km),
            duration_mins: round1(metrics.duration_mins),
            source: MatrixSource::Service,
        },
        Err(err) => {
            log::warn!("route summary unavailable ({err}); using fallback");
            geometric_summary(coords, FallbackReason::ProviderFailed(err))
        }
    }
}

/// Great-circle distance in kilometres between two WGS84 coordinates.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use tripsmith_core::haversine_km;
///
/// let central = Coord { x: 80.2707, y: 13.0827 };
/// let egmore = Coord { x: 80.2496, y: 13.0604 };
/// assert!((haversine_km(central, egmore) - 4.3).abs() < 0.1);
/// ```
#[must_use]
pub fn haversine_km(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lat_a = a.y.to_radians();
    let lat_b = b.y.to_radians();
    let d_lat = (b.y - a.y).to_radians();
    let d_lon = (b.x - a.x).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

fn fallback_minutes(distance_km: f64) -> f64 {
    (distance_km / FALLBACK_SPEED_KMH) * 60.0
}

fn geometric_matrix(coords: &[Coord<f64>]) -> Vec<Vec<f64>> {
    coords
        .iter()
        .map(|&from| {
            coords
                .iter()
                .map(|&to| fallback_minutes(haversine_km(from, to)))
                .collect()
        })
        .collect()
}

fn geometric_summary(coords: &[Coord<f64>], reason: FallbackReason) -> RouteSummary {
    let total_km: f64 = coords
        .windows(2)
        .map(|pair| match pair {
            [from, to] => haversine_km(*from, *to),
            _ => 0.0,
        })
        .sum();
    RouteSummary {
        distance_km: round2(total_km),
        duration_mins: round1(fallback_minutes(total_km)),
        source: MatrixSource::GreatCircle(reason),
    }
}

fn is_square(matrix: &[Vec<f64>], expected: usize) -> bool {
    matrix.len() == expected && matrix.iter().all(|row| row.len() == expected)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

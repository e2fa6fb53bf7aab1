//! Routing-provider trait for duration matrices and route summaries.

use geo::Coord;

use crate::transport::TransportMode;

use super::error::MatrixError;

/// Distance and duration for one ordered route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteMetrics {
    /// Total distance in kilometres.
    pub distance_km: f64,
    /// Total duration in minutes.
    pub duration_mins: f64,
}

/// External routing service endpoints.
///
/// Implementers translate [`TransportMode`] into the service's profile
/// vocabulary and return minutes. Failures are expected and acceptable:
/// every caller in the engine falls back to the geometric computation in
/// [`TravelMatrix::compute`](super::TravelMatrix::compute).
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use tripsmith_core::{MatrixError, RouteMetrics, RoutingProvider, TransportMode};
///
/// struct OneMinuteEverywhere;
///
/// impl RoutingProvider for OneMinuteEverywhere {
///     fn duration_matrix(
///         &self,
///         coords: &[Coord<f64>],
///         _mode: TransportMode,
///     ) -> Result<Vec<Vec<f64>>, MatrixError> {
///         if coords.len() < 2 {
///             return Err(MatrixError::TooFewCoordinates);
///         }
///         let n = coords.len();
///         Ok((0..n)
///             .map(|i| (0..n).map(|j| if i == j { 0.0 } else { 1.0 }).collect())
///             .collect())
///     }
///
///     fn route_metrics(
///         &self,
///         coords: &[Coord<f64>],
///         _mode: TransportMode,
///     ) -> Result<RouteMetrics, MatrixError> {
///         if coords.len() < 2 {
///             return Err(MatrixError::TooFewCoordinates);
///         }
///         Ok(RouteMetrics { distance_km: 1.0, duration_mins: 1.0 })
///     }
/// }
///
/// let provider = OneMinuteEverywhere;
/// let coords = [Coord { x: 80.0, y: 13.0 }, Coord { x: 80.1, y: 13.1 }];
/// let matrix = provider.duration_matrix(&coords, TransportMode::Auto)?;
/// assert_eq!(matrix.len(), 2);
/// # Ok::<(), MatrixError>(())
/// ```
pub trait RoutingProvider {
    /// Return an `n x n` matrix of travel minutes for `coords`.
    ///
    /// # Errors
    /// Returns [`MatrixError`] when the service cannot produce a matrix;
    /// callers fall back to the geometric computation.
    fn duration_matrix(
        &self,
        coords: &[Coord<f64>],
        mode: TransportMode,
    ) -> Result<Vec<Vec<f64>>, MatrixError>;

    /// Return summary distance and duration for an ordered route.
    ///
    /// # Errors
    /// Returns [`MatrixError`] when the service cannot summarise the
    /// route; callers fall back to the geometric computation.
    fn route_metrics(
        &self,
        coords: &[Coord<f64>],
        mode: TransportMode,
    ) -> Result<RouteMetrics, MatrixError>;
}

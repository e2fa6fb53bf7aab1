//! openrouteservice API response types.
//!
//! Covers the two endpoints the engine calls: the Matrix service, which
//! returns pairwise durations for a coordinate list, and the Directions
//! service, which returns summary distance and duration for an ordered
//! route.
//!
//! See: <https://openrouteservice.org/dev/#/api-docs/v2>

use serde::Deserialize;

/// Matrix service response.
///
/// A successful response carries a square `durations` grid in seconds;
/// unroutable pairs come back as `null`. Failures carry an `error`
/// object instead.
#[derive(Debug, Deserialize)]
pub struct MatrixResponse {
    /// Durations in seconds; `durations[i][j]` is the travel time from
    /// the i-th to the j-th location. `None` when no route exists.
    pub durations: Option<Vec<Vec<Option<f64>>>>,

    /// Error detail when the request failed.
    pub error: Option<ApiError>,
}

/// Directions service response.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    /// One route per request; the engine sends one.
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,

    /// Error detail when the request failed.
    pub error: Option<ApiError>,
}

/// One route in a Directions response.
#[derive(Debug, Deserialize)]
pub struct DirectionsRoute {
    /// Distance and duration totals for the route.
    pub summary: DirectionsSummary,
}

/// Distance/duration totals for a route.
#[derive(Debug, Deserialize)]
pub struct DirectionsSummary {
    /// Route length in metres.
    #[serde(default)]
    pub distance: f64,
    /// Route duration in seconds.
    #[serde(default)]
    pub duration: f64,
}

/// Error object embedded in failed responses.
#[derive(Debug, Deserialize)]
pub struct ApiError {
    /// Numeric error code.
    #[serde(default)]
    pub code: u32,
    /// Human-readable failure message.
    #[serde(default)]
    pub message: String,
}

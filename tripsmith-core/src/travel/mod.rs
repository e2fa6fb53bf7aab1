//! Pairwise travel times between coordinates.
//!
//! The [`RoutingProvider`] trait abstracts an external routing service's
//! matrix and directions endpoints. [`TravelMatrix::compute`] wraps a
//! provider with an unconditional deterministic fallback: great-circle
//! distance at a fixed average speed. The result records which path
//! produced it, so callers and tests can tell primary from fallback
//! without guessing.

mod error;
mod matrix;
mod provider;

pub use error::MatrixError;
pub use matrix::{
    FALLBACK_SPEED_KMH, FallbackReason, MatrixSource, RouteSummary, TravelMatrix, haversine_km,
    route_summary,
};
pub use provider::{RouteMetrics, RoutingProvider};

//! Core domain types and planning pipeline for the Tripsmith engine.
//!
//! The pipeline runs in fixed stages: resolve a [`PlanConfig`] from a
//! package preset, a budget tier, and caller overrides; filter and rank
//! catalog candidates; order a day's stops greedily over a travel
//! matrix; walk the ordered stops into timed slots under the day
//! window; and roll day costs into a trip-level [`CostSummary`]. The
//! [`TripPlanner`] drives the stages once per day and threads a
//! trip-scoped exclusion set across days.
//!
//! External collaborators (POI catalog, routing service, text
//! generator) sit behind traits. Routing and text generation are
//! optional and degrade to a deterministic geometric fallback and
//! fixed default strings; trips never fail because a collaborator is
//! down.
//!
//! # Examples
//! ```
//! use geo::Coord;
//! use tripsmith_core::{CatalogError, Poi, PoiCatalog, PoiId, TripPlanner, TripRequest};
//!
//! struct Fort;
//!
//! impl PoiCatalog for Fort {
//!     fn pois_in_categories(
//!         &self,
//!         _city: &str,
//!         _categories: &[String],
//!     ) -> Result<Vec<Poi>, CatalogError> {
//!         Ok(vec![Poi::new(
//!             "fort",
//!             "Fort St. George",
//!             Coord { x: 80.2875, y: 13.0796 },
//!             "heritage",
//!         )])
//!     }
//!
//!     fn pois_by_ids(&self, _city: &str, _ids: &[PoiId]) -> Result<Vec<Poi>, CatalogError> {
//!         Ok(Vec::new())
//!     }
//! }
//!
//! let planner = TripPlanner::new(&Fort);
//! let itinerary = planner.plan(&TripRequest::new("pkg-heritage"))?;
//! assert_eq!(itinerary.day_count, 1);
//! # Ok::<(), tripsmith_core::PlanError>(())
//! ```

#![forbid(unsafe_code)]

mod catalog;
mod config;
mod constraint;
mod cost;
mod filter;
mod planner;
mod poi;
mod route;
mod schedule;
mod textgen;
mod time;
mod transport;
pub mod travel;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use catalog::{CatalogError, PoiCatalog};
pub use config::{
    default_package, package, packages, resolve_config, BudgetTier, Pace, Package,
    PackageDefaults, PlanConfig, PlanOverrides, TierDefaults, DEFAULT_PACKAGE_ID,
};
pub use constraint::{DayConstraint, DayConstraintError};
pub use cost::{build_cost_summary, CostSummary};
pub use filter::rank_candidates;
pub use planner::{
    Itinerary, PlanError, TripPlanner, TripRequest, DEFAULT_CITY, DEFAULT_ORIGIN,
};
pub use poi::{OpeningHours, Poi, PoiId};
pub use route::{order_route_greedy, OrderedRoute};
pub use schedule::{
    schedule_day, schedule_day_routed, CostBreakdown, DaySchedule, TimeSlot,
    DEFAULT_VISIT_MINUTES,
};
pub use textgen::{
    ExtractedConstraints, TextGenError, TextGenerator, TripDigest, DEFAULT_SUMMARY,
};
pub use time::{TimeOfDay, TimeParseError};
pub use transport::{
    activity_surcharge, activity_surcharges, transport_cost, travel_minutes, TransportMode,
    TransportRates, MIN_TRAVEL_MINUTES,
};
pub use travel::{
    haversine_km, route_summary, FallbackReason, MatrixError, MatrixSource, RouteMetrics,
    RouteSummary, RoutingProvider, TravelMatrix, FALLBACK_SPEED_KMH,
};

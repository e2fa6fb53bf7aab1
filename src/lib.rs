//! Facade crate for the Tripsmith itinerary engine.
//!
//! This crate re-exports the core planning types and, behind the `data`
//! feature, the catalog loaders and HTTP collaborators.

#![forbid(unsafe_code)]

pub use tripsmith_core::{
    build_cost_summary, default_package, order_route_greedy, package, packages, rank_candidates,
    resolve_config, schedule_day, BudgetTier, CatalogError, CostBreakdown, CostSummary,
    DayConstraint, DayConstraintError, DaySchedule, ExtractedConstraints, Itinerary, MatrixError,
    MatrixSource, OpeningHours, Pace, Package, PlanConfig, PlanError, PlanOverrides, Poi,
    PoiCatalog, PoiId, RoutingProvider, TextGenError, TextGenerator, TimeOfDay, TimeSlot,
    TransportMode, TravelMatrix, TripDigest, TripPlanner, TripRequest,
};

#[cfg(feature = "data")]
pub use tripsmith_data::{
    CatalogLoadError, HttpRoutingProvider, HttpRoutingProviderConfig, HttpTextGenerator,
    HttpTextGeneratorConfig, JsonCatalog, SqliteCatalog, SqliteCatalogError,
};

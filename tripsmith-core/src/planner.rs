//! Trip orchestration: day-by-day filtering, routing, scheduling, and
//! final assembly.
//!
//! Planning is strictly sequential. Day *k* reads the POIs consumed by
//! days 1..*k*-1 through a trip-scoped exclusion set, so no two days of
//! one trip may be scheduled concurrently. The set lives on the stack of
//! one [`TripPlanner::plan`] call and is never shared across trips.

use std::collections::HashSet;

use geo::Coord;
use uuid::Uuid;

use crate::catalog::{CatalogError, PoiCatalog};
use crate::config::{package, resolve_config, BudgetTier, PlanConfig, PlanOverrides};
use crate::constraint::{DayConstraint, DayConstraintError};
use crate::cost::{build_cost_summary, CostSummary};
use crate::filter::rank_candidates;
use crate::poi::{Poi, PoiId};
use crate::schedule::{schedule_day, DaySchedule};
use crate::textgen::{TextGenerator, TripDigest, DEFAULT_SUMMARY};
use crate::transport::TransportMode;
use crate::travel::RoutingProvider;

/// City assumed when a request names none.
pub const DEFAULT_CITY: &str = "Chennai";

/// Origin assumed when a request names none: central Chennai.
pub const DEFAULT_ORIGIN: Coord<f64> = Coord {
    x: 80.2707,
    y: 13.0827,
};

/// A trip that cannot be planned.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// The request asked for zero days.
    #[error("trip day count must be at least 1, got {days}")]
    InvalidDayCount {
        /// The rejected day count.
        days: u32,
    },
    /// A structured request named a package that does not exist.
    #[error("unknown package id {id:?}")]
    UnknownPackage {
        /// The rejected package id.
        id: String,
    },
    /// A day's window cannot be scheduled.
    #[error("day {day}: {source}")]
    Day {
        /// One-based day number.
        day: u32,
        /// The underlying window problem.
        #[source]
        source: DayConstraintError,
    },
    /// The catalog collaborator failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// A structured trip request.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripRequest {
    /// Package preset id; must exist.
    pub package_id: String,
    /// Destination city; [`DEFAULT_CITY`] when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub city: Option<String>,
    /// Trip length in days; must be at least 1.
    pub days: u32,
    /// Spending tier.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tier: BudgetTier,
    /// Trip origin (hotel); [`DEFAULT_ORIGIN`] when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub origin: Option<Coord<f64>>,
    /// Field-level configuration overrides.
    #[cfg_attr(feature = "serde", serde(default))]
    pub overrides: PlanOverrides,
    /// Explicit constraints per day, indexed from day 1; `None` entries
    /// and days beyond the list synthesize from the trip configuration.
    #[cfg_attr(feature = "serde", serde(default))]
    pub day_constraints: Vec<Option<DayConstraint>>,
}

impl TripRequest {
    /// A one-day request for `package_id` with everything else defaulted.
    #[must_use]
    pub fn new(package_id: impl Into<String>) -> Self {
        Self {
            package_id: package_id.into(),
            city: None,
            days: 1,
            tier: BudgetTier::default(),
            origin: None,
            overrides: PlanOverrides::default(),
            day_constraints: Vec::new(),
        }
    }

    /// Set the trip length.
    #[must_use]
    pub fn with_days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    /// Set the spending tier.
    #[must_use]
    pub fn with_tier(mut self, tier: BudgetTier) -> Self {
        self.tier = tier;
        self
    }

    /// Set the trip origin.
    #[must_use]
    pub fn with_origin(mut self, origin: Coord<f64>) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Set the configuration overrides.
    #[must_use]
    pub fn with_overrides(mut self, overrides: PlanOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Set the explicit per-day constraints.
    #[must_use]
    pub fn with_day_constraints(mut self, constraints: Vec<Option<DayConstraint>>) -> Self {
        self.day_constraints = constraints;
        self
    }
}

/// A fully assembled trip plan.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Itinerary {
    /// Unique id for this plan.
    pub trip_id: Uuid,
    /// Destination city.
    pub city: String,
    /// Display name of the package preset.
    pub package_name: String,
    /// Trip length in days.
    pub day_count: u32,
    /// Trip-level transport mode.
    pub transport_mode: TransportMode,
    /// One schedule per day, in order.
    pub days: Vec<DaySchedule>,
    /// Trip-level cost roll-up.
    pub cost: CostSummary,
    /// Natural-language summary of the trip.
    pub summary: String,
    /// Advisory cost-reduction suggestions, one per overspent day.
    pub suggestions: Vec<String>,
}

/// Drives the filter, orderer, and scheduler once per day and assembles
/// the final itinerary.
///
/// Collaborators are borrowed for the planner's lifetime. The catalog is
/// required; routing and text generation are optional and degrade to the
/// geometric fallback and default strings respectively.
pub struct TripPlanner<'a> {
    catalog: &'a dyn PoiCatalog,
    routing: Option<&'a dyn RoutingProvider>,
    textgen: Option<&'a dyn TextGenerator>,
}

impl<'a> TripPlanner<'a> {
    /// Build a planner over a catalog, with no optional collaborators.
    #[must_use]
    pub fn new(catalog: &'a dyn PoiCatalog) -> Self {
        Self {
            catalog,
            routing: None,
            textgen: None,
        }
    }

    /// Attach a routing collaborator.
    #[must_use]
    pub fn with_routing(mut self, routing: &'a dyn RoutingProvider) -> Self {
        self.routing = Some(routing);
        self
    }

    /// Attach a text-generation collaborator.
    #[must_use]
    pub fn with_text_generator(mut self, textgen: &'a dyn TextGenerator) -> Self {
        self.textgen = Some(textgen);
        self
    }

    /// Plan a trip from a structured request.
    ///
    /// # Errors
    /// Returns [`PlanError::InvalidDayCount`] for a zero-day request,
    /// [`PlanError::UnknownPackage`] when the package id does not exist,
    /// [`PlanError::Day`] for an unschedulable day window, and
    /// [`PlanError::Catalog`] when the catalog fails.
    pub fn plan(&self, request: &TripRequest) -> Result<Itinerary, PlanError> {
        if request.days == 0 {
            return Err(PlanError::InvalidDayCount { days: request.days });
        }
        if package(&request.package_id).is_none() {
            return Err(PlanError::UnknownPackage {
                id: request.package_id.clone(),
            });
        }

        let config = resolve_config(&request.package_id, request.tier, &request.overrides);
        let city = request.city.as_deref().unwrap_or(DEFAULT_CITY);
        let origin = request.origin.unwrap_or(DEFAULT_ORIGIN);

        let mut used: HashSet<PoiId> = HashSet::new();
        let mut days = Vec::with_capacity(request.days as usize);
        let mut suggestions = Vec::new();

        for day_number in 1..=request.days {
            let constraint = self.day_constraint(request, day_number, &config);
            constraint.validate().map_err(|source| PlanError::Day {
                day: day_number,
                source,
            })?;

            let pool = self.day_pool(city, &config, &constraint, &used)?;
            let schedule = schedule_day(pool, &constraint, config.transport_mode, origin, self.routing)
                .map_err(|source| PlanError::Day {
                    day: day_number,
                    source,
                })?;

            if let Some(cap) = constraint.budget_cap
                && schedule.cost.total > cap
            {
                let suggestion = self.savings_suggestion(schedule.cost.total - cap, &schedule);
                if !suggestion.is_empty() {
                    suggestions.push(suggestion);
                }
            }

            used.extend(schedule.poi_ids().cloned());
            days.push(schedule);
        }

        let trip_budget = config.budget_per_day * f64::from(request.days);
        let cost = build_cost_summary(&days, trip_budget);
        let summary = self.trip_summary(city, &config, &days, &cost);

        Ok(Itinerary {
            trip_id: Uuid::new_v4(),
            city: city.to_owned(),
            package_name: config.package_name,
            day_count: request.days,
            transport_mode: config.transport_mode,
            days,
            cost,
            summary,
            suggestions,
        })
    }

    /// Plan a trip from free text.
    ///
    /// Constraint extraction is best effort: a failed or absent text
    /// generator yields an empty extraction, and an unknown extracted
    /// package id substitutes the default package rather than failing.
    ///
    /// # Errors
    /// Propagates the same errors as [`TripPlanner::plan`], except
    /// unknown package ids, which are substituted.
    pub fn plan_from_chat(&self, text: &str) -> Result<Itinerary, PlanError> {
        let extracted = match self.textgen.map(|generator| generator.extract_constraints(text)) {
            Some(Ok(extracted)) => extracted,
            Some(Err(error)) => {
                log::warn!("constraint extraction failed: {error}; planning with defaults");
                Default::default()
            }
            None => Default::default(),
        };

        let package_id = extracted
            .package_id
            .as_deref()
            .filter(|id| package(id).is_some())
            .unwrap_or(crate::config::DEFAULT_PACKAGE_ID)
            .to_owned();

        let request = TripRequest {
            package_id,
            city: extracted.city,
            days: extracted.days.unwrap_or(1).max(1),
            tier: extracted.tier.unwrap_or_default(),
            origin: None,
            overrides: extracted.overrides,
            day_constraints: Vec::new(),
        };
        self.plan(&request)
    }

    fn day_constraint(
        &self,
        request: &TripRequest,
        day_number: u32,
        config: &PlanConfig,
    ) -> DayConstraint {
        request
            .day_constraints
            .get((day_number - 1) as usize)
            .and_then(Clone::clone)
            .unwrap_or_else(|| DayConstraint::from_config(config))
    }

    /// Build one day's candidate pool: fixed POIs first, ranked
    /// candidates after. Fixed POIs bypass the filters and are exempt
    /// from cross-day exclusion.
    fn day_pool(
        &self,
        city: &str,
        config: &PlanConfig,
        constraint: &DayConstraint,
        used: &HashSet<PoiId>,
    ) -> Result<Vec<Poi>, CatalogError> {
        let fixed = if constraint.fixed_pois.is_empty() {
            Vec::new()
        } else {
            self.catalog.pois_by_ids(city, &constraint.fixed_pois)?
        };

        let mut excluded = used.clone();
        excluded.extend(constraint.excluded_pois.iter().cloned());
        excluded.extend(fixed.iter().map(|poi| poi.id.clone()));

        let candidates = self.catalog.pois_in_categories(city, &config.categories)?;
        let ranked = rank_candidates(candidates, config, &excluded);

        let mut pool = fixed;
        pool.extend(ranked);
        Ok(pool)
    }

    fn savings_suggestion(&self, overage: f64, day: &DaySchedule) -> String {
        let Some(generator) = self.textgen else {
            return String::new();
        };
        match generator.suggest_savings(overage, day) {
            Ok(suggestion) => suggestion,
            Err(error) => {
                log::warn!("cost-reduction suggestion failed: {error}");
                String::new()
            }
        }
    }

    fn trip_summary(
        &self,
        city: &str,
        config: &PlanConfig,
        days: &[DaySchedule],
        cost: &CostSummary,
    ) -> String {
        let Some(generator) = self.textgen else {
            return DEFAULT_SUMMARY.to_owned();
        };
        let digest = TripDigest {
            city,
            package_name: &config.package_name,
            transport: config.transport_mode,
            days,
            cost,
        };
        match generator.summarise_trip(&digest) {
            Ok(summary) if !summary.trim().is_empty() => summary,
            Ok(_) => DEFAULT_SUMMARY.to_owned(),
            Err(error) => {
                log::warn!("trip summary failed: {error}; using the default");
                DEFAULT_SUMMARY.to_owned()
            }
        }
    }
}

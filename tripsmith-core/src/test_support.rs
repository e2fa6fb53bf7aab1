//! In-memory collaborator stubs for tests and examples.

use std::collections::HashMap;

use geo::Coord;

use crate::catalog::{CatalogError, PoiCatalog};
use crate::poi::{Poi, PoiId};
use crate::schedule::DaySchedule;
use crate::textgen::{ExtractedConstraints, TextGenError, TextGenerator, TripDigest};
use crate::transport::TransportMode;
use crate::travel::{MatrixError, RouteMetrics, RoutingProvider};

/// A catalog backed by a city-keyed map of POI records.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    cities: HashMap<String, Vec<Poi>>,
}

impl MemoryCatalog {
    /// An empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `pois` under `city`, extending any existing entries.
    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>, pois: Vec<Poi>) -> Self {
        self.cities.entry(city.into()).or_default().extend(pois);
        self
    }
}

impl PoiCatalog for MemoryCatalog {
    fn pois_in_categories(
        &self,
        city: &str,
        categories: &[String],
    ) -> Result<Vec<Poi>, CatalogError> {
        Ok(self
            .cities
            .get(city)
            .map(|pois| {
                pois.iter()
                    .filter(|poi| categories.iter().any(|cat| *cat == poi.category))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn pois_by_ids(&self, city: &str, ids: &[PoiId]) -> Result<Vec<Poi>, CatalogError> {
        let Some(pois) = self.cities.get(city) else {
            return Ok(Vec::new());
        };
        Ok(ids
            .iter()
            .filter_map(|id| pois.iter().find(|poi| &poi.id == id).cloned())
            .collect())
    }
}

/// A catalog that always fails, for error-path tests.
#[derive(Debug, Clone, Default)]
pub struct FailingCatalog;

impl PoiCatalog for FailingCatalog {
    fn pois_in_categories(
        &self,
        _city: &str,
        _categories: &[String],
    ) -> Result<Vec<Poi>, CatalogError> {
        Err(CatalogError::backend("catalog offline"))
    }

    fn pois_by_ids(&self, _city: &str, _ids: &[PoiId]) -> Result<Vec<Poi>, CatalogError> {
        Err(CatalogError::backend("catalog offline"))
    }
}

/// A routing provider that always fails, forcing the geometric fallback.
#[derive(Debug, Clone, Default)]
pub struct FailingRouting;

impl RoutingProvider for FailingRouting {
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

/// A text generator returning canned responses.
#[derive(Debug, Clone, Default)]
pub struct StaticTextGenerator {
    /// Returned by constraint extraction.
    pub constraints: ExtractedConstraints,
    /// Returned as the trip summary.
    pub summary: String,
    /// Returned as the cost-reduction suggestion.
    pub suggestion: String,
}

impl TextGenerator for StaticTextGenerator {
    fn extract_constraints(&self, _text: &str) -> Result<ExtractedConstraints, TextGenError> {
        Ok(self.constraints.clone())
    }

    fn summarise_trip(&self, _digest: &TripDigest<'_>) -> Result<String, TextGenError> {
        Ok(self.summary.clone())
    }

    fn suggest_savings(&self, _overage: f64, _day: &DaySchedule) -> Result<String, TextGenError> {
        Ok(self.suggestion.clone())
    }
}

/// A text generator that always fails, for degradation tests.
#[derive(Debug, Clone, Default)]
pub struct FailingTextGenerator;

impl TextGenerator for FailingTextGenerator {
    fn extract_constraints(&self, _text: &str) -> Result<ExtractedConstraints, TextGenError> {
        Err(TextGenError::backend("generator offline"))
    }

    fn summarise_trip(&self, _digest: &TripDigest<'_>) -> Result<String, TextGenError> {
        Err(TextGenError::backend("generator offline"))
    }

    fn suggest_savings(&self, _overage: f64, _day: &DaySchedule) -> Result<String, TextGenError> {
        Err(TextGenError::backend("generator offline"))
    }
}

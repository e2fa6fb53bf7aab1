//! JSON-file catalog backend.

use std::collections::HashMap;
use std::path::Path;

use tripsmith_core::{CatalogError, Poi, PoiCatalog, PoiId};

use super::record::RawPoiRecord;
use super::CatalogLoadError;

/// A read-only catalog loaded from a JSON document mapping city names to
/// POI record lists.
///
/// City lookup is case-insensitive. Records that lack an id, a name, or
/// coordinates are dropped at load time with a warning; partial records
/// are kept with absent fields.
///
/// # Example
///
/// ```
/// use tripsmith_data::catalog::JsonCatalog;
/// use tripsmith_core::PoiCatalog;
///
/// let catalog = JsonCatalog::from_str(r#"{
///     "Chennai": [{
///         "id": "marina-beach",
///         "name": "Marina Beach",
///         "latitude": 13.0487,
///         "longitude": 80.2824,
///         "category": "beach"
///     }]
/// }"#)?;
/// let pois = catalog.pois_in_categories("chennai", &["beach".to_owned()])?;
/// assert_eq!(pois.len(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonCatalog {
    cities: HashMap<String, Vec<Poi>>,
}

impl JsonCatalog {
    /// Load a catalog from a JSON string.
    ///
    /// # Errors
    /// Returns [`CatalogLoadError::Parse`] when the document is not a
    /// city-to-records map.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(json: &str) -> Result<Self, CatalogLoadError> {
        let raw: HashMap<String, Vec<RawPoiRecord>> = serde_json::from_str(json)?;
        Ok(Self::from_records(raw))
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    /// Returns [`CatalogLoadError::Io`] when the file cannot be read and
    /// [`CatalogLoadError::Parse`] when it does not parse.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogLoadError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_str(&json)
    }

    fn from_records(raw: HashMap<String, Vec<RawPoiRecord>>) -> Self {
        let mut cities = HashMap::new();
        for (city, records) in raw {
            let total = records.len();
            let pois: Vec<Poi> = records
                .into_iter()
                .filter_map(RawPoiRecord::into_poi)
                .collect();
            if pois.len() < total {
                log::warn!(
                    "catalog city {city:?}: dropped {} unusable records",
                    total - pois.len()
                );
            }
            cities.insert(city.to_lowercase(), pois);
        }
        Self { cities }
    }

    fn city(&self, city: &str) -> &[Poi] {
        self.cities
            .get(&city.to_lowercase())
            .map_or(&[], Vec::as_slice)
    }
}

impl PoiCatalog for JsonCatalog {
    fn pois_in_categories(
        &self,
        city: &str,
        categories: &[String],
    ) -> Result<Vec<Poi>, CatalogError> {
        Ok(self
            .city(city)
            .iter()
            .filter(|poi| categories.iter().any(|cat| *cat == poi.category))
            .cloned()
            .collect())
    }

    fn pois_by_ids(&self, city: &str, ids: &[PoiId]) -> Result<Vec<Poi>, CatalogError> {
        let pois = self.city(city);
        Ok(ids
            .iter()
            .filter_map(|id| pois.iter().find(|poi| &poi.id == id).cloned())
            .collect())
    }
}

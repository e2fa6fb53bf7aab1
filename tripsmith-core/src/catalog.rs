//! Read-only access to the POI catalog.
//!
//! The planning pipeline only ever pushes one filter down to the backend:
//! category membership within a city. Everything else (fees, ratings,
//! hours, tags) is filtered locally so backends need no multi-field
//! indexes.

use thiserror::Error;

use crate::poi::{Poi, PoiId};

/// Error raised by a catalog backend.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The backend failed to execute a query.
    #[error("catalog backend failure: {message}")]
    Backend {
        /// Backend-specific description of the failure.
        message: String,
    },
}

impl CatalogError {
    /// Wrap a backend failure message.
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Read-only POI lookups for one or more cities.
///
/// Implementers normalise their source representation into [`Poi`] at this
/// boundary. A city with no records yields an empty result, not an error.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use tripsmith_core::{CatalogError, Poi, PoiCatalog, PoiId};
///
/// struct SingleCity(Vec<Poi>);
///
/// impl PoiCatalog for SingleCity {
///     fn pois_in_categories(
///         &self,
///         city: &str,
///         categories: &[String],
///     ) -> Result<Vec<Poi>, CatalogError> {
///         if city != "Chennai" {
///             return Ok(Vec::new());
///         }
///         Ok(self
///             .0
///             .iter()
///             .filter(|poi| categories.iter().any(|c| *c == poi.category))
///             .cloned()
///             .collect())
///     }
///
///     fn pois_by_ids(&self, _city: &str, ids: &[PoiId]) -> Result<Vec<Poi>, CatalogError> {
///         Ok(self.0.iter().filter(|poi| ids.contains(&poi.id)).cloned().collect())
///     }
/// }
///
/// let poi = Poi::new("p1", "Kapaleeshwarar Temple", Coord { x: 80.2, y: 13.0 }, "temple");
/// let catalog = SingleCity(vec![poi]);
/// let hits = catalog.pois_in_categories("Chennai", &["temple".to_owned()])?;
/// assert_eq!(hits.len(), 1);
/// # Ok::<(), CatalogError>(())
/// ```
pub trait PoiCatalog {
    /// All POIs in `city` whose category is in `categories`.
    ///
    /// # Errors
    /// Returns [`CatalogError`] when the backend query fails.
    fn pois_in_categories(
        &self,
        city: &str,
        categories: &[String],
    ) -> Result<Vec<Poi>, CatalogError>;

    /// Point lookups for forced-in POIs. Unknown ids are skipped silently.
    ///
    /// # Errors
    /// Returns [`CatalogError`] when the backend query fails.
    fn pois_by_ids(&self, city: &str, ids: &[PoiId]) -> Result<Vec<Poi>, CatalogError>;
}

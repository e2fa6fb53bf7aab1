//! POI catalog backends.
//!
//! Two implementations of [`tripsmith_core::PoiCatalog`]: [`JsonCatalog`]
//! for a city-keyed JSON export and [`SqliteCatalog`] for a `pois`
//! table. Both absorb the messy field shapes real exports carry (string
//! or list tags, numeric strings, yes/no booleans) via
//! [`RawPoiRecord`].

use thiserror::Error;

mod json;
mod record;
mod sqlite;

pub use json::JsonCatalog;
pub use record::{RawPoiRecord, StringOrList};
pub use sqlite::{SqliteCatalog, SqliteCatalogError};

/// Error raised while loading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    /// Reading the file failed.
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    /// The document did not parse as a catalog.
    #[error("failed to parse catalog document: {0}")]
    Parse(#[from] serde_json::Error),
}

//! External collaborators for the Tripsmith engine.
//!
//! Implementations of the core's collaborator traits against real
//! backends: POI catalogs over JSON files or SQLite, routing over the
//! openrouteservice HTTP APIs, and text generation over a
//! chat-completions endpoint. Every implementation surfaces failures
//! through the core's error types so the planner can degrade instead of
//! aborting.

#![forbid(unsafe_code)]

pub mod catalog;
pub mod routing;
pub mod textgen;

pub use catalog::{CatalogLoadError, JsonCatalog, SqliteCatalog, SqliteCatalogError};
pub use routing::{HttpRoutingProvider, HttpRoutingProviderConfig};
pub use textgen::{GeneratorBuildError, HttpTextGenerator, HttpTextGeneratorConfig};

//! HTTP routing collaborators.
//!
//! [`HttpRoutingProvider`] implements [`tripsmith_core::RoutingProvider`]
//! against the openrouteservice Matrix and Directions APIs. Failures are
//! surfaced as [`tripsmith_core::MatrixError`] so the core falls back to
//! its geometric computation.
//!
//! # Example
//!
//! ```no_run
//! use geo::Coord;
//! use tripsmith_data::routing::HttpRoutingProvider;
//! use tripsmith_core::{RoutingProvider, TransportMode};
//!
//! let provider = HttpRoutingProvider::new("my-api-key")?;
//! let coords = vec![
//!     Coord { x: 80.2707, y: 13.0827 },
//!     Coord { x: 80.2496, y: 13.0604 },
//! ];
//! let matrix = provider.duration_matrix(&coords, TransportMode::Auto)?;
//! println!("travel time: {:.1} minutes", matrix[0][1]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod ors;
mod provider;

pub use provider::{
    HttpRoutingProvider, HttpRoutingProviderConfig, ProviderBuildError, DEFAULT_USER_AGENT,
};

//! HTTP-based [`RoutingProvider`] using openrouteservice.
//!
//! The [`RoutingProvider`] trait is synchronous to keep the core library
//! embeddable in synchronous contexts. This provider bridges the async
//! HTTP calls to the sync interface by blocking on a Tokio runtime it
//! owns and reuses across calls.

use std::time::Duration;

use geo::Coord;
use reqwest::Client;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use tripsmith_core::{MatrixError, RouteMetrics, RoutingProvider, TransportMode};

use super::ors::{DirectionsResponse, MatrixResponse};

/// Error type for [`HttpRoutingProvider`] construction failures.
#[derive(Debug, thiserror::Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Default user agent for openrouteservice requests.
pub const DEFAULT_USER_AGENT: &str = "tripsmith-routing/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default service endpoint.
const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";

/// Configuration for [`HttpRoutingProvider`].
#[derive(Debug, Clone)]
pub struct HttpRoutingProviderConfig {
    /// Base URL for the service.
    pub base_url: String,
    /// API key sent in the `Authorization` header.
    pub api_key: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl HttpRoutingProviderConfig {
    /// Create a configuration for the public service with an API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Point the provider at a self-hosted instance.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP routing provider backed by the openrouteservice Matrix and
/// Directions APIs.
///
/// # Runtime behaviour
///
/// When called from outside any Tokio runtime, the provider uses its own
/// stored runtime. When called from within a multi-threaded Tokio
/// runtime (detected via [`Handle::try_current()`] and
/// [`RuntimeFlavor::MultiThread`]), it uses that runtime's handle with
/// [`tokio::task::block_in_place`] to avoid nested runtime panics. From
/// within a `current_thread` runtime it falls back to its own runtime.
pub struct HttpRoutingProvider {
    client: Client,
    config: HttpRoutingProviderConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpRoutingProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRoutingProvider")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .finish_non_exhaustive()
    }
}

impl HttpRoutingProvider {
    /// Create a provider for the public service.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to
    /// build.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpRoutingProviderConfig::new(api_key))
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to
    /// build.
    pub fn with_config(config: HttpRoutingProviderConfig) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    fn endpoint(&self, service: &str, mode: TransportMode) -> String {
        format!(
            "{}/v2/{service}/{}",
            self.config.base_url.trim_end_matches('/'),
            mode.routing_profile()
        )
    }

    fn locations(coords: &[Coord<f64>]) -> Vec<[f64; 2]> {
        coords.iter().map(|coord| [coord.x, coord.y]).collect()
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<T, MatrixError> {
        let response = self
            .client
            .post(url)
            .header("Authorization", &self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| convert_reqwest_error(&err))?;

        response.json().await.map_err(|err| MatrixError::Malformed {
            message: err.to_string(),
        })
    }

    async fn fetch_matrix(
        &self,
        coords: &[Coord<f64>],
        mode: TransportMode,
    ) -> Result<Vec<Vec<f64>>, MatrixError> {
        let url = self.endpoint("matrix", mode);
        let body = serde_json::json!({
            "locations": Self::locations(coords),
            "metrics": ["duration"],
        });
        let response: MatrixResponse = self.post_json(&url, &body).await?;

        if let Some(error) = response.error {
            return Err(MatrixError::Service {
                message: format!("{} (code {})", error.message, error.code),
            });
        }
        let durations = response.durations.ok_or_else(|| MatrixError::Malformed {
            message: "response missing durations".to_string(),
        })?;

        // Seconds to minutes; unroutable pairs become infinite so the
        // orderer never picks them.
        Ok(durations
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| {
                        cell.filter(|v| v.is_finite() && *v >= 0.0)
                            .map_or(f64::INFINITY, |seconds| seconds / 60.0)
                    })
                    .collect()
            })
            .collect())
    }

    async fn fetch_route(
        &self,
        coords: &[Coord<f64>],
        mode: TransportMode,
    ) -> Result<RouteMetrics, MatrixError> {
        let url = self.endpoint("directions", mode);
        let body = serde_json::json!({
            "coordinates": Self::locations(coords),
        });
        let response: DirectionsResponse = self.post_json(&url, &body).await?;

        if let Some(error) = response.error {
            return Err(MatrixError::Service {
                message: format!("{} (code {})", error.message, error.code),
            });
        }
        let route = response.routes.first().ok_or_else(|| MatrixError::Malformed {
            message: "response carried no routes".to_string(),
        })?;
        Ok(RouteMetrics {
            distance_km: route.summary.distance / 1000.0,
            duration_mins: route.summary.duration / 60.0,
        })
    }

    fn block_on<T>(&self, future: impl Future<Output = T>) -> T {
        // block_in_place requires a multi-threaded runtime; for
        // current_thread runtimes we fall back to our own stored runtime.
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}

fn convert_reqwest_error(error: &reqwest::Error) -> MatrixError {
    if error.is_timeout() || error.is_connect() {
        return MatrixError::Network {
            message: error.to_string(),
        };
    }
    MatrixError::Service {
        message: error.to_string(),
    }
}

impl RoutingProvider for HttpRoutingProvider {
    fn duration_matrix(
        &self,
        coords: &[Coord<f64>],
        mode: TransportMode,
    ) -> Result<Vec<Vec<f64>>, MatrixError> {
        if coords.len() < 2 {
            return Err(MatrixError::TooFewCoordinates);
        }
        self.block_on(self.fetch_matrix(coords, mode))
    }

    fn route_metrics(
        &self,
        coords: &[Coord<f64>],
        mode: TransportMode,
    ) -> Result<RouteMetrics, MatrixError> {
        if coords.len() < 2 {
            return Err(MatrixError::TooFewCoordinates);
        }
        self.block_on(self.fetch_route(coords, mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn provider() -> HttpRoutingProvider {
        HttpRoutingProvider::with_config(
            HttpRoutingProviderConfig::new("test-key").with_base_url("http://ors.example.com"),
        )
        .expect("provider should build")
    }

    #[rstest]
    fn endpoint_translates_the_transport_mode(provider: HttpRoutingProvider) {
        assert_eq!(
            provider.endpoint("matrix", TransportMode::Cab),
            "http://ors.example.com/v2/matrix/driving-car"
        );
    }

    #[rstest]
    fn endpoint_strips_trailing_slashes() {
        let provider = HttpRoutingProvider::with_config(
            HttpRoutingProviderConfig::new("test-key").with_base_url("http://ors.example.com/"),
        )
        .expect("provider should build");
        let url = provider.endpoint("directions", TransportMode::Bus);
        assert!(!url.contains("//v2"));
    }

    #[rstest]
    fn locations_are_lon_lat_pairs() {
        let coords = vec![
            Coord {
                x: 80.2707,
                y: 13.0827,
            },
            Coord {
                x: 80.2496,
                y: 13.0604,
            },
        ];
        assert_eq!(
            HttpRoutingProvider::locations(&coords),
            vec![[80.2707, 13.0827], [80.2496, 13.0604]]
        );
    }

    #[rstest]
    fn too_few_coordinates_fail_before_any_request(provider: HttpRoutingProvider) {
        let lone = [Coord {
            x: 80.2707,
            y: 13.0827,
        }];
        assert_eq!(
            provider.duration_matrix(&lone, TransportMode::Auto),
            Err(MatrixError::TooFewCoordinates)
        );
        assert_eq!(
            provider.route_metrics(&lone, TransportMode::Auto).unwrap_err(),
            MatrixError::TooFewCoordinates
        );
    }

    #[rstest]
    fn config_builder_pattern() {
        let config = HttpRoutingProviderConfig::new("key")
            .with_base_url("http://example.com")
            .with_timeout(Duration::from_secs(60))
            .with_user_agent("test-agent/1.0");

        assert_eq!(config.base_url, "http://example.com");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.user_agent, "test-agent/1.0");
    }
}

use thiserror::Error;

/// Errors from [`crate::travel::RoutingProvider`] calls.
///
/// Every variant routes the caller to the geometric fallback; none aborts
/// a planning run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// Fewer than two coordinates were supplied.
    #[error("at least two coordinates are required")]
    TooFewCoordinates,
    /// The service reached but rejected the request.
    #[error("routing service rejected the request: {message}")]
    Service {
        /// Service-reported rejection reason.
        message: String,
    },
    /// The service could not be reached.
    #[error("failed to reach the routing service: {message}")]
    Network {
        /// Transport-level failure description.
        message: String,
    },
    /// The service answered with something unusable.
    #[error("malformed routing response: {message}")]
    Malformed {
        /// What was wrong with the payload.
        message: String,
    },
}

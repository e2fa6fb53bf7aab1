//! Text-generation collaborator seam.
//!
//! The planner treats generated text as advisory: extraction failures
//! become empty constraint sets, summary failures fall back to
//! [`DEFAULT_SUMMARY`], and suggestion failures become empty strings.
//! Nothing behind this trait may abort a plan.

use crate::config::{BudgetTier, PlanOverrides};
use crate::cost::CostSummary;
use crate::schedule::DaySchedule;
use crate::transport::TransportMode;

/// Summary used when the generator fails or is absent.
pub const DEFAULT_SUMMARY: &str = "Your itinerary is ready. Have a wonderful trip!";

/// A text-generation call failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextGenError {
    /// The backend rejected or failed the request.
    #[error("text generation backend error: {message}")]
    Backend {
        /// Backend-reported failure detail.
        message: String,
    },
    /// The backend answered with something unusable.
    #[error("malformed text generation response: {message}")]
    Malformed {
        /// What could not be interpreted.
        message: String,
    },
}

impl TextGenError {
    /// Wrap a backend failure.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Wrap an uninterpretable response.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}

/// Best-effort structured reading of a free-text trip request.
///
/// Every field is optional; an empty value means the text did not pin
/// that choice down and the planner's defaults apply.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExtractedConstraints {
    /// Package preset the text asked for.
    pub package_id: Option<String>,
    /// Destination city.
    pub city: Option<String>,
    /// Trip length in days.
    pub days: Option<u32>,
    /// Spending tier.
    pub tier: Option<BudgetTier>,
    /// Field-level overrides the text pinned down.
    pub overrides: PlanOverrides,
}

/// Compact view of a finished plan, handed to the generator for
/// summarisation.
#[derive(Debug, Clone, Copy)]
pub struct TripDigest<'a> {
    /// Destination city.
    pub city: &'a str,
    /// Display name of the package preset.
    pub package_name: &'a str,
    /// Trip-level transport mode.
    pub transport: TransportMode,
    /// Every scheduled day, in order.
    pub days: &'a [DaySchedule],
    /// The trip's cost roll-up.
    pub cost: &'a CostSummary,
}

/// Text-generation capability the planner depends on.
///
/// Implementations wrap an LLM endpoint or a canned stub. All three
/// operations may fail; the planner degrades on every error.
pub trait TextGenerator {
    /// Read trip constraints out of free text.
    ///
    /// # Errors
    /// Returns a [`TextGenError`] when the backend fails or answers
    /// with something that cannot be mapped to constraints.
    fn extract_constraints(&self, text: &str) -> Result<ExtractedConstraints, TextGenError>;

    /// Produce a short natural-language summary of a finished plan.
    ///
    /// # Errors
    /// Returns a [`TextGenError`] when the backend fails.
    fn summarise_trip(&self, digest: &TripDigest<'_>) -> Result<String, TextGenError>;

    /// Suggest ways to bring an overspent day back under its cap.
    ///
    /// # Errors
    /// Returns a [`TextGenError`] when the backend fails.
    fn suggest_savings(&self, overage: f64, day: &DaySchedule) -> Result<String, TextGenError>;
}

//! LLM-backed [`TextGenerator`] over a chat-completions API.
//!
//! Talks to a Perplexity-compatible `/chat/completions` endpoint. The
//! constraint-extraction call instructs the model to answer with a bare
//! JSON object; models are prone to wrapping it in Markdown code fences
//! anyway, so the response is unfenced before parsing, and any field
//! the model fails to pin down maps to an absent value rather than an
//! error. Summary and suggestion calls pass plain text through.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use tripsmith_core::{
    packages, BudgetTier, ExtractedConstraints, Pace, PlanOverrides, TextGenError, TextGenerator,
    TimeOfDay, TransportMode, TripDigest,
};

/// Default service endpoint.
const DEFAULT_BASE_URL: &str = "https://api.perplexity.ai";

/// Default model name.
const DEFAULT_MODEL: &str = "sonar";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const EXTRACTION_SYSTEM_PROMPT: &str = "You read travel requests and answer with one JSON \
object, no prose and no code fences. Keys, all optional: package (one of pkg-heritage, \
pkg-family, pkg-budget, pkg-spiritual, pkg-beach, pkg-shopping), city, days (integer), \
budget_tier (budget/economy/premium), transport_mode (bus/metro/auto/cab/self_drive), \
max_entry_fee (number), budget_per_day (number), pace (relaxed/normal/packed), start_time \
(HH:MM), end_time (HH:MM), wheelchair_only (boolean), activities (list of strings). Omit \
any key the request does not pin down.";

const SUMMARY_SYSTEM_PROMPT: &str = "You summarise finished trip itineraries in two or \
three warm, concrete sentences. Mention the city, the number of days, and a highlight or \
two. No lists, no headings.";

const SAVINGS_SYSTEM_PROMPT: &str = "You suggest two or three concrete ways to bring an \
overspent day of a trip itinerary back under its budget cap. Answer in plain sentences.";

/// Configuration for [`HttpTextGenerator`].
#[derive(Debug, Clone)]
pub struct HttpTextGeneratorConfig {
    /// Base URL for the chat-completions service.
    pub base_url: String,
    /// API key sent as a bearer token.
    pub api_key: String,
    /// Model name.
    pub model: String,
    /// Request timeout duration.
    pub timeout: Duration,
}

impl HttpTextGeneratorConfig {
    /// Create a configuration for the public service with an API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Point the generator at a different endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Select a model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Error type for [`HttpTextGenerator`] construction failures.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Chat-completions implementation of [`TextGenerator`].
///
/// Bridges the synchronous trait to async HTTP the same way the routing
/// provider does: an owned `current_thread` runtime, or the ambient
/// multi-threaded runtime via `block_in_place` when one is present.
pub struct HttpTextGenerator {
    client: Client,
    config: HttpTextGeneratorConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpTextGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTextGenerator")
            .field("base_url", &self.config.base_url)
            .field("model", &self.config.model)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: String,
}

/// Constraint object as the model emits it; every field lenient.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawConstraints {
    package: Option<String>,
    city: Option<String>,
    days: Option<f64>,
    budget_tier: Option<String>,
    transport_mode: Option<String>,
    max_entry_fee: Option<f64>,
    budget_per_day: Option<f64>,
    pace: Option<String>,
    start_time: Option<String>,
    end_time: Option<String>,
    wheelchair_only: Option<bool>,
    activities: Option<Vec<String>>,
}

impl HttpTextGenerator {
    /// Create a generator for the public service.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to
    /// build.
    pub fn new(api_key: impl Into<String>) -> Result<Self, GeneratorBuildError> {
        Self::with_config(HttpTextGeneratorConfig::new(api_key))
    }

    /// Create a generator with explicit configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to
    /// build.
    pub fn with_config(config: HttpTextGeneratorConfig) -> Result<Self, GeneratorBuildError> {
        let client = Client::builder()
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(GeneratorBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(GeneratorBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String, TextGenError> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let body = serde_json::json!({
            "model": self.config.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
        });
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| TextGenError::backend(err.to_string()))?
            .error_for_status()
            .map_err(|err| TextGenError::backend(err.to_string()))?;

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|err| TextGenError::malformed(err.to_string()))?;
        chat.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| TextGenError::malformed("response carried no choices"))
    }

    fn block_on<T>(&self, future: impl Future<Output = T>) -> T {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}

/// Strip a Markdown code fence, with or without a language tag.
fn unfence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Map a package hint to a known id, matching by id first, theme second.
fn resolve_package_hint(hint: &str) -> Option<String> {
    let hint = hint.trim().to_lowercase();
    packages()
        .iter()
        .find(|pkg| pkg.id == hint || pkg.theme == hint)
        .map(|pkg| pkg.id.to_owned())
}

fn constraints_from_raw(raw: RawConstraints) -> ExtractedConstraints {
    let overrides = PlanOverrides {
        transport_mode: raw
            .transport_mode
            .as_deref()
            .and_then(TransportMode::from_name),
        max_entry_fee: raw.max_entry_fee,
        budget_per_day: raw.budget_per_day,
        pace: raw.pace.as_deref().and_then(Pace::from_name),
        start_time: raw
            .start_time
            .as_deref()
            .and_then(|text| TimeOfDay::parse(text).ok()),
        end_time: raw
            .end_time
            .as_deref()
            .and_then(|text| TimeOfDay::parse(text).ok()),
        wheelchair_only: raw.wheelchair_only,
        extra_activities: raw.activities.unwrap_or_default(),
    };
    ExtractedConstraints {
        package_id: raw.package.as_deref().and_then(resolve_package_hint),
        city: raw
            .city
            .map(|city| city.trim().to_owned())
            .filter(|city| !city.is_empty()),
        days: raw
            .days
            .filter(|days| days.is_finite() && *days >= 1.0)
            .map(|days| days as u32),
        tier: raw.budget_tier.as_deref().and_then(BudgetTier::from_name),
        overrides,
    }
}

fn digest_prompt(digest: &TripDigest<'_>) -> String {
    let mut lines = vec![format!(
        "{}-day {} trip in {}, travelling by {}, total spend \u{20b9}{:.0}.",
        digest.days.len(),
        digest.package_name,
        digest.city,
        digest.transport.as_str(),
        digest.cost.grand_total,
    )];
    for (index, day) in digest.days.iter().enumerate() {
        let stops: Vec<&str> = day.slots.iter().map(|slot| slot.name.as_str()).collect();
        lines.push(format!("Day {}: {}.", index + 1, stops.join(", ")));
    }
    lines.join("\n")
}

impl TextGenerator for HttpTextGenerator {
    fn extract_constraints(&self, text: &str) -> Result<ExtractedConstraints, TextGenError> {
        let content = self.block_on(self.complete(EXTRACTION_SYSTEM_PROMPT, text))?;
        let raw: RawConstraints = serde_json::from_str(unfence(&content))
            .map_err(|err| TextGenError::malformed(err.to_string()))?;
        Ok(constraints_from_raw(raw))
    }

    fn summarise_trip(&self, digest: &TripDigest<'_>) -> Result<String, TextGenError> {
        let prompt = digest_prompt(digest);
        self.block_on(self.complete(SUMMARY_SYSTEM_PROMPT, &prompt))
    }

    fn suggest_savings(
        &self,
        overage: f64,
        day: &tripsmith_core::DaySchedule,
    ) -> Result<String, TextGenError> {
        let stops: Vec<&str> = day.slots.iter().map(|slot| slot.name.as_str()).collect();
        let prompt = format!(
            "The day visits {} and overspends its cap by \u{20b9}{overage:.0}. Entry \
             \u{20b9}{:.0}, transport \u{20b9}{:.0}, extras \u{20b9}{:.0}.",
            stops.join(", "),
            day.cost.entry,
            day.cost.transport,
            day.cost.extras,
        );
        self.block_on(self.complete(SAVINGS_SYSTEM_PROMPT, &prompt))
    }
}

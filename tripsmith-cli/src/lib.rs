//! Command-line interface for the Tripsmith engine.
//!
//! Three subcommands: `plan` builds an itinerary from structured flags,
//! `chat` builds one from free text via the LLM collaborator, and
//! `packages` lists the preset catalogue. Itineraries are printed as
//! pretty JSON on stdout. Routing and text-generation collaborators are
//! attached only when their API keys are supplied; without them the
//! engine falls back to geometric routing and default summaries.
#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use geo::Coord;
use thiserror::Error;
use tripsmith_core::{
    BudgetTier, Pace, PlanError, PlanOverrides, PoiCatalog, PoiId, RoutingProvider,
    TextGenerator, TimeOfDay, TimeParseError, TransportMode, TripPlanner, TripRequest,
};
use tripsmith_data::catalog::{CatalogLoadError, JsonCatalog, SqliteCatalog, SqliteCatalogError};
use tripsmith_data::routing::HttpRoutingProvider;
use tripsmith_data::textgen::HttpTextGenerator;

/// Run the Tripsmith CLI with the current process arguments and
/// environment.
///
/// # Errors
/// Returns a [`CliError`] for argument, catalog, collaborator, or
/// planning failures.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(&args),
        Command::Chat(args) => run_chat(&args),
        Command::Packages => run_packages(),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "tripsmith",
    about = "Multi-day trip itinerary planning from POI catalogs",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan a trip from structured options.
    Plan(PlanArgs),
    /// Plan a trip from a free-text request.
    Chat(ChatArgs),
    /// List the package presets.
    Packages,
}

/// Clap-friendly spelling of [`BudgetTier`].
#[derive(Debug, Clone, Copy, ValueEnum)]
enum TierArg {
    Budget,
    Economy,
    Premium,
}

impl From<TierArg> for BudgetTier {
    fn from(tier: TierArg) -> Self {
        match tier {
            TierArg::Budget => Self::Budget,
            TierArg::Economy => Self::Economy,
            TierArg::Premium => Self::Premium,
        }
    }
}

/// Clap-friendly spelling of [`Pace`].
#[derive(Debug, Clone, Copy, ValueEnum)]
enum PaceArg {
    Relaxed,
    Normal,
    Packed,
}

impl From<PaceArg> for Pace {
    fn from(pace: PaceArg) -> Self {
        match pace {
            PaceArg::Relaxed => Self::Relaxed,
            PaceArg::Normal => Self::Normal,
            PaceArg::Packed => Self::Packed,
        }
    }
}

/// Clap-friendly spelling of [`TransportMode`].
#[derive(Debug, Clone, Copy, ValueEnum)]
enum TransportArg {
    Bus,
    Metro,
    Auto,
    Cab,
    SelfDrive,
}

impl From<TransportArg> for TransportMode {
    fn from(mode: TransportArg) -> Self {
        match mode {
            TransportArg::Bus => Self::Bus,
            TransportArg::Metro => Self::Metro,
            TransportArg::Auto => Self::Auto,
            TransportArg::Cab => Self::Cab,
            TransportArg::SelfDrive => Self::SelfDrive,
        }
    }
}

#[derive(Debug, Parser)]
struct CollaboratorArgs {
    /// POI catalog file (`.json`, `.sqlite`, `.sqlite3`, or `.db`).
    #[arg(long, value_name = "path")]
    catalog: PathBuf,
    /// openrouteservice API key; omit to use geometric routing.
    #[arg(long, env = "ORS_API_KEY", value_name = "key")]
    ors_api_key: Option<String>,
    /// Chat-completions API key; omit to skip generated text.
    #[arg(long, env = "LLM_API_KEY", value_name = "key")]
    llm_api_key: Option<String>,
}

#[derive(Debug, Parser)]
struct PlanArgs {
    #[command(flatten)]
    collaborators: CollaboratorArgs,
    /// Full trip-request document as JSON; `-` reads stdin. Carries
    /// per-day constraints the structured flags cannot express.
    #[arg(long, value_name = "path", conflicts_with = "package")]
    request: Option<PathBuf>,
    /// Package preset id, e.g. `pkg-heritage`.
    #[arg(long, value_name = "id", required_unless_present = "request")]
    package: Option<String>,
    /// Trip length in days.
    #[arg(long, default_value_t = 1)]
    days: u32,
    /// Budget tier.
    #[arg(long, value_enum, default_value_t = TierArg::Economy)]
    tier: TierArg,
    /// Destination city.
    #[arg(long, value_name = "name")]
    city: Option<String>,
    /// Trip origin latitude (hotel).
    #[arg(long, value_name = "degrees", requires = "origin_lon")]
    origin_lat: Option<f64>,
    /// Trip origin longitude (hotel).
    #[arg(long, value_name = "degrees", requires = "origin_lat")]
    origin_lon: Option<f64>,
    /// Override the transport mode.
    #[arg(long, value_enum)]
    transport: Option<TransportArg>,
    /// Override the entry-fee ceiling; zero keeps only free entry.
    #[arg(long, value_name = "rupees")]
    max_entry_fee: Option<f64>,
    /// Override the per-day budget.
    #[arg(long, value_name = "rupees")]
    budget_per_day: Option<f64>,
    /// Override the pace.
    #[arg(long, value_enum)]
    pace: Option<PaceArg>,
    /// Override the day window start, e.g. `09:00`.
    #[arg(long, value_name = "time")]
    start_time: Option<String>,
    /// Override the day window end, e.g. `20:00`.
    #[arg(long, value_name = "time")]
    end_time: Option<String>,
    /// Keep only wheelchair-accessible stops.
    #[arg(long)]
    wheelchair_only: bool,
    /// Extra activities to consider, repeatable.
    #[arg(long = "activity", value_name = "name")]
    activities: Vec<String>,
    /// POIs to force into day one, repeatable.
    #[arg(long = "fixed-poi", value_name = "id")]
    fixed_pois: Vec<String>,
}

#[derive(Debug, Parser)]
struct ChatArgs {
    #[command(flatten)]
    collaborators: CollaboratorArgs,
    /// The trip request, in plain language.
    #[arg(value_name = "text")]
    text: String,
}

/// Errors emitted by the Tripsmith CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// The catalog file extension is not recognised.
    #[error("unsupported catalog file {path:?} (expected .json, .sqlite, .sqlite3, or .db)")]
    UnsupportedCatalog {
        /// The rejected path.
        path: PathBuf,
    },
    /// Loading a JSON catalog failed.
    #[error(transparent)]
    CatalogLoad(#[from] CatalogLoadError),
    /// Opening a SQLite catalog failed.
    #[error(transparent)]
    CatalogOpen(#[from] SqliteCatalogError),
    /// Building the routing collaborator failed.
    #[error("failed to build routing collaborator: {0}")]
    Routing(#[source] tripsmith_data::routing::ProviderBuildError),
    /// Building the text-generation collaborator failed.
    #[error("failed to build text-generation collaborator: {0}")]
    Generator(#[source] tripsmith_data::textgen::GeneratorBuildError),
    /// Reading a request document failed.
    #[error("failed to read request {path:?}: {source}")]
    ReadRequest {
        /// The unreadable path.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// A request document did not parse as a trip request.
    #[error("invalid request document: {0}")]
    InvalidRequest(#[source] serde_json::Error),
    /// A time option did not parse.
    #[error("invalid --{flag} value: {source}")]
    InvalidTime {
        /// The offending flag.
        flag: &'static str,
        /// The parse failure.
        #[source]
        source: TimeParseError,
    },
    /// Planning failed.
    #[error(transparent)]
    Plan(#[from] PlanError),
    /// Writing the itinerary failed.
    #[error("failed to serialise output: {0}")]
    Serialise(#[from] serde_json::Error),
}

#[derive(Debug)]
enum Catalog {
    Json(JsonCatalog),
    Sqlite(SqliteCatalog),
}

impl Catalog {
    fn open(path: &Path) -> Result<Self, CliError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json(JsonCatalog::from_path(path)?)),
            Some("sqlite" | "sqlite3" | "db") => Ok(Self::Sqlite(SqliteCatalog::open(path)?)),
            _ => Err(CliError::UnsupportedCatalog {
                path: path.to_path_buf(),
            }),
        }
    }

    fn as_dyn(&self) -> &dyn PoiCatalog {
        match self {
            Self::Json(catalog) => catalog,
            Self::Sqlite(catalog) => catalog,
        }
    }
}

struct Collaborators {
    catalog: Catalog,
    routing: Option<HttpRoutingProvider>,
    textgen: Option<HttpTextGenerator>,
}

impl Collaborators {
    fn build(args: &CollaboratorArgs) -> Result<Self, CliError> {
        let catalog = Catalog::open(&args.catalog)?;
        let routing = args
            .ors_api_key
            .as_deref()
            .map(HttpRoutingProvider::new)
            .transpose()
            .map_err(CliError::Routing)?;
        if routing.is_none() {
            log::info!("no routing API key; using geometric travel estimates");
        }
        let textgen = args
            .llm_api_key
            .as_deref()
            .map(HttpTextGenerator::new)
            .transpose()
            .map_err(CliError::Generator)?;
        if textgen.is_none() {
            log::info!("no LLM API key; summaries and suggestions are defaults");
        }
        Ok(Self {
            catalog,
            routing,
            textgen,
        })
    }

    fn planner(&self) -> TripPlanner<'_> {
        let mut planner = TripPlanner::new(self.catalog.as_dyn());
        if let Some(routing) = &self.routing {
            planner = planner.with_routing(routing as &dyn RoutingProvider);
        }
        if let Some(textgen) = &self.textgen {
            planner = planner.with_text_generator(textgen as &dyn TextGenerator);
        }
        planner
    }
}

fn parse_time(flag: &'static str, text: &str) -> Result<TimeOfDay, CliError> {
    TimeOfDay::parse(text).map_err(|source| CliError::InvalidTime { flag, source })
}

fn load_request(args: &PlanArgs) -> Result<TripRequest, CliError> {
    match &args.request {
        Some(path) => read_request(path),
        None => build_request(args),
    }
}

fn read_request(path: &Path) -> Result<TripRequest, CliError> {
    let json = if path == Path::new("-") {
        std::io::read_to_string(std::io::stdin()).map_err(|source| CliError::ReadRequest {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        std::fs::read_to_string(path).map_err(|source| CliError::ReadRequest {
            path: path.to_path_buf(),
            source,
        })?
    };
    serde_json::from_str(&json).map_err(CliError::InvalidRequest)
}

fn build_request(args: &PlanArgs) -> Result<TripRequest, CliError> {
    // Clap requires --package whenever --request is absent.
    let package = args.package.clone().unwrap_or_default();
    let overrides = PlanOverrides {
        transport_mode: args.transport.map(Into::into),
        max_entry_fee: args.max_entry_fee,
        budget_per_day: args.budget_per_day,
        pace: args.pace.map(Into::into),
        start_time: args
            .start_time
            .as_deref()
            .map(|text| parse_time("start-time", text))
            .transpose()?,
        end_time: args
            .end_time
            .as_deref()
            .map(|text| parse_time("end-time", text))
            .transpose()?,
        wheelchair_only: args.wheelchair_only.then_some(true),
        extra_activities: args.activities.clone(),
    };

    let mut request = TripRequest::new(package.clone())
        .with_days(args.days)
        .with_tier(args.tier.into())
        .with_overrides(overrides);
    request.city = args.city.clone();
    if let (Some(lat), Some(lon)) = (args.origin_lat, args.origin_lon) {
        request = request.with_origin(Coord { x: lon, y: lat });
    }
    if !args.fixed_pois.is_empty() {
        let config =
            tripsmith_core::resolve_config(&package, args.tier.into(), &request.overrides);
        let mut first_day = tripsmith_core::DayConstraint::from_config(&config);
        first_day.fixed_pois = args.fixed_pois.iter().map(PoiId::new).collect();
        request = request.with_day_constraints(vec![Some(first_day)]);
    }
    Ok(request)
}

fn emit(itinerary: &tripsmith_core::Itinerary) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(itinerary)?);
    Ok(())
}

fn run_plan(args: &PlanArgs) -> Result<(), CliError> {
    let collaborators = Collaborators::build(&args.collaborators)?;
    let request = load_request(args)?;
    let itinerary = collaborators.planner().plan(&request)?;
    emit(&itinerary)
}

fn run_chat(args: &ChatArgs) -> Result<(), CliError> {
    let collaborators = Collaborators::build(&args.collaborators)?;
    let itinerary = collaborators.planner().plan_from_chat(&args.text)?;
    emit(&itinerary)
}

fn run_packages() -> Result<(), CliError> {
    let listing: Vec<serde_json::Value> = tripsmith_core::packages()
        .iter()
        .map(|pkg| {
            serde_json::json!({
                "id": pkg.id,
                "name": pkg.name,
                "theme": pkg.theme,
                "categories": pkg.categories,
                "tags": pkg.tags,
                "activities": pkg.activities,
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&listing)?);
    Ok(())
}

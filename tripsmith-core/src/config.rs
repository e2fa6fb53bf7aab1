//! Preset packages, budget tiers, and the three-way override merge that
//! produces one resolved [`PlanConfig`] per trip.
//!
//! Precedence per field is explicit override, then budget-tier default,
//! then package default. Overrides use `Option` rather than sentinel
//! values so a caller-provided zero (for example a free-entry-only fee
//! ceiling) is honoured instead of being mistaken for "absent".

use crate::time::TimeOfDay;
use crate::transport::TransportMode;

/// Package id substituted for unknown package references where a default
/// is permitted (e.g. chat-synthesised requests).
pub const DEFAULT_PACKAGE_ID: &str = "pkg-heritage";

/// Daily stop pacing tier.
///
/// # Examples
/// ```
/// use tripsmith_core::Pace;
///
/// assert_eq!(Pace::Relaxed.stop_range(), (2, 3));
/// assert_eq!(Pace::Packed.stop_range(), (5, 7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Pace {
    /// Two to three stops per day.
    Relaxed,
    /// Three to five stops per day.
    #[default]
    Normal,
    /// Five to seven stops per day.
    Packed,
}

impl Pace {
    /// Minimum and maximum stops attempted per day.
    #[must_use]
    pub const fn stop_range(self) -> (u8, u8) {
        match self {
            Self::Relaxed => (2, 3),
            Self::Normal => (3, 5),
            Self::Packed => (5, 7),
        }
    }

    /// Parse a lowercase tier name; `None` for anything unrecognised.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "relaxed" => Some(Self::Relaxed),
            "normal" => Some(Self::Normal),
            "packed" => Some(Self::Packed),
            _ => None,
        }
    }
}

/// Named spending profile controlling daily budget, fee ceiling, default
/// transport, and pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BudgetTier {
    /// Tight spending, bus travel, relaxed pace.
    Budget,
    /// Middle-of-the-road spending. The default tier.
    #[default]
    Economy,
    /// Generous spending, cab travel, packed pace.
    Premium,
}

/// Defaults contributed by a [`BudgetTier`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierDefaults {
    /// Spending cap per day, in rupees.
    pub daily_budget: f64,
    /// Maximum entry fee per stop.
    pub max_entry_fee: f64,
    /// Transport mode assumed when the caller names none.
    pub default_transport: TransportMode,
    /// Pacing tier.
    pub pace: Pace,
    /// Attempted stops per day (min, max).
    pub stops_per_day: (u8, u8),
}

impl BudgetTier {
    /// Table entry for the tier.
    #[must_use]
    pub const fn defaults(self) -> TierDefaults {
        match self {
            Self::Budget => TierDefaults {
                daily_budget: 800.0,
                max_entry_fee: 100.0,
                default_transport: TransportMode::Bus,
                pace: Pace::Relaxed,
                stops_per_day: (2, 3),
            },
            Self::Economy => TierDefaults {
                daily_budget: 1500.0,
                max_entry_fee: 300.0,
                default_transport: TransportMode::Auto,
                pace: Pace::Normal,
                stops_per_day: (3, 5),
            },
            Self::Premium => TierDefaults {
                daily_budget: 3500.0,
                max_entry_fee: 1000.0,
                default_transport: TransportMode::Cab,
                pace: Pace::Packed,
                stops_per_day: (5, 7),
            },
        }
    }

    /// Parse a lowercase tier name; `None` for anything unrecognised.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "budget" => Some(Self::Budget),
            "economy" => Some(Self::Economy),
            "premium" => Some(Self::Premium),
            _ => None,
        }
    }
}

/// Defaults contributed by a [`Package`] preset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackageDefaults {
    /// Maximum entry fee per stop.
    pub max_entry_fee: f64,
    /// Minimum acceptable rating.
    pub min_rating: f32,
    /// Preferred transport mode.
    pub transport_mode: TransportMode,
    /// Spending cap per day, in rupees.
    pub budget_per_day: f64,
    /// Pacing tier.
    pub pace: Pace,
    /// Day window start.
    pub start_time: TimeOfDay,
    /// Day window end.
    pub end_time: TimeOfDay,
}

/// A themed tour preset: category filters, relevance tags, activity hints,
/// and sensible defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Package {
    /// Stable package identifier, e.g. `"pkg-heritage"`.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Theme keyword.
    pub theme: &'static str,
    /// Categories pushed down to the catalog query.
    pub categories: &'static [&'static str],
    /// Tags scored for relevance.
    pub tags: &'static [&'static str],
    /// Activities the package promotes.
    pub activities: &'static [&'static str],
    /// Package-level defaults.
    pub defaults: PackageDefaults,
}

const PACKAGES: &[Package] = &[
    Package {
        id: "pkg-heritage",
        name: "Heritage & History",
        theme: "heritage",
        categories: &["heritage", "temple", "museum"],
        tags: &["fort", "colonial", "dravidian", "8th_century", "british"],
        activities: &["museum_visit", "history_tour", "photography", "architecture"],
        defaults: PackageDefaults {
            max_entry_fee: 150.0,
            min_rating: 4.3,
            transport_mode: TransportMode::Auto,
            budget_per_day: 1200.0,
            pace: Pace::Normal,
            start_time: TimeOfDay::at(9, 0),
            end_time: TimeOfDay::at(20, 0),
        },
    },
    Package {
        id: "pkg-family",
        name: "Family Fun Day",
        theme: "family",
        categories: &["beach", "park", "museum", "attraction"],
        tags: &["family", "zoo", "amusement", "wildlife", "science"],
        activities: &["wildlife", "water_rides", "planetarium_shows", "safari"],
        defaults: PackageDefaults {
            max_entry_fee: 500.0,
            min_rating: 4.2,
            transport_mode: TransportMode::Cab,
            budget_per_day: 2000.0,
            pace: Pace::Normal,
            start_time: TimeOfDay::at(9, 0),
            end_time: TimeOfDay::at(19, 0),
        },
    },
    Package {
        id: "pkg-budget",
        name: "Budget Explorer",
        theme: "budget",
        categories: &["beach", "temple", "attraction", "heritage"],
        tags: &["free", "beach", "urban"],
        activities: &["jogging", "prayer", "photography", "architecture"],
        defaults: PackageDefaults {
            max_entry_fee: 0.0,
            min_rating: 4.0,
            transport_mode: TransportMode::Bus,
            budget_per_day: 400.0,
            pace: Pace::Relaxed,
            start_time: TimeOfDay::at(8, 0),
            end_time: TimeOfDay::at(18, 0),
        },
    },
    Package {
        id: "pkg-spiritual",
        name: "Spiritual Trail",
        theme: "spiritual",
        categories: &["temple"],
        tags: &["hindu", "shiva", "vishnu", "divya_desam", "heritage"],
        activities: &["prayer", "utsavam", "architecture", "heritage"],
        defaults: PackageDefaults {
            max_entry_fee: 50.0,
            min_rating: 4.4,
            transport_mode: TransportMode::Auto,
            budget_per_day: 700.0,
            pace: Pace::Relaxed,
            start_time: TimeOfDay::at(6, 0),
            end_time: TimeOfDay::at(21, 0),
        },
    },
    Package {
        id: "pkg-beach",
        name: "Coastal Escape",
        theme: "beach",
        categories: &["beach", "attraction"],
        tags: &["beach", "sunset", "relaxation", "ecr", "drive_in"],
        activities: &["relaxation", "food_stalls", "surfing", "movies"],
        defaults: PackageDefaults {
            max_entry_fee: 300.0,
            min_rating: 4.2,
            transport_mode: TransportMode::SelfDrive,
            budget_per_day: 900.0,
            pace: Pace::Relaxed,
            start_time: TimeOfDay::at(15, 0),
            end_time: TimeOfDay::at(23, 0),
        },
    },
    Package {
        id: "pkg-shopping",
        name: "Shop & Dine",
        theme: "shopping",
        categories: &["attraction"],
        tags: &["shopping", "mall", "retail", "jewellery", "street_food"],
        activities: &["shopping", "street_food", "dining", "bargaining"],
        defaults: PackageDefaults {
            max_entry_fee: 0.0,
            min_rating: 4.0,
            transport_mode: TransportMode::Metro,
            budget_per_day: 1500.0,
            pace: Pace::Packed,
            start_time: TimeOfDay::at(11, 0),
            end_time: TimeOfDay::at(22, 0),
        },
    },
];

/// All package presets, in catalogue order.
#[must_use]
pub const fn packages() -> &'static [Package] {
    PACKAGES
}

/// Look up a preset by id.
#[must_use]
pub fn package(id: &str) -> Option<&'static Package> {
    PACKAGES.iter().find(|pkg| pkg.id == id)
}

/// The fallback preset used when an unknown id may be substituted.
#[must_use]
pub fn default_package() -> &'static Package {
    // The table always carries the default entry.
    package(DEFAULT_PACKAGE_ID).unwrap_or(&PACKAGES[0])
}

/// Caller-supplied overrides. Every field is optional; `Some(0.0)` is a
/// value, not an absence.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlanOverrides {
    /// Replace the resolved transport mode.
    pub transport_mode: Option<TransportMode>,
    /// Replace the entry-fee ceiling. Zero means free-entry only.
    pub max_entry_fee: Option<f64>,
    /// Replace the per-day budget.
    pub budget_per_day: Option<f64>,
    /// Replace the pacing tier.
    pub pace: Option<Pace>,
    /// Replace the day window start.
    pub start_time: Option<TimeOfDay>,
    /// Replace the day window end.
    pub end_time: Option<TimeOfDay>,
    /// Only keep wheelchair-accessible stops.
    pub wheelchair_only: Option<bool>,
    /// Activities to consider in addition to the package's own.
    pub extra_activities: Vec<String>,
}

/// One resolved planning configuration, built once per trip and immutable
/// thereafter.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanConfig {
    /// Display name of the underlying package.
    pub package_name: String,
    /// Categories pushed down to the catalog query.
    pub categories: Vec<String>,
    /// Tags scored for relevance.
    pub tags: Vec<String>,
    /// Activity allowlist (package activities plus extras).
    pub activities: Vec<String>,
    /// Entry-fee ceiling per stop.
    pub max_entry_fee: f64,
    /// Minimum acceptable rating.
    pub min_rating: f32,
    /// Transport mode for the trip.
    pub transport_mode: TransportMode,
    /// Spending cap per day.
    pub budget_per_day: f64,
    /// Pacing tier.
    pub pace: Pace,
    /// Day window start.
    pub start_time: TimeOfDay,
    /// Day window end.
    pub end_time: TimeOfDay,
    /// Only keep wheelchair-accessible stops.
    pub wheelchair_only: bool,
    /// Attempted stops per day (min, max).
    pub stops_per_day: (u8, u8),
}

/// Merge a package preset, a budget tier, and caller overrides into one
/// [`PlanConfig`].
///
/// Unknown package ids resolve to the default package rather than failing;
/// callers that must reject unknown ids (structured requests) check the
/// id before resolving.
///
/// # Examples
/// ```
/// use tripsmith_core::{resolve_config, BudgetTier, PlanOverrides};
///
/// let overrides = PlanOverrides {
///     max_entry_fee: Some(0.0),
///     ..PlanOverrides::default()
/// };
/// let config = resolve_config("pkg-heritage", BudgetTier::Economy, &overrides);
/// // Zero is a value: the free-entry-only ceiling survives the merge.
/// assert_eq!(config.max_entry_fee, 0.0);
/// assert_eq!(config.budget_per_day, 1500.0);
/// ```
#[must_use]
pub fn resolve_config(package_id: &str, tier: BudgetTier, overrides: &PlanOverrides) -> PlanConfig {
    let pkg = package(package_id).unwrap_or_else(|| {
        log::warn!("unknown package {package_id:?}; using {DEFAULT_PACKAGE_ID}");
        default_package()
    });
    let tier_defaults = tier.defaults();

    let mut activities: Vec<String> = pkg.activities.iter().map(|&a| a.to_owned()).collect();
    activities.extend(overrides.extra_activities.iter().cloned());

    PlanConfig {
        package_name: pkg.name.to_owned(),
        categories: pkg.categories.iter().map(|&c| c.to_owned()).collect(),
        tags: pkg.tags.iter().map(|&t| t.to_owned()).collect(),
        activities,
        max_entry_fee: overrides
            .max_entry_fee
            .unwrap_or(tier_defaults.max_entry_fee),
        min_rating: pkg.defaults.min_rating,
        transport_mode: overrides
            .transport_mode
            .unwrap_or(tier_defaults.default_transport),
        budget_per_day: overrides
            .budget_per_day
            .unwrap_or(tier_defaults.daily_budget),
        pace: overrides.pace.unwrap_or(tier_defaults.pace),
        start_time: overrides.start_time.unwrap_or(pkg.defaults.start_time),
        end_time: overrides.end_time.unwrap_or(pkg.defaults.end_time),
        wheelchair_only: overrides.wheelchair_only.unwrap_or(false),
        stops_per_day: tier_defaults.stops_per_day,
    }
}

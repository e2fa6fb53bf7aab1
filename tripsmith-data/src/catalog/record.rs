//! Lenient deserialisation of catalog POI records.
//!
//! Catalog exports are inconsistent: list fields arrive as JSON arrays
//! or comma-joined strings, numbers arrive as numbers or numeric
//! strings, and booleans arrive as booleans or `"yes"`/`"no"`. A
//! [`RawPoiRecord`] absorbs all of that and converts into the core
//! [`Poi`] type, dropping only fields that are genuinely unusable.

use geo::Coord;
use serde::Deserialize;
use tripsmith_core::{OpeningHours, Poi, PoiId};

/// A field that may be a single string or a list of strings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(untagged)]
pub enum StringOrList {
    /// A comma- or semicolon-joined string.
    One(String),
    /// An explicit list.
    Many(Vec<String>),
    /// Field absent.
    #[default]
    #[serde(skip)]
    Absent,
}

impl StringOrList {
    /// Normalise into a trimmed, non-empty list.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(joined) => joined
                .split([',', ';'])
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_owned)
                .collect(),
            Self::Many(items) => items
                .into_iter()
                .map(|item| item.trim().to_owned())
                .filter(|item| !item.is_empty())
                .collect(),
            Self::Absent => Vec::new(),
        }
    }
}

/// A number that may arrive as a number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Number(f64),
    Text(String),
}

impl LooseNumber {
    /// The numeric value, or `None` for a non-numeric string.
    fn value(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }
}

/// A boolean that may arrive as a boolean or a yes/no string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum LooseBool {
    Flag(bool),
    Text(String),
}

impl LooseBool {
    fn value(&self) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Text(text) => {
                matches!(text.trim().to_lowercase().as_str(), "yes" | "true" | "1")
            }
        }
    }
}

/// One POI row as exported by a catalog backend.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawPoiRecord {
    id: String,
    name: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    category: String,
    tags: StringOrList,
    activities: StringOrList,
    entry_fee: Option<LooseNumber>,
    visit_minutes: Option<LooseNumber>,
    rating: Option<LooseNumber>,
    popularity: Option<LooseNumber>,
    opening_hours: Option<String>,
    wheelchair_accessible: Option<LooseBool>,
    address: String,
    best_time: StringOrList,
}

impl RawPoiRecord {
    /// Convert into the core [`Poi`] type.
    ///
    /// Returns `None` when the record lacks an id, a name, or usable
    /// coordinates; anything else falls back to absent fields.
    #[must_use]
    pub fn into_poi(self) -> Option<Poi> {
        if self.id.trim().is_empty() || self.name.trim().is_empty() {
            return None;
        }
        let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) else {
            return None;
        };
        if !latitude.is_finite() || !longitude.is_finite() {
            return None;
        }

        let opening_hours = match self.opening_hours.as_deref().map(str::trim) {
            None | Some("") => OpeningHours::Unknown,
            Some(raw) if raw.eq_ignore_ascii_case("24x7") || raw.eq_ignore_ascii_case("24/7") => {
                OpeningHours::AlwaysOpen
            }
            Some(raw) => OpeningHours::parse(raw),
        };

        Some(Poi {
            id: PoiId::new(self.id.trim()),
            name: self.name.trim().to_owned(),
            location: Coord {
                x: longitude,
                y: latitude,
            },
            category: self.category.trim().to_owned(),
            tags: self.tags.into_vec(),
            activities: self.activities.into_vec(),
            entry_fee: self.entry_fee.as_ref().and_then(LooseNumber::value),
            visit_minutes: self
                .visit_minutes
                .as_ref()
                .and_then(LooseNumber::value)
                .filter(|minutes| *minutes >= 0.0)
                .map(|minutes| minutes as u32),
            rating: self
                .rating
                .as_ref()
                .and_then(LooseNumber::value)
                .map(|value| value as f32),
            popularity: self
                .popularity
                .as_ref()
                .and_then(LooseNumber::value)
                .map(|value| value as f32),
            opening_hours,
            wheelchair_accessible: self
                .wheelchair_accessible
                .as_ref()
                .is_some_and(LooseBool::value),
            address: self.address.trim().to_owned(),
            best_time: self.best_time.into_vec(),
        })
    }
}

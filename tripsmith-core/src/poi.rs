//! Canonical point-of-interest records.
//!
//! Catalog backends normalise their loosely shaped source data (arrays or
//! comma strings, missing numerics) into this single fixed-shape type at
//! the boundary; the planning pipeline never branches on representation.
//! Coordinates are WGS84 with `x = longitude` and `y = latitude`.

use std::fmt;

use geo::Coord;

use crate::time::TimeOfDay;

/// Opaque catalog identifier for a point of interest.
///
/// # Examples
/// ```
/// use tripsmith_core::PoiId;
///
/// let id = PoiId::new("marina-beach");
/// assert_eq!(id.as_str(), "marina-beach");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PoiId(String);

impl PoiId {
    /// Wrap a raw catalog identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PoiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PoiId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PoiId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// When a point of interest admits visitors.
///
/// Missing or unparseable hours become [`OpeningHours::Unknown`], which the
/// eligibility check treats as open (fail-open, to tolerate incomplete
/// catalog data).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OpeningHours {
    /// Open around the clock.
    AlwaysOpen,
    /// Open between two clock times on the same day.
    Window {
        /// Opening time.
        opens: TimeOfDay,
        /// Closing time.
        closes: TimeOfDay,
    },
    /// No usable opening-hours data.
    #[default]
    Unknown,
}

impl OpeningHours {
    /// Parse an `"05:00-20:00"` style descriptor.
    ///
    /// Anything that does not split into two parseable clock times comes
    /// back as [`OpeningHours::Unknown`] rather than an error.
    ///
    /// # Examples
    /// ```
    /// use tripsmith_core::{OpeningHours, TimeOfDay};
    ///
    /// let hours = OpeningHours::parse("05:00-20:00");
    /// assert_eq!(
    ///     hours,
    ///     OpeningHours::Window {
    ///         opens: TimeOfDay::at(5, 0),
    ///         closes: TimeOfDay::at(20, 0),
    ///     }
    /// );
    /// assert_eq!(OpeningHours::parse("dawn to dusk"), OpeningHours::Unknown);
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let Some((open_text, close_text)) = raw.split_once('-') else {
            return Self::Unknown;
        };
        match (TimeOfDay::parse(open_text), TimeOfDay::parse(close_text)) {
            (Ok(opens), Ok(closes)) => Self::Window { opens, closes },
            _ => Self::Unknown,
        }
    }

    /// Whether the POI is open at any point during `[start, end)`.
    ///
    /// A window overlaps unless it closes before the day starts or opens
    /// after the day ends. [`OpeningHours::Unknown`] always passes.
    #[must_use]
    pub fn overlaps(self, start: TimeOfDay, end: TimeOfDay) -> bool {
        match self {
            Self::AlwaysOpen | Self::Unknown => true,
            Self::Window { opens, closes } => !(closes <= start || opens >= end),
        }
    }
}

/// A visitable place with its location, cost, duration, and descriptive
/// metadata. Immutable for the duration of a planning run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Poi {
    /// Catalog identifier.
    pub id: PoiId,
    /// Display name.
    pub name: String,
    /// WGS84 position, `x = longitude`, `y = latitude`.
    pub location: Coord<f64>,
    /// Primary category tag, e.g. `"temple"`.
    pub category: String,
    /// Free-form descriptive tags.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<String>,
    /// Named activities offered on site.
    #[cfg_attr(feature = "serde", serde(default))]
    pub activities: Vec<String>,
    /// Entry fee in rupees; `None` when the catalog omits it.
    #[cfg_attr(feature = "serde", serde(default))]
    pub entry_fee: Option<f64>,
    /// Average visit duration in minutes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub visit_minutes: Option<u32>,
    /// Visitor rating, typically `0.0..=5.0`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rating: Option<f32>,
    /// Relative popularity used for ranking.
    #[cfg_attr(feature = "serde", serde(default))]
    pub popularity: Option<f32>,
    /// Opening hours descriptor.
    #[cfg_attr(feature = "serde", serde(default))]
    pub opening_hours: OpeningHours,
    /// Whether the site is wheelchair accessible.
    #[cfg_attr(feature = "serde", serde(default))]
    pub wheelchair_accessible: bool,
    /// Street address for display.
    #[cfg_attr(feature = "serde", serde(default))]
    pub address: String,
    /// Suggested visiting times for display.
    #[cfg_attr(feature = "serde", serde(default))]
    pub best_time: Vec<String>,
}

impl Poi {
    /// Construct a POI with the required fields; everything else defaults
    /// to absent.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use tripsmith_core::Poi;
    ///
    /// let poi = Poi::new("fort-st-george", "Fort St. George",
    ///     Coord { x: 80.2874, y: 13.0796 }, "heritage")
    ///     .with_tags(["fort", "colonial"])
    ///     .with_rating(4.4);
    /// assert_eq!(poi.tags.len(), 2);
    /// assert!(poi.entry_fee.is_none());
    /// ```
    #[must_use]
    pub fn new(
        id: impl Into<PoiId>,
        name: impl Into<String>,
        location: Coord<f64>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
            category: category.into(),
            tags: Vec::new(),
            activities: Vec::new(),
            entry_fee: None,
            visit_minutes: None,
            rating: None,
            popularity: None,
            opening_hours: OpeningHours::Unknown,
            wheelchair_accessible: false,
            address: String::new(),
            best_time: Vec::new(),
        }
    }

    /// Set descriptive tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set on-site activities.
    #[must_use]
    pub fn with_activities<I, S>(mut self, activities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.activities = activities.into_iter().map(Into::into).collect();
        self
    }

    /// Set the entry fee.
    #[must_use]
    pub fn with_entry_fee(mut self, fee: f64) -> Self {
        self.entry_fee = Some(fee);
        self
    }

    /// Set the average visit duration.
    #[must_use]
    pub fn with_visit_minutes(mut self, minutes: u32) -> Self {
        self.visit_minutes = Some(minutes);
        self
    }

    /// Set the visitor rating.
    #[must_use]
    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Set the popularity score.
    #[must_use]
    pub fn with_popularity(mut self, popularity: f32) -> Self {
        self.popularity = Some(popularity);
        self
    }

    /// Set the opening hours.
    #[must_use]
    pub fn with_opening_hours(mut self, hours: OpeningHours) -> Self {
        self.opening_hours = hours;
        self
    }

    /// Mark the site wheelchair accessible.
    #[must_use]
    pub fn with_wheelchair_access(mut self) -> Self {
        self.wheelchair_accessible = true;
        self
    }

    /// Set the display address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }
}

//! Minute-precision clock times for day windows and schedule slots.
//!
//! Catalog data and user requests express times as strings ("09:00",
//! "6:30 PM", "14.30"). Parsing normalises all accepted shapes into a
//! [`TimeOfDay`], which stores whole minutes from midnight. Schedule
//! arithmetic happens on plain minute counts so a walk past the end of the
//! day cannot wrap around midnight.

use std::fmt;

use chrono::{NaiveTime, Timelike};
use thiserror::Error;

/// Clock-time patterns accepted by [`TimeOfDay::parse`], tried in order.
const CLOCK_PATTERNS: &[&str] = &["%H:%M", "%I:%M %p", "%H.%M"];

/// Error returned by [`TimeOfDay::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    /// No accepted clock pattern matched the input.
    #[error("unrecognised clock time {text:?}")]
    Unrecognised {
        /// The rejected input, trimmed.
        text: String,
    },
}

/// A time of day with minute precision.
///
/// Values are stored as minutes from midnight and render as `HH:MM`.
///
/// # Examples
/// ```
/// use tripsmith_core::TimeOfDay;
///
/// let start = TimeOfDay::parse("9:00")?;
/// assert_eq!(start, TimeOfDay::at(9, 0));
/// assert_eq!(start.to_string(), "09:00");
/// assert_eq!(TimeOfDay::parse("6:30 PM")?, TimeOfDay::at(18, 30));
/// # Ok::<(), tripsmith_core::TimeParseError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Minutes in a full day.
    pub const MINUTES_PER_DAY: u16 = 24 * 60;

    /// Construct from an hour and minute pair.
    ///
    /// Intended for literals in preset tables and tests; out-of-range
    /// components are a programming error and fail const evaluation when
    /// used in a `const` context.
    #[must_use]
    pub const fn at(hour: u16, minute: u16) -> Self {
        assert!(hour < 24 && minute < 60, "clock components out of range");
        Self(hour * 60 + minute)
    }

    /// Construct from minutes since midnight; `None` when out of range.
    #[must_use]
    pub const fn from_minutes(minutes: u16) -> Option<Self> {
        if minutes < Self::MINUTES_PER_DAY {
            Some(Self(minutes))
        } else {
            None
        }
    }

    /// Construct from a minute count, clamping to the last minute of the day.
    ///
    /// Used where surrounding logic already guarantees the value fits the
    /// day window.
    #[must_use]
    pub fn from_minutes_clamped(minutes: u32) -> Self {
        let ceiling = Self::MINUTES_PER_DAY - 1;
        let capped = minutes.min(u32::from(ceiling));
        Self(u16::try_from(capped).unwrap_or(ceiling))
    }

    /// Minutes since midnight.
    #[must_use]
    pub const fn minutes(self) -> u16 {
        self.0
    }

    /// Parse a clock-time string.
    ///
    /// Accepts `HH:MM`, twelve-hour `HH:MM AM/PM`, and `HH.MM`, matching
    /// the shapes seen in catalog opening-hours data.
    ///
    /// # Errors
    /// Returns [`TimeParseError::Unrecognised`] when no pattern matches.
    pub fn parse(text: &str) -> Result<Self, TimeParseError> {
        let trimmed = text.trim();
        for pattern in CLOCK_PATTERNS {
            if let Ok(parsed) = NaiveTime::parse_from_str(trimmed, pattern) {
                let minutes = parsed.num_seconds_from_midnight() / 60;
                if let Ok(minutes) = u16::try_from(minutes) {
                    return Ok(Self(minutes));
                }
            }
        }
        Err(TimeParseError::Unrecognised {
            text: trimmed.to_owned(),
        })
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for TimeOfDay {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for TimeOfDay {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("09:00", 9, 0)]
    #[case("9:00", 9, 0)]
    #[case(" 20:30 ", 20, 30)]
    #[case("6:30 PM", 18, 30)]
    #[case("12:15 AM", 0, 15)]
    #[case("14.45", 14, 45)]
    fn parses_accepted_patterns(#[case] text: &str, #[case] hour: u16, #[case] minute: u16) {
        assert_eq!(
            TimeOfDay::parse(text).expect("pattern should parse"),
            TimeOfDay::at(hour, minute)
        );
    }

    #[rstest]
    #[case("")]
    #[case("noon")]
    #[case("25:00")]
    #[case("09:61")]
    fn rejects_unparseable_input(#[case] text: &str) {
        assert!(TimeOfDay::parse(text).is_err());
    }

    #[rstest]
    fn displays_zero_padded() {
        assert_eq!(TimeOfDay::at(6, 5).to_string(), "06:05");
    }

    #[rstest]
    fn from_minutes_rejects_out_of_range() {
        assert!(TimeOfDay::from_minutes(TimeOfDay::MINUTES_PER_DAY).is_none());
        assert_eq!(
            TimeOfDay::from_minutes(90),
            Some(TimeOfDay::at(1, 30))
        );
    }

    #[rstest]
    fn from_minutes_clamped_caps_at_last_minute() {
        assert_eq!(
            TimeOfDay::from_minutes_clamped(10_000),
            TimeOfDay::at(23, 59)
        );
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn serialises_as_clock_string() {
        let json = serde_json::to_string(&TimeOfDay::at(18, 30)).expect("serialise");
        assert_eq!(json, "\"18:30\"");
        let back: TimeOfDay = serde_json::from_str(&json).expect("deserialise");
        assert_eq!(back, TimeOfDay::at(18, 30));
    }
}

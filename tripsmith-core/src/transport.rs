//! Transport modes with their fare, speed, and surcharge tables.
//!
//! The tables are static configuration consumed by the scheduler; they are
//! not produced by the engine. Costs are in rupees and speeds in km/h.

use std::fmt;

use crate::cost::round2;

/// How the visitor moves between stops.
///
/// # Examples
/// ```
/// use tripsmith_core::TransportMode;
///
/// assert_eq!(TransportMode::default(), TransportMode::Auto);
/// assert_eq!(TransportMode::from_name("cab"), Some(TransportMode::Cab));
/// assert!(TransportMode::from_name("teleport").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TransportMode {
    /// City bus.
    Bus,
    /// Metro rail.
    Metro,
    /// Auto rickshaw. The designated default mode.
    #[default]
    Auto,
    /// Hired cab.
    Cab,
    /// Self-driven vehicle.
    SelfDrive,
}

/// Base fare plus per-kilometre rate for one mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransportRates {
    /// Flat fare per leg.
    pub base_fare: f64,
    /// Rate per kilometre travelled.
    pub per_km: f64,
}

/// Average speed assumed when a mode has no table entry.
const DEFAULT_SPEED_KMH: f64 = 20.0;

/// Floor for any travel leg, in minutes.
pub const MIN_TRAVEL_MINUTES: u32 = 5;

impl TransportMode {
    /// All modes, in table order.
    pub const ALL: &'static [Self] = &[
        Self::Bus,
        Self::Metro,
        Self::Auto,
        Self::Cab,
        Self::SelfDrive,
    ];

    /// Lowercase wire name of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bus => "bus",
            Self::Metro => "metro",
            Self::Auto => "auto",
            Self::Cab => "cab",
            Self::SelfDrive => "self_drive",
        }
    }

    /// Parse a wire name; `None` for unknown modes so callers can apply
    /// their own fallback.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|mode| mode.as_str() == name.trim())
    }

    /// Fare table entry for the mode.
    #[must_use]
    pub const fn rates(self) -> TransportRates {
        match self {
            Self::Bus => TransportRates {
                base_fare: 5.0,
                per_km: 1.5,
            },
            Self::Metro => TransportRates {
                base_fare: 10.0,
                per_km: 2.5,
            },
            Self::Auto => TransportRates {
                base_fare: 30.0,
                per_km: 18.0,
            },
            Self::Cab => TransportRates {
                base_fare: 50.0,
                per_km: 22.0,
            },
            Self::SelfDrive => TransportRates {
                base_fare: 0.0,
                per_km: 6.0,
            },
        }
    }

    /// Average speed in km/h used to derive travel minutes.
    #[must_use]
    pub const fn speed_kmh(self) -> f64 {
        match self {
            Self::Bus => 15.0,
            Self::Metro => 35.0,
            Self::Auto => DEFAULT_SPEED_KMH,
            Self::Cab => 25.0,
            Self::SelfDrive => 30.0,
        }
    }

    /// Profile name understood by the external routing service.
    #[must_use]
    pub const fn routing_profile(self) -> &'static str {
        // All supported modes are road vehicles from the router's point
        // of view.
        match self {
            Self::Bus | Self::Metro | Self::Auto | Self::Cab | Self::SelfDrive => "driving-car",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fare for one leg of the given length, rounded to two decimals.
#[must_use]
pub fn transport_cost(distance_km: f64, mode: TransportMode) -> f64 {
    let rates = mode.rates();
    round2(rates.base_fare + rates.per_km * distance_km)
}

/// Minutes to cover a leg at the mode's average speed, floored at
/// [`MIN_TRAVEL_MINUTES`].
#[must_use]
pub fn travel_minutes(distance_km: f64, mode: TransportMode) -> u32 {
    let minutes = (distance_km / mode.speed_kmh()) * 60.0;
    if minutes.is_finite() && minutes > 0.0 {
        (minutes as u32).max(MIN_TRAVEL_MINUTES)
    } else {
        MIN_TRAVEL_MINUTES
    }
}

/// Fixed surcharge for a named paid activity; unknown activities cost
/// nothing.
#[must_use]
pub fn activity_surcharge(activity: &str) -> f64 {
    match activity {
        "lion_safari" => 300.0,
        "water_rides" => 400.0,
        "elephant_ride" => 200.0,
        "planetarium_shows" => 40.0,
        "horseback_riding" => 150.0,
        "drive_in" => 200.0,
        "bowling" => 250.0,
        "battery_vehicle" => 50.0,
        _ => 0.0,
    }
}

/// Total surcharge across a POI's activity set.
#[must_use]
pub fn activity_surcharges(activities: &[String]) -> f64 {
    activities
        .iter()
        .map(|activity| activity_surcharge(activity))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TransportMode::Bus, 10.0, 20.0)]
    #[case(TransportMode::Cab, 10.0, 270.0)]
    #[case(TransportMode::SelfDrive, 10.0, 60.0)]
    fn fares_follow_the_rate_table(
        #[case] mode: TransportMode,
        #[case] km: f64,
        #[case] expected: f64,
    ) {
        assert!((transport_cost(km, mode) - expected).abs() < 1e-9);
    }

    #[rstest]
    fn short_legs_are_floored_at_five_minutes() {
        assert_eq!(travel_minutes(0.0, TransportMode::Auto), 5);
        assert_eq!(travel_minutes(0.5, TransportMode::Cab), 5);
    }

    #[rstest]
    fn travel_minutes_truncate_like_the_fare_meter() {
        // 4.3 km at 20 km/h is 12.9 minutes; the meter shows 12.
        assert_eq!(travel_minutes(4.3, TransportMode::Auto), 12);
    }

    #[rstest]
    fn unknown_activity_costs_nothing() {
        assert!((activity_surcharge("skydiving") - 0.0).abs() < f64::EPSILON);
        let acts = vec!["water_rides".to_owned(), "skydiving".to_owned()];
        assert!((activity_surcharges(&acts) - 400.0).abs() < 1e-9);
    }

    #[rstest]
    fn mode_names_round_trip() {
        for &mode in TransportMode::ALL {
            assert_eq!(TransportMode::from_name(mode.as_str()), Some(mode));
        }
    }
}

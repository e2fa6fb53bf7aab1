//! Per-day scheduling constraints.
//!
//! A [`DayConstraint`] narrows the trip-level configuration for a single
//! day: its time window, pace, transport override, spending cap, and any
//! POIs the day forces in or keeps out. Days without an explicit
//! constraint synthesize one from the trip configuration.

use crate::config::{Pace, PlanConfig};
use crate::poi::PoiId;
use crate::time::TimeOfDay;
use crate::transport::TransportMode;

/// A day window that cannot be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DayConstraintError {
    /// The day ends at or before it starts.
    #[error("day window is inverted: starts {start} but ends {end}")]
    WindowInverted {
        /// Configured start of the day.
        start: TimeOfDay,
        /// Configured end of the day.
        end: TimeOfDay,
    },
}

/// Constraints for scheduling a single day.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayConstraint {
    /// First minute a visit may begin.
    pub start: TimeOfDay,
    /// Minute by which every visit must have ended.
    pub end: TimeOfDay,
    /// Stop-count pacing for the day.
    pub pace: Pace,
    /// Transport mode override; `None` uses the trip-level mode.
    #[cfg_attr(feature = "serde", serde(default))]
    pub transport: Option<TransportMode>,
    /// Spending cap for the day; `None` leaves the day uncapped.
    #[cfg_attr(feature = "serde", serde(default))]
    pub budget_cap: Option<f64>,
    /// POIs forced into the day ahead of ranked candidates.
    #[cfg_attr(feature = "serde", serde(default))]
    pub fixed_pois: Vec<PoiId>,
    /// POIs this day must not visit, on top of earlier-day usage.
    #[cfg_attr(feature = "serde", serde(default))]
    pub excluded_pois: Vec<PoiId>,
}

impl DayConstraint {
    /// Synthesize a day constraint from the trip-level configuration.
    ///
    /// # Examples
    /// ```
    /// use tripsmith_core::{resolve_config, BudgetTier, DayConstraint, PlanOverrides};
    ///
    /// let config = resolve_config("pkg-heritage", BudgetTier::Economy, &PlanOverrides::default());
    /// let day = DayConstraint::from_config(&config);
    /// assert_eq!(day.start, config.start_time);
    /// assert_eq!(day.budget_cap, Some(config.budget_per_day));
    /// ```
    #[must_use]
    pub fn from_config(config: &PlanConfig) -> Self {
        Self {
            start: config.start_time,
            end: config.end_time,
            pace: config.pace,
            transport: None,
            budget_cap: Some(config.budget_per_day),
            fixed_pois: Vec::new(),
            excluded_pois: Vec::new(),
        }
    }

    /// Reject inverted windows; everything else schedules.
    ///
    /// # Errors
    /// Returns [`DayConstraintError::WindowInverted`] when `end <= start`.
    pub fn validate(&self) -> Result<(), DayConstraintError> {
        if self.end <= self.start {
            return Err(DayConstraintError::WindowInverted {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Minutes between the day's start and end.
    #[must_use]
    pub fn window_minutes(&self) -> u32 {
        u32::from(self.end.minutes()).saturating_sub(u32::from(self.start.minutes()))
    }

    /// The transport mode in effect for this day.
    #[must_use]
    pub fn effective_transport(&self, trip_mode: TransportMode) -> TransportMode {
        self.transport.unwrap_or(trip_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn window(start: TimeOfDay, end: TimeOfDay) -> DayConstraint {
        DayConstraint {
            start,
            end,
            pace: Pace::Normal,
            transport: None,
            budget_cap: None,
            fixed_pois: Vec::new(),
            excluded_pois: Vec::new(),
        }
    }

    #[rstest]
    fn accepts_a_forward_window() {
        let day = window(TimeOfDay::at(9, 0), TimeOfDay::at(18, 0));
        assert!(day.validate().is_ok());
        assert_eq!(day.window_minutes(), 540);
    }

    #[rstest]
    #[case(TimeOfDay::at(18, 0), TimeOfDay::at(9, 0))]
    #[case(TimeOfDay::at(9, 0), TimeOfDay::at(9, 0))]
    fn rejects_inverted_or_empty_windows(#[case] start: TimeOfDay, #[case] end: TimeOfDay) {
        let err = window(start, end).validate().unwrap_err();
        assert_eq!(err, DayConstraintError::WindowInverted { start, end });
    }

    #[rstest]
    fn day_transport_overrides_trip_mode() {
        let mut day = window(TimeOfDay::at(9, 0), TimeOfDay::at(18, 0));
        assert_eq!(
            day.effective_transport(TransportMode::Auto),
            TransportMode::Auto
        );
        day.transport = Some(TransportMode::Metro);
        assert_eq!(
            day.effective_transport(TransportMode::Auto),
            TransportMode::Metro
        );
    }
}

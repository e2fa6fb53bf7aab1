//! Trip-level cost aggregation.

use crate::schedule::DaySchedule;

/// Round to two decimal places for currency display.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Roll-up of every day's spend against the trip budget.
///
/// `within_budget` and `budget_remaining` are computed from the unrounded
/// grand total so a day sitting exactly on the cap never trips a warning
/// through rounding.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostSummary {
    /// Sum of every day's total, rounded to currency precision.
    pub grand_total: f64,
    /// Trip-level budget the total is measured against.
    pub budget: f64,
    /// Whether the grand total fits inside the budget.
    pub within_budget: bool,
    /// Budget minus grand total; negative when over.
    pub budget_remaining: f64,
    /// Grand total averaged over the day count.
    pub per_day_avg: f64,
    /// Human-readable budget warnings, one per violation.
    pub warnings: Vec<String>,
}

/// Aggregate per-day cost breakdowns into a [`CostSummary`].
///
/// Emits one warning per day whose total exceeds its cap, plus a
/// trip-level warning when the grand total exceeds `trip_budget`.
///
/// # Examples
/// ```
/// use tripsmith_core::{build_cost_summary, DaySchedule};
///
/// let summary = build_cost_summary(&[], 1500.0);
/// assert!(summary.within_budget);
/// assert_eq!(summary.budget_remaining, 1500.0);
/// ```
#[must_use]
pub fn build_cost_summary(days: &[DaySchedule], trip_budget: f64) -> CostSummary {
    let mut warnings = Vec::new();
    let mut grand = 0.0_f64;

    for (index, day) in days.iter().enumerate() {
        let total = day.cost.total;
        grand += total;
        if let Some(cap) = day.budget_cap
            && total > cap
        {
            warnings.push(format!(
                "Day {} exceeds day cap by \u{20b9}{:.0}",
                index + 1,
                total - cap
            ));
        }
    }

    let within_budget = grand <= trip_budget;
    if !within_budget {
        warnings.push(format!(
            "Total \u{20b9}{grand:.0} exceeds budget \u{20b9}{trip_budget:.0} by \u{20b9}{:.0}",
            grand - trip_budget
        ));
    }

    #[allow(clippy::cast_precision_loss)]
    let day_count = days.len().max(1) as f64;

    CostSummary {
        grand_total: round2(grand),
        budget: trip_budget,
        within_budget,
        budget_remaining: round2(trip_budget - grand),
        per_day_avg: round2(grand / day_count),
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::CostBreakdown;
    use rstest::rstest;

    fn day(total: f64, cap: Option<f64>) -> DaySchedule {
        DaySchedule {
            slots: Vec::new(),
            total_minutes_used: 0,
            free_minutes: 0,
            cost: CostBreakdown {
                entry: 0.0,
                transport: 0.0,
                extras: 0.0,
                return_transport: 0.0,
                total,
            },
            budget_cap: cap,
            budget_warning: None,
        }
    }

    #[rstest]
    fn sums_day_totals_and_stays_within_budget() {
        let summary = build_cost_summary(&[day(400.0, None), day(350.5, None)], 1500.0);
        assert_eq!(summary.grand_total, 750.5);
        assert!(summary.within_budget);
        assert_eq!(summary.budget_remaining, 749.5);
        assert_eq!(summary.per_day_avg, 375.25);
        assert!(summary.warnings.is_empty());
    }

    #[rstest]
    fn flags_day_cap_overage() {
        let summary = build_cost_summary(&[day(950.0, Some(800.0))], 5000.0);
        assert_eq!(
            summary.warnings,
            vec!["Day 1 exceeds day cap by \u{20b9}150".to_string()],
        );
        assert!(summary.within_budget);
    }

    #[rstest]
    fn flags_trip_budget_overage() {
        let summary = build_cost_summary(&[day(900.0, None), day(800.0, None)], 1500.0);
        assert!(!summary.within_budget);
        assert_eq!(summary.budget_remaining, -200.0);
        assert_eq!(
            summary.warnings,
            vec!["Total \u{20b9}1700 exceeds budget \u{20b9}1500 by \u{20b9}200".to_string()],
        );
    }

    #[rstest]
    fn exact_budget_is_within_budget() {
        let summary = build_cost_summary(&[day(750.0, Some(750.0)), day(750.0, None)], 1500.0);
        assert!(summary.within_budget);
        assert_eq!(summary.budget_remaining, 0.0);
        assert!(summary.warnings.is_empty());
    }

    #[rstest]
    fn empty_trip_averages_over_one_day() {
        let summary = build_cost_summary(&[], 800.0);
        assert_eq!(summary.grand_total, 0.0);
        assert_eq!(summary.per_day_avg, 0.0);
        assert!(summary.within_budget);
    }
}

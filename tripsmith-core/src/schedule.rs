//! Walks an ordered POI pool into concrete time slots for one day.
//!
//! Travel legs are costed from haversine distance and the transport
//! mode's speed and fare tables rather than the routing matrix; the
//! matrix only drives visiting order. The walk carries an explicit
//! accumulator so arrival arithmetic, spend totals, and the stop
//! condition live in one place.

use geo::Coord;

use crate::constraint::{DayConstraint, DayConstraintError};
use crate::cost::round2;
use crate::poi::{Poi, PoiId};
use crate::route::order_route_greedy;
use crate::time::TimeOfDay;
use crate::transport::{activity_surcharges, transport_cost, travel_minutes, TransportMode};
use crate::travel::{haversine_km, MatrixSource, RoutingProvider};

/// Visit length assumed when the catalog does not record one.
pub const DEFAULT_VISIT_MINUTES: u32 = 60;

/// One scheduled visit. Immutable once emitted.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSlot {
    /// The visited POI.
    pub poi_id: PoiId,
    /// Display name copied from the catalog record.
    pub name: String,
    /// Category copied from the catalog record.
    pub category: String,
    /// Address copied from the catalog record.
    pub address: String,
    /// Suggested visiting periods copied from the catalog record.
    pub best_time: Vec<String>,
    /// When the visit begins.
    pub arrival: TimeOfDay,
    /// When the visit ends.
    pub departure: TimeOfDay,
    /// Travel time from the previous position, in minutes.
    pub travel_minutes: u32,
    /// Travel distance from the previous position, in kilometres.
    pub travel_km: f64,
    /// Fare for the leg into this stop.
    pub travel_cost: f64,
    /// Entry fee, zero when the catalog records none.
    pub entry_fee: f64,
    /// Fixed surcharges for the stop's activities.
    pub activity_cost: f64,
    /// Entry fee plus travel fare plus activity surcharges.
    pub slot_cost: f64,
}

/// Per-day spend, split by kind.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostBreakdown {
    /// Sum of entry fees.
    pub entry: f64,
    /// Sum of leg fares, return leg included.
    pub transport: f64,
    /// Sum of activity surcharges.
    pub extras: f64,
    /// The return leg's fare, broken out for visibility.
    pub return_transport: f64,
    /// Entry plus transport plus extras.
    pub total: f64,
}

/// One day's scheduled visits and costs.
///
/// Invariant: slot departures are non-decreasing and none exceeds the
/// day's end time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DaySchedule {
    /// Visits in order.
    pub slots: Vec<TimeSlot>,
    /// Minutes spent travelling and visiting, return leg included.
    pub total_minutes_used: u32,
    /// Window minutes left over, clamped at zero.
    pub free_minutes: u32,
    /// Spend breakdown for the day.
    pub cost: CostBreakdown,
    /// Spending cap the day was scheduled under, if any.
    pub budget_cap: Option<f64>,
    /// Set when the day's total exceeds its cap.
    pub budget_warning: Option<String>,
}

impl DaySchedule {
    /// Ids of every POI scheduled on this day.
    pub fn poi_ids(&self) -> impl Iterator<Item = &PoiId> {
        self.slots.iter().map(|slot| &slot.poi_id)
    }
}

/// Running state of the scheduling walk.
struct WalkState {
    clock: u32,
    position: Coord<f64>,
    slots: Vec<TimeSlot>,
    entry: f64,
    transport: f64,
    extras: f64,
}

impl WalkState {
    fn new(start: TimeOfDay, origin: Coord<f64>) -> Self {
        Self {
            clock: u32::from(start.minutes()),
            position: origin,
            slots: Vec::new(),
            entry: 0.0,
            transport: 0.0,
            extras: 0.0,
        }
    }

    /// Try to schedule `poi` next; `false` means the day is out of time.
    fn visit(&mut self, poi: &Poi, mode: TransportMode, day_end: u32) -> bool {
        let km = haversine_km(self.position, poi.location);
        let leg_minutes = travel_minutes(km, mode);
        let leg_cost = transport_cost(km, mode);
        let arrival = self.clock + leg_minutes;
        let departure = arrival + poi.visit_minutes.unwrap_or(DEFAULT_VISIT_MINUTES);
        if departure > day_end {
            return false;
        }

        let entry_fee = poi.entry_fee.unwrap_or(0.0);
        let activity_cost = activity_surcharges(&poi.activities);
        self.entry += entry_fee;
        self.transport += leg_cost;
        self.extras += activity_cost;
        self.slots.push(TimeSlot {
            poi_id: poi.id.clone(),
            name: poi.name.clone(),
            category: poi.category.clone(),
            address: poi.address.clone(),
            best_time: poi.best_time.clone(),
            arrival: TimeOfDay::from_minutes_clamped(arrival),
            departure: TimeOfDay::from_minutes_clamped(departure),
            travel_minutes: leg_minutes,
            travel_km: km,
            travel_cost: leg_cost,
            entry_fee,
            activity_cost,
            slot_cost: round2(entry_fee + leg_cost + activity_cost),
        });
        self.clock = departure;
        self.position = poi.location;
        true
    }

    /// Cost and time the leg back to the origin. No slot is emitted.
    fn return_leg(&mut self, origin: Coord<f64>, mode: TransportMode) -> f64 {
        if self.slots.is_empty() {
            return 0.0;
        }
        let km = haversine_km(self.position, origin);
        let cost = transport_cost(km, mode);
        self.transport += cost;
        self.clock += travel_minutes(km, mode);
        cost
    }
}

/// Schedule one day from a ranked candidate pool.
///
/// Takes the top-ranked candidates up to the pace's stop cap, orders
/// them greedily from the origin, then walks the ordered sequence from
/// the day's start time. A candidate whose departure would overrun the
/// day end stops the walk; it is dropped, not deferred.
///
/// # Errors
/// Returns [`DayConstraintError::WindowInverted`] when the constraint's
/// window cannot be scheduled.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use tripsmith_core::{
///     schedule_day, DayConstraint, Pace, Poi, TimeOfDay, TransportMode,
/// };
///
/// let origin = Coord { x: 80.2707, y: 13.0827 };
/// let day = DayConstraint {
///     start: TimeOfDay::at(9, 0),
///     end: TimeOfDay::at(18, 0),
///     pace: Pace::Relaxed,
///     transport: None,
///     budget_cap: None,
///     fixed_pois: Vec::new(),
///     excluded_pois: Vec::new(),
/// };
/// let beach = Poi::new("beach", "Marina Beach", Coord { x: 80.2824, y: 13.0487 }, "beach");
/// let schedule = schedule_day(vec![beach], &day, TransportMode::Auto, origin, None)?;
/// assert_eq!(schedule.slots.len(), 1);
/// # Ok::<(), tripsmith_core::DayConstraintError>(())
/// ```
pub fn schedule_day(
    pool: Vec<Poi>,
    constraint: &DayConstraint,
    trip_mode: TransportMode,
    origin: Coord<f64>,
    provider: Option<&dyn RoutingProvider>,
) -> Result<DaySchedule, DayConstraintError> {
    let (schedule, _) = schedule_day_routed(pool, constraint, trip_mode, origin, provider)?;
    Ok(schedule)
}

/// As [`schedule_day`], also reporting which path produced the travel
/// matrix that ordered the stops.
pub fn schedule_day_routed(
    pool: Vec<Poi>,
    constraint: &DayConstraint,
    trip_mode: TransportMode,
    origin: Coord<f64>,
    provider: Option<&dyn RoutingProvider>,
) -> Result<(DaySchedule, MatrixSource), DayConstraintError> {
    constraint.validate()?;
    let mode = constraint.effective_transport(trip_mode);
    let (_, stop_cap) = constraint.pace.stop_range();
    let stop_cap = usize::from(stop_cap);

    // Only the top-ranked candidates up to the pace cap are routed.
    // Ordering a wider pool would let low-ranked stops near the origin
    // displace higher-ranked ones.
    let mut routing_pool = pool;
    routing_pool.truncate(stop_cap);
    let ordered = order_route_greedy(routing_pool, origin, mode, provider);

    let day_end = u32::from(constraint.end.minutes());
    let mut walk = WalkState::new(constraint.start, origin);
    for poi in &ordered.pois {
        if !walk.visit(poi, mode, day_end) {
            break;
        }
    }
    let return_cost = walk.return_leg(origin, mode);

    let used = walk
        .clock
        .saturating_sub(u32::from(constraint.start.minutes()));
    let total = round2(walk.entry + walk.transport + walk.extras);
    let budget_warning = constraint.budget_cap.and_then(|cap| {
        (total > cap)
            .then(|| format!("Day cost \u{20b9}{total:.0} exceeds cap \u{20b9}{cap:.0}"))
    });

    Ok((
        DaySchedule {
            slots: walk.slots,
            total_minutes_used: used,
            free_minutes: constraint.window_minutes().saturating_sub(used),
            cost: CostBreakdown {
                entry: round2(walk.entry),
                transport: round2(walk.transport),
                extras: round2(walk.extras),
                return_transport: return_cost,
                total,
            },
            budget_cap: constraint.budget_cap,
            budget_warning,
        },
        ordered.matrix_source,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Pace;
    use crate::travel::{FallbackReason, MatrixError, RouteMetrics};
    use rstest::{fixture, rstest};

    struct UniformProvider;

    impl RoutingProvider for UniformProvider {
        fn duration_matrix(
            &self,
            coords: &[Coord<f64>],
            _mode: TransportMode,
        ) -> Result<Vec<Vec<f64>>, MatrixError> {
            Ok(vec![vec![7.0; coords.len()]; coords.len()])
        }

        fn route_metrics(
            &self,
            _coords: &[Coord<f64>],
            _mode: TransportMode,
        ) -> Result<RouteMetrics, MatrixError> {
            Ok(RouteMetrics {
                distance_km: 2.0,
                duration_mins: 7.0,
            })
        }
    }

    const ORIGIN: Coord<f64> = Coord {
        x: 80.2707,
        y: 13.0827,
    };

    #[fixture]
    fn day() -> DayConstraint {
        DayConstraint {
            start: TimeOfDay::at(9, 0),
            end: TimeOfDay::at(18, 0),
            pace: Pace::Normal,
            transport: None,
            budget_cap: None,
            fixed_pois: Vec::new(),
            excluded_pois: Vec::new(),
        }
    }

    fn poi(id: &str, x: f64, y: f64) -> Poi {
        Poi::new(id, id, Coord { x, y }, "attraction")
    }

    #[rstest]
    fn inverted_window_is_an_error(mut day: DayConstraint) {
        day.end = TimeOfDay::at(8, 0);
        let err = schedule_day(Vec::new(), &day, TransportMode::Auto, ORIGIN, None).unwrap_err();
        assert!(matches!(err, DayConstraintError::WindowInverted { .. }));
    }

    #[rstest]
    fn empty_pool_yields_an_idle_day(day: DayConstraint) {
        let schedule = schedule_day(Vec::new(), &day, TransportMode::Auto, ORIGIN, None).unwrap();
        assert!(schedule.slots.is_empty());
        assert_eq!(schedule.total_minutes_used, 0);
        assert_eq!(schedule.free_minutes, 540);
        assert_eq!(schedule.cost.total, 0.0);
    }

    #[rstest]
    fn departures_never_exceed_the_day_end(day: DayConstraint) {
        let pool: Vec<Poi> = (0..6)
            .map(|i| {
                let offset = f64::from(i) * 0.01;
                poi(&format!("poi-{i}"), 80.28 + offset, 13.05 + offset).with_visit_minutes(150)
            })
            .collect();
        let schedule = schedule_day(pool, &day, TransportMode::Auto, ORIGIN, None).unwrap();
        assert!(!schedule.slots.is_empty());
        let end = TimeOfDay::at(18, 0);
        let mut previous = TimeOfDay::at(0, 0);
        for slot in &schedule.slots {
            assert!(slot.departure <= end);
            assert!(slot.arrival >= previous);
            previous = slot.arrival;
        }
    }

    #[rstest]
    fn short_window_fits_one_visit_with_free_time(mut day: DayConstraint) {
        // Zero-distance legs floor at five minutes each way, so a
        // 90-minute visit in a two-hour window leaves 20 free minutes.
        day.start = TimeOfDay::at(9, 0);
        day.end = TimeOfDay::at(11, 0);
        let pool = vec![poi("spot", ORIGIN.x, ORIGIN.y).with_visit_minutes(90)];
        let schedule = schedule_day(pool, &day, TransportMode::Auto, ORIGIN, None).unwrap();
        assert_eq!(schedule.slots.len(), 1);
        assert_eq!(schedule.slots[0].arrival, TimeOfDay::at(9, 5));
        assert_eq!(schedule.slots[0].departure, TimeOfDay::at(10, 35));
        assert_eq!(schedule.total_minutes_used, 100);
        assert_eq!(schedule.free_minutes, 20);
    }

    #[rstest]
    fn pace_caps_the_stop_count(mut day: DayConstraint) {
        day.pace = Pace::Relaxed;
        let pool: Vec<Poi> = (0..8)
            .map(|i| {
                let offset = f64::from(i) * 0.005;
                poi(&format!("poi-{i}"), 80.28 + offset, 13.05 + offset).with_visit_minutes(30)
            })
            .collect();
        let schedule = schedule_day(pool, &day, TransportMode::Auto, ORIGIN, None).unwrap();
        assert!(schedule.slots.len() <= 3);
    }

    #[rstest]
    fn top_ranked_stops_are_never_displaced_by_nearer_ones(mut day: DayConstraint) {
        // Three highly ranked stops sit ~11 km out; three low-ranked
        // ones sit on the doorstep. The pace cap must fall on ranking,
        // not proximity.
        day.pace = Pace::Relaxed;
        let mut pool: Vec<Poi> = (0..3)
            .map(|i| {
                poi(
                    &format!("ranked-{i}"),
                    ORIGIN.x + 0.1,
                    ORIGIN.y + 0.02 * f64::from(i),
                )
                .with_visit_minutes(45)
            })
            .collect();
        pool.extend((0..3).map(|i| {
            poi(
                &format!("nearby-{i}"),
                ORIGIN.x + 0.002,
                ORIGIN.y + 0.002 * f64::from(i),
            )
            .with_visit_minutes(45)
        }));
        let schedule = schedule_day(pool, &day, TransportMode::Auto, ORIGIN, None).unwrap();
        assert_eq!(schedule.slots.len(), 3);
        for slot in &schedule.slots {
            assert!(
                slot.name.starts_with("ranked-"),
                "unexpected stop {}",
                slot.name
            );
        }
    }

    #[rstest]
    fn reports_which_path_ordered_the_stops(day: DayConstraint) {
        let pool = vec![poi("fort", 80.2875, 13.0796), poi("beach", 80.2824, 13.0487)];
        let (_, source) =
            schedule_day_routed(pool.clone(), &day, TransportMode::Auto, ORIGIN, None).unwrap();
        assert_eq!(source, MatrixSource::GreatCircle(FallbackReason::NoProvider));

        let provider = UniformProvider;
        let (routed, source) =
            schedule_day_routed(pool, &day, TransportMode::Auto, ORIGIN, Some(&provider)).unwrap();
        assert_eq!(source, MatrixSource::Service);
        assert_eq!(routed.slots.len(), 2);
    }

    #[rstest]
    fn return_leg_costs_without_a_slot(mut day: DayConstraint) {
        day.end = TimeOfDay::at(20, 0);
        let pool = vec![poi("beach", 80.2824, 13.0487).with_visit_minutes(60)];
        let schedule = schedule_day(pool, &day, TransportMode::Auto, ORIGIN, None).unwrap();
        assert_eq!(schedule.slots.len(), 1);
        assert!(schedule.cost.return_transport > 0.0);
        // Both legs cover the same ground, so transport is twice the
        // return fare.
        let expected = round2(schedule.slots[0].travel_cost + schedule.cost.return_transport);
        assert_eq!(round2(schedule.cost.transport), expected);
        assert!(schedule.total_minutes_used > 60);
    }

    #[rstest]
    fn costs_sum_into_the_breakdown(mut day: DayConstraint) {
        day.end = TimeOfDay::at(22, 0);
        let pool = vec![
            poi("fort", 80.2875, 13.0796)
                .with_visit_minutes(60)
                .with_entry_fee(15.0),
            poi("zoo", 80.0807, 12.8791)
                .with_visit_minutes(120)
                .with_entry_fee(100.0)
                .with_activities(["lion_safari"]),
        ];
        let schedule = schedule_day(pool, &day, TransportMode::Cab, ORIGIN, None).unwrap();
        assert_eq!(schedule.slots.len(), 2);
        assert_eq!(schedule.cost.entry, 115.0);
        assert_eq!(schedule.cost.extras, 300.0);
        let total = round2(schedule.cost.entry + schedule.cost.transport + schedule.cost.extras);
        assert_eq!(schedule.cost.total, total);
    }

    #[rstest]
    fn overspent_day_carries_a_warning(mut day: DayConstraint) {
        day.budget_cap = Some(50.0);
        let pool = vec![poi("museum", 80.25, 13.07)
            .with_visit_minutes(60)
            .with_entry_fee(500.0)];
        let schedule = schedule_day(pool, &day, TransportMode::Auto, ORIGIN, None).unwrap();
        let warning = schedule.budget_warning.expect("warning");
        assert!(warning.contains("exceeds cap"));
    }

    #[rstest]
    fn day_transport_override_changes_fares(mut day: DayConstraint) {
        let pool = vec![poi("beach", 80.2824, 13.0487).with_visit_minutes(60)];
        let by_auto =
            schedule_day(pool.clone(), &day, TransportMode::Auto, ORIGIN, None).unwrap();
        day.transport = Some(TransportMode::Bus);
        let by_bus = schedule_day(pool, &day, TransportMode::Auto, ORIGIN, None).unwrap();
        assert!(by_bus.cost.transport < by_auto.cost.transport);
    }

    #[rstest]
    fn scheduling_is_idempotent(day: DayConstraint) {
        let pool: Vec<Poi> = (0..4)
            .map(|i| {
                let offset = f64::from(i) * 0.01;
                poi(&format!("poi-{i}"), 80.28 + offset, 13.05 + offset).with_visit_minutes(45)
            })
            .collect();
        let first = schedule_day(pool.clone(), &day, TransportMode::Auto, ORIGIN, None).unwrap();
        let second = schedule_day(pool, &day, TransportMode::Auto, ORIGIN, None).unwrap();
        assert_eq!(first, second);
    }
}

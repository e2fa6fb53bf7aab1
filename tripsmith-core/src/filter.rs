//! Hard eligibility filters and soft tag-relevance ranking.
//!
//! The catalog is only asked for a category match; every other filter
//! runs here so the catalog backend never needs multi-field indexes.
//! Filters fail open on missing data: a POI without a fee, rating, or
//! parseable opening hours is kept rather than discarded.

use std::collections::HashSet;

use crate::config::PlanConfig;
use crate::poi::{Poi, PoiId};

/// A candidate with its computed tag-relevance score.
#[derive(Debug, Clone)]
struct Scored {
    poi: Poi,
    tag_score: usize,
}

/// Filter and rank catalog candidates for one day.
///
/// Hard filters, in order: exclusion set, entry-fee ceiling, minimum
/// rating, wheelchair access (when required), opening-hours overlap with
/// the day window. Survivors are scored by how many configuration tags
/// they carry; zero-score candidates are held back as a fallback pool
/// and promoted only when nothing scores (category match still counts
/// for something). The result is sorted by tag score, then popularity,
/// then rating, all descending, with ties keeping discovery order.
///
/// # Examples
/// ```
/// use std::collections::HashSet;
/// use geo::Coord;
/// use tripsmith_core::{rank_candidates, resolve_config, BudgetTier, Poi, PlanOverrides};
///
/// let config = resolve_config("pkg-heritage", BudgetTier::Economy, &PlanOverrides::default());
/// let fort = Poi::new("fort", "Fort St. George", Coord { x: 80.287, y: 13.080 }, "heritage")
///     .with_tags(["fort", "colonial"]);
/// let ranked = rank_candidates(vec![fort], &config, &HashSet::new());
/// assert_eq!(ranked.len(), 1);
/// ```
#[must_use]
pub fn rank_candidates(
    candidates: Vec<Poi>,
    config: &PlanConfig,
    excluded: &HashSet<PoiId>,
) -> Vec<Poi> {
    let mut primary = Vec::new();
    let mut fallback = Vec::new();

    for poi in candidates {
        if !passes_hard_filters(&poi, config, excluded) {
            continue;
        }
        let tag_score = tag_score(&poi, config);
        let scored = Scored { poi, tag_score };
        if tag_score > 0 || config.tags.is_empty() {
            primary.push(scored);
        } else {
            fallback.push(scored);
        }
    }

    let mut pool = if primary.is_empty() { fallback } else { primary };
    pool.sort_by(|a, b| {
        b.tag_score
            .cmp(&a.tag_score)
            .then_with(|| popularity(&b.poi).total_cmp(&popularity(&a.poi)))
            .then_with(|| rating(&b.poi).total_cmp(&rating(&a.poi)))
    });
    pool.into_iter().map(|scored| scored.poi).collect()
}

fn passes_hard_filters(poi: &Poi, config: &PlanConfig, excluded: &HashSet<PoiId>) -> bool {
    if excluded.contains(&poi.id) {
        return false;
    }
    // Missing fee or rating passes: incomplete catalog rows stay eligible.
    if poi.entry_fee.is_some_and(|fee| fee > config.max_entry_fee) {
        return false;
    }
    if poi
        .rating
        .is_some_and(|rating| rating < config.min_rating)
    {
        return false;
    }
    if config.wheelchair_only && !poi.wheelchair_accessible {
        return false;
    }
    poi.opening_hours
        .overlaps(config.start_time, config.end_time)
}

fn tag_score(poi: &Poi, config: &PlanConfig) -> usize {
    config
        .tags
        .iter()
        .filter(|tag| poi.tags.iter().any(|own| own == *tag))
        .count()
}

fn popularity(poi: &Poi) -> f32 {
    poi.popularity.unwrap_or(0.0)
}

fn rating(poi: &Poi) -> f32 {
    poi.rating.unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{resolve_config, BudgetTier, PlanOverrides};
    use crate::poi::OpeningHours;
    use crate::time::TimeOfDay;
    use geo::Coord;
    use rstest::{fixture, rstest};

    #[fixture]
    fn config() -> PlanConfig {
        resolve_config("pkg-heritage", BudgetTier::Economy, &PlanOverrides::default())
    }

    fn heritage(id: &str) -> Poi {
        Poi::new(id, id, Coord { x: 80.28, y: 13.08 }, "heritage")
    }

    #[rstest]
    fn keeps_candidates_with_missing_fee_and_rating(config: PlanConfig) {
        let ranked = rank_candidates(vec![heritage("bare")], &config, &HashSet::new());
        assert_eq!(ranked.len(), 1);
    }

    #[rstest]
    fn drops_candidates_over_the_fee_ceiling(config: PlanConfig) {
        let pricey = heritage("pricey").with_entry_fee(5000.0);
        let ranked = rank_candidates(vec![pricey], &config, &HashSet::new());
        assert!(ranked.is_empty());
    }

    #[rstest]
    fn zero_fee_ceiling_is_enforced_not_ignored() {
        let overrides = PlanOverrides {
            max_entry_fee: Some(0.0),
            ..PlanOverrides::default()
        };
        let config = resolve_config("pkg-heritage", BudgetTier::Economy, &overrides);
        let paid = heritage("paid").with_entry_fee(10.0);
        let free = heritage("free").with_entry_fee(0.0);
        let ranked = rank_candidates(vec![paid, free], &config, &HashSet::new());
        let ids: Vec<&str> = ranked.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["free"]);
    }

    #[rstest]
    fn drops_low_rated_candidates(config: PlanConfig) {
        let dud = heritage("dud").with_rating(3.1);
        let ranked = rank_candidates(vec![dud], &config, &HashSet::new());
        assert!(ranked.is_empty());
    }

    #[rstest]
    fn respects_the_exclusion_set(config: PlanConfig) {
        let excluded: HashSet<PoiId> = [PoiId::new("seen")].into_iter().collect();
        let ranked = rank_candidates(vec![heritage("seen")], &config, &excluded);
        assert!(ranked.is_empty());
    }

    #[rstest]
    fn wheelchair_requirement_filters_inaccessible_stops() {
        let overrides = PlanOverrides {
            wheelchair_only: Some(true),
            ..PlanOverrides::default()
        };
        let config = resolve_config("pkg-heritage", BudgetTier::Economy, &overrides);
        let step_free = heritage("ramped").with_wheelchair_access();
        let stairs = heritage("stairs");
        let ranked = rank_candidates(vec![stairs, step_free], &config, &HashSet::new());
        let ids: Vec<&str> = ranked.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["ramped"]);
    }

    #[rstest]
    fn closed_hours_drop_the_candidate(config: PlanConfig) {
        let night_only = heritage("night").with_opening_hours(OpeningHours::Window {
            opens: TimeOfDay::at(22, 0),
            closes: TimeOfDay::at(23, 30),
        });
        let ranked = rank_candidates(vec![night_only], &config, &HashSet::new());
        assert!(ranked.is_empty());
    }

    #[rstest]
    fn ranks_by_tag_score_then_popularity(config: PlanConfig) {
        let plain = heritage("plain").with_tags(["british"]).with_popularity(0.9);
        let tagged = heritage("tagged").with_tags(["fort", "colonial"]);
        let popular_tagged = heritage("popular")
            .with_tags(["fort", "colonial"])
            .with_popularity(0.8);
        let ranked = rank_candidates(vec![plain, tagged, popular_tagged], &config, &HashSet::new());
        let ids: Vec<&str> = ranked.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["popular", "tagged", "plain"]);
    }

    #[rstest]
    fn zero_tag_matches_promote_the_fallback_pool(config: PlanConfig) {
        let pois: Vec<Poi> = (0..5).map(|i| heritage(&format!("poi-{i}"))).collect();
        let ranked = rank_candidates(pois, &config, &HashSet::new());
        // No candidate carries a configured tag, yet category match keeps
        // all five in play.
        assert_eq!(ranked.len(), 5);
    }

    #[rstest]
    fn ties_keep_discovery_order(config: PlanConfig) {
        let first = heritage("first").with_tags(["fort"]);
        let second = heritage("second").with_tags(["fort"]);
        let ranked = rank_candidates(vec![first, second], &config, &HashSet::new());
        let ids: Vec<&str> = ranked.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["first", "second"]);
    }
}

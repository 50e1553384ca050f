//! Personal-best and yearly-distance aggregation over a batch of activities.

use std::collections::BTreeMap;

use strava_client::Activity;

use crate::normalize::normalize;
use crate::targets::TargetDistance;

/// Only activities of this type contribute to personal bests.
pub const RUN_TYPE: &str = "Run";

/// Best normalized time for one target, with the date it was set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PersonalBest {
    pub best_seconds: Option<f64>,
    pub achieved_on: Option<String>,
}

impl PersonalBest {
    /// Replace the current record if `seconds` is strictly faster.
    ///
    /// Equal times keep the earlier record, so on exact ties the first
    /// activity offered wins.
    pub fn offer(&mut self, seconds: f64, date: Option<&str>) -> bool {
        let faster = match self.best_seconds {
            None => true,
            Some(best) => seconds < best,
        };
        if faster {
            self.best_seconds = Some(seconds);
            self.achieved_on = date.map(str::to_owned);
        }
        faster
    }

    pub fn is_set(&self) -> bool {
        self.best_seconds.is_some()
    }
}

pub type PersonalBests = BTreeMap<TargetDistance, PersonalBest>;

/// Everything the statistics section is rendered from.
#[derive(Clone, Debug, PartialEq)]
pub struct RunStats {
    pub personal_bests: PersonalBests,
    pub year: i32,
    pub year_total_distance_m: f64,
}

impl RunStats {
    pub fn year_total_distance_km(&self) -> f64 {
        self.year_total_distance_m / 1000.0
    }

    /// Record for `target`, or an empty one when it was not requested.
    pub fn personal_best(&self, target: TargetDistance) -> PersonalBest {
        self.personal_bests.get(&target).cloned().unwrap_or_default()
    }
}

/// Compute per-target personal bests and the distance covered in `year`.
///
/// The input order matters only for which date is kept on an exact tie.
pub fn aggregate(activities: &[Activity], targets: &[TargetDistance], year: i32) -> RunStats {
    let mut personal_bests: PersonalBests = targets
        .iter()
        .map(|t| (*t, PersonalBest::default()))
        .collect();
    let mut year_total_distance_m = 0.0;
    let year_prefix = year.to_string();

    for activity in activities {
        if started_in_year(activity, &year_prefix) {
            year_total_distance_m += activity.distance.filter(|d| d.is_finite()).unwrap_or(0.0);
        }

        let Some(distance) = run_distance(activity) else {
            continue;
        };
        let date = activity
            .start_date_local
            .as_deref()
            .or(activity.start_date.as_deref());

        for (target, best) in personal_bests.iter_mut() {
            if !target.is_covered_by(distance) {
                continue;
            }
            let Some(seconds) = normalize(activity.elapsed_time, distance, target.meters()) else {
                tracing::debug!(activity = ?activity.id, %target, "no usable elapsed time");
                continue;
            };
            if best.offer(seconds, date) {
                tracing::trace!(activity = ?activity.id, %target, seconds, "new best");
            }
        }
    }

    RunStats {
        personal_bests,
        year,
        year_total_distance_m,
    }
}

/// Distance of a run eligible for personal bests; anything else yields `None`.
fn run_distance(activity: &Activity) -> Option<f64> {
    match (activity.activity_type.as_deref(), activity.distance) {
        (Some(RUN_TYPE), Some(d)) => Some(d),
        (None, _) | (Some(RUN_TYPE), None) => {
            tracing::debug!(activity = ?activity.id, "activity missing type or distance, skipped");
            None
        }
        _ => None,
    }
}

// The UTC start date is what counts toward the yearly total.
fn started_in_year(activity: &Activity, year_prefix: &str) -> bool {
    activity
        .start_date
        .as_deref()
        .is_some_and(|d| d.starts_with(year_prefix))
}

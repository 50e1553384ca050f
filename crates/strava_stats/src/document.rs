//! Rendering of the statistics section and merging it into an existing
//! document.
//!
//! The document is split at the first occurrence of [`STATS_MARKER`].
//! Everything before it is the preserved prefix and is kept as-is apart from
//! trailing whitespace. Everything from the marker onward is regenerated in
//! full on every run.

use std::fmt::Write as _;

use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};

use crate::aggregate::{PersonalBest, RunStats};
use crate::targets::TargetDistance;

pub const STATS_MARKER: &str = "## Strava Statistics";

/// Prefix used when there is no document yet.
pub const DEFAULT_HEADER: &str = "# Strava Running Stats\n\n\
This README is updated automatically with my latest Strava statistics.";

const NOT_AVAILABLE: &str = "N/A";

/// Timestamps in the footer are always shown at UTC+8.
pub const DISPLAY_OFFSET_SECS: i32 = 8 * 3600;

/// Who the statistics belong to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Identity {
    pub username: Option<String>,
}

impl From<&strava_client::AthleteProfile> for Identity {
    fn from(profile: &strava_client::AthleteProfile) -> Self {
        Self {
            username: profile.username.clone(),
        }
    }
}

/// Current time at the display offset.
pub fn beijing_now() -> DateTime<FixedOffset> {
    to_display_offset(Utc::now())
}

pub fn to_display_offset<Tz: TimeZone>(t: DateTime<Tz>) -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(DISPLAY_OFFSET_SECS).unwrap_or_else(|| Utc.fix());
    t.with_timezone(&offset)
}

/// Portion of `existing` that survives regeneration.
pub fn preserved_prefix(existing: Option<&str>) -> String {
    match existing {
        None => DEFAULT_HEADER.to_string(),
        Some(doc) => {
            let before = match doc.find(STATS_MARKER) {
                Some(idx) => &doc[..idx],
                None => doc,
            };
            before.trim_end().to_string()
        }
    }
}

/// `HH:MM:SS`, dropping any fractional second. Hours are not wrapped.
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.trunc() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// `HH:MM:SS (YYYY-MM-DD)`, or `N/A` when there is no record.
pub fn format_pb(pb: &PersonalBest) -> String {
    let Some(seconds) = pb.best_seconds else {
        return NOT_AVAILABLE.to_string();
    };
    let date: String = pb
        .achieved_on
        .as_deref()
        .map(|d| d.chars().take(10).collect())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    format!("{} ({})", format_duration(seconds), date)
}

/// The statistics section, from the marker line to the trailing newline.
pub fn render_section(
    identity: &Identity,
    stats: &RunStats,
    now: DateTime<FixedOffset>,
) -> String {
    let mut out = String::new();
    let username = identity.username.as_deref().unwrap_or(NOT_AVAILABLE);
    // Writing to a String cannot fail.
    let _ = writeln!(out, "{STATS_MARKER}");
    let _ = writeln!(out, "- Username: {username}");
    let _ = writeln!(
        out,
        "- Total Distance ({}): {:.2} km",
        stats.year,
        stats.year_total_distance_km()
    );
    for target in TargetDistance::ALL {
        let pb = stats.personal_best(target);
        let _ = writeln!(out, "- {} PB: {}", target.label(), format_pb(&pb));
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "*Last Updated: {}, UTC+8*",
        now.format("%Y-%m-%d %H:%M:%S")
    );
    out
}

/// Build the full new document: the preserved prefix, one blank line, then a
/// freshly rendered statistics section.
pub fn merge(
    existing: Option<&str>,
    identity: &Identity,
    stats: &RunStats,
    now: DateTime<FixedOffset>,
) -> String {
    let prefix = preserved_prefix(existing);
    let section = render_section(identity, stats, now);
    if prefix.is_empty() {
        return section;
    }
    format!("{prefix}\n\n{section}")
}

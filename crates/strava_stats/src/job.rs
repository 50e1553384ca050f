//! One run of the stats job: fetch, aggregate, merge, write.

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};
use strava_client::StravaClient;

use crate::aggregate::{RunStats, aggregate};
use crate::document::{Identity, merge};
use crate::error::{JobError, JobResult};
use crate::store::DocumentStore;
use crate::targets::TargetDistance;

pub const DEFAULT_DOCUMENT_PATH: &str = "README.md";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobSettings {
    pub document_path: PathBuf,
    /// Render and report, but leave the document alone.
    pub dry_run: bool,
}

impl JobSettings {
    pub fn from_env() -> JobResult<Self> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    pub fn from_env_with<F>(mut get: F) -> JobResult<Self>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let document_path = get("STRAVA_README_PATH")
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DOCUMENT_PATH.to_string());
        let dry_run = match get("STRAVA_DRY_RUN") {
            None => false,
            Some(v) => parse_flag(&v)
                .ok_or_else(|| JobError::Config(format!("STRAVA_DRY_RUN invalid: {v}")))?,
        };
        Ok(Self {
            document_path: PathBuf::from(document_path),
            dry_run,
        })
    }
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Inputs that vary per invocation.
#[derive(Clone, Debug)]
pub struct RunContext {
    pub per_page: u32,
    /// Timestamp shown in the footer.
    pub now: DateTime<FixedOffset>,
    /// Calendar year the distance total is computed for.
    pub year: i32,
    pub dry_run: bool,
}

#[derive(Clone, Debug)]
pub struct JobOutcome {
    pub document: String,
    pub stats: RunStats,
    pub activity_count: usize,
    pub written: bool,
}

/// Fetch the athlete and one page of activities, then rewrite the document.
///
/// The new document is built completely in memory before the store is
/// touched for writing.
pub async fn run(
    feed: &dyn StravaClient,
    store: &dyn DocumentStore,
    ctx: &RunContext,
) -> JobResult<JobOutcome> {
    let athlete = feed.get_athlete().await?;
    let activities = feed.get_activities(ctx.per_page, 1).await?;
    tracing::info!(activities = activities.len(), "fetched activity page");

    let stats = aggregate(&activities, &TargetDistance::ALL, ctx.year);
    for (target, pb) in &stats.personal_bests {
        tracing::debug!(%target, best = ?pb.best_seconds, on = ?pb.achieved_on, "personal best");
    }

    let existing = store.read().await.map_err(|source| JobError::ReadDocument {
        path: store.location(),
        source,
    })?;
    if existing.is_none() {
        tracing::info!(path = %store.location(), "no existing document, starting from default header");
    }

    let document = merge(existing.as_deref(), &Identity::from(&athlete), &stats, ctx.now);

    let written = if ctx.dry_run {
        tracing::info!("dry run, document not written");
        false
    } else {
        store
            .write(&document)
            .await
            .map_err(|source| JobError::WriteDocument {
                path: store.location(),
                source,
            })?;
        true
    };

    Ok(JobOutcome {
        document,
        stats,
        activity_count: activities.len(),
        written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_defaults() {
        let s = JobSettings::from_env_with(|_| None).expect("settings");
        assert_eq!(s.document_path, PathBuf::from("README.md"));
        assert!(!s.dry_run);
    }

    #[test]
    fn settings_read_values() {
        let s = JobSettings::from_env_with(|k| match k {
            "STRAVA_README_PATH" => Some("profile/README.md".into()),
            "STRAVA_DRY_RUN" => Some("TRUE".into()),
            _ => None,
        })
        .expect("settings");
        assert_eq!(s.document_path, PathBuf::from("profile/README.md"));
        assert!(s.dry_run);
    }

    #[test]
    fn settings_reject_bad_flag() {
        let res = JobSettings::from_env_with(|k| (k == "STRAVA_DRY_RUN").then(|| "maybe".into()));
        assert!(matches!(res, Err(JobError::Config(_))));
    }
}

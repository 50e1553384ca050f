//! Error types for the stats job.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum JobError {
    #[error("Strava API error: {0}")]
    Client(#[from] strava_client::StravaError),

    #[error("failed to read {path}: {source}")]
    ReadDocument {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    WriteDocument {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for job operations.
pub type JobResult<T> = Result<T, JobError>;

//! Minimal `StravaClient` trait and a reqwest-based implementation of the
//! athlete and activity endpoints, plus the OAuth token refresh call.

use async_trait::async_trait;
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

pub mod auth;
pub mod config;
pub mod http_client;
pub mod retry;

#[derive(Debug, Error)]
pub enum StravaError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("rate limited: {0}")]
    RateLimited(String),
    #[error("upstream returned status {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl StravaError {
    /// Map a non-success status code and a body snippet to an error.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => StravaError::Auth(body),
            404 => StravaError::NotFound(body),
            429 => StravaError::RateLimited(body),
            _ => StravaError::Upstream { status, body },
        }
    }

    /// Whether another attempt at the same request could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            StravaError::Http(e) => !e.is_decode() && !e.is_builder(),
            StravaError::RateLimited(_) => true,
            StravaError::Upstream { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// The subset of `/athlete` the stats job cares about.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct AthleteProfile {
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub id: Option<String>,
    pub username: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
}

/// One entry of `/athlete/activities`.
///
/// Every field is optional on the wire: the API omits fields for manual or
/// partially synced entries and callers decide what a missing field means.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Activity {
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub activity_type: Option<String>,
    /// Meters.
    pub distance: Option<f64>,
    /// Seconds.
    pub elapsed_time: Option<f64>,
    pub start_date: Option<String>,
    pub start_date_local: Option<String>,
}

/// Access/refresh pair returned by the OAuth token endpoint.
#[derive(Clone, Debug)]
pub struct TokenSet {
    pub access_token: SecretString,
    pub refresh_token: SecretString,
    /// Unix seconds.
    pub expires_at: Option<i64>,
}

impl TokenSet {
    pub fn expires_at_utc(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.expires_at
            .and_then(|ts| chrono::DateTime::<chrono::Utc>::from_timestamp(ts, 0))
    }
}

fn deserialize_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(n.to_string().into()),
        Some(other) => Err(D::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

#[async_trait]
pub trait StravaClient: Send + Sync {
    /// Profile of the authenticated athlete.
    async fn get_athlete(&self) -> Result<AthleteProfile, StravaError>;

    /// One page of the athlete's activities, most recent first.
    async fn get_activities(&self, per_page: u32, page: u32)
    -> Result<Vec<Activity>, StravaError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn activity_numeric_id_becomes_string() {
        let payload = json!({"id": 123456789, "type": "Run", "distance": 5000.0, "elapsed_time": 1200});
        let a: Activity = serde_json::from_value(payload).expect("deserialize activity");
        assert_eq!(a.id.as_deref(), Some("123456789"));
        assert_eq!(a.activity_type.as_deref(), Some("Run"));
        assert_eq!(a.elapsed_time, Some(1200.0));
    }

    #[test]
    fn activity_tolerates_missing_fields() {
        let a: Activity = serde_json::from_value(json!({"name": "Manual entry"})).expect("activity");
        assert!(a.activity_type.is_none());
        assert!(a.distance.is_none());
        assert!(a.elapsed_time.is_none());
    }

    #[test]
    fn activity_invalid_id_type_errors() {
        let res: Result<Activity, _> = serde_json::from_value(json!({"id": {"nested": true}}));
        assert!(res.is_err());
    }

    #[test]
    fn status_mapping() {
        assert!(matches!(StravaError::from_status(401, String::new()), StravaError::Auth(_)));
        assert!(matches!(StravaError::from_status(404, String::new()), StravaError::NotFound(_)));
        assert!(matches!(
            StravaError::from_status(502, "bad gateway".into()),
            StravaError::Upstream { status: 502, .. }
        ));
    }

    #[test]
    fn transient_classification() {
        assert!(StravaError::RateLimited(String::new()).is_transient());
        assert!(StravaError::from_status(503, String::new()).is_transient());
        assert!(!StravaError::from_status(400, String::new()).is_transient());
        assert!(!StravaError::Auth(String::new()).is_transient());
        assert!(!StravaError::Config("x".into()).is_transient());
    }

    #[test]
    fn token_expiry_converts_to_utc() {
        let t = TokenSet {
            access_token: SecretString::new("a".into()),
            refresh_token: SecretString::new("r".into()),
            expires_at: Some(0),
        };
        assert_eq!(t.expires_at_utc().map(|d| d.timestamp()), Some(0));
    }
}

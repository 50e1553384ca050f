//! HTTP client implementation for the Strava v3 API.
//!
//! This module provides a reqwest-based implementation of the [`StravaClient`](crate::StravaClient) trait.

use crate::retry::RetryPolicy;
use crate::{Activity, AthleteProfile, StravaClient, StravaError};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

pub(crate) fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(concat!("strava-stats/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("reqwest client build should not fail")
}

/// Extract error information from a failed response.
pub(crate) async fn error_from_response(resp: reqwest::Response) -> StravaError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    let body_snippet: String = body.chars().take(256).collect();
    StravaError::from_status(status, body_snippet)
}

/// Client for the Strava API using reqwest.
#[derive(Clone, Debug)]
pub struct ReqwestStravaClient {
    base_url: String,
    access_token: SecretString,
    retry: RetryPolicy,
    client: reqwest::Client,
}

impl ReqwestStravaClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `base_url` - API root including the version (e.g., "https://www.strava.com/api/v3")
    /// * `access_token` - Short-lived bearer token from the OAuth refresh
    pub fn new(base_url: &str, access_token: SecretString) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token,
            retry: RetryPolicy::default(),
            client: build_http_client(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Build an authenticated GET request.
    fn get_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .bearer_auth(self.access_token.expose_secret())
    }

    /// GET a JSON document, retrying transient failures.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, StravaError> {
        self.retry
            .retry_async(
                || async move {
                    let resp = self.get_request(url).query(query).send().await?;
                    self.handle_response(resp).await
                },
                StravaError::is_transient,
            )
            .await
    }

    /// Handle a response, converting status codes to appropriate errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, StravaError> {
        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| StravaError::Decode(e.to_string()))
    }
}

#[async_trait]
impl StravaClient for ReqwestStravaClient {
    async fn get_athlete(&self) -> Result<AthleteProfile, StravaError> {
        let url = format!("{}/athlete", self.base_url);
        let profile: AthleteProfile = self.get_json(&url, &[]).await?;
        tracing::debug!(athlete_id = ?profile.id, "fetched athlete profile");
        Ok(profile)
    }

    async fn get_activities(
        &self,
        per_page: u32,
        page: u32,
    ) -> Result<Vec<Activity>, StravaError> {
        let url = format!("{}/athlete/activities", self.base_url);
        let query = [
            ("per_page", per_page.to_string()),
            ("page", page.to_string()),
        ];
        let activities: Vec<Activity> = self.get_json(&url, &query).await?;
        tracing::debug!(count = activities.len(), page, "fetched activities");
        Ok(activities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_new_trims_trailing_slash() {
        let client =
            ReqwestStravaClient::new("http://localhost/api/v3/", SecretString::new("tok".into()));
        assert_eq!(client.base_url, "http://localhost/api/v3");
    }
}

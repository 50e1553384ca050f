//! OAuth refresh-token exchange.

use crate::config::Config;
use crate::http_client::{build_http_client, error_from_response};
use crate::retry::RetryPolicy;
use crate::{StravaError, TokenSet};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Produces a fresh access token for the configured athlete.
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    async fn refresh(&self) -> Result<TokenSet, StravaError>;
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_at: Option<i64>,
}

/// Exchanges the long-lived refresh token for a short-lived access token.
#[derive(Clone, Debug)]
pub struct OAuthTokenRefresher {
    token_url: String,
    client_id: String,
    client_secret: SecretString,
    refresh_token: SecretString,
    retry: RetryPolicy,
    client: reqwest::Client,
}

impl OAuthTokenRefresher {
    pub fn new(config: &Config) -> Self {
        Self {
            token_url: config.oauth_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            refresh_token: config.refresh_token.clone(),
            retry: RetryPolicy::default(),
            client: build_http_client(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    async fn exchange(&self) -> Result<TokenSet, StravaError> {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.expose_secret()),
            ("refresh_token", self.refresh_token.expose_secret()),
            ("grant_type", "refresh_token"),
        ];
        let resp = self.client.post(&self.token_url).form(&params).send().await?;
        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        let body: TokenResponse = resp
            .json()
            .await
            .map_err(|e| StravaError::Decode(format!("token response: {e}")))?;
        Ok(TokenSet {
            access_token: SecretString::new(body.access_token.into()),
            refresh_token: SecretString::new(body.refresh_token.into()),
            expires_at: body.expires_at,
        })
    }
}

#[async_trait]
impl TokenRefresher for OAuthTokenRefresher {
    async fn refresh(&self) -> Result<TokenSet, StravaError> {
        let tokens = self
            .retry
            .retry_async(|| self.exchange(), StravaError::is_transient)
            .await?;
        if tokens.refresh_token.expose_secret() != self.refresh_token.expose_secret() {
            tracing::info!("token endpoint rotated the refresh token; update REFRESH_TOKEN");
        }
        tracing::debug!(expires_at = ?tokens.expires_at_utc(), "access token refreshed");
        Ok(tokens)
    }
}

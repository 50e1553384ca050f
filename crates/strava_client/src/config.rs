use crate::StravaError;
use secrecy::SecretString;

pub const DEFAULT_API_BASE_URL: &str = "https://www.strava.com/api/v3";
pub const DEFAULT_OAUTH_URL: &str = "https://www.strava.com/oauth/token";
/// Largest page the activities endpoint serves.
pub const MAX_PER_PAGE: u32 = 200;

#[derive(Clone, Debug)]
pub struct Config {
    pub client_id: String,
    pub client_secret: SecretString,
    pub refresh_token: SecretString,
    pub api_base_url: String,
    pub oauth_url: String,
    pub per_page: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, StravaError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function, so tests never touch the process environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, StravaError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut required = |key: &str| {
            get(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| StravaError::Config(format!("{key} missing")))
        };
        let client_id = required("CLIENT_ID")?;
        let client_secret = required("CLIENT_SECRET")?;
        let refresh_token = required("REFRESH_TOKEN")?;

        let api_base_url =
            get("STRAVA_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.into());
        let oauth_url = get("STRAVA_OAUTH_URL").unwrap_or_else(|| DEFAULT_OAUTH_URL.into());
        let per_page = match get("STRAVA_PER_PAGE") {
            None => MAX_PER_PAGE,
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| StravaError::Config(format!("STRAVA_PER_PAGE invalid: {raw}")))?
                .clamp(1, MAX_PER_PAGE),
        };

        Ok(Self {
            client_id,
            client_secret: SecretString::new(client_secret.into()),
            refresh_token: SecretString::new(refresh_token.into()),
            api_base_url,
            oauth_url,
            per_page,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn full(k: &str) -> Option<String> {
        match k {
            "CLIENT_ID" => Some("12345".into()),
            "CLIENT_SECRET" => Some("shh".into()),
            "REFRESH_TOKEN" => Some("rt".into()),
            _ => None,
        }
    }

    #[test]
    fn from_env_missing_client_secret() {
        let get = |k: &str| match k {
            "CLIENT_SECRET" => None,
            other => full(other),
        };
        let err = Config::from_env_with(get).unwrap_err();
        assert!(err.to_string().contains("CLIENT_SECRET"));
    }

    #[test]
    fn from_env_blank_value_counts_as_missing() {
        let get = |k: &str| match k {
            "REFRESH_TOKEN" => Some("   ".into()),
            other => full(other),
        };
        assert!(matches!(
            Config::from_env_with(get),
            Err(StravaError::Config(_))
        ));
    }

    #[test]
    fn from_env_reads_values_and_defaults() {
        let cfg = Config::from_env_with(full).expect("cfg");
        assert_eq!(cfg.client_id, "12345");
        assert_eq!(cfg.client_secret.expose_secret(), "shh");
        assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(cfg.oauth_url, DEFAULT_OAUTH_URL);
        assert_eq!(cfg.per_page, 200);
    }

    #[test]
    fn per_page_is_clamped() {
        let get = |k: &str| match k {
            "STRAVA_PER_PAGE" => Some("500".into()),
            other => full(other),
        };
        assert_eq!(Config::from_env_with(get).expect("cfg").per_page, 200);

        let get = |k: &str| match k {
            "STRAVA_PER_PAGE" => Some("many".into()),
            other => full(other),
        };
        assert!(Config::from_env_with(get).is_err());
    }
}

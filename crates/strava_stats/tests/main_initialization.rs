/// Tests for main.rs initialization logic
use strava_client::config::Config;
use strava_stats::job::JobSettings;

#[test]
fn test_combined_filter_format() {
    let log_env = "debug";
    let combined_filter = format!("{},reqwest=warn,hyper=warn,hyper_util=warn", log_env);
    assert!(tracing_subscriber::EnvFilter::try_new(combined_filter).is_ok());
}

#[test]
fn test_env_filter_fallback() {
    let env_filter = tracing_subscriber::EnvFilter::try_new("invalid[[[filter")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,reqwest=warn,hyper=warn"));
    assert!(!format!("{:?}", env_filter).is_empty());
}

#[test]
fn test_missing_credentials_fail_before_any_request() {
    let err = Config::from_env_with(|_| None).unwrap_err();
    assert!(err.to_string().contains("CLIENT_ID"));
}

#[test]
fn test_document_path_default() {
    let settings = JobSettings::from_env_with(|_| None).expect("settings");
    assert_eq!(settings.document_path.to_str(), Some("README.md"));
}

use anyhow::Context;
use chrono::Datelike;
use strava_client::auth::{OAuthTokenRefresher, TokenRefresher};
use strava_client::config::Config;
use strava_client::http_client::ReqwestStravaClient;
use strava_stats::document::beijing_now;
use strava_stats::job::{self, JobSettings, RunContext};
use strava_stats::store::FileStore;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Configure logging from env var `STRAVA_STATS_LOG_LEVEL` (or fallback to `RUST_LOG`, default `info`).
    let log_env = std::env::var("STRAVA_STATS_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());

    // Keep HTTP internals quiet by default
    let combined_filter = format!("{},reqwest=warn,hyper=warn,hyper_util=warn", log_env);
    let env_filter = tracing_subscriber::EnvFilter::try_new(combined_filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,reqwest=warn,hyper=warn"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
    tracing::debug!("strava-stats: log filter: {}", log_env);

    let config = Config::from_env().context("loading Strava credentials")?;
    let settings = JobSettings::from_env()?;

    let tokens = OAuthTokenRefresher::new(&config)
        .refresh()
        .await
        .context("refreshing access token")?;
    let client = ReqwestStravaClient::new(&config.api_base_url, tokens.access_token);
    let store = FileStore::new(&settings.document_path);

    let ctx = RunContext {
        per_page: config.per_page,
        now: beijing_now(),
        year: chrono::Local::now().year(),
        dry_run: settings.dry_run,
    };
    let outcome = job::run(&client, &store, &ctx).await?;

    tracing::info!(
        activities = outcome.activity_count,
        year_km = outcome.stats.year_total_distance_km(),
        "strava-stats: statistics rendered"
    );
    if outcome.written {
        println!("{} updated successfully", store.path().display());
    } else {
        print!("{}", outcome.document);
    }
    Ok(())
}

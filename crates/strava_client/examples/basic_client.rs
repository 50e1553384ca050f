use strava_client::auth::{OAuthTokenRefresher, TokenRefresher};
use strava_client::{StravaClient, config::Config, http_client::ReqwestStravaClient};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Example: expects CLIENT_ID, CLIENT_SECRET and REFRESH_TOKEN in env
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("config error: {}", e);
            return Ok(());
        }
    };
    let tokens = OAuthTokenRefresher::new(&cfg).refresh().await?;
    let client = ReqwestStravaClient::new(&cfg.api_base_url, tokens.access_token);
    let athlete = client.get_athlete().await?;
    let activities = client.get_activities(10, 1).await?;
    println!(
        "Athlete: {} ({}), {} recent activities",
        athlete.username.unwrap_or_default(),
        athlete.id.unwrap_or_default(),
        activities.len()
    );
    for a in activities {
        println!(
            "  {} {} {:.0} m",
            a.start_date_local.unwrap_or_default(),
            a.activity_type.unwrap_or_default(),
            a.distance.unwrap_or_default()
        );
    }
    Ok(())
}

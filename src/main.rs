use github_battle::{
    battle::Scorer, config::AppConfig, gateway::GithubGateway, routes, shared::AppState,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "github_battle=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting GitHub battle server");

    let config = AppConfig::from_env();
    info!(
        api_url = %config.github.api_url,
        authenticated = config.github.token.is_some(),
        "Using GitHub API"
    );

    let gateway = Arc::new(GithubGateway::new(config.github.clone())?);
    let app_state = AppState::from_gateway(gateway, Scorer::with_weights(config.score_weights));

    let app = routes::app(app_state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}

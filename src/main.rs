use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use token_gate::{app_config, build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "token_gate=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // A missing or empty signing secret stops the service here
    let config = app_config::init_config().context("Failed to load configuration")?;
    let state = AppState::from_config(config).context("Failed to initialize token service")?;

    info!(
        environment = %config.server.environment,
        token_expiry = state.jwt_service.token_expiry(),
        "Starting token gate on {}",
        config.server.bind_address
    );

    let listener = tokio::net::TcpListener::bind(&config.server.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_address))?;

    axum::serve(listener, build_router(state)).await?;
    Ok(())
}

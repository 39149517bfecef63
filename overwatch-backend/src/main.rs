use anyhow::Context;
use overfast_client::OverFastClient;
use overwatch_backend::config::Config;
use overwatch_backend::create_app;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing for structured logging
    #[cfg(debug_assertions)]
    let log_level = "debug";
    #[cfg(not(debug_assertions))]
    let log_level = "info";

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_target(false)
        .compact()
        .init();
    tracing::info!("Starting Overwatch API server...");

    // Load configuration from environment variables or use defaults
    let config = Config::from_env();
    tracing::info!(
        "Configuration: listen={}, request_timeout={}s, rate_limit={}/sec (burst {})",
        config.listen_addr(),
        config.request_timeout.as_secs(),
        config.rate_limit_per_sec,
        config.rate_limit_burst
    );
    tracing::info!(
        "Using OverFast API: {} (timeout={}ms, attempts={}, backoff={}..{}ms)",
        config.overwatch_api_url,
        config.overwatch_api_timeout.as_millis(),
        config.overwatch_api_max_attempts,
        config.overwatch_api_backoff_base.as_millis(),
        config.overwatch_api_backoff_max.as_millis()
    );

    let client = OverFastClient::new(config.client_config())
        .context("failed to build OverFast API client")?;
    let app = create_app(client, config.request_timeout, config.rate_limit());

    let addr = config.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("API documentation: http://{}/docs", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("server error")?;

    Ok(())
}

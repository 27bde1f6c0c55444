// Main entry point for the booklog API server

use std::sync::Arc;

use anyhow::{Context, Result};
use booklog_core::common::SessionStore;
use booklog_core::domains::catalog::CatalogService;
use booklog_core::domains::recommend::RecommendService;
use booklog_core::server::{build_app, AppState};
use booklog_core::Config;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,booklog_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting booklog API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    // Provider clients
    let kakao = kakao_client::KakaoClient::new(config.kakao_api_key.clone());
    let natlib = natlib_client::NatLibClient::new(config.natlib_cert_key.clone());
    let aladin = aladin_client::AladinClient::new(config.aladin_ttb_key.clone());
    let openai = config
        .openai_api_key
        .as_deref()
        .map(openai_client::OpenAIClient::new);
    if openai.is_none() {
        tracing::warn!("OPENAI_API_KEY not set; AI recommendations will be empty");
    }

    let state = AppState {
        db_pool: pool.clone(),
        sessions: Arc::new(SessionStore::new()),
        catalog: CatalogService::new(kakao, natlib, aladin),
        recommend: RecommendService::new(openai, pool),
    };

    let app = build_app(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

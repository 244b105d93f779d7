use site_server::{AppState, BoxError, Config};

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "site_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env();

    tracing::info!("Starting site-server (env: {})", config.environment);
    if config.database_url.is_none() {
        tracing::warn!("DATABASE_URL not set: content routes will answer 500");
    }
    if config.s3_bucket.is_none() {
        tracing::warn!("S3_BUCKET not set: image routes will answer 500");
    }
    if config.ai.is_none() {
        tracing::warn!("AI_ACCOUNT_ID/AI_API_TOKEN not set: page text is stored untranslated");
    }

    let state = AppState::new(&config).await?;
    let app = site_server::create_router(state);

    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("site-server HTTP listening on {http_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}

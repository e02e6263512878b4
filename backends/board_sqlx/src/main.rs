use anyhow::Context;
use board::{config::Config, db, routes, AppState};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("board=info,tower_http=info")),
        )
        .init();

    let config = Config::parse();

    let pool = db::connect(&config.database_url, config.max_connections)
        .await
        .with_context(|| format!("failed to open {}", config.database_url))?;
    db::prepare_db(&pool).await.context("failed to apply schema")?;

    let state = AppState::new(pool, config.jwt_secret.as_bytes(), &config.login_url);
    let app = routes::generate_routes(state);

    let listener = tokio::net::TcpListener::bind(&config.listen)
        .await
        .with_context(|| format!("failed to bind {}", config.listen))?;
    tracing::info!(listen = %config.listen, "serving article board");
    axum::serve(listener, app).await?;

    Ok(())
}

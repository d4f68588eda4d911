use std::time::Duration;

use anyhow::Context as _;
use sea_orm::Database;
use tracing::{info, warn};

use eloquia_api::config::ApiConfig;
use eloquia_api::router::build_router;
use eloquia_api::state::AppState;
use eloquia_api_migration::{Migrator, MigratorTrait};
use eloquia_core::config::Config;
use eloquia_core::shutdown::shutdown_signal;
use eloquia_core::tracing::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::from_env().context("failed to load configuration")?;

    if !config.has_cookie_secret() {
        warn!("AUTH_COOKIE_SECRET is not set; using an ephemeral secret, sessions will not survive a restart");
    }
    let auth = config
        .auth_settings()
        .context("invalid auth settings")?;

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    if config.apply_migrations {
        Migrator::up(&db, None)
            .await
            .context("failed to apply migrations")?;
        info!("migrations applied");
    }

    let router = build_router(AppState::new(db.clone(), &auth));
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(environment = config.environment(), "api listening on {addr}");

    let grace = Duration::from_secs(config.shutdown_grace_secs);
    let server = axum::serve(listener, router).with_graceful_shutdown(shutdown_signal());
    let mut server = tokio::spawn(async move { server.await });

    // The grace period starts once the shutdown signal arrives.
    tokio::select! {
        result = &mut server => {
            result.context("server task panicked")?.context("server error")?;
        }
        _ = async {
            shutdown_signal().await;
            tokio::time::sleep(grace).await;
        } => {
            warn!(grace_secs = grace.as_secs(), "in-flight requests did not drain in time");
            server.abort();
        }
    }

    db.close().await.context("failed to close database pool")?;
    info!("api stopped");
    Ok(())
}

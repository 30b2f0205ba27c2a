//! Server binary: logging, config, database, migrations, then serve.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use tarefas_core::config::TarefasConfig;
use tarefas_core::database::{DatabaseConnection, DatabaseMigrations};
use tarefas_core::logging;
use tarefas_core::store::postgres::PostgresStore;
use tarefas_core::store::TaskStore;
use tarefas_core::web::state::AppState;
use tarefas_core::web::create_app;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_structured_logging();

    let config = TarefasConfig::from_env();
    let db = DatabaseConnection::connect(&config.database)
        .await
        .context("connecting to postgres")?;
    DatabaseMigrations::run_all(db.pool())
        .await
        .context("running migrations")?;

    let store: Arc<dyn TaskStore> = Arc::new(PostgresStore::new(db.pool().clone()));
    let app = create_app(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(&config.web.bind_address)
        .await
        .with_context(|| format!("binding {}", config.web.bind_address))?;
    info!(address = %config.web.bind_address, "tarefas backend listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving")?;

    db.close().await;
    info!("connection pool drained");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
    }
}

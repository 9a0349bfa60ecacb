use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use fiftyfifty_cache::{CacheConfig, LruSetCache};
use fiftyfifty_core::Repository;
use fiftyfifty_gateway::cli::{StorageBackendArg, CLI};
use fiftyfifty_gateway::telemetry::init_tracing;
use fiftyfifty_gateway::{App, AppState};
use fiftyfifty_generator::RandomGenerator;
use fiftyfifty_service::{VideoSetService, VideoSets};
use fiftyfifty_storage::{InMemoryRepository, MySqlRepository};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    init_tracing(config.environment);

    info!(
        listen_addr = %config.listen_addr,
        environment = %config.environment,
        storage_backend = %config.storage,
        "starting fiftyfifty gateway"
    );

    let cache: LruSetCache = CacheConfig::builder()
        .max_entries(config.cache_max_entries)
        .max_bytes(config.cache_max_bytes)
        .build()
        .into();

    let sets: Arc<dyn VideoSets> = match config.storage {
        StorageBackendArg::InMemory => {
            warn!("using in-memory storage; sets are lost on restart");
            build_service(InMemoryRepository::new(), cache, &config)
        }
        StorageBackendArg::Mysql => {
            let mysql_dsn = config
                .mysql_dsn
                .as_deref()
                .context("mysql dsn is required when storage backend is mysql")?;
            let repository = MySqlRepository::connect(mysql_dsn, config.table())
                .await
                .context("failed to connect to mysql")?;
            repository
                .ensure_schema()
                .await
                .context("failed to create video set table")?;
            info!(table = %repository.table(), "connected to mysql");
            build_service(repository, cache, &config)
        }
    };

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    let app = App::router(AppState::from_shared(sets));
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

    info!("fiftyfifty gateway shut down");
    Ok(())
}

fn build_service<R: Repository>(
    repository: R,
    cache: LruSetCache,
    config: &CLI,
) -> Arc<dyn VideoSets> {
    Arc::new(
        VideoSetService::new(repository, RandomGenerator, cache)
            .with_store_timeout(config.store_timeout()),
    )
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

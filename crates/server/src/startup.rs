use std::{net::SocketAddr, sync::Arc};

use axum::http::{Method, Response};
use tracing::{info, warn};

use configs::{DatabaseConfig, ServerConfig};
use service::wish::repo::seaorm::SeaOrmWishRepository;
use service::wish::repository::memory::MemoryWishRepository;
use service::WishStore;

use crate::errors::ApiError;
use crate::routes;

/// Where requests are served from.
#[derive(Clone)]
pub enum Backend {
    /// PostgreSQL, with a fresh connection per request (see [`invoke`]).
    Postgres,
    /// Process-local rows, for running without a database.
    Memory(Arc<MemoryWishRepository>),
}

impl Backend {
    pub async fn handle(&self, method: &Method, body: &[u8]) -> Response<String> {
        match self {
            Backend::Postgres => invoke(method, body).await,
            Backend::Memory(repo) => {
                let store = WishStore::new(Arc::clone(repo));
                routes::dispatch(&store, method, body).await
            }
        }
    }
}

/// Serve one gateway request against PostgreSQL.
///
/// Configuration is read and a connection opened for this request only; the
/// connection is closed before returning, whatever the outcome.
pub async fn invoke(method: &Method, body: &[u8]) -> Response<String> {
    invoke_with(|k| std::env::var(k).ok(), method, body).await
}

/// [`invoke`] with the environment supplied by `lookup`.
pub async fn invoke_with(
    lookup: impl Fn(&str) -> Option<String>,
    method: &Method,
    body: &[u8],
) -> Response<String> {
    if !routes::accepts(method) {
        return ApiError::MethodNotAllowed.into();
    }
    let cfg = match DatabaseConfig::from_lookup(lookup) {
        Ok(cfg) => cfg,
        Err(e) => return ApiError::internal(format!("database config: {e}")).into(),
    };
    let db = match models::db::connect(&cfg).await {
        Ok(db) => db,
        Err(e) => return ApiError::internal(format!("database connect: {e}")).into(),
    };

    let store = WishStore::new(Arc::new(SeaOrmWishRepository { db: db.clone() }));
    let resp = routes::dispatch(&store, method, body).await;
    drop(store);

    if let Err(e) = db.close().await {
        warn!(event = "db_close_failed", error = %e, "closing database connection failed");
    }
    resp
}

/// Run the local HTTP server until Ctrl+C.
pub async fn run() -> anyhow::Result<()> {
    let cfg = ServerConfig::load()?;
    let backend = if cfg.in_memory {
        info!(event = "backend", backend = "memory", "serving wishes from process memory");
        Backend::Memory(Arc::new(MemoryWishRepository::default()))
    } else {
        info!(event = "backend", backend = "postgres", "serving wishes from PostgreSQL");
        Backend::Postgres
    };

    let app = routes::build_router(backend);
    let addr: SocketAddr = cfg.bind_addr().parse()?;
    info!(%addr, "starting local wishes server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
        })
        .await?;
    Ok(())
}

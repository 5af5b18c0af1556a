use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};

use listing::{LocalSource, SimpleApiSource, SourceRegistry};

use crate::config::ServerConfig;
use crate::crawl::cache::SessionCache;
use crate::crawl::orchestrator::Orchestrator;
use crate::error::{CrawlError, CrawlResult};

pub mod directory;
pub mod error;
pub mod openapi;
pub mod sources;

pub struct Server {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl Server {
    pub async fn new(config: ServerConfig) -> CrawlResult<Self> {
        let state = Arc::new(ServerState::new(&config)?);
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        let app = Router::new()
            .route("/health", get(health))
            .route("/sources", get(sources::list_sources))
            .route("/directory", post(directory::crawl_directory))
            .route("/openapi.json", get(openapi::openapi_json))
            .with_state(state)
            .layer(cors);

        let listener = TcpListener::bind(&config.listen).await.map_err(|error| {
            CrawlError::Internal(format!("cannot listen on {}: {error}", config.listen))
        })?;
        let addr = listener
            .local_addr()
            .map_err(|error| CrawlError::Internal(error.to_string()))?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        tracing::info!(%addr, "treewalk listening");
        Ok(Server {
            addr,
            shutdown: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn shutdown(&mut self) -> CrawlResult<()> {
        if let Some(sender) = self.shutdown.take() {
            sender
                .send(())
                .map_err(|_| CrawlError::Internal("failed to send server shutdown signal".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}

async fn health() -> &'static str {
    "ok"
}

pub(crate) struct ServerState {
    pub(crate) registry: Arc<SourceRegistry>,
    pub(crate) orchestrator: Orchestrator,
}

impl ServerState {
    pub(crate) fn new(config: &ServerConfig) -> CrawlResult<Self> {
        let mut registry = SourceRegistry::new();
        let local = LocalSource::new(&config.hide_globs, config.preview)
            .map_err(|error| CrawlError::InvalidInput(error.to_string()))?;
        registry.register(Arc::new(local));
        if let Some(base_url) = &config.api_base_url {
            let api = SimpleApiSource::new(base_url, config.api_timeout_seconds)
                .map_err(|error| CrawlError::InvalidInput(error.to_string()))?;
            registry.register(Arc::new(api));
        }

        let registry = Arc::new(registry);
        let cache = SessionCache::new(config.session_ttl_seconds);
        Ok(Self {
            orchestrator: Orchestrator::new(registry.clone(), cache),
            registry,
        })
    }
}

mod boundary;
mod health;
mod state;
mod store;
mod users;

pub use boundary::{ApiFailure, HandlerResult};
pub use store::{User, UserStore};

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use tally_config::Config;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configured cache URL cannot be parsed
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        // Register the cache client before routes are assembled. An
        // unreachable cache is non-fatal; the service runs uncached.
        let cache = match config.cache {
            Some(ref cache_config) => {
                let cache = tally_cache::Cache::new(
                    &cache_config.url,
                    Duration::from_secs(cache_config.ttl_seconds),
                    cache_config.key_prefix.clone(),
                )?;
                match cache.verify().await {
                    Ok(()) => {
                        tracing::info!(url = %cache_config.url, "cache client registered");
                        Some(cache)
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "cache unreachable, continuing without it");
                        None
                    }
                }
            }
            None => None,
        };

        tracing::debug!(
            host = %config.database.host,
            database = %config.database.name,
            "storage connection parameters loaded"
        );

        let state = AppState {
            store: UserStore::default(),
            cache,
        };

        let mut app = Router::new()
            .route("/v1/users", post(users::create_user))
            .route("/v1/users/{email}", get(users::get_user))
            .with_state(state);

        if config.server.health.enabled {
            app = app.route(&config.server.health.path, get(health::health_handler));
        }

        let app = app.layer(TraceLayer::new_for_http());

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}

use std::sync::Arc;

use pizza_catalog::{Catalog, WriteMode};
use pizza_store::JsonFileStore;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::{build_router, build_router_with_cors};

/// Pizza catalog HTTP server.
pub struct PizzaServer {
    config: ServerConfig,
}

impl PizzaServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn write_mode(&self) -> WriteMode {
        if self.config.serialize_writes {
            WriteMode::Serialized
        } else {
            WriteMode::Unguarded
        }
    }

    /// Open the data file and build the router (useful for testing).
    pub async fn router(&self) -> ServerResult<axum::Router> {
        let store = JsonFileStore::open(&self.config.data_file).await?;
        let catalog = Arc::new(Catalog::with_mode(store, self.write_mode()));
        Ok(if self.config.enable_cors {
            build_router_with_cors(catalog)
        } else {
            build_router(catalog)
        })
    }

    /// Start serving requests until Ctrl+C or SIGTERM.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router().await?;
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        info!(
            addr = %self.config.bind_addr,
            data_file = %self.config.data_file.display(),
            mode = ?self.write_mode(),
            "pizza server listening"
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}

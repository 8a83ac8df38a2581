//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::RestExposure;
use super::host::ServerHost;
use crate::core::{BalanceCalculator, BalanceSource, ProductService};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for creating the product inventory HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(SqliteProductService::new(gateway))
///     .build()?;
/// ```
pub struct ServerBuilder {
    product_service: Option<Arc<dyn ProductService>>,
    balance_source: Option<Arc<dyn BalanceSource>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            product_service: None,
            balance_source: None,
            custom_routes: Vec::new(),
        }
    }

    /// Set the product service (required)
    pub fn with_product_service(mut self, service: impl ProductService + 'static) -> Self {
        self.product_service = Some(Arc::new(service));
        self
    }

    /// Set the source the inventory balance is computed from (required)
    pub fn with_balance_source(mut self, source: impl BalanceSource + 'static) -> Self {
        self.balance_source = Some(Arc::new(source));
        self
    }

    /// Use one store for both CRUD operations and the balance
    pub fn with_store<S>(mut self, store: S) -> Self
    where
        S: ProductService + BalanceSource + 'static,
    {
        let store = Arc::new(store);
        self.product_service = Some(store.clone());
        self.balance_source = Some(store);
        self
    }

    /// Add custom routes to the server
    ///
    /// # Example
    ///
    /// ```ignore
    /// use axum::{Router, routing::get};
    ///
    /// let ops_routes = Router::new().route("/version", get(version_handler));
    ///
    /// ServerBuilder::new()
    ///     .with_store(store)
    ///     .with_custom_routes(ops_routes)
    ///     .build()?;
    /// ```
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(mut self) -> Result<ServerHost> {
        let product_service = self.product_service.take().ok_or_else(|| {
            anyhow::anyhow!("ProductService is required. Call .with_store()")
        })?;
        let balance_source = self.balance_source.take().ok_or_else(|| {
            anyhow::anyhow!("BalanceSource is required. Call .with_store()")
        })?;

        Ok(ServerHost::from_components(
            product_service,
            Arc::new(BalanceCalculator::new(balance_source)),
        ))
    }

    /// Build the final REST router
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);
        Ok(RestExposure::build_router(host, custom_routes))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

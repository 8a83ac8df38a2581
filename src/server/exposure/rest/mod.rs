//! REST API exposure for the product inventory
//!
//! The REST exposure consumes a `ServerHost` and produces an Axum `Router`
//! carrying the health check, the product routes and any custom routes, wrapped
//! in permissive CORS and request tracing.

use super::super::host::ServerHost;
use crate::products::handlers::AppState;
use crate::server::router::build_product_routes;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// # Arguments
    ///
    /// * `host` - The server host holding the product store and balance calculator
    /// * `custom_routes` - Additional custom routes to merge
    ///
    /// # Returns
    ///
    /// Returns a fully configured Axum router with:
    /// - Health check route
    /// - Product CRUD and balance routes
    /// - Custom routes
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Router {
        let state = AppState {
            product_service: host.product_service.clone(),
            balance: host.balance.clone(),
        };

        let mut app = Self::health_routes().merge(build_product_routes(state));

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        // Fully permissive CORS; restrict origins in production
        app.layer(Self::cors_layer()).layer(TraceLayer::new_for_http())
    }

    fn cors_layer() -> CorsLayer {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new().route("/", get(Self::health_check))
    }

    /// Health check endpoint handler; never touches the store
    async fn health_check() -> Json<Value> {
        Json(json!({ "message": "Healthy" }))
    }
}

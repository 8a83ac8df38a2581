//! Integration test infrastructure for storage backends.
//!
//! Builds the production router over any store and drives it through
//! `axum_test::TestServer` (HTTP → handler → ProductService → response).
//!
//! # Architecture
//!
//! ```text
//! axum_test::TestServer
//!     └─ Router (built by build_test_router)
//!         ├─ GET    /                   → health check
//!         ├─ GET    /products           → list_products
//!         ├─ POST   /products           → create_product
//!         ├─ GET    /products/balance   → product_balance
//!         ├─ GET    /products/{id}      → get_product
//!         ├─ PUT    /products/{id}      → update_product
//!         └─ DELETE /products/{id}      → delete_product
//! ```


use axum::Router;
use product_inventory::core::{BalanceSource, ProductService};
use product_inventory::server::ServerBuilder;

/// Build the full REST router over `store`, exactly as the binary does.
pub fn build_test_router<S>(store: S) -> Router
where
    S: ProductService + BalanceSource + 'static,
{
    ServerBuilder::new()
        .with_store(store)
        .build()
        .expect("router should build with a store")
}

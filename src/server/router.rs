//! Router builder utilities for product routes

use crate::products::handlers::{
    AppState, create_product, delete_product, get_product, list_products, product_balance,
    update_product,
};
use axum::{Router, routing::get};

/// Build product routes
///
/// - GET /products - List every product
/// - POST /products - Create a product
/// - GET /products/balance - Total inventory value
/// - GET /products/{id} - Get a product by id
/// - PUT /products/{id} - Partially update a product
/// - DELETE /products/{id} - Delete a product
///
/// `/products/balance` is a static segment, so axum matches it ahead of the
/// `{id}` capture.
pub fn build_product_routes(state: AppState) -> Router {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/balance", get(product_balance))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(state)
}

//! HTTP handlers for product operations
//!
//! Bodies are validated and normalized by the [`Validated`] extractor before a
//! handler runs; `{id}` segments are parsed by [`parse_product_id`]. Any
//! rejection is an [`ApiError`] rendered as a JSON error body.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::validation::validators::parse_product_id;
use crate::core::{
    ApiResult, BalanceCalculator, Product, ProductCreate, ProductService, ProductUpdate,
    Validated,
};

/// Application state shared across product handlers
#[derive(Clone)]
pub struct AppState {
    pub product_service: Arc<dyn ProductService>,
    pub balance: Arc<BalanceCalculator>,
}

/// Response body for `GET /products/balance`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub total_balance: f64,
}

/// GET /products
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Json<Vec<Product>>> {
    let products = state.product_service.list().await?;
    Ok(Json(products))
}

/// POST /products
pub async fn create_product(
    State(state): State<AppState>,
    Validated(new_product): Validated<ProductCreate>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let created = state.product_service.create(new_product).await?;
    tracing::info!(id = created.id, "created product");
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Product>> {
    let id = parse_product_id(&id)?;
    let product = state.product_service.get(id).await?;
    Ok(Json(product))
}

/// PUT /products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Validated(changes): Validated<ProductUpdate>,
) -> ApiResult<Json<Product>> {
    let id = parse_product_id(&id)?;
    let updated = state.product_service.update(id, changes).await?;
    tracing::info!(id, "updated product");
    Ok(Json(updated))
}

/// DELETE /products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_product_id(&id)?;
    state.product_service.delete(id).await?;
    tracing::info!(id, "deleted product");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /products/balance
///
/// Never fails: store errors degrade the value, down to zero.
pub async fn product_balance(State(state): State<AppState>) -> Json<BalanceResponse> {
    let balance = state.balance.compute().await;
    tracing::debug!(total = balance.total, tier = ?balance.tier, "computed inventory balance");
    Json(BalanceResponse {
        total_balance: balance.total,
    })
}

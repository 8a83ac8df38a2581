//! Axum extractor for validated payloads
//!
//! This module provides the `Validated<T>` extractor that deserializes,
//! validates and normalizes request bodies before they reach handlers.

use super::Normalize;
use crate::core::error::{ApiError, ValidationError};
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

/// Axum extractor that yields the normalized form of a request body
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_product(
///     Validated(new_product): Validated<ProductCreate>,
/// ) -> ApiResult<Json<Product>> {
///     // new_product is a NewProduct: validated, trimmed and rounded
/// }
/// ```
pub struct Validated<T: Normalize>(pub T::Output);

impl<T: Normalize> Validated<T> {
    /// Get the normalized payload
    pub fn into_inner(self) -> T::Output {
        self.0
    }
}

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: Normalize + DeserializeOwned + Send,
    T::Output: Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        let normalized = payload.validated()?;
        Ok(Validated(normalized))
    }
}

/// Well-formed JSON of the wrong shape (missing field, fractional quantity, ...)
/// is a validation failure; everything else is a malformed body.
fn rejection_to_error(rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(e) => ValidationError::InvalidPayload {
            message: e.body_text(),
        },
        other => ValidationError::InvalidJson {
            message: other.body_text(),
        },
    }
    .into()
}

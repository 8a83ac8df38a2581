//! Product entity and its transient input models

use crate::core::validation::Normalize;
use crate::core::validation::validators::{
    MAX_NAME_LENGTH, MAX_PRICE, integral, not_blank, optional_integral, round_price, trimmed_name,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A stored product row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned, never reused
    pub id: i64,
    pub name: String,
    /// Always rounded to 2 decimal places
    pub price: f64,
    pub quantity: i64,
}

/// Request body for `POST /products`
///
/// All fields are required. The name is trimmed and the price rounded to
/// 2 decimal places by [`Normalize::normalize`].
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct ProductCreate {
    #[validate(
        length(min = 1, max = MAX_NAME_LENGTH, message = "must be between 1 and 255 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,

    #[validate(range(min = 0.0, max = MAX_PRICE, message = "must be between 0 and 1.4e306"))]
    pub price: f64,

    #[serde(deserialize_with = "integral")]
    #[validate(range(min = 0, message = "must be greater than or equal to 0"))]
    pub quantity: i64,
}

/// Request body for `PUT /products/{id}`
///
/// Omitted fields (or explicit `null`) leave the stored value unchanged.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct ProductUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = MAX_NAME_LENGTH, message = "must be between 1 and 255 characters"),
        custom(function = "not_blank")
    )]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = MAX_PRICE, message = "must be between 0 and 1.4e306"))]
    pub price: Option<f64>,

    #[serde(
        default,
        deserialize_with = "optional_integral",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(range(min = 0, message = "must be greater than or equal to 0"))]
    pub quantity: Option<i64>,
}

/// A validated, normalized product ready to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub quantity: i64,
}

/// A validated, normalized set of changes for an existing product
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
}

impl ProductChanges {
    /// Merge the changes over the current row.
    ///
    /// The result is a complete row: every unset field keeps the value it has
    /// in `current`, so the write that follows always overwrites the whole row.
    pub fn apply_to(&self, current: &Product) -> Product {
        Product {
            id: current.id,
            name: self.name.clone().unwrap_or_else(|| current.name.clone()),
            price: self.price.unwrap_or(current.price),
            quantity: self.quantity.unwrap_or(current.quantity),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.quantity.is_none()
    }
}

impl Normalize for ProductCreate {
    type Output = NewProduct;

    fn normalize(self) -> NewProduct {
        NewProduct {
            name: trimmed_name(&self.name),
            price: round_price(self.price),
            quantity: self.quantity,
        }
    }
}

impl Normalize for ProductUpdate {
    type Output = ProductChanges;

    fn normalize(self) -> ProductChanges {
        ProductChanges {
            name: self.name.as_deref().map(trimmed_name),
            price: self.price.map(round_price),
            quantity: self.quantity,
        }
    }
}

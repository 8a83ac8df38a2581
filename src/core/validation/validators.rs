//! Reusable field validators and normalizers
//!
//! The custom functions here plug into `#[validate(custom(function = ...))]`
//! on the product input models.

use crate::core::error::ValidationError as FieldError;
use serde::de::{self, Deserialize, Deserializer};
use serde_json::Number;
use validator::ValidationError;

/// Upper bound on product name length, in characters
pub const MAX_NAME_LENGTH: u64 = 255;

/// Largest price whose value in cents is still a finite `f64`
pub const MAX_PRICE: f64 = f64::MAX / 128.0;

/// Validator: string must contain something other than whitespace
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Round to 2 decimal places, half away from zero.
///
/// Used for every price written to the store and for the inventory balance.
pub fn round_price(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn trimmed_name(value: &str) -> String {
    value.trim().to_string()
}

fn integral_number<E: de::Error>(number: Number) -> Result<i64, E> {
    if let Some(value) = number.as_i64() {
        return Ok(value);
    }
    match number.as_f64() {
        // i64::MAX as f64 rounds up to 2^63, which is already out of range
        Some(value)
            if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 =>
        {
            Ok(value as i64)
        }
        _ => Err(E::custom(format!(
            "invalid value: {}, expected an integer",
            number
        ))),
    }
}

/// `deserialize_with` helper: accepts integers and integral floats such as `3.0`
pub fn integral<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    integral_number(Number::deserialize(deserializer)?)
}

/// Optional form of [`integral`]; `null` becomes `None`
pub fn optional_integral<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Number>::deserialize(deserializer)?
        .map(integral_number)
        .transpose()
}

/// Parse a `{id}` path segment.
///
/// Only positive integers are product ids; anything else is a validation
/// failure rather than a lookup miss.
pub fn parse_product_id(raw: &str) -> Result<i64, FieldError> {
    match raw.parse::<i64>() {
        Ok(id) if id >= 1 => Ok(id),
        Ok(_) => Err(FieldError::FieldError {
            field: "id".to_string(),
            message: format!("must be greater than or equal to 1 (got {})", raw),
        }),
        Err(_) => Err(FieldError::FieldError {
            field: "id".to_string(),
            message: format!("must be a positive integer (got '{}')", raw),
        }),
    }
}

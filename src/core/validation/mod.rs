//! Validation and normalization of inbound payloads
//!
//! Request bodies are checked with the `validator` derive rules declared on
//! the input models, then normalized (names trimmed, prices rounded) before
//! anything reaches a store.

pub mod extractor;
pub mod validators;

pub use extractor::Validated;

use crate::core::error::ValidationError;
use validator::Validate;

/// Conversion from a checked input model into the form that is written
///
/// `normalize` assumes the value already passed [`Validate::validate`];
/// use [`Normalize::validated`] to run both steps.
pub trait Normalize: Validate + Sized {
    type Output;

    fn normalize(self) -> Self::Output;

    /// Validate, then normalize
    fn validated(self) -> Result<Self::Output, ValidationError> {
        self.validate()?;
        Ok(self.normalize())
    }
}

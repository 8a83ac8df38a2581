//! Core module containing the product model, validation, errors and service traits

pub mod balance;
pub mod error;
pub mod product;
pub mod service;
pub mod validation;

pub use balance::{Balance, BalanceCalculator, BalanceTier};
pub use error::{ApiError, ApiResult, ProductError, StorageError, ValidationError};
pub use product::{NewProduct, Product, ProductChanges, ProductCreate, ProductUpdate};
pub use service::{BalanceSource, ProductService, StockLine};
pub use validation::{Normalize, Validated};

//! Service traits for product storage and the inventory balance

use crate::core::error::{ApiResult, StorageError};
use crate::core::product::{NewProduct, Product, ProductChanges};
use async_trait::async_trait;

/// Service trait for managing products
///
/// Implementations translate each operation into store statements. Inputs are
/// already validated and normalized; implementations only enforce existence.
#[async_trait]
pub trait ProductService: Send + Sync {
    /// List all products ordered by ascending id
    async fn list(&self) -> ApiResult<Vec<Product>>;

    /// Get a product by id
    ///
    /// Fails with `ProductError::NotFound` when no row has that id.
    async fn get(&self, id: i64) -> ApiResult<Product>;

    /// Insert a product and return it with its store-assigned id
    async fn create(&self, product: NewProduct) -> ApiResult<Product>;

    /// Merge `changes` over the current row and overwrite the whole row
    async fn update(&self, id: i64, changes: ProductChanges) -> ApiResult<Product>;

    /// Permanently remove a product
    async fn delete(&self, id: i64) -> ApiResult<()>;
}

/// One `price`/`quantity` pair read back from the store
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StockLine {
    pub price: f64,
    pub quantity: i64,
}

impl StockLine {
    pub fn value(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// Raw store reads backing the inventory balance
///
/// Kept separate from [`ProductService`] so the balance can talk to the store
/// directly, and so each read can be made to fail independently in tests.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    /// Store-side `SUM(price * quantity)`, 0 for an empty store
    async fn aggregate_total(&self) -> Result<f64, StorageError>;

    /// Every row's price and quantity.
    ///
    /// The outer error means the rows could not be read at all; an inner
    /// error marks a single row whose values could not be coerced.
    async fn stock_lines(&self) -> Result<Vec<Result<StockLine, StorageError>>, StorageError>;
}

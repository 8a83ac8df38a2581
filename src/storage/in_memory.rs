//! In-memory implementation of ProductService for testing and development

use crate::core::error::{ApiResult, ProductError, StorageError};
use crate::core::product::{NewProduct, Product, ProductChanges};
use crate::core::service::{BalanceSource, ProductService, StockLine};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Inventory {
    products: BTreeMap<i64, Product>,
    /// Last id handed out; ids are never reused, even after deletes
    last_id: i64,
}

/// In-memory product service implementation
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
/// Ids are assigned from a monotonic counter, mirroring SQLite `AUTOINCREMENT`.
#[derive(Clone, Default)]
pub struct InMemoryProductService {
    inventory: Arc<RwLock<Inventory>>,
}

impl InMemoryProductService {
    /// Create a new, empty in-memory product service
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inventory>, StorageError> {
        self.inventory
            .read()
            .map_err(|e| StorageError::TransactionError {
                message: format!("Failed to acquire read lock: {}", e),
            })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inventory>, StorageError> {
        self.inventory
            .write()
            .map_err(|e| StorageError::TransactionError {
                message: format!("Failed to acquire write lock: {}", e),
            })
    }
}

#[async_trait]
impl ProductService for InMemoryProductService {
    async fn list(&self) -> ApiResult<Vec<Product>> {
        let inventory = self.read()?;
        Ok(inventory.products.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> ApiResult<Product> {
        let inventory = self.read()?;
        Ok(inventory
            .products
            .get(&id)
            .cloned()
            .ok_or(ProductError::NotFound { id })?)
    }

    async fn create(&self, product: NewProduct) -> ApiResult<Product> {
        let mut inventory = self.write()?;
        inventory.last_id += 1;
        let created = Product {
            id: inventory.last_id,
            name: product.name,
            price: product.price,
            quantity: product.quantity,
        };
        inventory.products.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: i64, changes: ProductChanges) -> ApiResult<Product> {
        let mut inventory = self.write()?;
        let current = inventory
            .products
            .get_mut(&id)
            .ok_or(ProductError::NotFound { id })?;
        *current = changes.apply_to(current);
        Ok(current.clone())
    }

    async fn delete(&self, id: i64) -> ApiResult<()> {
        let mut inventory = self.write()?;
        inventory
            .products
            .remove(&id)
            .ok_or(ProductError::NotFound { id })?;
        Ok(())
    }
}

#[async_trait]
impl BalanceSource for InMemoryProductService {
    async fn aggregate_total(&self) -> Result<f64, StorageError> {
        let inventory = self.read()?;
        Ok(inventory
            .products
            .values()
            .map(|p| p.price * p.quantity as f64)
            .sum())
    }

    async fn stock_lines(&self) -> Result<Vec<Result<StockLine, StorageError>>, StorageError> {
        let inventory = self.read()?;
        Ok(inventory
            .products
            .values()
            .map(|p| {
                Ok(StockLine {
                    price: p.price,
                    quantity: p.quantity,
                })
            })
            .collect())
    }
}

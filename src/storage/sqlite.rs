//! SQLite storage backend using sqlx.
//!
//! Provides [`SqliteGateway`], which hands out scoped connection handles, and
//! [`SqliteProductService`], which implements [`ProductService`] and
//! [`BalanceSource`] on top of it.
//!
//! # Feature flag
//!
//! This module is gated behind the `sqlite` feature flag (enabled by default).
//!
//! # Schema
//!
//! A single `products` table. The non-negativity rules enforced by the
//! validation layer are repeated as `CHECK` constraints so rows written by
//! other clients obey them too.

use crate::config::StoreConfig;
use crate::core::error::{ApiResult, ProductError, StorageError};
use crate::core::product::{NewProduct, Product, ProductChanges};
use crate::core::service::{BalanceSource, ProductService, StockLine};
use async_trait::async_trait;
use sqlx::error::{DatabaseError, ErrorKind};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteConnection, SqlitePool, SqlitePoolOptions, SqliteRow,
};
use sqlx::{Row, Sqlite, Transaction};
use std::str::FromStr;
use std::time::Duration;

const PRODUCT_COLUMNS: &str = "SELECT id, name, price, quantity FROM products";

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if is_constraint_violation(&**db) => {
                StorageError::IntegrityError {
                    message: db.to_string(),
                }
            }
            sqlx::Error::Io(_)
            | sqlx::Error::Configuration(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed => StorageError::ConnectionError {
                message: err.to_string(),
            },
            _ => StorageError::QueryError {
                message: err.to_string(),
            },
        }
    }
}

/// SQLITE_CONSTRAINT is primary result code 19; extended codes keep it in the low byte.
fn is_constraint_violation(db: &dyn DatabaseError) -> bool {
    if !matches!(db.kind(), ErrorKind::Other) {
        return true;
    }
    db.code()
        .and_then(|code| code.parse::<i32>().ok())
        .is_some_and(|code| code & 0xff == 19)
}

impl From<sqlx::Error> for crate::core::error::ApiError {
    fn from(err: sqlx::Error) -> Self {
        StorageError::from(err).into()
    }
}

// ---------------------------------------------------------------------------
// Gateway and scoped handles
// ---------------------------------------------------------------------------

/// Owner of the connection pool for one SQLite store
///
/// # Example
///
/// ```rust,ignore
/// let gateway = SqliteGateway::connect(&StoreConfig::new("sqlite:///./products.db"))?;
/// gateway.ensure_schema().await?;
///
/// let mut handle = gateway.acquire().await?;
/// sqlx::query("DELETE FROM products").execute(handle.conn()).await?;
/// handle.commit().await?;
/// ```
#[derive(Clone, Debug)]
pub struct SqliteGateway {
    pool: SqlitePool,
}

impl SqliteGateway {
    /// Build a lazily connecting pool for the store described by `config`.
    ///
    /// The database file is created on first connection if it is missing.
    pub fn connect(config: &StoreConfig) -> Result<Self, StorageError> {
        let mut pool_options =
            SqlitePoolOptions::new().max_connections(config.max_connections.max(1));

        let options = if config.is_in_memory() {
            // Every connection to :memory: is a separate database, so keep
            // exactly one alive for the lifetime of the pool.
            pool_options = pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>);
            SqliteConnectOptions::from_str("sqlite::memory:")?
        } else {
            SqliteConnectOptions::new()
                .filename(config.path())
                .create_if_missing(true)
        };

        tracing::debug!(path = config.path(), "opening sqlite store");
        Ok(Self {
            pool: pool_options.connect_lazy_with(options),
        })
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Acquire a scoped handle over one pooled connection.
    ///
    /// The handle wraps a transaction: call [`StoreHandle::commit`] on success.
    /// Dropping it on any other path rolls back and returns the connection.
    pub async fn acquire(&self) -> Result<StoreHandle, StorageError> {
        let tx = self.pool.begin().await?;
        Ok(StoreHandle { tx })
    }

    /// Acquire a scoped handle for an operation that writes.
    ///
    /// The transaction starts with `BEGIN IMMEDIATE`, taking the write lock up
    /// front. A deferred transaction that reads before writing cannot upgrade
    /// its lock while another writer is active and fails with `SQLITE_BUSY`;
    /// an immediate one waits out the busy timeout instead.
    pub async fn acquire_for_write(&self) -> Result<StoreHandle, StorageError> {
        let tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;
        Ok(StoreHandle { tx })
    }

    /// Create the products table if it does not exist (idempotent).
    ///
    /// Safe to call on every startup.
    pub async fn ensure_schema(&self) -> Result<(), StorageError> {
        let mut handle = self.acquire_for_write().await?;
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS products (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                price REAL NOT NULL CHECK(price >= 0),
                quantity INTEGER NOT NULL CHECK(quantity >= 0)
            )",
        )
        .execute(handle.conn())
        .await?;
        handle.commit().await?;

        tracing::info!("products schema ready");
        Ok(())
    }
}

/// A single store connection scoped to one logical operation
///
/// Never shared between concurrent operations.
pub struct StoreHandle {
    tx: Transaction<'static, Sqlite>,
}

impl StoreHandle {
    /// The underlying connection, for running statements
    pub fn conn(&mut self) -> &mut SqliteConnection {
        &mut self.tx
    }

    /// Commit pending writes and release the connection
    pub async fn commit(self) -> Result<(), StorageError> {
        self.tx
            .commit()
            .await
            .map_err(|e| StorageError::TransactionError {
                message: e.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Row mapping
// ---------------------------------------------------------------------------

fn product_from_row(row: &SqliteRow) -> Result<Product, sqlx::Error> {
    Ok(Product {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        price: row.try_get("price")?,
        quantity: row.try_get("quantity")?,
    })
}

fn stock_line_from_row(row: &SqliteRow) -> Result<StockLine, StorageError> {
    Ok(StockLine {
        price: row.try_get("price")?,
        quantity: row.try_get("quantity")?,
    })
}

async fn fetch_product(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<Product>, sqlx::Error> {
    let sql = format!("{} WHERE id = ?", PRODUCT_COLUMNS);
    let row = sqlx::query(&sql).bind(id).fetch_optional(conn).await?;
    row.as_ref().map(product_from_row).transpose()
}

// ---------------------------------------------------------------------------
// SqliteProductService
// ---------------------------------------------------------------------------

/// Product storage service backed by SQLite.
///
/// Each operation acquires its own [`StoreHandle`]; the existence check and the
/// write of an update or delete run inside the same handle.
///
/// # Example
///
/// ```rust,ignore
/// let gateway = SqliteGateway::connect(&config.store)?;
/// gateway.ensure_schema().await?;
/// let service = SqliteProductService::new(gateway);
/// let product = service.create(new_product).await?;
/// ```
#[derive(Clone, Debug)]
pub struct SqliteProductService {
    gateway: SqliteGateway,
}

impl SqliteProductService {
    pub fn new(gateway: SqliteGateway) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &SqliteGateway {
        &self.gateway
    }
}

#[async_trait]
impl ProductService for SqliteProductService {
    async fn list(&self) -> ApiResult<Vec<Product>> {
        let mut handle = self.gateway.acquire().await?;
        let sql = format!("{} ORDER BY id ASC", PRODUCT_COLUMNS);
        let rows = sqlx::query(&sql).fetch_all(handle.conn()).await?;
        let products = rows
            .iter()
            .map(product_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        handle.commit().await?;
        Ok(products)
    }

    async fn get(&self, id: i64) -> ApiResult<Product> {
        let mut handle = self.gateway.acquire().await?;
        let product = fetch_product(handle.conn(), id)
            .await?
            .ok_or(ProductError::NotFound { id })?;
        handle.commit().await?;
        Ok(product)
    }

    async fn create(&self, product: NewProduct) -> ApiResult<Product> {
        let mut handle = self.gateway.acquire_for_write().await?;
        let result = sqlx::query("INSERT INTO products (name, price, quantity) VALUES (?, ?, ?)")
            .bind(&product.name)
            .bind(product.price)
            .bind(product.quantity)
            .execute(handle.conn())
            .await?;
        let id = result.last_insert_rowid();

        // Re-read so the response reflects exactly what was stored
        let created = fetch_product(handle.conn(), id).await?.ok_or_else(|| {
            StorageError::QueryError {
                message: format!("inserted product {} could not be read back", id),
            }
        })?;
        handle.commit().await?;

        tracing::debug!(id, "product created");
        Ok(created)
    }

    async fn update(&self, id: i64, changes: ProductChanges) -> ApiResult<Product> {
        let mut handle = self.gateway.acquire_for_write().await?;
        let current = fetch_product(handle.conn(), id)
            .await?
            .ok_or(ProductError::NotFound { id })?;
        let merged = changes.apply_to(&current);

        sqlx::query("UPDATE products SET name = ?, price = ?, quantity = ? WHERE id = ?")
            .bind(&merged.name)
            .bind(merged.price)
            .bind(merged.quantity)
            .bind(id)
            .execute(handle.conn())
            .await?;

        let updated = fetch_product(handle.conn(), id)
            .await?
            .ok_or(ProductError::NotFound { id })?;
        handle.commit().await?;

        tracing::debug!(id, "product updated");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> ApiResult<()> {
        let mut handle = self.gateway.acquire_for_write().await?;
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(handle.conn())
            .await?;
        if result.rows_affected() == 0 {
            return Err(ProductError::NotFound { id }.into());
        }
        handle.commit().await?;

        tracing::debug!(id, "product deleted");
        Ok(())
    }
}

#[async_trait]
impl BalanceSource for SqliteProductService {
    async fn aggregate_total(&self) -> Result<f64, StorageError> {
        let mut handle = self.gateway.acquire().await?;
        let row = sqlx::query(
            "SELECT CAST(COALESCE(SUM(price * quantity), 0) AS REAL) AS total FROM products",
        )
        .fetch_one(handle.conn())
        .await?;
        let total: Option<f64> = row.try_get("total")?;
        handle.commit().await?;
        Ok(total.unwrap_or(0.0))
    }

    async fn stock_lines(&self) -> Result<Vec<Result<StockLine, StorageError>>, StorageError> {
        let mut handle = self.gateway.acquire().await?;
        let rows = sqlx::query("SELECT price, quantity FROM products")
            .fetch_all(handle.conn())
            .await?;
        handle.commit().await?;
        Ok(rows.iter().map(stock_line_from_row).collect())
    }
}

//! # Product Inventory
//!
//! A small REST service managing a catalog of products in SQLite, with a
//! total inventory value that keeps answering when the store misbehaves.
//!
//! ## Features
//!
//! - **Product CRUD**: list, get, create, partial update and delete over `/products`
//! - **Validated Input**: names are trimmed, prices rounded to cents, negatives rejected
//! - **Fault-Tolerant Balance**: store aggregate, then a row-by-row sum, then zero
//! - **Scoped Store Access**: every request commits on success and rolls back otherwise
//! - **Pluggable Storage**: SQLite for production, an in-memory store for tests
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use product_inventory::prelude::*;
//!
//! let gateway = SqliteGateway::connect(&StoreConfig::new("sqlite:///./products.db"))?;
//! gateway.ensure_schema().await?;
//!
//! ServerBuilder::new()
//!     .with_store(SqliteProductService::new(gateway))
//!     .serve("0.0.0.0:3001")
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod products;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        ApiError, ApiResult, Balance, BalanceCalculator, BalanceSource, BalanceTier, NewProduct,
        Normalize, Product, ProductChanges, ProductCreate, ProductError, ProductService,
        ProductUpdate, StockLine, StorageError, Validated, ValidationError,
    };

    // === Product Handlers ===
    pub use crate::products::{AppState, BalanceResponse};

    // === Storage ===
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemoryProductService;
    #[cfg(feature = "sqlite")]
    pub use crate::storage::{SqliteGateway, SqliteProductService, StoreHandle};

    // === Config ===
    pub use crate::config::{ConfigError, ServerConfig, ServiceConfig, StoreConfig};

    // === Server ===
    pub use crate::server::{RestExposure, ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};

    // === Axum ===
    pub use axum::{
        Router,
        extract::{Path, State},
        routing::{delete, get, post, put},
    };
}

//! Shared test harness for storage backend testing
//!
//! Provides product fixtures, assertion helpers and the macro-generated
//! suites every backend runs:
//! - `product_service_tests!` for the `ProductService` + `BalanceSource` contract
//! - `rest_integration_tests!` for full HTTP round-trips
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod product_service_tests;

pub mod integration;

use product_inventory::core::{NewProduct, Product, ProductChanges};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Build an already-normalized product ready for `ProductService::create`.
pub fn new_product(name: &str, price: f64, quantity: i64) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        price,
        quantity,
    }
}

/// `Widget`, 2.50 each, 4 in stock (value 10.00)
pub fn widget() -> NewProduct {
    new_product("Widget", 2.5, 4)
}

/// `Gizmo`, 1.00 each, 1 in stock (value 1.00)
pub fn gizmo() -> NewProduct {
    new_product("Gizmo", 1.0, 1)
}

/// Changes touching only the quantity
pub fn quantity_change(quantity: i64) -> ProductChanges {
    ProductChanges {
        quantity: Some(quantity),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Assertions
// ---------------------------------------------------------------------------

/// Assert that a stored product carries the fields of `expected`.
pub fn assert_product_matches(product: &Product, expected: &NewProduct) {
    assert_eq!(product.name, expected.name, "name mismatch for id {}", product.id);
    assert!(
        (product.price - expected.price).abs() < f64::EPSILON,
        "Expected price {}, got {}",
        expected.price,
        product.price
    );
    assert_eq!(
        product.quantity, expected.quantity,
        "quantity mismatch for id {}",
        product.id
    );
}

/// Assert that a list contains exactly `n` items.
pub fn assert_count<T>(list: &[T], expected: usize) {
    assert_eq!(
        list.len(),
        expected,
        "Expected {} items, got {}",
        expected,
        list.len()
    );
}

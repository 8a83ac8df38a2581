//! Macro-generated test suite for the `ProductService` + `BalanceSource` contract.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use product_inventory::storage::InMemoryProductService;
//!
//! product_service_tests!(InMemoryProductService::new());
//! ```
//!
//! # Generated Tests
//!
//! ## CRUD
//! - `test_create_and_get`: create then retrieve, verify all fields
//! - `test_get_nonexistent`: unknown id is `PRODUCT_NOT_FOUND`
//! - `test_list_empty` / `test_list_in_id_order`
//! - `test_update_single_field`: unset fields keep their stored values
//! - `test_update_empty_changes`: returns the row unchanged
//! - `test_update_nonexistent` / `test_delete_nonexistent`
//! - `test_delete_twice`: second delete is `PRODUCT_NOT_FOUND`
//!
//! ## Ids
//! - `test_ids_increase` / `test_ids_not_reused_after_delete`
//!
//! ## Balance
//! - `test_balance_empty_store` / `test_balance_sums_stock`
//! - `test_balance_tracks_updates_and_deletes`
//!
//! ## Concurrency
//! - `test_concurrent_creates`: parallel creates all get distinct ids
//! - `test_concurrent_updates`: parallel updates of one row all succeed

/// Generate a full `ProductService` + `BalanceSource` conformance test suite.
///
/// `$factory` must evaluate to a fresh, empty store implementing both traits
/// plus `Clone + 'static`. It is re-evaluated for each test, and may contain
/// `.await`.
#[macro_export]
macro_rules! product_service_tests {
    ($factory:expr) => {
        mod product_service_contract_tests {
            use super::*;
            use product_inventory::core::{
                ApiError, BalanceCalculator, BalanceTier, ProductChanges, ProductError,
                ProductService,
            };
            use std::sync::Arc;

            fn assert_not_found<T: std::fmt::Debug>(result: Result<T, ApiError>, id: i64) {
                match result {
                    Err(ApiError::Product(ProductError::NotFound { id: missing })) => {
                        assert_eq!(missing, id)
                    }
                    other => panic!("Expected NotFound for id {}, got {:?}", id, other),
                }
            }

            // ==================================================================
            // CRUD: Create & Get
            // ==================================================================

            #[tokio::test]
            async fn test_create_and_get() {
                let service = $factory;
                let input = widget();

                let created = service.create(input.clone()).await.unwrap();
                assert!(created.id >= 1);
                assert_product_matches(&created, &input);

                let retrieved = service.get(created.id).await.unwrap();
                assert_eq!(retrieved, created);
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let service = $factory;
                assert_not_found(service.get(9999).await, 9999);
            }

            // ==================================================================
            // CRUD: List
            // ==================================================================

            #[tokio::test]
            async fn test_list_empty() {
                let service = $factory;
                let all = service.list().await.unwrap();
                assert!(all.is_empty(), "List on empty store should return empty vec");
            }

            #[tokio::test]
            async fn test_list_in_id_order() {
                let service = $factory;
                for i in 0..5 {
                    service
                        .create(new_product(&format!("Item {}", i), 1.0, i))
                        .await
                        .unwrap();
                }

                let all = service.list().await.unwrap();
                assert_count(&all, 5);
                assert!(
                    all.windows(2).all(|pair| pair[0].id < pair[1].id),
                    "list must be ordered by ascending id"
                );
                assert_eq!(all[0].name, "Item 0");
                assert_eq!(all[4].quantity, 4);
            }

            // ==================================================================
            // CRUD: Update
            // ==================================================================

            #[tokio::test]
            async fn test_update_single_field() {
                let service = $factory;
                let created = service.create(widget()).await.unwrap();

                let updated = service
                    .update(created.id, quantity_change(50))
                    .await
                    .unwrap();
                assert_eq!(updated.id, created.id);
                assert_eq!(updated.name, "Widget");
                assert_eq!(updated.price, 2.5);
                assert_eq!(updated.quantity, 50);

                // persisted
                assert_eq!(service.get(created.id).await.unwrap(), updated);
            }

            #[tokio::test]
            async fn test_update_all_fields() {
                let service = $factory;
                let created = service.create(widget()).await.unwrap();

                let updated = service
                    .update(
                        created.id,
                        ProductChanges {
                            name: Some("Sprocket".to_string()),
                            price: Some(7.25),
                            quantity: Some(0),
                        },
                    )
                    .await
                    .unwrap();
                assert_product_matches(&updated, &new_product("Sprocket", 7.25, 0));
            }

            #[tokio::test]
            async fn test_update_empty_changes() {
                let service = $factory;
                let created = service.create(widget()).await.unwrap();

                let updated = service
                    .update(created.id, ProductChanges::default())
                    .await
                    .unwrap();
                assert_eq!(updated, created);
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let service = $factory;
                assert_not_found(service.update(42, quantity_change(1)).await, 42);
            }

            // ==================================================================
            // CRUD: Delete
            // ==================================================================

            #[tokio::test]
            async fn test_delete_existing() {
                let service = $factory;
                let created = service.create(widget()).await.unwrap();

                service.delete(created.id).await.unwrap();
                assert_not_found(service.get(created.id).await, created.id);
                assert!(service.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let service = $factory;
                assert_not_found(service.delete(7).await, 7);
            }

            #[tokio::test]
            async fn test_delete_twice() {
                let service = $factory;
                let created = service.create(widget()).await.unwrap();

                service.delete(created.id).await.unwrap();
                assert_not_found(service.delete(created.id).await, created.id);
            }

            // ==================================================================
            // Ids
            // ==================================================================

            #[tokio::test]
            async fn test_ids_increase() {
                let service = $factory;
                let first = service.create(widget()).await.unwrap();
                let second = service.create(gizmo()).await.unwrap();
                assert!(second.id > first.id);
            }

            #[tokio::test]
            async fn test_ids_not_reused_after_delete() {
                let service = $factory;
                let first = service.create(widget()).await.unwrap();
                let second = service.create(gizmo()).await.unwrap();
                service.delete(second.id).await.unwrap();

                let third = service.create(widget()).await.unwrap();
                assert!(third.id > second.id, "id {} was reused", third.id);
                assert_ne!(third.id, first.id);
            }

            // ==================================================================
            // Balance
            // ==================================================================

            #[tokio::test]
            async fn test_balance_empty_store() {
                let service = $factory;
                let calculator = BalanceCalculator::new(Arc::new(service));

                let balance = calculator.compute().await;
                assert_eq!(balance.total, 0.0);
                assert_eq!(balance.tier, BalanceTier::Aggregate);
            }

            #[tokio::test]
            async fn test_balance_sums_stock() {
                let service = $factory;
                service.create(widget()).await.unwrap();
                service.create(gizmo()).await.unwrap();

                let calculator = BalanceCalculator::new(Arc::new(service.clone()));
                assert_eq!(calculator.total_balance().await, 11.0);
            }

            #[tokio::test]
            async fn test_balance_is_rounded() {
                let service = $factory;
                service.create(new_product("Bolt", 0.33, 3)).await.unwrap();
                service.create(new_product("Nut", 0.1, 7)).await.unwrap();

                let calculator = BalanceCalculator::new(Arc::new(service.clone()));
                assert_eq!(calculator.total_balance().await, 1.69);
            }

            #[tokio::test]
            async fn test_balance_tracks_updates_and_deletes() {
                let service = $factory;
                let widget = service.create(widget()).await.unwrap();
                let gizmo = service.create(gizmo()).await.unwrap();
                let calculator = BalanceCalculator::new(Arc::new(service.clone()));

                service.update(widget.id, quantity_change(10)).await.unwrap();
                assert_eq!(calculator.total_balance().await, 26.0);

                service.delete(gizmo.id).await.unwrap();
                assert_eq!(calculator.total_balance().await, 25.0);
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_creates() {
                let service = $factory;
                let mut handles = Vec::new();

                for i in 0..10 {
                    let svc = service.clone();
                    handles.push(tokio::spawn(async move {
                        svc.create(new_product(&format!("Concurrent {}", i), 1.0, 1))
                            .await
                    }));
                }

                let mut ids = Vec::new();
                for handle in handles {
                    ids.push(handle.await.unwrap().unwrap().id);
                }
                ids.sort_unstable();
                ids.dedup();
                assert_eq!(ids.len(), 10, "every create must get a distinct id");

                assert_count(&service.list().await.unwrap(), 10);
            }

            #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
            async fn test_concurrent_updates() {
                let service = $factory;
                let id = service.create(widget()).await.unwrap().id;
                let mut handles = Vec::new();

                for i in 0..20 {
                    let svc = service.clone();
                    handles.push(tokio::spawn(async move {
                        svc.update(id, quantity_change(i)).await
                    }));
                }

                for handle in handles {
                    let updated = handle.await.unwrap();
                    assert!(updated.is_ok(), "update failed: {:?}", updated);
                }

                let product = service.get(id).await.unwrap();
                assert!((0..20).contains(&product.quantity));
                assert_eq!(product.name, "Widget");
            }
        }
    };
}

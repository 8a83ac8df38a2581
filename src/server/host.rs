//! Server host for transport-agnostic API exposure
//!
//! `ServerHost` holds the state every exposure needs: the product store and
//! the balance calculator reading from it. It knows nothing about HTTP.

use crate::core::{BalanceCalculator, ProductService};
use std::sync::Arc;

/// Host context containing all service state
///
/// # Example
///
/// ```rust,ignore
/// let store = Arc::new(InMemoryProductService::new());
/// let host = ServerHost::from_components(
///     store.clone(),
///     Arc::new(BalanceCalculator::new(store)),
/// );
///
/// let app = RestExposure::build_router(Arc::new(host), vec![]);
/// ```
pub struct ServerHost {
    /// Product store serving CRUD operations
    pub product_service: Arc<dyn ProductService>,

    /// Inventory balance over the same store
    pub balance: Arc<BalanceCalculator>,
}

impl ServerHost {
    /// Build the host from builder components
    pub fn from_components(
        product_service: Arc<dyn ProductService>,
        balance: Arc<BalanceCalculator>,
    ) -> Self {
        Self {
            product_service,
            balance,
        }
    }
}
